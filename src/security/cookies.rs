// ABOUTME: Session cookie helpers for reading and writing the auth_token cookie
// ABOUTME: Builds HttpOnly SameSite=Lax cookies and their clearing counterpart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use axum::http::{header, HeaderMap, HeaderValue};

/// Read a cookie value from the request headers
///
/// Every `Cookie` header is searched; the first matching pair wins.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
#[must_use]
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!("{name}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie
#[must_use]
pub fn clear_session_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

/// Append a `Set-Cookie` header, skipping values that are not valid header text
pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!("Refusing to send malformed cookie: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; lang=en"),
        );

        assert_eq!(
            get_cookie_value(&headers, "auth_token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(get_cookie_value(&headers, "auth_token"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("auth_token", "tok", 3600, false);
        assert_eq!(
            cookie,
            "auth_token=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
        assert!(session_cookie("auth_token", "tok", 60, true).ends_with("; Secure"));
        assert!(clear_session_cookie("auth_token", false).contains("auth_token=; "));
        assert!(clear_session_cookie("auth_token", false).contains("Max-Age=0"));
    }
}
