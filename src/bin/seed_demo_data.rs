// ABOUTME: Demo data seeder for Athlyze dashboards and reports
// ABOUTME: Creates a demo user and fills a number of days with synthetic activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Demo data seeder for Athlyze.
//!
//! Usage:
//! ```bash
//! # Seed 30 days for demo@athlyze.local
//! cargo run --bin seed-demo-data
//!
//! # Seed 60 days for a specific account
//! cargo run --bin seed-demo-data -- --email runner@example.com --days 60
//! ```

use anyhow::Result;
use athlyze::{
    auth::hash_password,
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    intelligence::SuggestionEngine,
    logging,
    models::{ActivityDetails, ActivityKind, NewActivity, Plan, User},
    services::suggestions::{create_welcome_suggestion, generate_suggestions},
};
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Password of the demo account: `DemoUser123!`
const DEMO_USER_PASSWORD: &str = "DemoUser123!";

const WORKOUTS: &[(&str, f64, i64)] = &[
    ("Running", 8.0, 11),
    ("Cycling", 20.0, 8),
    ("Swimming", 1.5, 9),
    ("Strength training", 0.0, 6),
    ("Yoga", 0.0, 4),
];

const MEALS: &[(&str, i64)] = &[
    ("Oatmeal with fruit", 350),
    ("Chicken salad", 520),
    ("Salmon with rice", 680),
    ("Greek yogurt", 180),
    ("Pasta bolognese", 750),
];

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Athlyze Demo Data Seeder",
    long_about = "Populate the database with synthetic activities for dashboard and report testing"
)]
struct SeedArgs {
    /// Email of the demo account (created when missing)
    #[arg(long, default_value = "demo@athlyze.local")]
    email: String,

    /// Number of days of history to generate
    #[arg(long, default_value = "30")]
    days: u32,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Seed for the random generator, for reproducible data
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    logging::init_default()?;

    let config = ServerConfig::from_env()?;
    let url = match args.database_url.as_deref() {
        Some(url) => DatabaseUrl::parse_url(url)?,
        None => config.database.url.clone(),
    };
    if let DatabaseUrl::SQLite { path } = &url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let database = Database::new(&url.to_connection_string()).await?;

    let email = args.email.trim().to_lowercase();
    let user = if let Some(existing) = database.get_user_by_email(&email).await? {
        info!("Reusing demo user {}", existing.email);
        existing
    } else {
        let password_hash = hash_password(DEMO_USER_PASSWORD.to_owned(), config.auth.bcrypt_cost).await?;
        let user = User::new("Demo Athlete".to_owned(), email, password_hash, Plan::Professional);
        database.create_user(&user).await?;
        create_welcome_suggestion(&database, &user).await?;
        info!("Created demo user {} (password: {DEMO_USER_PASSWORD})", user.email);
        user
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let today = Utc::now().date_naive();
    let mut created = 0_usize;

    for days_ago in (0..i64::from(args.days)).rev() {
        let date = today - Duration::days(days_ago);
        for activity in synthetic_day(&mut rng, &user, date, days_ago) {
            database.create_activity(&activity).await?;
            created += 1;
        }
    }
    info!("Inserted {created} activities over {} days", args.days);

    let suggestions = generate_suggestions(&database, &SuggestionEngine::new(), user.id).await?;
    info!("Generated {} suggestions", suggestions.len());

    Ok(())
}

fn synthetic_day(rng: &mut StdRng, user: &User, date: NaiveDate, days_ago: i64) -> Vec<NewActivity> {
    let mut activities = Vec::new();

    // Roughly four workouts a week
    if rng.gen_bool(0.55) {
        let (name, distance, kcal_per_minute) = WORKOUTS[rng.gen_range(0..WORKOUTS.len())];
        let minutes: f64 = rng.gen_range(25.0..75.0_f64).round();
        let details = ActivityDetails {
            duration_minutes: Some(minutes),
            distance_km: (distance > 0.0).then(|| (distance * rng.gen_range(0.7..1.3) * 10.0).round() / 10.0),
            intensity: Some(["low", "moderate", "high"][rng.gen_range(0..3)].to_owned()),
            ..ActivityDetails::default()
        };
        activities.push(NewActivity::new(
            user.id,
            ActivityKind::Exercise,
            name,
            date,
            Some((minutes as i64) * kcal_per_minute),
            details,
        ));
    }

    for _ in 0..rng.gen_range(1..=3) {
        let (name, calories) = MEALS[rng.gen_range(0..MEALS.len())];
        let calories = (calories as f64 * rng.gen_range(0.85..1.15)).round() as i64;
        let details = ActivityDetails {
            protein_g: Some((calories as f64 * 0.075).round()),
            carbs_g: Some((calories as f64 * 0.11).round()),
            fat_g: Some((calories as f64 * 0.035).round()),
            ..ActivityDetails::default()
        };
        activities.push(NewActivity::new(
            user.id,
            ActivityKind::Nutrition,
            name,
            date,
            Some(calories),
            details,
        ));
    }

    // Weekly weigh-in with a slow downward trend
    if days_ago % 7 == 0 {
        let weight = 78.0 - (30 - days_ago.min(30)) as f64 * 0.05 + rng.gen_range(-0.4..0.4);
        let details = ActivityDetails {
            weight_kg: Some((weight * 10.0).round() / 10.0),
            body_fat_pct: Some((rng.gen_range(17.0..20.0_f64) * 10.0).round() / 10.0),
            ..ActivityDetails::default()
        };
        activities.push(NewActivity::new(
            user.id,
            ActivityKind::Measurement,
            "Weekly weigh-in",
            date,
            None,
            details,
        ));
    }

    activities
}
