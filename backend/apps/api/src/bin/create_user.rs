//! Seed a user account
//!
//! `create-user --name <name> --email <email> --password <password>`

use anyhow::Context;
use api::config::password_cost_from_lookup;
use auth::application::{CreateUserInput, CreateUserUseCase};
use auth::{AppError, PgUserRepository};
use clap::Parser;
use platform::password::Argon2Hasher;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "create-user", version, about = "Create an Origo user account")]
struct Cli {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email (stored exactly as given)
    #[arg(long)]
    email: String,

    /// Plain-text password, at least 6 characters
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let password_cost = password_cost_from_lookup(&|key: &str| std::env::var(key).ok())?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let hasher = Arc::new(Argon2Hasher::new(password_cost)?);
    let use_case = CreateUserUseCase::new(Arc::new(PgUserRepository::new(pool)), hasher);

    let user = use_case
        .execute(CreateUserInput {
            name: cli.name,
            email: cli.email,
            password: cli.password,
        })
        .await
        .map_err(|e| {
            let app_error: AppError = e.into_app_error();
            anyhow::anyhow!("{app_error}")
        })?;

    println!("Created user {} <{}> with id {}", user.name, user.email, user.id);

    Ok(())
}
