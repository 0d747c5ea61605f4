//! Runtime configuration read from the environment (and `.env`).

use anyhow::{Context, Result};
use std::env;

use crate::storage::SupabaseConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase: SupabaseConfig,
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let supabase = SupabaseConfig::from_env()
            .context("SUPABASE_URL and SUPABASE_ANON_KEY must be set")?;
        let database_url =
            env::var("SUPABASE_DATABASE_URL").context("SUPABASE_DATABASE_URL must be set")?;
        let jwt_secret =
            env::var("SUPABASE_JWT_SECRET").context("SUPABASE_JWT_SECRET must be set")?;

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {}", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or_default();

        Ok(Self {
            supabase,
            database_url,
            jwt_secret,
            host,
            port,
            allowed_origins,
        })
    }
}

/// Split a comma separated origin list, dropping blanks.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
