use crate::utils::AppError;
use std::env;

/// Upper bound for `TOKEN_TTL_HOURS`: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub token_secret: String,
    pub token_ttl_hours: i64,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub payment_currency: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = required(&var, "DATABASE_URL")?;
        let database_name = var("DATABASE_NAME")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| database_name_from_uri(&database_url));

        let token_ttl_hours = parsed(&var, "TOKEN_TTL_HOURS", 24)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(AppError::ConfigError(format!(
                "TOKEN_TTL_HOURS must be between 1 and {}: {}",
                MAX_TOKEN_TTL_HOURS, token_ttl_hours
            )));
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&var, "PORT", 5000)?,
            database_url,
            database_name,
            token_secret: required(&var, "ACCESS_TOKEN_SECRET")?,
            token_ttl_hours,
            stripe_secret_key: required(&var, "STRIPE_SECRET_KEY")?,
            stripe_api_base: var("STRIPE_API_BASE")
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            payment_currency: var("PAYMENT_CURRENCY").unwrap_or_else(|| "usd".to_string()),
            cors_origins: var("CORS_ORIGINS")
                .map(|s| split_origins(&s))
                .unwrap_or_default(),
        })
    }
}

fn required(var: impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    match var(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{} must be set", key))),
    }
}

fn parsed<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} is not a valid number: {}", key, raw))),
        None => Ok(default),
    }
}

/// Database name from the URI path (`mongodb://host/agency?opts`), falling back to `agency`.
fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split("://").nth(1).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, rest)| rest.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or("agency")
        .to_string()
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
