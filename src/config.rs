use dotenv::dotenv;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub log_level: String,
    /// Floor applied to new groups when no explicit value is given.
    pub default_min_floor: Decimal,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            default_min_floor: env::var("DEFAULT_MIN_FLOOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(dec!(2000.00)),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
