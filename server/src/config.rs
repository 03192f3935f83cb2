use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

use provider::models::ENDPOINT;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub menu_api_url: String,
    pub menu_api_key: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            database_url: try_load("DATABASE_URL", "sqlite://dining.db"),
            menu_api_url: try_load("MENU_API_URL", ENDPOINT),
            menu_api_key: read_secret("MENU_API_KEY"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .or_else(|_| var(secret_name))
        .map_err(|_| {
            warn!("Failed to read {secret_name} from file or environment");
        })
        .expect("Secrets misconfigured!")
}
