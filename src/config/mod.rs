use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::SecurityHeadersLayer;

use crate::services::checkout::DEFAULT_PAYMENT_WINDOW_MINUTES;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub payment_window_minutes: i64,
    pub seed_demo_data: bool,
    pub production: bool,
    pub cors_allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            payment_window_minutes: DEFAULT_PAYMENT_WINDOW_MINUTES,
            seed_demo_data: true,
            production: false,
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, fallback: T) -> T
where
    T: FromStr,
{
    match raw {
        None => fallback,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %value, "Ignoring unparseable setting");
            fallback
        }),
    }
}

fn parse_flag(key: &str, raw: Option<String>, fallback: bool) -> bool {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => fallback,
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!(key, value = %v, "Ignoring unparseable flag");
            fallback
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), defaults.bind_addr);
        let payment_window_minutes = parse_or(
            "PAYMENT_WINDOW_MINUTES",
            lookup("PAYMENT_WINDOW_MINUTES"),
            defaults.payment_window_minutes,
        )
        .max(1);

        Self {
            bind_addr,
            payment_window_minutes,
            seed_demo_data: parse_flag(
                "SEED_DEMO_DATA",
                lookup("SEED_DEMO_DATA"),
                defaults.seed_demo_data,
            ),
            production: lookup("RUST_ENV")
                .map(|v| v.trim().eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
        }
    }

    pub fn payment_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.payment_window_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.bind_addr, "0.0.0.0:3001".parse().unwrap());
        assert_eq!(config.payment_window(), chrono::Duration::hours(2));
        assert!(config.seed_demo_data);
        assert!(!config.production);
        assert_eq!(config.cors_allowed_origins, DEFAULT_ALLOWED_ORIGINS);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PAYMENT_WINDOW_MINUTES", "30"),
            ("SEED_DEMO_DATA", "off"),
            ("RUST_ENV", "Production"),
        ]));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.payment_window_minutes, 30);
        assert!(!config.seed_demo_data);
        assert!(config.production);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "not-an-address"),
            ("PAYMENT_WINDOW_MINUTES", "-5"),
            ("SEED_DEMO_DATA", "maybe"),
        ]));
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.payment_window_minutes, 1);
        assert!(config.seed_demo_data);
    }
}
