use std::env;
use std::str::FromStr;

use actix_web::cookie::Key;

const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub workers: usize,

    // Session cookie signing; must be at least 64 bytes to be used
    pub session_secret: Option<String>,
    pub session_ttl_hours: i64,

    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "chat.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 2,
            session_secret: None,
            session_ttl_hours: 12,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("invalid value {raw:?} for {name}, using default");
            default
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            workers: parse_or("WORKERS", lookup("WORKERS"), defaults.workers),
            session_secret: lookup("SESSION_SECRET"),
            session_ttl_hours: parse_or(
                "SESSION_TTL_HOURS",
                lookup("SESSION_TTL_HOURS"),
                defaults.session_ttl_hours,
            ),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.allowed_origins),
        }
    }

    /// Signing key for session cookies. Falls back to a random key, which
    /// signs everyone out on restart.
    pub fn session_key(&self) -> Key {
        match self.session_secret.as_deref().map(str::as_bytes) {
            Some(secret) if secret.len() >= 64 => Key::from(secret),
            Some(_) => {
                log::warn!("SESSION_SECRET shorter than 64 bytes; using a random session key");
                Key::generate()
            }
            None => {
                log::warn!("SESSION_SECRET not set; using a random session key");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "chat.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl_hours, 12);
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "/tmp/test.db"),
            ("PORT", "9000"),
            ("WORKERS", "4"),
            ("ALLOWED_ORIGINS", "https://chat.example, ,https://admin.example"),
        ]);
        assert_eq!(config.database_url, "/tmp/test.db");
        assert_eq!(config.port, 9000);
        assert_eq!(config.workers, 4);
        assert_eq!(
            config.allowed_origins,
            vec!["https://chat.example", "https://admin.example"]
        );
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("SESSION_TTL_HOURS", "-")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl_hours, 12);
    }

    #[test]
    fn long_secret_gives_stable_key() {
        let secret = "s".repeat(64);
        let config = config_from(&[("SESSION_SECRET", secret.as_str())]);
        assert_eq!(config.session_key().master(), config.session_key().master());
    }
}
