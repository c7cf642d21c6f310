use std::{env, net::SocketAddr};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub oidc_audience: Option<String>,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: bind_addr.clone(),
            })?;

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RUN_MIGRATIONS",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            oidc_audience: lookup("OIDC_AUDIENCE").filter(|value| !value.is_empty()),
            bind_addr,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(lookup_in(&[
            ("DATABASE_URL", "postgres://localhost/cohort"),
            ("OIDC_ISSUER_URL", "https://idp.example.com/realms/cohort"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.run_migrations);
        assert!(config.oidc_audience.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let result = AppConfig::from_lookup(lookup_in(&[(
            "OIDC_ISSUER_URL",
            "https://idp.example.com",
        )]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_rejects_bad_flags() {
        let result = AppConfig::from_lookup(lookup_in(&[
            ("DATABASE_URL", "postgres://localhost/cohort"),
            ("OIDC_ISSUER_URL", "https://idp.example.com"),
            ("RUN_MIGRATIONS", "sometimes"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "RUN_MIGRATIONS",
                ..
            })
        ));

        let result = AppConfig::from_lookup(lookup_in(&[
            ("DATABASE_URL", "postgres://localhost/cohort"),
            ("OIDC_ISSUER_URL", "https://idp.example.com"),
            ("BIND_ADDR", "localhost"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "BIND_ADDR",
                ..
            })
        ));
    }
}
