//! Credential resolution from the environment
//!
//! Runs before any network call. A missing Shopware client id/secret or a
//! missing/malformed service-account blob is a fatal configuration error.

use crate::Config;
use crate::error::{ConfigError, Result};

/// Secrets needed for one run
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// Raw service-account key JSON (validated as a JSON object)
    pub service_account_json: String,
}

impl Credentials {
    /// Resolve credentials from process environment variables
    pub fn from_env(config: &Config) -> Result<Self> {
        Self::from_lookup(config, |var| std::env::var(var).ok())
    }

    /// Resolve credentials with a custom variable lookup
    pub fn from_lookup<F>(config: &Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &str| -> Result<String> {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::missing_env(var))
        };

        let client_id = require(&config.shopware.client_id_env)?;
        let client_secret = require(&config.shopware.client_secret_env)?;

        let sa_var = &config.google.service_account_env;
        let service_account_json = require(sa_var)?;
        match serde_json::from_str::<serde_json::Value>(&service_account_json) {
            Ok(value) if value.is_object() => {}
            Ok(_) => return Err(ConfigError::invalid_json(sa_var, "expected a JSON object")),
            Err(e) => return Err(ConfigError::invalid_json(sa_var, e.to_string())),
        }

        Ok(Self {
            client_id,
            client_secret,
            service_account_json,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("service_account_json", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(vars: &HashMap<String, String>) -> Result<Credentials> {
        Credentials::from_lookup(&Config::default(), |k| vars.get(k).cloned())
    }

    #[test]
    fn test_all_present() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_ID", "id"),
            ("SHOPWARE_CLIENT_SECRET", "secret"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", r#"{"type": "service_account"}"#),
        ]);
        let creds = resolve(&vars).unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret, "secret");
    }

    #[test]
    fn test_missing_client_id() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_SECRET", "secret"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}"),
        ]);
        let err = resolve(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { ref var } if var == "SHOPWARE_CLIENT_ID"));
    }

    #[test]
    fn test_empty_secret_is_missing() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_ID", "id"),
            ("SHOPWARE_CLIENT_SECRET", "  "),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}"),
        ]);
        let err = resolve(&vars).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnv { ref var } if var == "SHOPWARE_CLIENT_SECRET")
        );
    }

    #[test]
    fn test_missing_service_account() {
        let vars = env(&[("SHOPWARE_CLIENT_ID", "id"), ("SHOPWARE_CLIENT_SECRET", "s")]);
        let err = resolve(&vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv { ref var } if var == "GOOGLE_SERVICE_ACCOUNT_JSON"
        ));
    }

    #[test]
    fn test_invalid_service_account_json() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_ID", "id"),
            ("SHOPWARE_CLIENT_SECRET", "s"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{not json"),
        ]);
        let err = resolve(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[test]
    fn test_service_account_must_be_object() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_ID", "id"),
            ("SHOPWARE_CLIENT_SECRET", "s"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "[1, 2]"),
        ]);
        let err = resolve(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[test]
    fn test_custom_variable_names() {
        let mut config = Config::default();
        config.shopware.client_id_env = "SW_ID".into();
        config.shopware.client_secret_env = "SW_SECRET".into();
        config.google.service_account_env = "SA".into();

        let vars = env(&[("SW_ID", "a"), ("SW_SECRET", "b"), ("SA", "{}")]);
        let creds = Credentials::from_lookup(&config, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.client_id, "a");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let vars = env(&[
            ("SHOPWARE_CLIENT_ID", "id"),
            ("SHOPWARE_CLIENT_SECRET", "hunter2"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", r#"{"private_key": "pk"}"#),
        ]);
        let debug = format!("{:?}", resolve(&vars).unwrap());
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("pk"));
    }
}
