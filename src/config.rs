//! # Connection configuration
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL` or `MONGODB_URL`: MongoDB connection string
//!   (default `mongodb://host.docker.internal:27017/cinema`)
//! - `MONGODB_SERVER_SELECTION_TIMEOUT_MS`: upper bound for the initial connect, in milliseconds
//! - `MONGODB_APP_NAME`: application name reported to the server

use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "mongodb://host.docker.internal:27017/cinema";

/// Options handed through to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Accepted for compatibility with older deployments. Has no effect.
    pub use_new_url_parser: bool,
    pub server_selection_timeout: Option<Duration>,
    pub app_name: Option<String>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            use_new_url_parser: true,
            server_selection_timeout: None,
            app_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    uri: String,
    pub options: DriverOptions,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_DATABASE_URL.to_string(),
            options: DriverOptions::default(),
        }
    }
}

impl ConnectionConfig {
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(ConfigError::EmptyUri);
        }

        Ok(Self {
            uri,
            options: DriverOptions::default(),
        })
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.options.server_selection_timeout = Some(timeout);
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.options.app_name = Some(name.into());
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("DATABASE_URL")
            .or_else(|| lookup("MONGODB_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mut config = Self::new(uri)?;

        if let Some(raw) = lookup("MONGODB_SERVER_SELECTION_TIMEOUT_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config = config.with_server_selection_timeout(Duration::from_millis(millis));
        }

        if let Some(name) = lookup("MONGODB_APP_NAME").filter(|n| !n.is_empty()) {
            config = config.with_app_name(name);
        }

        Ok(config)
    }
}

/// Masks the user-info part of a connection string so it can be logged.
pub fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };

    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    match authority.rsplit_once('@') {
        Some((_, hosts)) => format!("{scheme}://***@{hosts}{tail}"),
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_endpoint() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.uri(), DEFAULT_DATABASE_URL);
        assert!(config.options.use_new_url_parser);
        assert_eq!(config.options.server_selection_timeout, None);
    }

    #[test]
    fn test_database_url_wins_over_mongodb_url() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://a:27017/one"),
            ("MONGODB_URL", "mongodb://b:27017/two"),
        ]))
        .unwrap();
        assert_eq!(config.uri(), "mongodb://a:27017/one");
    }

    #[test]
    fn test_mongodb_url_fallback() {
        let config =
            ConnectionConfig::from_lookup(lookup_from(&[("MONGODB_URL", "mongodb://b:27017/two")]))
                .unwrap();
        assert_eq!(config.uri(), "mongodb://b:27017/two");
    }

    #[test]
    fn test_empty_uri_rejected() {
        assert!(matches!(
            ConnectionConfig::new("  "),
            Err(ConfigError::EmptyUri)
        ));
        assert!(matches!(
            ConnectionConfig::from_lookup(lookup_from(&[("DATABASE_URL", "")])),
            Err(ConfigError::EmptyUri)
        ));
    }

    #[test]
    fn test_timeout_and_app_name() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[
            ("MONGODB_SERVER_SELECTION_TIMEOUT_MS", "250"),
            ("MONGODB_APP_NAME", "cinema"),
        ]))
        .unwrap();
        assert_eq!(
            config.options.server_selection_timeout,
            Some(Duration::from_millis(250))
        );
        assert_eq!(config.options.app_name.as_deref(), Some("cinema"));
    }

    #[test]
    fn test_bad_timeout() {
        let err = ConnectionConfig::from_lookup(lookup_from(&[(
            "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { value } if value == "soon"));
    }

    #[test]
    fn test_redact_uri() {
        assert_eq!(
            redact_uri("mongodb://user:pa@ss@db:27017/cinema?authSource=admin"),
            "mongodb://***@db:27017/cinema?authSource=admin"
        );
        assert_eq!(redact_uri(DEFAULT_DATABASE_URL), DEFAULT_DATABASE_URL);
        assert_eq!(redact_uri("not a uri"), "not a uri");
    }
}
