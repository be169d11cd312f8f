//! Process-wide client configuration.
//!
//! The base URL is resolved once at startup and handed to `ExpenseClient`
//! explicitly; nothing in the core reads the environment per call.

use tracing::warn;

/// Environment variable holding the service base URL.
pub const BASE_URL_VAR: &str = "EXPENSE_API_BASE_URL";

/// Used when `EXPENSE_API_BASE_URL` is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through `lookup`, falling back to the
    /// defaults for anything missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => {
                warn!("{BASE_URL_VAR} not set, using {DEFAULT_BASE_URL}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_value_is_used() {
        let config = ClientConfig::from_lookup(|key| {
            (key == BASE_URL_VAR).then(|| "https://expenses.example".to_string())
        });
        assert_eq!(config.base_url, "https://expenses.example");
    }

    #[test]
    fn missing_value_falls_back_to_default() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
