//! Environment lookup used for configuration fallback
//!
//! The provider reads the environment through [`EnvReader`] so tests can
//! supply a fixed map instead of mutating the real process environment.

use std::collections::HashMap;

pub trait EnvReader: Send + Sync {
    /// Value of `key`, or None when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvReader for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn map_env_returns_only_configured_keys() {
        let env = MapEnv::new().with("NEODIGIT_ENDPOINT", "https://api.example.com");

        assert_eq!(
            env.var("NEODIGIT_ENDPOINT").as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(env.var("NEODIGIT_API_KEY"), None);
    }

    #[test]
    fn map_env_collects_from_pairs() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.var("B").as_deref(), Some("2"));
    }

    #[test]
    #[serial]
    fn process_env_reads_real_environment() {
        std::env::set_var("NEODIGIT_ENV_READER_TEST", "present");
        assert_eq!(
            ProcessEnv.var("NEODIGIT_ENV_READER_TEST").as_deref(),
            Some("present")
        );

        std::env::remove_var("NEODIGIT_ENV_READER_TEST");
        assert_eq!(ProcessEnv.var("NEODIGIT_ENV_READER_TEST"), None);
    }
}
