use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

pub const BIND_ENV: &str = "HUEWHEEL_BIND";
pub const OUTPUT_DIR_ENV: &str = "HUEWHEEL_OUTPUT_DIR";

const DEFAULT_BIND: &str = "0.0.0.0:5000";
const DEFAULT_OUTPUT_DIR: &str = "static/palettes";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}'")]
    InvalidBind {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_value = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        let output_dir = lookup(OUTPUT_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self { bind, output_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            (BIND_ENV, "127.0.0.1:8080"),
            (OUTPUT_DIR_ENV, "/tmp/palettes"),
        ]))
        .expect("config");

        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/palettes"));
    }

    #[test]
    fn invalid_bind_is_reported() {
        let err = Config::from_lookup(lookup_from(&[(BIND_ENV, "localhost")]))
            .expect_err("invalid bind");
        assert_eq!(err.to_string(), "invalid bind address 'localhost'");
    }

    #[test]
    fn from_env_reads_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        env::set_var(OUTPUT_DIR_ENV, dir.path());
        struct Reset;
        impl Drop for Reset {
            fn drop(&mut self) {
                env::remove_var(OUTPUT_DIR_ENV);
            }
        }
        let _reset = Reset;

        let config = Config::from_env().expect("config");
        assert_eq!(config.output_dir, dir.path());
    }
}
