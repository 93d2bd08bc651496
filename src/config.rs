use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::{error::Error, external::wikipedia::DEFAULT_API_BASE, store::SAVE_FILE_NAME};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub directory_api_base: String,
    pub listen_addr: SocketAddr,
    pub http_timeout: Duration,
    pub max_concurrent_fetches: usize,
    pub auth_command: Option<String>,
}

impl Config {
    /// Reads `BUCKETLIST_*` variables from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = var("BUCKETLIST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let directory_api_base =
            var("BUCKETLIST_DIRECTORY_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into());

        let listen_addr = parse(
            "BUCKETLIST_LISTEN_ADDR",
            var("BUCKETLIST_LISTEN_ADDR").as_deref().unwrap_or(DEFAULT_LISTEN_ADDR),
        )?;

        let http_timeout = match var("BUCKETLIST_HTTP_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("BUCKETLIST_HTTP_TIMEOUT_SECS", &value)?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let max_concurrent_fetches = match var("BUCKETLIST_MAX_CONCURRENT_FETCHES") {
            Some(value) => parse("BUCKETLIST_MAX_CONCURRENT_FETCHES", &value)?,
            None => DEFAULT_MAX_CONCURRENT_FETCHES,
        };
        if max_concurrent_fetches == 0 {
            tracing::warn!("BUCKETLIST_MAX_CONCURRENT_FETCHES must be at least 1");
            return Err(Error::invalid_input_error());
        }

        Ok(Config {
            data_dir,
            directory_api_base,
            listen_addr,
            http_timeout,
            max_concurrent_fetches,
            auth_command: var("BUCKETLIST_AUTH_COMMAND"),
        })
    }

    pub fn save_path(&self) -> PathBuf {
        self.data_dir.join(SAVE_FILE_NAME)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| {
        tracing::warn!(key, value, "unparseable configuration value");
        Error::invalid_input_error()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.directory_api_base, "https://en.wikipedia.org");
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.max_concurrent_fetches, 8);
        assert_eq!(config.auth_command, None);
        assert_eq!(config.save_path(), PathBuf::from("./SavedPlaces"));
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BUCKETLIST_DATA_DIR", "/var/lib/bucketlist"),
            ("BUCKETLIST_DIRECTORY_API_BASE", "http://localhost:9000"),
            ("BUCKETLIST_LISTEN_ADDR", "0.0.0.0:8080"),
            ("BUCKETLIST_HTTP_TIMEOUT_SECS", "5"),
            ("BUCKETLIST_MAX_CONCURRENT_FETCHES", "2"),
            ("BUCKETLIST_AUTH_COMMAND", "fprintd-verify"),
        ])
        .unwrap();

        assert_eq!(
            config.save_path(),
            PathBuf::from("/var/lib/bucketlist/SavedPlaces")
        );
        assert_eq!(config.directory_api_base, "http://localhost:9000");
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.max_concurrent_fetches, 2);
        assert_eq!(config.auth_command.as_deref(), Some("fprintd-verify"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("BUCKETLIST_AUTH_COMMAND", "  ")]).unwrap();

        assert_eq!(config.auth_command, None);
    }

    #[test]
    fn bad_values_are_invalid_input() {
        let err = config_from(&[("BUCKETLIST_LISTEN_ADDR", "not an address")]).unwrap_err();
        assert!(err.is_invalid_input_error());

        let err = config_from(&[("BUCKETLIST_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.is_invalid_input_error());

        let err = config_from(&[("BUCKETLIST_MAX_CONCURRENT_FETCHES", "0")]).unwrap_err();
        assert!(err.is_invalid_input_error());
    }
}
