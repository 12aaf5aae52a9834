use std::{env, fs::read_to_string, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::error::JammerError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_CONFIG_FILE: &str = "jammer.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
    pub poll_interval: Duration,
}

/// Shape of the optional TOML file. Every key may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

impl Config {
    /// Reads the file at `path` (or `jammer.toml` when present), then applies
    /// `JAMMER_*` environment variables and finally `overrides`.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, JammerError> {
        let file = match path {
            Some(path) => parse_file(&read_to_string(path)?)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Reading {DEFAULT_CONFIG_FILE}");
                parse_file(&read_to_string(DEFAULT_CONFIG_FILE)?)?
            }
            None => FileConfig::default(),
        };

        Self::resolve(file, var, overrides)
    }

    pub fn resolve<F>(file: FileConfig, env: F, overrides: Overrides) -> Result<Self, JammerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_poll = match env("JAMMER_POLL_INTERVAL_MS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                JammerError::Config(format!("JAMMER_POLL_INTERVAL_MS={raw}: {e}"))
            })?),
            None => None,
        };

        let base_url = overrides
            .base_url
            .or_else(|| env("JAMMER_BASE_URL"))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let poll_interval_ms = overrides
            .poll_interval_ms
            .or(env_poll)
            .or(file.poll_interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        if poll_interval_ms == 0 {
            return Err(JammerError::Config(
                "poll interval must be at least 1 ms".to_string(),
            ));
        }

        Ok(Config {
            base_url: normalize_base_url(&base_url)?,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

fn parse_file(contents: &str) -> Result<FileConfig, JammerError> {
    Ok(toml::from_str(contents)?)
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .map_err(|e| {
            if let env::VarError::NotUnicode(_) = e {
                warn!("Ignoring non-unicode value of {key}");
            }
        })
        .ok()
}

// Relative joins drop the last path segment unless it ends with a slash.
fn normalize_base_url(raw: &str) -> Result<Url, JammerError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw)?;
    if url.cannot_be_a_base() {
        return Err(JammerError::Config(format!("{raw} cannot be a base url")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::resolve(FileConfig::default(), no_env, Overrides::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = parse_file("base_url = \"http://file.example\"\npoll_interval_ms = 10").unwrap();
        let env = |key: &str| match key {
            "JAMMER_BASE_URL" => Some("http://env.example".to_string()),
            "JAMMER_POLL_INTERVAL_MS" => Some("20".to_string()),
            _ => None,
        };
        let overrides = Overrides {
            base_url: Some("http://cli.example/jammer".to_string()),
            poll_interval_ms: None,
        };

        let config = Config::resolve(file, env, overrides).unwrap();
        assert_eq!(config.base_url.as_str(), "http://cli.example/jammer/");
        assert_eq!(config.poll_interval, Duration::from_millis(20));
    }

    #[test]
    fn file_values_used_without_env() {
        let file = parse_file("poll_interval_ms = 250").unwrap();
        let config = Config::resolve(file, no_env, Overrides::default()).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let overrides = Overrides {
            base_url: None,
            poll_interval_ms: Some(0),
        };
        let err = Config::resolve(FileConfig::default(), no_env, overrides).unwrap_err();
        assert!(matches!(err, JammerError::Config(_)));
    }

    #[test]
    fn garbage_env_interval_is_rejected() {
        let env = |key: &str| (key == "JAMMER_POLL_INTERVAL_MS").then(|| "soon".to_string());
        let err = Config::resolve(FileConfig::default(), env, Overrides::default()).unwrap_err();
        assert!(matches!(err, JammerError::Config(_)));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(matches!(
            parse_file("volume = 3"),
            Err(JammerError::ConfigParse(_))
        ));
    }
}
