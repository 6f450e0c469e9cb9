// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf, str::FromStr};

use jiff::tz::TimeZone;

use crate::util::{ArgOutputFormat, parse_time_zone};

pub const APP_NAME: &str = "recurcal";

const RECUR_CONFIG_ENV: &str = "RECUR_CONFIG";

const DEFAULT_LIMIT: usize = 20;

/// Load the configuration.
///
/// An explicit path wins over `RECUR_CONFIG`, which wins over the file in the
/// user config directory. Only the last one may be missing.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(RECUR_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let Some(dir) = dirs::config_dir() else {
            tracing::debug!("no user config directory, using defaults");
            return Ok(Config::default());
        };
        let config = dir.join(APP_NAME).join("config.toml");
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the recur command.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for `recur expand`
    pub expand: ExpandConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        if let Some(tz) = &config.expand.timezone {
            parse_time_zone(tz).map_err(|e| format!("Invalid timezone in config: {e}"))?;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandConfig {
    /// Number of occurrences printed when `--limit` is not given
    pub limit: usize,

    /// IANA name or fixed offset used when `--tz` is not given
    pub timezone: Option<String>,

    /// Output format used when `--format` is not given
    pub format: ArgOutputFormat,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            timezone: None,
            format: ArgOutputFormat::default(),
        }
    }
}

impl ExpandConfig {
    /// The configured time zone, UTC when unset.
    pub fn time_zone(&self) -> Result<TimeZone, Box<dyn Error>> {
        match &self.timezone {
            Some(tz) => parse_time_zone(tz),
            None => Ok(TimeZone::UTC),
        }
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_config(dir: &TempDir, name: &str, limit: usize) -> PathBuf {
        let path = dir.path().join(name);
        let content = format!(
            r#"
[expand]
limit = {limit}
"#
        );
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = r#"
[expand]
limit = 5
timezone = "Asia/Shanghai"
format = "rfc3339"
"#
        .parse()
        .unwrap();
        assert_eq!(config.expand.limit, 5);
        assert_eq!(config.expand.format, ArgOutputFormat::Rfc3339);
        let tz = config.expand.time_zone().unwrap();
        assert_eq!(tz.iana_name(), Some("Asia/Shanghai"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.expand.limit, DEFAULT_LIMIT);
        assert_eq!(config.expand.format, ArgOutputFormat::Ical);
        assert_eq!(config.expand.time_zone().unwrap().iana_name(), Some("UTC"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!("[expand]\ntimezone = \"Mars/Base\"".parse::<Config>().is_err());
        assert!("[expand]\nformat = \"yaml\"".parse::<Config>().is_err());
        assert!("[expand]\ncount = 3".parse::<Config>().is_err());
    }

    #[test]
    fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let cli_path = write_config(&temp_dir, "cli.toml", 3);
        let env_path = write_config(&temp_dir, "env.toml", 7);

        let _guard = env_lock();
        unsafe {
            std::env::set_var(RECUR_CONFIG_ENV, &env_path);
        }

        let config = parse_config(Some(cli_path)).unwrap();
        assert_eq!(config.expand.limit, 3);

        let config = parse_config(None).unwrap();
        assert_eq!(config.expand.limit, 7);

        unsafe {
            std::env::remove_var(RECUR_CONFIG_ENV);
        }
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let _guard = env_lock();
        let err = parse_config(Some(missing)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
