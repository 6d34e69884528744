// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing for `testgate.toml`.

pub mod defaults;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Only supported config version.
pub const VERSION: i64 = 1;

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config format version (must be 1).
    pub version: i64,

    /// Target package pattern.
    #[serde(default = "defaults::pattern")]
    pub pattern: String,

    #[serde(default)]
    pub vet: VetConfig,

    #[serde(default)]
    pub tests: TestsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: VERSION,
            pattern: defaults::pattern(),
            vet: VetConfig::default(),
            tests: TestsConfig::default(),
        }
    }
}

/// `[vet]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VetConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,
}

impl Default for VetConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
        }
    }
}

/// `[tests]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestsConfig {
    /// Deadline for the whole `go test` run.
    #[serde(
        default = "defaults::test_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub timeout: Duration,

    /// Go toolchain binary.
    #[serde(default = "defaults::go")]
    pub go: String,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            timeout: defaults::test_timeout(),
            go: defaults::go(),
        }
    }
}

/// Parse config from TOML content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.version != VERSION {
        return Err(Error::Config {
            path: path.to_path_buf(),
            message: format!(
                "unsupported config version {} (expected {})",
                config.version, VERSION
            ),
        });
    }
    if config.pattern.trim().is_empty() {
        return Err(Error::Config {
            path: path.to_path_buf(),
            message: "pattern must not be empty".to_string(),
        });
    }
    Ok(config)
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&content, path)
}

/// Parse a duration such as `500ms`, `30s`, `10m` or `1h`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in duration {:?} (use ms, s, m or h)", s))?;
    let (value, unit) = s.split_at(split);
    let value: u64 = value
        .parse()
        .map_err(|_| format!("invalid duration {:?}", s))?;
    let secs = |scale: u64| {
        value
            .checked_mul(scale)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration {:?} is too large", s))
    };
    let duration = match unit {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => secs(60)?,
        "h" => secs(3600)?,
        _ => return Err(format!("unknown unit {:?} in duration {:?}", unit, s)),
    };
    if duration.is_zero() {
        return Err(format!("duration {:?} must be positive", s));
    }
    Ok(duration)
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
