use std::env;
use std::str::FromStr;
use anyhow::{anyhow, Context, Result};
use simplelog::LevelFilter;

const DEFAULT_CREDITS_HINT: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LevelFilter,
    // Shown next to the credits field. Not enforced by the ledger.
    pub credits_hint: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config { log_level: LevelFilter::Info, credits_hint: DEFAULT_CREDITS_HINT }
    }
}

impl Config {
    // Reads CGPA_* variables from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(level) = lookup("CGPA_LOG_LEVEL") {
            config.log_level = LevelFilter::from_str(level.trim())
                .map_err(|_| anyhow!("'{}' is not a log level", level))
                .context("Invalid CGPA_LOG_LEVEL")?;
        }

        if let Some(hint) = lookup("CGPA_CREDITS_HINT") {
            let hint: f64 = hint.trim().parse().context("Invalid CGPA_CREDITS_HINT")?;
            if !hint.is_finite() || hint <= 0.0 {
                return Err(anyhow!("CGPA_CREDITS_HINT must be a positive number, got {}", hint));
            }
            config.credits_hint = hint;
        }

        Ok(config)
    }
}
