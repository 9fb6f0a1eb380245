//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FUNDMATCH_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EXPLAINER_TIMEOUT_SECS, DEFAULT_EXPLANATION_CAPACITY, DEFAULT_EXPLANATION_TTL_SECS,
    DEFAULT_PROMPT_VERSION, DEFAULT_TOP_N,
};

/// Matching configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FUNDMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Matches kept per ranking run. Default: `10`.
    pub top_n: usize,

    /// Scoring worker threads. Default: available parallelism.
    pub workers: usize,

    /// How long a generated explanation stays cached. Default: 24h.
    pub explanation_ttl: Duration,

    /// Max explanations held in memory. Default: `10_000`.
    pub explanation_capacity: u64,

    /// Upper bound on a single Explainer call. Default: 20s.
    pub explainer_timeout: Duration,

    /// Prompt version folded into explanation cache keys. Default: `v1`.
    pub prompt_version: String,

    /// Model name handed to the LLM-backed explainer.
    pub model: String,
}

/// Default model used when `FUNDMATCH_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            workers: default_workers(),
            explanation_ttl: Duration::from_secs(DEFAULT_EXPLANATION_TTL_SECS),
            explanation_capacity: DEFAULT_EXPLANATION_CAPACITY,
            explainer_timeout: Duration::from_secs(DEFAULT_EXPLAINER_TIMEOUT_SECS),
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

impl Config {
    const ENV_TOP_N: &'static str = "FUNDMATCH_TOP_N";
    const ENV_WORKERS: &'static str = "FUNDMATCH_WORKERS";
    const ENV_EXPLANATION_TTL_SECS: &'static str = "FUNDMATCH_EXPLANATION_TTL_SECS";
    const ENV_EXPLANATION_CAPACITY: &'static str = "FUNDMATCH_EXPLANATION_CAPACITY";
    const ENV_EXPLAINER_TIMEOUT_SECS: &'static str = "FUNDMATCH_EXPLAINER_TIMEOUT_SECS";
    const ENV_PROMPT_VERSION: &'static str = "FUNDMATCH_PROMPT_VERSION";
    const ENV_MODEL: &'static str = "FUNDMATCH_MODEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let top_n = Self::parse_number_from_env(Self::ENV_TOP_N, defaults.top_n)?;
        let workers = Self::parse_number_from_env(Self::ENV_WORKERS, defaults.workers)?;
        let ttl_secs = Self::parse_number_from_env(
            Self::ENV_EXPLANATION_TTL_SECS,
            defaults.explanation_ttl.as_secs(),
        )?;
        let explanation_capacity = Self::parse_number_from_env(
            Self::ENV_EXPLANATION_CAPACITY,
            defaults.explanation_capacity,
        )?;
        let timeout_secs = Self::parse_number_from_env(
            Self::ENV_EXPLAINER_TIMEOUT_SECS,
            defaults.explainer_timeout.as_secs(),
        )?;
        let prompt_version =
            Self::parse_string_from_env(Self::ENV_PROMPT_VERSION, defaults.prompt_version);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);

        Ok(Self {
            top_n,
            workers,
            explanation_ttl: Duration::from_secs(ttl_secs),
            explanation_capacity,
            explainer_timeout: Duration::from_secs(timeout_secs),
            prompt_version,
            model,
        })
    }

    /// Rejects zero-valued limits and an empty prompt version.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_TOP_N,
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_WORKERS,
            });
        }
        if self.explanation_ttl.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_EXPLANATION_TTL_SECS,
            });
        }
        if self.explanation_capacity == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_EXPLANATION_CAPACITY,
            });
        }
        if self.explainer_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_EXPLAINER_TIMEOUT_SECS,
            });
        }
        if self.prompt_version.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_PROMPT_VERSION,
            });
        }
        Ok(())
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
