//! # Store Configuration
//!
//! Settings an application reads once at startup to build its store.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CAREBOOK_*`)
//! 2. Defaults (this file)
//!
//! Invalid environment values are logged and ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::store::{EntityStore, ValidationMode};
use crate::validation::DATE_FORMAT;

/// Environment variable selecting `faithful` or `strict` validation.
pub const ENV_VALIDATION: &str = "CAREBOOK_VALIDATION";

/// Environment variable pinning "today" to a `YYYY-MM-DD` date.
pub const ENV_TODAY: &str = "CAREBOOK_TODAY";

/// A store clock that may be pinned or live.
pub type DynClock = Box<dyn Clock + Send + Sync>;

/// Store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Default: faithful (accept everything).
    pub validation: ValidationMode,

    /// When set, every creation date is this date instead of today.
    pub fixed_today: Option<NaiveDate>,
}

impl StoreConfig {
    /// Builds config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CAREBOOK_VALIDATION`: `faithful` or `strict`
    /// - `CAREBOOK_TODAY`: e.g. `2024-03-15`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(raw) = lookup(ENV_VALIDATION) {
            match raw.parse::<ValidationMode>() {
                Ok(mode) => config.validation = mode,
                Err(reason) => warn!(var = ENV_VALIDATION, %reason, "Ignoring invalid setting"),
            }
        }

        if let Some(raw) = lookup(ENV_TODAY) {
            match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                Ok(date) => config.fixed_today = Some(date),
                Err(err) => warn!(var = ENV_TODAY, value = %raw, error = %err, "Ignoring invalid setting"),
            }
        }

        config
    }

    /// The clock this config calls for.
    pub fn clock(&self) -> DynClock {
        match self.fixed_today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }

    /// Builds an empty store with this config applied.
    pub fn build_store(&self) -> EntityStore<DynClock> {
        EntityStore::with_clock(self.clock()).with_validation(self.validation)
    }
}
