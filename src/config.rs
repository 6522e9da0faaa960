//! Service configuration read from `GASOFILACO_*` environment variables.

use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory scanned for denomination set JSON files
    #[serde(default = "default_denominations_dir")]
    pub denominations_dir: PathBuf,

    /// Currency whose denomination set is offered for counting
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Largest amount accepted for a single collection
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_denominations_dir() -> PathBuf {
    PathBuf::from("denominations")
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_max_amount() -> Decimal {
    crate::validator::MAX_AMOUNT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
            denominations_dir: default_denominations_dir(),
            currency: default_currency(),
            max_amount: default_max_amount(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("GASOFILACO"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
