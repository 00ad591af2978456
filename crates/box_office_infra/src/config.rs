//! Runtime configuration with documented defaults.
//!
//! Settings that have a default here are applied when missing. A setting
//! without a default fails closed with `MissingConfigError`.
//!
//! Prices, seat allocation and the 20-ticket cap are business rules fixed in
//! `box_office_core`; none of them is configurable.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discounts::{CatalogError, DiscountCatalog};

/// Every runtime setting understood by the box office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    LogFilter,
    /// `"plain"` or `"json"` log output.
    LogFormat,
    /// Path of the JSON config file. No default: callers must supply it.
    ConfigPath,
}

/// Error when a required parameter is missing and has no default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("config fail-closed: '{param_name}' is missing and has no default ({reason})")]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

/// Default value for a parameter, or `None` if it must be supplied.
pub fn param_default(param: ConfigParam) -> Option<&'static str> {
    match param {
        ConfigParam::LogFilter => Some("info"),
        ConfigParam::LogFormat => Some("plain"),
        ConfigParam::ConfigPath => None,
    }
}

/// snake_case name of a parameter, as it appears in config files.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::LogFilter => "log_filter",
        ConfigParam::LogFormat => "log_format",
        ConfigParam::ConfigPath => "config_path",
    }
}

pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::LogFilter,
    ConfigParam::LogFormat,
    ConfigParam::ConfigPath,
];

/// Resolve a parameter: the supplied value wins, then the default; with
/// neither, fail closed.
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<&str>,
) -> Result<String, MissingConfigError> {
    if let Some(v) = value {
        return Ok(v.to_string());
    }
    match param_default(param) {
        Some(default) => Ok(default.to_string()),
        None => Err(MissingConfigError {
            param_name: param_name(param),
            reason: "no default; caller must supply a value",
        }),
    }
}

// ─── File config ────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log format '{0}' (expected \"plain\" or \"json\")")]
    UnknownLogFormat(String),
    #[error("invalid discount catalog")]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Missing(#[from] MissingConfigError),
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_string(ConfigParam::LogFilter),
            json: default_string(ConfigParam::LogFormat) == "json",
        }
    }
}

impl LoggingConfig {
    /// Build from loose values, e.g. environment variables.
    pub fn from_values(filter: Option<&str>, format: Option<&str>) -> Result<Self, ConfigError> {
        let filter = resolve_config_value(ConfigParam::LogFilter, filter)?;
        let format = resolve_config_value(ConfigParam::LogFormat, format)?;
        let json = match format.as_str() {
            "plain" => false,
            "json" => true,
            _ => return Err(ConfigError::UnknownLogFormat(format)),
        };
        Ok(Self { filter, json })
    }
}

fn default_string(param: ConfigParam) -> String {
    param_default(param).unwrap_or_default().to_string()
}

/// One discount code. Without `account_id` the code is valid for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscountEntry {
    pub code: String,
    #[serde(default)]
    pub account_id: Option<i64>,
    /// Fraction taken off, in `[0, 1]`. Strings such as `"0.25"` keep it exact.
    pub fraction: Decimal,
}

/// Top-level config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoxOfficeConfig {
    pub logging: LoggingConfig,
    pub discounts: Vec<DiscountEntry>,
}

impl BoxOfficeConfig {
    /// Parse and validate. Discount fractions are checked here, so a loaded
    /// config always yields a catalog.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BoxOfficeConfig = serde_json::from_str(json)?;
        DiscountCatalog::from_entries(&config.discounts)?;
        Ok(config)
    }

    pub fn discount_catalog(&self) -> Result<DiscountCatalog, CatalogError> {
        DiscountCatalog::from_entries(&self.discounts)
    }
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<BoxOfficeConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = BoxOfficeConfig::from_json_str(&raw)?;
    tracing::debug!(
        path = %path.display(),
        discounts = config.discounts.len(),
        "loaded box office config"
    );
    Ok(config)
}

/// Read the config file named by `path`, failing closed when it is absent.
pub fn load_config_from(path: Option<&str>) -> Result<BoxOfficeConfig, ConfigError> {
    let path = resolve_config_value(ConfigParam::ConfigPath, path)?;
    load_config(Path::new(&path))
}
