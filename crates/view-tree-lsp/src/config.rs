//! Editor-provided settings.
//!
//! Read from `initializationOptions` on startup and from
//! `workspace/didChangeConfiguration` afterwards. Either the settings object
//! itself or one nested under a `viewTree` key is accepted:
//!
//! ```json
//! { "viewTree": { "scanOnStartup": true, "maxTsFiles": 100, "trace": { "server": "verbose" } } }
//! ```

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewTreeSettings {
    /// Index the workspace once the client reports `initialized`.
    pub scan_on_startup: bool,
    /// Upper bound on `.ts` files read during a scan.
    pub max_ts_files: usize,
    pub trace: TraceSettings,
}

impl Default for ViewTreeSettings {
    fn default() -> Self {
        Self {
            scan_on_startup: true,
            max_ts_files: 100,
            trace: TraceSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    pub server: TraceLevel,
}

/// How much the server mirrors to the editor's output channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    #[default]
    Off,
    Messages,
    Verbose,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid viewTree settings: {0}")]
    Invalid(#[from] serde_json::Error),
}

impl ViewTreeSettings {
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let section = value.get("viewTree").unwrap_or(value);
        if section.is_null() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(section)?)
    }

    /// Like [`ViewTreeSettings::from_value`], but invalid or missing settings
    /// fall back to the defaults.
    pub fn from_value_or_default(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        Self::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default settings");
            Self::default()
        })
    }
}
