//! Bridge configuration.
//!
//! Loaded from JSON. Every field is optional in the file; missing fields take
//! their defaults.
//!
//! ```json
//! {
//!   "service_class": "com.cloudera.impala.service.JniFrontend",
//!   "format": "application/x-febridge-binary",
//!   "max_message_bytes": 268435456,
//!   "init": {
//!     "lazy": true,
//!     "server_name": "server1",
//!     "authorization_policy_file": null,
//!     "sentry_config_file": null,
//!     "authorization_policy_provider_class": null,
//!     "log_level": "INFO"
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use febridge_wire::messages::FrontendInitParams;
use febridge_wire::{BinaryCodec, Format, WireCodec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service class used when none is configured.
pub const DEFAULT_SERVICE_CLASS: &str = "com.cloudera.impala.service.JniFrontend";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service_class must not be empty")]
    EmptyServiceClass,

    #[error("unsupported wire format: {0}")]
    UnsupportedFormat(Format),

    #[error("max_message_bytes must be greater than zero")]
    ZeroMessageLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Fully-qualified name of the frontend service class.
    pub service_class: String,
    /// Wire format both sides use for structured messages.
    pub format: Format,
    /// Upper bound on any single encoded message (binary format only).
    pub max_message_bytes: u64,
    /// Passed to the service constructor.
    pub init: FrontendInitParams,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_class: DEFAULT_SERVICE_CLASS.to_string(),
            format: Format::BINARY,
            max_message_bytes: BinaryCodec::DEFAULT_LIMIT,
            init: FrontendInitParams::default(),
        }
    }
}

impl BridgeConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_class.trim().is_empty() {
            return Err(ConfigError::EmptyServiceClass);
        }
        if !WireCodec::supports(&self.format) {
            return Err(ConfigError::UnsupportedFormat(self.format.clone()));
        }
        if self.max_message_bytes == 0 {
            return Err(ConfigError::ZeroMessageLimit);
        }
        Ok(())
    }
}

impl FromStr for BridgeConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: BridgeConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
