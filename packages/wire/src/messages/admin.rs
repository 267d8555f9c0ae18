//! Configuration lookups, data loading and service initialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::TableName;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetAllHadoopConfigsResponse {
    pub configs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetHadoopConfigRequest {
    pub name: String,
}

impl GetHadoopConfigRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// `value` is unset when the key has no configured value, which is
/// distinct from a key explicitly configured to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetHadoopConfigResponse {
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartitionKeyValue {
    pub name: String,
    pub value: String,
}

/// LOAD DATA INPATH '<source_path>' [OVERWRITE] INTO TABLE <table_name>
/// [PARTITION (...)].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadDataReq {
    pub table_name: TableName,
    /// A single file or a directory of files.
    pub source_path: String,
    pub overwrite: bool,
    pub partition_spec: Option<Vec<PartitionKeyValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadDataResp {
    /// Human-readable summary, e.g. how many files were moved.
    pub load_summary: String,
    pub files_loaded: i64,
}

/// Arguments passed to the service constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendInitParams {
    /// Load catalog metadata on first use instead of at startup.
    pub lazy: bool,
    pub server_name: String,
    pub authorization_policy_file: Option<String>,
    pub sentry_config_file: Option<String>,
    pub authorization_policy_provider_class: Option<String>,
    pub log_level: String,
}

impl Default for FrontendInitParams {
    fn default() -> Self {
        Self {
            lazy: true,
            server_name: "server1".to_string(),
            authorization_policy_file: None,
            sentry_config_file: None,
            authorization_policy_provider_class: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl FrontendInitParams {
    /// Whether the service will enforce authorization.
    pub fn authorization_enabled(&self) -> bool {
        self.authorization_policy_file.is_some() || self.sentry_config_file.is_some()
    }
}
