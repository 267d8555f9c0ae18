//! Query compilation: query context in, execution request out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::admin::LoadDataReq;
use super::catalog::CatalogObjectType;
use super::results::ResultSetMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NetworkAddress {
    pub hostname: String,
    pub port: i32,
}

impl NetworkAddress {
    pub fn new(hostname: impl Into<String>, port: i32) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }
}

/// The identity and defaults of a client session.
///
/// Passed as an optional argument to metadata operations so the service can
/// filter results to what the user may see. Internal callers pass none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    /// Default database of the session.
    pub database: String,
    pub connected_user: String,
    /// Set when the connected user runs statements on behalf of another.
    pub delegated_user: Option<String>,
    pub network_address: NetworkAddress,
}

impl SessionState {
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            connected_user: user.into(),
            database: "default".to_string(),
            ..Default::default()
        }
    }

    /// The user privileges are checked against.
    pub fn effective_user(&self) -> &str {
        self.delegated_user
            .as_deref()
            .unwrap_or(&self.connected_user)
    }
}

/// Everything the service needs to compile one statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryCtx {
    pub stmt: String,
    pub query_options: BTreeMap<String, String>,
    pub session: SessionState,
    /// Query start time, formatted by the coordinator.
    pub now_string: String,
    pub pid: i32,
    pub coord_address: NetworkAddress,
}

impl QueryCtx {
    pub fn new(stmt: impl Into<String>, session: SessionState) -> Self {
        Self {
            stmt: stmt.into(),
            session,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StmtType {
    #[default]
    Query,
    Ddl,
    Dml,
    Explain,
    Load,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HdfsFileSplit {
    pub path: String,
    pub offset: i64,
    pub length: i64,
    pub file_length: i64,
}

/// An HBase row-key range. Unset keys are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HBaseKeyRange {
    pub start_key: Option<String>,
    pub stop_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanRange {
    HdfsFileSplit(HdfsFileSplit),
    HBaseKeyRange(HBaseKeyRange),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanRangeLocation {
    pub server: NetworkAddress,
    pub volume_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRangeLocations {
    pub scan_range: ScanRange,
    pub locations: Vec<ScanRangeLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartitionType {
    #[default]
    Unpartitioned,
    Random,
    HashPartitioned,
    RangePartitioned,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanFragment {
    pub display_name: String,
    pub partition: PartitionType,
    /// Plan nodes in pre-order, rendered for display.
    pub plan_nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryExecRequest {
    pub fragments: Vec<PlanFragment>,
    /// Scan ranges keyed by scan node id.
    pub per_node_scan_ranges: BTreeMap<i32, Vec<ScanRangeLocations>>,
    pub result_set_metadata: Option<ResultSetMetadata>,
}

/// A catalog object the statement touched, for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessEvent {
    pub name: String,
    pub object_type: CatalogObjectType,
    pub privilege: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplainResult {
    pub lines: Vec<String>,
}

/// The compiled form of a statement, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecRequest {
    pub stmt_type: StmtType,
    pub query_options: BTreeMap<String, String>,
    pub query_exec_request: Option<QueryExecRequest>,
    pub explain_result: Option<ExplainResult>,
    pub result_set_metadata: Option<ResultSetMetadata>,
    pub load_data_request: Option<LoadDataReq>,
    pub access_events: Vec<AccessEvent>,
}
