//! Metadata listing and SHOW/DESCRIBE operations.

use serde::{Deserialize, Serialize};

use super::catalog::{FunctionCategory, TableName};
use super::query::SessionState;
use super::results::ResultRow;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetTablesParams {
    pub db: String,
    /// `None` lists every table.
    pub pattern: Option<String>,
    /// `None` skips privilege filtering.
    pub session: Option<SessionState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetTablesResult {
    /// Unqualified table names.
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetDbsParams {
    pub pattern: Option<String>,
    pub session: Option<SessionState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetDbsResult {
    pub dbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetDataSrcsParams {
    pub pattern: Option<String>,
}

/// Data sources as parallel lists; entry `i` of each list describes the
/// same data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetDataSrcsResult {
    pub data_src_names: Vec<String>,
    pub locations: Vec<String>,
    pub class_names: Vec<String>,
    pub api_versions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShowStatsOp {
    #[default]
    TableStats,
    ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowStatsParams {
    pub op: ShowStatsOp,
    pub table_name: TableName,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowGrantRoleParams {
    pub role_name: String,
    pub requesting_user: Option<String>,
    /// Restrict output to privileges on this object (`server`, `db`,
    /// `db.table` or a URI).
    pub on_object: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetFunctionsParams {
    pub category: FunctionCategory,
    pub db: String,
    pub pattern: Option<String>,
    pub session: Option<SessionState>,
}

/// Functions as parallel lists of signatures and return types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetFunctionsResult {
    pub fn_signatures: Vec<String>,
    pub fn_ret_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowRolesParams {
    /// SHOW CURRENT ROLES rather than SHOW ROLES.
    pub is_show_current_roles: bool,
    /// SHOW ROLE GRANT GROUP <group>.
    pub grant_group: Option<String>,
    pub requesting_user: Option<String>,
    /// Set when the requesting user is an administrator.
    pub is_admin_op: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowRolesResult {
    pub role_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DescribeOutputStyle {
    /// Column definitions only.
    #[default]
    Minimal,
    /// Column definitions plus table, storage and SerDe properties.
    Formatted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescribeTableParams {
    pub db: String,
    pub table_name: String,
    pub output_style: DescribeOutputStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeTableResult {
    pub results: Vec<ResultRow>,
}

/// HiveServer2 metadata operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetadataOpcode {
    #[default]
    GetTypeInfo,
    GetCatalogs,
    GetSchemas,
    GetTables,
    GetTableTypes,
    GetColumns,
    GetFunctions,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataOpRequest {
    pub opcode: MetadataOpcode,
    pub session: Option<SessionState>,
    pub catalog_name: Option<String>,
    pub schema_name: Option<String>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub function_name: Option<String>,
    pub table_types: Vec<String>,
}

impl MetadataOpRequest {
    pub fn new(opcode: MetadataOpcode) -> Self {
        Self {
            opcode,
            ..Default::default()
        }
    }
}
