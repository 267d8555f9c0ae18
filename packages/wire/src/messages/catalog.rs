//! Catalog objects and catalog cache updates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ColumnType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CatalogObjectType {
    #[default]
    Unknown,
    Catalog,
    Database,
    Table,
    View,
    Function,
    DataSource,
    Role,
    Privilege,
    HdfsCachePool,
}

/// A database-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TableName {
    pub db_name: String,
    pub table_name: String,
}

impl TableName {
    pub fn new(db_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            table_name: table_name.into(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.db_name, self.table_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Database {
    pub db_name: String,
    pub location: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub comment: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub db_name: String,
    pub tbl_name: String,
    pub columns: Vec<Column>,
    pub clustering_columns: Vec<Column>,
    pub owner: Option<String>,
    /// Set when the table's metadata failed to load.
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FunctionCategory {
    #[default]
    Scalar,
    Aggregate,
    Analytic,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FunctionName {
    pub db_name: Option<String>,
    pub function_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: FunctionName,
    pub category: FunctionCategory,
    pub arg_types: Vec<ColumnType>,
    pub ret_type: ColumnType,
    pub has_var_args: bool,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub location: String,
    pub class_name: String,
    pub api_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Role {
    pub role_name: String,
    pub role_id: i32,
    pub grant_groups: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrivilegeScope {
    #[default]
    Server,
    Uri,
    Database,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrivilegeLevel {
    #[default]
    All,
    Insert,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Privilege {
    pub scope: PrivilegeScope,
    pub privilege_level: PrivilegeLevel,
    pub server_name: String,
    pub db_name: Option<String>,
    pub table_name: Option<String>,
    pub uri: Option<String>,
    pub role_id: i32,
    pub has_grant_opt: bool,
}

/// Any object held in the catalog.
///
/// Exactly one of the payload fields is expected to be set, matching
/// `object_type`. As a lookup request only the type and the identifying
/// name fields need to be filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogObject {
    pub object_type: CatalogObjectType,
    pub catalog_version: i64,
    pub db: Option<Database>,
    pub table: Option<Table>,
    pub function: Option<Function>,
    pub data_source: Option<DataSource>,
    pub role: Option<Role>,
    pub privilege: Option<Privilege>,
    pub cache_pool: Option<String>,
}

impl CatalogObject {
    /// A lookup key for a database.
    pub fn database_key(db_name: impl Into<String>) -> Self {
        Self {
            object_type: CatalogObjectType::Database,
            db: Some(Database {
                db_name: db_name.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// A lookup key for a table.
    pub fn table_key(name: &TableName) -> Self {
        Self {
            object_type: CatalogObjectType::Table,
            table: Some(Table {
                db_name: name.db_name.clone(),
                tbl_name: name.table_name.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// A lookup key for a role.
    pub fn role_key(role_name: impl Into<String>) -> Self {
        Self {
            object_type: CatalogObjectType::Role,
            role: Some(Role {
                role_name: role_name.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// The object's identifying name, if its payload is set.
    pub fn name(&self) -> Option<String> {
        match self.object_type {
            CatalogObjectType::Database => self.db.as_ref().map(|d| d.db_name.clone()),
            CatalogObjectType::Table | CatalogObjectType::View => self
                .table
                .as_ref()
                .map(|t| format!("{}.{}", t.db_name, t.tbl_name)),
            CatalogObjectType::Function => self.function.as_ref().map(|f| match &f.name.db_name {
                Some(db) => format!("{}.{}", db, f.name.function_name),
                None => f.name.function_name.clone(),
            }),
            CatalogObjectType::DataSource => self.data_source.as_ref().map(|d| d.name.clone()),
            CatalogObjectType::Role => self.role.as_ref().map(|r| r.role_name.clone()),
            CatalogObjectType::HdfsCachePool => self.cache_pool.clone(),
            CatalogObjectType::Privilege => self.privilege.as_ref().map(|p| {
                let mut name = format!("server={}", p.server_name);
                if let Some(db) = &p.db_name {
                    name.push_str(&format!("->db={}", db));
                }
                if let Some(tbl) = &p.table_name {
                    name.push_str(&format!("->table={}", tbl));
                }
                if let Some(uri) = &p.uri {
                    name.push_str(&format!("->uri={}", uri));
                }
                name
            }),
            CatalogObjectType::Catalog | CatalogObjectType::Unknown => None,
        }
    }
}

/// A batch of catalog changes to apply to the service's cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCatalogCacheRequest {
    /// True if this is a delta against the current cache, false for a full
    /// replacement.
    pub is_delta: bool,
    pub catalog_service_id: String,
    pub updated_objects: Vec<CatalogObject>,
    pub removed_objects: Vec<CatalogObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCatalogCacheResponse {
    pub catalog_service_id: String,
    pub new_catalog_version: i64,
}
