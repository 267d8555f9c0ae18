//! The fixed operation table.
//!
//! Every call the gateway can make is listed here once, with the name and
//! signature of the entry point it binds to on the service class. Startup
//! resolves all of them in one pass (see [`crate::HandleTable`]).

use std::fmt;

use febridge_runtime::Signature;

/// One callable operation on the frontend service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    UpdateCatalogCache,
    GetExplainPlan,
    GetExecRequest,
    GetTableNames,
    GetDbNames,
    GetDataSrcMetadata,
    GetStats,
    GetRolePrivileges,
    GetFunctions,
    GetCatalogObject,
    ShowRoles,
    DescribeTable,
    ShowCreateTable,
    ValidateSettings,
    ExecHiveServer2MetadataOp,
    GetAllHadoopConfigs,
    GetHadoopConfig,
    LoadData,
    SetCatalogInitialized,
}

/// The name and signature an operation resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: &'static str,
    pub signature: Signature,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: &'static [Operation] = &[
        Operation::UpdateCatalogCache,
        Operation::GetExplainPlan,
        Operation::GetExecRequest,
        Operation::GetTableNames,
        Operation::GetDbNames,
        Operation::GetDataSrcMetadata,
        Operation::GetStats,
        Operation::GetRolePrivileges,
        Operation::GetFunctions,
        Operation::GetCatalogObject,
        Operation::ShowRoles,
        Operation::DescribeTable,
        Operation::ShowCreateTable,
        Operation::ValidateSettings,
        Operation::ExecHiveServer2MetadataOp,
        Operation::GetAllHadoopConfigs,
        Operation::GetHadoopConfig,
        Operation::LoadData,
        Operation::SetCatalogInitialized,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this operation in [`Operation::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the method on the service class.
    pub fn method_name(self) -> &'static str {
        match self {
            Operation::UpdateCatalogCache => "updateCatalogCache",
            Operation::GetExplainPlan => "getExplainPlan",
            Operation::GetExecRequest => "createExecRequest",
            Operation::GetTableNames => "getTableNames",
            Operation::GetDbNames => "getDbNames",
            Operation::GetDataSrcMetadata => "getDataSrcMetadata",
            Operation::GetStats => "getStats",
            Operation::GetRolePrivileges => "getRolePrivileges",
            Operation::GetFunctions => "getFunctions",
            Operation::GetCatalogObject => "getCatalogObject",
            Operation::ShowRoles => "getRoles",
            Operation::DescribeTable => "describeTable",
            Operation::ShowCreateTable => "showCreateTable",
            Operation::ValidateSettings => "checkConfiguration",
            Operation::ExecHiveServer2MetadataOp => "execHiveServer2MetadataOp",
            Operation::GetAllHadoopConfigs => "getAllHadoopConfigs",
            Operation::GetHadoopConfig => "getHadoopConfig",
            Operation::LoadData => "loadTableData",
            Operation::SetCatalogInitialized => "setCatalogInitialized",
        }
    }

    pub fn signature(self) -> Signature {
        match self {
            Operation::GetExplainPlan | Operation::ShowCreateTable => Signature::bytes_to_str(),
            Operation::ValidateSettings => Signature::unit_to_str(),
            Operation::GetAllHadoopConfigs => Signature::unit_to_bytes(),
            Operation::SetCatalogInitialized => Signature::unit_to_void(),
            _ => Signature::bytes_to_bytes(),
        }
    }

    pub fn entry_point(self) -> EntryPoint {
        EntryPoint {
            name: self.method_name(),
            signature: self.signature(),
        }
    }

    /// Whether the operation changes state owned by the service.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Operation::UpdateCatalogCache | Operation::LoadData | Operation::SetCatalogInitialized
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
