//! The frontend gateway.

use std::sync::Arc;

use febridge_runtime::{
    attach, Bytes, ManagedRuntime, ObjectHandle, Shape, Signature, Value, CONSTRUCTOR_NAME,
};
use febridge_wire::messages::{
    CatalogObject, DescribeOutputStyle, DescribeTableParams, DescribeTableResult, ExecRequest,
    FunctionCategory, GetAllHadoopConfigsResponse, GetDataSrcsParams, GetDataSrcsResult,
    GetDbsParams, GetDbsResult, GetFunctionsParams, GetFunctionsResult, GetHadoopConfigRequest,
    GetHadoopConfigResponse, GetTablesParams, GetTablesResult, LoadDataReq, LoadDataResp,
    MetadataOpRequest, QueryCtx, ResultSet, SessionState, ShowGrantRoleParams, ShowRolesParams,
    ShowRolesResult, ShowStatsParams, TableName, UpdateCatalogCacheRequest,
    UpdateCatalogCacheResponse,
};
use febridge_wire::{Codec, WireCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::BridgeConfig;
use crate::error::ConstructionError;
use crate::handles::HandleTable;
use crate::operation::Operation;
use crate::status::{self, Status};

/// Result of a gateway call.
pub type CallResult<T> = Result<T, Status>;

/// Synchronous, typed access to a frontend service living in a managed
/// runtime.
///
/// Construction locates the service class, resolves every entry point in
/// [`Operation::ALL`], and creates the single service instance. After that
/// the gateway is immutable and may be shared freely between threads; each
/// calling thread is attached to the runtime on its first call and detached
/// when it exits.
///
/// Every wrapper forwards exactly one call, in the caller's thread, and
/// returns either the decoded response or a [`Status`] describing the
/// failure. Nothing is retried or cached.
pub struct Frontend<R: ManagedRuntime + 'static> {
    runtime: Arc<R>,
    attachable: Arc<dyn ManagedRuntime>,
    service_class: String,
    instance: ObjectHandle,
    handles: HandleTable,
    codec: WireCodec,
}

impl<R: ManagedRuntime + 'static> Frontend<R> {
    /// Build the gateway, or fail without creating a service instance.
    ///
    /// Entry points are resolved before the instance is created, so a
    /// missing or mismatched entry point leaves nothing behind in the
    /// runtime. The constructing thread stays attached only if construction
    /// succeeds.
    pub fn new(runtime: Arc<R>, config: &BridgeConfig) -> Result<Self, ConstructionError> {
        config.validate()?;
        let codec = WireCodec::for_format(&config.format, config.max_message_bytes)?;
        let class_name = config.service_class.clone();
        info!(class = %class_name, format = %config.format, "starting frontend gateway");

        let attachable: Arc<dyn ManagedRuntime> = runtime.clone();
        let startup = attach::attach_scoped(&attachable).map_err(ConstructionError::Attach)?;

        let class = runtime
            .find_class(&class_name)
            .map_err(|source| ConstructionError::ClassNotFound {
                class: class_name.clone(),
                source,
            })?;

        let ctor_signature = Signature::bytes_to_void();
        let ctor = runtime
            .method_id(class, CONSTRUCTOR_NAME, &ctor_signature)
            .map_err(|source| ConstructionError::ConstructorNotFound {
                class: class_name.clone(),
                signature: ctor_signature.clone(),
                source,
            })?;

        let handles = HandleTable::resolve(runtime.as_ref(), class)?;

        let init = codec.encode(&config.init)?;
        let instance = runtime
            .new_object(class, ctor, &[Value::Bytes(init)])
            .map_err(|source| ConstructionError::Instantiation {
                class: class_name.clone(),
                source,
            })?;

        if let Some(guard) = startup {
            attach::park(guard);
        }
        info!(
            class = %class_name,
            %instance,
            entry_points = handles.len(),
            "frontend gateway ready"
        );
        Ok(Self {
            runtime,
            attachable,
            service_class: class_name,
            instance,
            handles,
            codec,
        })
    }

    /// Like [`Frontend::new`], but a failure terminates the process.
    ///
    /// A gateway that cannot start means the deployment is broken; there is
    /// no degraded mode to fall back to.
    pub fn new_or_exit(runtime: Arc<R>, config: &BridgeConfig) -> Self {
        match Self::new(runtime, config) {
            Ok(frontend) => frontend,
            Err(e) => {
                error!(error = %e, "failed to start frontend gateway");
                std::process::exit(1)
            }
        }
    }

    pub fn runtime(&self) -> &Arc<R> {
        &self.runtime
    }

    pub fn service_class(&self) -> &str {
        &self.service_class
    }

    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    pub fn codec(&self) -> &WireCodec {
        &self.codec
    }

    /// True exactly when `status` is an authorization failure.
    pub fn is_authorization_error(&self, status: &Status) -> bool {
        status::is_authorization_error(status)
    }

    /// Apply a batch of catalog changes to the service's cache.
    pub fn update_catalog_cache(
        &self,
        req: &UpdateCatalogCacheRequest,
    ) -> CallResult<UpdateCatalogCacheResponse> {
        self.call(Operation::UpdateCatalogCache, req)
    }

    /// Explain plan text for a query.
    pub fn get_explain_plan(&self, query_ctx: &QueryCtx) -> CallResult<String> {
        self.call_for_string(Operation::GetExplainPlan, query_ctx)
    }

    /// Compile a statement into an execution request.
    pub fn get_exec_request(&self, query_ctx: &QueryCtx) -> CallResult<ExecRequest> {
        self.call(Operation::GetExecRequest, query_ctx)
    }

    /// Unqualified names of the tables in `db` matching `pattern`.
    ///
    /// `pattern` of `None` matches every table. `session` of `None` skips
    /// privilege filtering; pass one for any user-originated request.
    pub fn get_table_names(
        &self,
        db: &str,
        pattern: Option<&str>,
        session: Option<&SessionState>,
    ) -> CallResult<GetTablesResult> {
        let params = GetTablesParams {
            db: db.to_string(),
            pattern: pattern.map(str::to_string),
            session: session.cloned(),
        };
        self.call(Operation::GetTableNames, &params)
    }

    /// Names of the databases matching `pattern`. See
    /// [`Frontend::get_table_names`] for `pattern` and `session`.
    pub fn get_db_names(
        &self,
        pattern: Option<&str>,
        session: Option<&SessionState>,
    ) -> CallResult<GetDbsResult> {
        let params = GetDbsParams {
            pattern: pattern.map(str::to_string),
            session: session.cloned(),
        };
        self.call(Operation::GetDbNames, &params)
    }

    pub fn get_data_src_metadata(&self, pattern: Option<&str>) -> CallResult<GetDataSrcsResult> {
        let params = GetDataSrcsParams {
            pattern: pattern.map(str::to_string),
        };
        self.call(Operation::GetDataSrcMetadata, &params)
    }

    /// Table or column statistics, as rows.
    pub fn get_stats(&self, params: &ShowStatsParams) -> CallResult<ResultSet> {
        self.call(Operation::GetStats, params)
    }

    /// Privileges granted to a role, as rows.
    pub fn get_role_privileges(&self, params: &ShowGrantRoleParams) -> CallResult<ResultSet> {
        self.call(Operation::GetRolePrivileges, params)
    }

    pub fn get_functions(
        &self,
        category: FunctionCategory,
        db: &str,
        pattern: Option<&str>,
        session: Option<&SessionState>,
    ) -> CallResult<GetFunctionsResult> {
        let params = GetFunctionsParams {
            category,
            db: db.to_string(),
            pattern: pattern.map(str::to_string),
            session: session.cloned(),
        };
        self.call(Operation::GetFunctions, &params)
    }

    /// Look up the full catalog object identified by `key`'s type and name.
    pub fn get_catalog_object(&self, key: &CatalogObject) -> CallResult<CatalogObject> {
        self.call(Operation::GetCatalogObject, key)
    }

    pub fn show_roles(&self, params: &ShowRolesParams) -> CallResult<ShowRolesResult> {
        self.call(Operation::ShowRoles, params)
    }

    pub fn describe_table(
        &self,
        db: &str,
        table_name: &str,
        output_style: DescribeOutputStyle,
    ) -> CallResult<DescribeTableResult> {
        let params = DescribeTableParams {
            db: db.to_string(),
            table_name: table_name.to_string(),
            output_style,
        };
        self.call(Operation::DescribeTable, &params)
    }

    /// The CREATE TABLE statement that would recreate `table`.
    pub fn show_create_table(&self, table: &TableName) -> CallResult<String> {
        self.call_for_string(Operation::ShowCreateTable, table)
    }

    /// Ask the service to check its own configuration.
    ///
    /// The service answers with a description of what is wrong, or nothing.
    /// A non-empty answer becomes a general error carrying that text.
    pub fn validate_settings(&self) -> CallResult<()> {
        match self.invoke(Operation::ValidateSettings, &[])? {
            Value::Str(None) => Ok(()),
            Value::Str(Some(problem)) if problem.is_empty() => Ok(()),
            Value::Str(Some(problem)) => {
                warn!(%problem, "frontend configuration check failed");
                Err(Status::general(problem))
            }
            other => Err(Status::unexpected_shape(
                Operation::ValidateSettings,
                Shape::Str,
                other.shape(),
            )),
        }
    }

    /// Run a HiveServer2 metadata operation.
    pub fn exec_hs2_metadata_op(&self, req: &MetadataOpRequest) -> CallResult<ResultSet> {
        self.call(Operation::ExecHiveServer2MetadataOp, req)
    }

    pub fn get_all_hadoop_configs(&self) -> CallResult<GetAllHadoopConfigsResponse> {
        let value = self.invoke(Operation::GetAllHadoopConfigs, &[])?;
        self.decode(Operation::GetAllHadoopConfigs, value)
    }

    /// Look up one configuration value. A key with no value comes back with
    /// `value` unset rather than as an error.
    pub fn get_hadoop_config(
        &self,
        req: &GetHadoopConfigRequest,
    ) -> CallResult<GetHadoopConfigResponse> {
        self.call(Operation::GetHadoopConfig, req)
    }

    /// Move files into a table (LOAD DATA).
    pub fn load_data(&self, req: &LoadDataReq) -> CallResult<LoadDataResp> {
        self.call(Operation::LoadData, req)
    }

    /// Mark the catalog as ready. Reads issued after this returns see an
    /// initialized catalog.
    pub fn set_catalog_initialized(&self) -> CallResult<()> {
        match self.invoke(Operation::SetCatalogInitialized, &[])? {
            Value::Void => Ok(()),
            other => Err(Status::unexpected_shape(
                Operation::SetCatalogInitialized,
                Shape::Void,
                other.shape(),
            )),
        }
    }

    fn call<Req, Resp>(&self, operation: Operation, req: &Req) -> CallResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let value = self.invoke(operation, &[self.encode(operation, req)?])?;
        self.decode(operation, value)
    }

    fn call_for_string<Req>(&self, operation: Operation, req: &Req) -> CallResult<String>
    where
        Req: Serialize + ?Sized,
    {
        match self.invoke(operation, &[self.encode(operation, req)?])? {
            Value::Str(Some(s)) => Ok(s),
            Value::Str(None) => Err(Status::general(format!("{} returned null", operation))),
            other => Err(Status::unexpected_shape(operation, Shape::Str, other.shape())),
        }
    }

    fn encode<Req>(&self, operation: Operation, req: &Req) -> CallResult<Value>
    where
        Req: Serialize + ?Sized,
    {
        self.codec.encode(req).map(Value::Bytes).map_err(|e| {
            error!(%operation, error = %e, "failed to encode request");
            Status::from(e)
        })
    }

    fn decode<Resp: DeserializeOwned>(&self, operation: Operation, value: Value) -> CallResult<Resp> {
        let bytes = expect_bytes(operation, value)?;
        self.codec.decode(&bytes).map_err(|e| {
            warn!(%operation, error = %e, "failed to decode response");
            Status::from(e)
        })
    }

    fn invoke(&self, operation: Operation, args: &[Value]) -> CallResult<Value> {
        let method = self.handles.get(operation);
        attach::ensure_attached(&self.attachable).map_err(|e| {
            error!(%operation, error = %e, "failed to attach calling thread");
            Status::from(e)
        })?;

        debug!(
            %operation,
            instance = %self.instance,
            mutating = operation.is_mutating(),
            "calling frontend"
        );
        self.runtime
            .call_method(self.instance, method, args)
            .map_err(|e| {
                let status = Status::from(e);
                warn!(
                    %operation,
                    code = %status.code,
                    exception = status.exception_class.as_deref().unwrap_or(""),
                    message = %status.message,
                    "frontend call failed"
                );
                status
            })
    }
}

impl<R: ManagedRuntime + 'static> std::fmt::Debug for Frontend<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontend")
            .field("service_class", &self.service_class)
            .field("instance", &self.instance)
            .field("entry_points", &self.handles.len())
            .field("codec", &self.codec)
            .finish()
    }
}

fn expect_bytes(operation: Operation, value: Value) -> CallResult<Bytes> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(Status::unexpected_shape(operation, Shape::Bytes, other.shape())),
    }
}
