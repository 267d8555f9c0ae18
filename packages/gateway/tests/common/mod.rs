//! An in-process stand-in for the frontend service, plus helpers to build a
//! gateway against it.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use collection_literals::btree;
use febridge_gateway::{BridgeConfig, Frontend};
use febridge_runtime::{
    ClassDef, ExceptionTag, HostedObject, InProcessRuntime, Signature, Throwable, Value,
};
use febridge_wire::messages::*;
use febridge_wire::{Codec, ColumnType, Format, NamePattern, PrimitiveType, WireCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SERVICE_CLASS: &str = "test.fe.JniFrontend";

/// Every entry point the fake service declares, by name and signature.
pub fn entry_points() -> Vec<(&'static str, Signature)> {
    vec![
        ("updateCatalogCache", Signature::bytes_to_bytes()),
        ("getExplainPlan", Signature::bytes_to_str()),
        ("createExecRequest", Signature::bytes_to_bytes()),
        ("getTableNames", Signature::bytes_to_bytes()),
        ("getDbNames", Signature::bytes_to_bytes()),
        ("getDataSrcMetadata", Signature::bytes_to_bytes()),
        ("getStats", Signature::bytes_to_bytes()),
        ("getRolePrivileges", Signature::bytes_to_bytes()),
        ("getFunctions", Signature::bytes_to_bytes()),
        ("getCatalogObject", Signature::bytes_to_bytes()),
        ("getRoles", Signature::bytes_to_bytes()),
        ("describeTable", Signature::bytes_to_bytes()),
        ("showCreateTable", Signature::bytes_to_str()),
        ("checkConfiguration", Signature::unit_to_str()),
        ("execHiveServer2MetadataOp", Signature::bytes_to_bytes()),
        ("getAllHadoopConfigs", Signature::unit_to_bytes()),
        ("getHadoopConfig", Signature::bytes_to_bytes()),
        ("loadTableData", Signature::bytes_to_bytes()),
        ("setCatalogInitialized", Signature::unit_to_void()),
    ]
}

/// A service class declaring `entry_points`, whose constructor decodes its
/// init parameters with `codec` and hands them to `factory`.
pub fn class_def<F>(
    name: &str,
    entry_points: Vec<(&'static str, Signature)>,
    codec: WireCodec,
    factory: F,
) -> ClassDef
where
    F: Fn(FrontendInitParams, WireCodec) -> Result<Arc<dyn HostedObject>, Throwable>
        + Send
        + Sync
        + 'static,
{
    let mut class = ClassDef::new(name).constructor(Signature::bytes_to_void(), move |args| {
        let params: FrontendInitParams = decode_arg(&codec, args)?;
        factory(params, codec)
    });
    for (method, signature) in entry_points {
        class = class.method(method, signature);
    }
    class
}

/// The complete fake frontend class.
pub fn fake_class(codec: WireCodec) -> ClassDef {
    class_def(SERVICE_CLASS, entry_points(), codec, |params, codec| {
        let object: Arc<dyn HostedObject> = Arc::new(FakeFrontend::new(params, codec)?);
        Ok(object)
    })
}

pub fn config(format: Format) -> BridgeConfig {
    BridgeConfig {
        service_class: SERVICE_CLASS.to_string(),
        format,
        init: FrontendInitParams {
            lazy: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn codec_for(config: &BridgeConfig) -> WireCodec {
    WireCodec::for_format(&config.format, config.max_message_bytes).unwrap()
}

pub fn runtime_for(config: &BridgeConfig) -> Arc<InProcessRuntime> {
    Arc::new(InProcessRuntime::new().with_class(fake_class(codec_for(config))))
}

pub fn frontend_with(config: &BridgeConfig) -> Frontend<InProcessRuntime> {
    Frontend::new(runtime_for(config), config).unwrap()
}

/// A gateway over the binary wire with the catalog loaded at startup.
pub fn frontend() -> Frontend<InProcessRuntime> {
    frontend_with(&config(Format::BINARY))
}

pub fn session(user: &str) -> SessionState {
    SessionState {
        session_id: format!("session-{user}"),
        ..SessionState::for_user(user)
    }
}

pub fn decode_arg<T: DeserializeOwned>(codec: &WireCodec, args: &[Value]) -> Result<T, Throwable> {
    let bytes = args
        .first()
        .and_then(Value::as_bytes)
        .ok_or_else(|| Throwable::internal("expected an encoded argument"))?;
    codec
        .decode(bytes)
        .map_err(|e| Throwable::from_class("org.apache.thrift.TException", e.to_string()))
}

pub fn encode_reply<T: Serialize>(codec: &WireCodec, value: &T) -> Result<Value, Throwable> {
    codec
        .encode(value)
        .map(Value::Bytes)
        .map_err(|e| Throwable::internal(e.to_string()))
}

fn catalog_exception(message: impl Into<String>) -> Throwable {
    Throwable::from_class("com.cloudera.impala.catalog.CatalogException", message)
}

fn analysis_exception(message: impl Into<String>) -> Throwable {
    Throwable::from_class("com.cloudera.impala.common.AnalysisException", message)
}

fn denied(user: &str, object: &str) -> Throwable {
    Throwable::tagged(
        ExceptionTag::Authorization,
        "com.cloudera.impala.authorization.AuthorizationException",
        format!("User '{user}' does not have privileges to access: {object}"),
    )
}

/// Users the fake refuses everything to.
pub const BLOCKED_USER: &str = "mallory";
/// Users allowed to see `secret_*` tables.
pub const ADMIN_USER: &str = "admin";

struct Catalog {
    version: i64,
    service_id: String,
    /// Database name to table names.
    dbs: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    fn initial() -> Self {
        let tables = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            version: 1,
            service_id: "catalogd-0".to_string(),
            dbs: btree! {
                "default".to_string() => tables(&["alltypes", "alltypesagg", "secret_salaries"]),
                "functional".to_string() => tables(&["alltypes", "alltypessmall", "decimal_tbl", "agg_tbl"]),
                "tpch".to_string() => tables(&["lineitem", "orders"]),
            },
        }
    }
}

const FUNCTIONS: &[(FunctionCategory, &str, &str)] = &[
    (FunctionCategory::Scalar, "abs(BIGINT)", "BIGINT"),
    (FunctionCategory::Scalar, "concat(STRING...)", "STRING"),
    (FunctionCategory::Scalar, "upper(STRING)", "STRING"),
    (FunctionCategory::Aggregate, "count(*)", "BIGINT"),
    (FunctionCategory::Aggregate, "avg(DOUBLE)", "DOUBLE"),
    (FunctionCategory::Analytic, "rank()", "BIGINT"),
    (FunctionCategory::Analytic, "lag(INT)", "INT"),
];

const DATA_SOURCES: &[(&str, &str, &str, &str)] = &[
    ("jdbc_src", "/lib/jdbc-source.jar", "com.example.JdbcDataSource", "V1"),
    ("echo_src", "/lib/echo-source.jar", "com.example.EchoDataSource", "V1"),
    ("hbase_src", "/lib/hbase-source.jar", "com.example.HBaseDataSource", "V1"),
];

/// A frontend service with a small in-memory catalog.
pub struct FakeFrontend {
    codec: WireCodec,
    params: FrontendInitParams,
    ready: AtomicBool,
    catalog: RwLock<Catalog>,
    files_loaded: AtomicI64,
    hadoop_configs: BTreeMap<String, String>,
}

impl FakeFrontend {
    pub fn new(params: FrontendInitParams, codec: WireCodec) -> Result<Self, Throwable> {
        if params.server_name.is_empty() {
            return Err(catalog_exception("server_name must be set"));
        }
        Ok(Self {
            codec,
            ready: AtomicBool::new(!params.lazy),
            params,
            catalog: RwLock::new(Catalog::initial()),
            files_loaded: AtomicI64::new(0),
            hadoop_configs: btree! {
                "fs.defaultFS".to_string() => "hdfs://localhost:20500".to_string(),
                "dfs.client.read.shortcircuit".to_string() => "true".to_string(),
                "hadoop.empty.value".to_string() => String::new(),
            },
        })
    }

    fn require_ready(&self) -> Result<(), Throwable> {
        if self.ready.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(catalog_exception("catalog has not been initialized"))
        }
    }

    fn check_user(&self, session: Option<&SessionState>, object: &str) -> Result<(), Throwable> {
        match session {
            Some(s) if s.effective_user() == BLOCKED_USER => Err(denied(s.effective_user(), object)),
            _ => Ok(()),
        }
    }

    fn visible(session: Option<&SessionState>, name: &str) -> bool {
        match session {
            None => true,
            Some(s) => s.effective_user() == ADMIN_USER || !name.starts_with("secret_"),
        }
    }

    fn pattern(pattern: Option<&str>) -> Result<NamePattern, Throwable> {
        NamePattern::parse(pattern).map_err(|e| analysis_exception(e.to_string()))
    }

    fn tables_of(&self, db: &str) -> Result<Vec<String>, Throwable> {
        self.catalog
            .read()
            .map_err(|_| Throwable::internal("catalog lock poisoned"))?
            .dbs
            .get(db)
            .cloned()
            .ok_or_else(|| catalog_exception(format!("Database does not exist: {db}")))
    }

    fn columns() -> Vec<Column> {
        vec![
            Column {
                name: "id".to_string(),
                column_type: ColumnType::scalar(PrimitiveType::Int),
                comment: Some("row id".to_string()),
                position: 0,
            },
            Column {
                name: "name".to_string(),
                column_type: ColumnType::scalar(PrimitiveType::String),
                comment: None,
                position: 1,
            },
        ]
    }

    fn table(&self, db: &str, tbl: &str) -> Result<Table, Throwable> {
        if !self.tables_of(db)?.iter().any(|t| t == tbl) {
            return Err(catalog_exception(format!("Table does not exist: {db}.{tbl}")));
        }
        Ok(Table {
            db_name: db.to_string(),
            tbl_name: tbl.to_string(),
            columns: Self::columns(),
            owner: Some("impala".to_string()),
            ..Default::default()
        })
    }

    fn reply<T: Serialize>(&self, value: &T) -> Result<Value, Throwable> {
        encode_reply(&self.codec, value)
    }

    fn update_catalog_cache(&self, req: UpdateCatalogCacheRequest) -> Result<Value, Throwable> {
        let mut catalog = self
            .catalog
            .write()
            .map_err(|_| Throwable::internal("catalog lock poisoned"))?;
        if !req.is_delta {
            catalog.dbs.clear();
        }
        for object in &req.removed_objects {
            match (object.object_type, &object.db, &object.table) {
                (CatalogObjectType::Database, Some(db), _) => {
                    catalog.dbs.remove(&db.db_name);
                }
                (CatalogObjectType::Table, _, Some(t)) => {
                    if let Some(tables) = catalog.dbs.get_mut(&t.db_name) {
                        tables.retain(|name| name != &t.tbl_name);
                    }
                }
                _ => {}
            }
        }
        for object in &req.updated_objects {
            match (object.object_type, &object.db, &object.table) {
                (CatalogObjectType::Database, Some(db), _) => {
                    catalog.dbs.entry(db.db_name.clone()).or_default();
                }
                (CatalogObjectType::Table, _, Some(t)) => {
                    let tables = catalog.dbs.entry(t.db_name.clone()).or_default();
                    if !tables.contains(&t.tbl_name) {
                        tables.push(t.tbl_name.clone());
                    }
                }
                _ => {}
            }
        }
        catalog.version += 1;
        catalog.service_id = req.catalog_service_id;
        self.ready.store(true, Ordering::SeqCst);
        self.reply(&UpdateCatalogCacheResponse {
            catalog_service_id: catalog.service_id.clone(),
            new_catalog_version: catalog.version,
        })
    }

    fn exec_request(&self, ctx: QueryCtx) -> Result<ExecRequest, Throwable> {
        self.require_ready()?;
        self.check_user(Some(&ctx.session), &ctx.stmt)?;
        let stmt = ctx.stmt.trim();
        let lower = stmt.to_ascii_lowercase();
        let Some(rest) = lower.strip_prefix("select ") else {
            return Err(analysis_exception(format!("Syntax error in line 1: {stmt}")));
        };
        let target = rest.rsplit(" from ").next().unwrap_or(rest).trim().to_string();
        let metadata = ResultSetMetadata::new([(rest.to_string(), ColumnType::scalar(PrimitiveType::BigInt))]);
        let scan_range = ScanRangeLocations {
            scan_range: ScanRange::HdfsFileSplit(HdfsFileSplit {
                path: format!("hdfs://localhost:20500/warehouse/{target}/000000_0"),
                offset: 0,
                length: 1024,
                file_length: 1024,
            }),
            locations: vec![ScanRangeLocation {
                server: NetworkAddress::new("localhost", 22000),
                volume_id: Some(0),
            }],
        };
        Ok(ExecRequest {
            stmt_type: StmtType::Query,
            query_options: ctx.query_options,
            query_exec_request: Some(QueryExecRequest {
                fragments: vec![PlanFragment {
                    display_name: "F00:PLAN FRAGMENT".to_string(),
                    partition: PartitionType::Unpartitioned,
                    plan_nodes: vec![format!("00:SCAN HDFS [{target}]")],
                }],
                per_node_scan_ranges: btree! { 0 => vec![scan_range] },
                result_set_metadata: Some(metadata.clone()),
            }),
            result_set_metadata: Some(metadata),
            access_events: vec![AccessEvent {
                name: target,
                object_type: CatalogObjectType::Table,
                privilege: "SELECT".to_string(),
            }],
            ..Default::default()
        })
    }

    fn get_stats(&self, params: ShowStatsParams) -> Result<ResultSet, Throwable> {
        self.require_ready()?;
        let name = &params.table_name;
        self.tables_of(&name.db_name)?;
        if name.table_name.starts_with("secret_") {
            return Err(denied("impala", &name.to_string()));
        }
        match params.op {
            ShowStatsOp::TableStats => {
                let mut rs = ResultSet::new(ResultSetMetadata::new([
                    ("table", ColumnType::scalar(PrimitiveType::String)),
                    ("#Rows", ColumnType::scalar(PrimitiveType::BigInt)),
                ]));
                rs.push_row(ResultRow::new(vec![
                    name.to_string().into(),
                    (name.table_name.len() as i64).into(),
                ]));
                Ok(rs)
            }
            ShowStatsOp::ColumnStats => {
                let mut rs = ResultSet::new(ResultSetMetadata::new([
                    ("Column", ColumnType::scalar(PrimitiveType::String)),
                    ("Type", ColumnType::scalar(PrimitiveType::String)),
                    ("#Distinct Values", ColumnType::scalar(PrimitiveType::BigInt)),
                ]));
                for column in Self::columns() {
                    let sql = column
                        .column_type
                        .to_sql()
                        .map_err(|e| Throwable::internal(e.to_string()))?;
                    rs.push_row(ResultRow::new(vec![column.name.into(), sql.into(), (-1i64).into()]));
                }
                Ok(rs)
            }
        }
    }

    fn role_privileges(&self, params: ShowGrantRoleParams) -> Result<ResultSet, Throwable> {
        let mut rs = ResultSet::new(ResultSetMetadata::new([
            ("scope", ColumnType::scalar(PrimitiveType::String)),
            ("database", ColumnType::scalar(PrimitiveType::String)),
            ("privilege", ColumnType::scalar(PrimitiveType::String)),
            ("grant_option", ColumnType::scalar(PrimitiveType::Boolean)),
        ]));
        match params.role_name.as_str() {
            "admins" => rs.push_row(ResultRow::new(vec![
                "server".into(),
                ColumnValue::Null,
                "all".into(),
                true.into(),
            ])),
            "analysts" => rs.push_row(ResultRow::new(vec![
                "database".into(),
                "functional".into(),
                "select".into(),
                false.into(),
            ])),
            other => return Err(catalog_exception(format!("Role '{other}' does not exist."))),
        }
        Ok(rs)
    }

    fn catalog_object(&self, key: CatalogObject) -> Result<CatalogObject, Throwable> {
        self.require_ready()?;
        match (key.object_type, key.db, key.table, key.role) {
            (CatalogObjectType::Database, Some(db), _, _) => {
                self.tables_of(&db.db_name)?;
                Ok(CatalogObject {
                    object_type: CatalogObjectType::Database,
                    catalog_version: self.version()?,
                    db: Some(Database {
                        location: Some(format!("hdfs://localhost:20500/warehouse/{}.db", db.db_name)),
                        db_name: db.db_name,
                        comment: None,
                    }),
                    ..Default::default()
                })
            }
            (CatalogObjectType::Table, _, Some(t), _) => Ok(CatalogObject {
                object_type: CatalogObjectType::Table,
                catalog_version: self.version()?,
                table: Some(self.table(&t.db_name, &t.tbl_name)?),
                ..Default::default()
            }),
            (CatalogObjectType::Role, _, _, Some(role)) => match role.role_name.as_str() {
                "admins" | "analysts" => Ok(CatalogObject {
                    object_type: CatalogObjectType::Role,
                    catalog_version: self.version()?,
                    role: Some(Role {
                        role_id: if role.role_name == "admins" { 1 } else { 2 },
                        grant_groups: vec![role.role_name.clone()],
                        role_name: role.role_name,
                    }),
                    ..Default::default()
                }),
                other => Err(catalog_exception(format!("Role '{other}' does not exist."))),
            },
            (object_type, ..) => Err(catalog_exception(format!(
                "Unexpected catalog object lookup: {object_type:?}"
            ))),
        }
    }

    fn version(&self) -> Result<i64, Throwable> {
        Ok(self
            .catalog
            .read()
            .map_err(|_| Throwable::internal("catalog lock poisoned"))?
            .version)
    }

    fn describe_table(&self, params: DescribeTableParams) -> Result<DescribeTableResult, Throwable> {
        self.require_ready()?;
        if params.table_name == "panic" {
            panic!("describe of {}.{} crashed", params.db, params.table_name);
        }
        let table = self.table(&params.db, &params.table_name)?;
        let mut results = Vec::new();
        for column in &table.columns {
            let sql = column
                .column_type
                .to_sql()
                .map_err(|e| Throwable::internal(e.to_string()))?;
            results.push(ResultRow::new(vec![
                column.name.clone().into(),
                sql.into(),
                column.comment.clone().map_or(ColumnValue::Null, ColumnValue::Str),
            ]));
        }
        if params.output_style == DescribeOutputStyle::Formatted {
            results.push(ResultRow::new(vec![
                "# Detailed Table Information".into(),
                ColumnValue::Null,
                ColumnValue::Null,
            ]));
            results.push(ResultRow::new(vec![
                "Location:".into(),
                format!(
                    "hdfs://localhost:20500/warehouse/{}.db/{}",
                    table.db_name, table.tbl_name
                )
                .into(),
                ColumnValue::Null,
            ]));
        }
        Ok(DescribeTableResult { results })
    }

    fn show_create_table(&self, name: TableName) -> Result<String, Throwable> {
        self.require_ready()?;
        let table = self.table(&name.db_name, &name.table_name)?;
        let mut columns = Vec::new();
        for column in &table.columns {
            let sql = column
                .column_type
                .to_sql()
                .map_err(|e| Throwable::internal(e.to_string()))?;
            columns.push(format!("  {} {}", column.name, sql));
        }
        Ok(format!("CREATE TABLE {} (\n{}\n)", name, columns.join(",\n")))
    }

    fn metadata_op(&self, req: MetadataOpRequest) -> Result<ResultSet, Throwable> {
        self.require_ready()?;
        self.check_user(req.session.as_ref(), "metadata")?;
        let string = || ColumnType::scalar(PrimitiveType::String);
        match req.opcode {
            MetadataOpcode::GetCatalogs => Ok(ResultSet::new(ResultSetMetadata::new([(
                "TABLE_CAT",
                string(),
            )]))),
            MetadataOpcode::GetTableTypes => {
                let mut rs = ResultSet::new(ResultSetMetadata::new([("TABLE_TYPE", string())]));
                rs.push_row(ResultRow::new(vec!["TABLE".into()]));
                rs.push_row(ResultRow::new(vec!["VIEW".into()]));
                Ok(rs)
            }
            MetadataOpcode::GetSchemas => {
                let pattern = Self::pattern(req.schema_name.as_deref())?;
                let dbs: Vec<String> = self
                    .catalog
                    .read()
                    .map_err(|_| Throwable::internal("catalog lock poisoned"))?
                    .dbs
                    .keys()
                    .cloned()
                    .collect();
                let mut rs = ResultSet::new(ResultSetMetadata::new([
                    ("TABLE_SCHEM", string()),
                    ("TABLE_CATALOG", string()),
                ]));
                for db in pattern.filter(&dbs) {
                    rs.push_row(ResultRow::new(vec![db.into(), ColumnValue::Null]));
                }
                Ok(rs)
            }
            MetadataOpcode::GetTables => {
                let schemas = Self::pattern(req.schema_name.as_deref())?;
                let tables = Self::pattern(req.table_name.as_deref())?;
                let catalog = self
                    .catalog
                    .read()
                    .map_err(|_| Throwable::internal("catalog lock poisoned"))?;
                let mut rs = ResultSet::new(ResultSetMetadata::new([
                    ("TABLE_CAT", string()),
                    ("TABLE_SCHEM", string()),
                    ("TABLE_NAME", string()),
                    ("TABLE_TYPE", string()),
                ]));
                for (db, names) in catalog.dbs.iter().filter(|(db, _)| schemas.matches(db)) {
                    for table in tables.filter(names) {
                        if Self::visible(req.session.as_ref(), &table) {
                            rs.push_row(ResultRow::new(vec![
                                ColumnValue::Null,
                                db.clone().into(),
                                table.into(),
                                "TABLE".into(),
                            ]));
                        }
                    }
                }
                Ok(rs)
            }
            other => Err(analysis_exception(format!(
                "Unsupported metadata operation: {other:?}"
            ))),
        }
    }

    fn load_data(&self, req: LoadDataReq) -> Result<LoadDataResp, Throwable> {
        self.require_ready()?;
        self.table(&req.table_name.db_name, &req.table_name.table_name)?;
        if req.source_path.is_empty() {
            return Err(analysis_exception("LOAD DATA source path must not be empty"));
        }
        let total = self.files_loaded.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(LoadDataResp {
            load_summary: format!(
                "Loaded 1 file(s) from {}. Total files loaded: {}",
                req.source_path, total
            ),
            files_loaded: total,
        })
    }

    fn check_configuration(&self) -> Option<String> {
        if self.params.authorization_policy_provider_class.is_some()
            && !self.params.authorization_enabled()
        {
            Some(
                "authorization_policy_provider_class is set but no authorization policy \
                 file or sentry config is configured"
                    .to_string(),
            )
        } else {
            None
        }
    }
}

impl HostedObject for FakeFrontend {
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, Throwable> {
        let codec = &self.codec;
        match method {
            "updateCatalogCache" => self.update_catalog_cache(decode_arg(codec, args)?),
            "getExplainPlan" => {
                let ctx: QueryCtx = decode_arg(codec, args)?;
                let request = self.exec_request(ctx)?;
                let mut lines = vec!["PLAN FRAGMENT 0".to_string()];
                if let Some(exec) = &request.query_exec_request {
                    for fragment in &exec.fragments {
                        lines.extend(fragment.plan_nodes.iter().map(|n| format!("  {n}")));
                    }
                }
                Ok(Value::from(lines.join("\n")))
            }
            "createExecRequest" => self.reply(&self.exec_request(decode_arg(codec, args)?)?),
            "getTableNames" => {
                let params: GetTablesParams = decode_arg(codec, args)?;
                self.require_ready()?;
                self.check_user(params.session.as_ref(), &params.db)?;
                let pattern = Self::pattern(params.pattern.as_deref())?;
                let tables = pattern
                    .filter(&self.tables_of(&params.db)?)
                    .into_iter()
                    .filter(|t| Self::visible(params.session.as_ref(), t))
                    .collect();
                self.reply(&GetTablesResult { tables })
            }
            "getDbNames" => {
                let params: GetDbsParams = decode_arg(codec, args)?;
                self.require_ready()?;
                self.check_user(params.session.as_ref(), "server")?;
                let pattern = Self::pattern(params.pattern.as_deref())?;
                let names: Vec<String> = self
                    .catalog
                    .read()
                    .map_err(|_| Throwable::internal("catalog lock poisoned"))?
                    .dbs
                    .keys()
                    .cloned()
                    .collect();
                self.reply(&GetDbsResult {
                    dbs: pattern.filter(&names),
                })
            }
            "getDataSrcMetadata" => {
                let params: GetDataSrcsParams = decode_arg(codec, args)?;
                let pattern = Self::pattern(params.pattern.as_deref())?;
                let mut result = GetDataSrcsResult::default();
                for (name, location, class, version) in DATA_SOURCES {
                    if pattern.matches(name) {
                        result.data_src_names.push(name.to_string());
                        result.locations.push(location.to_string());
                        result.class_names.push(class.to_string());
                        result.api_versions.push(version.to_string());
                    }
                }
                self.reply(&result)
            }
            "getStats" => self.reply(&self.get_stats(decode_arg(codec, args)?)?),
            "getRolePrivileges" => self.reply(&self.role_privileges(decode_arg(codec, args)?)?),
            "getFunctions" => {
                let params: GetFunctionsParams = decode_arg(codec, args)?;
                self.check_user(params.session.as_ref(), &params.db)?;
                if params.db != "_impala_builtins" {
                    self.tables_of(&params.db)?;
                }
                let pattern = Self::pattern(params.pattern.as_deref())?;
                let mut result = GetFunctionsResult::default();
                for (category, signature, ret) in FUNCTIONS {
                    let name = signature.split('(').next().unwrap_or_default();
                    if *category == params.category && pattern.matches(name) {
                        result.fn_signatures.push(signature.to_string());
                        result.fn_ret_types.push(ret.to_string());
                    }
                }
                self.reply(&result)
            }
            "getCatalogObject" => self.reply(&self.catalog_object(decode_arg(codec, args)?)?),
            "getRoles" => {
                let params: ShowRolesParams = decode_arg(codec, args)?;
                let role_names = if params.is_show_current_roles {
                    vec!["analysts".to_string()]
                } else {
                    match params.grant_group.as_deref() {
                        Some("ops") => vec!["admins".to_string()],
                        Some(_) => Vec::new(),
                        None => vec!["admins".to_string(), "analysts".to_string()],
                    }
                };
                self.reply(&ShowRolesResult { role_names })
            }
            "describeTable" => self.reply(&self.describe_table(decode_arg(codec, args)?)?),
            "showCreateTable" => Ok(Value::from(self.show_create_table(decode_arg(codec, args)?)?)),
            "checkConfiguration" => Ok(Value::Str(self.check_configuration())),
            "execHiveServer2MetadataOp" => self.reply(&self.metadata_op(decode_arg(codec, args)?)?),
            "getAllHadoopConfigs" => self.reply(&GetAllHadoopConfigsResponse {
                configs: self.hadoop_configs.clone(),
            }),
            "getHadoopConfig" => {
                let req: GetHadoopConfigRequest = decode_arg(codec, args)?;
                self.reply(&GetHadoopConfigResponse {
                    value: self.hadoop_configs.get(&req.name).cloned(),
                })
            }
            "loadTableData" => self.reply(&self.load_data(decode_arg(codec, args)?)?),
            "setCatalogInitialized" => {
                self.ready.store(true, Ordering::SeqCst);
                Ok(Value::Void)
            }
            other => Err(Throwable::internal(format!("no such method: {other}"))),
        }
    }
}
