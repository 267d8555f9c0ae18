//! Frontend Gateway
//!
//! The single conduit between native callers and the frontend service that
//! compiles queries and owns the catalog. The service lives in a managed
//! runtime ([`febridge_runtime::ManagedRuntime`]); the gateway resolves its
//! entry points once at startup and then exposes one typed, synchronous
//! method per operation.
//!
//! - [`Frontend`]: the gateway, one wrapper per [`Operation`]
//! - [`Operation`], [`EntryPoint`]: the fixed operation table
//! - [`HandleTable`]: resolve-all-or-fail entry point resolution
//! - [`Status`], [`StatusCode`]: the uniform per-call error
//! - [`BridgeConfig`]: service class, wire format and init parameters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use febridge_gateway::{BridgeConfig, Frontend};
//!
//! let config = BridgeConfig::from_file("/etc/impala/bridge.json")?;
//! let frontend = Frontend::new_or_exit(Arc::new(runtime), &config);
//!
//! match frontend.get_db_names(Some("tpch*"), Some(&session)) {
//!     Ok(result) => println!("{:?}", result.dbs),
//!     Err(status) if status.is_authorization_error() => println!("permission denied"),
//!     Err(status) => println!("error: {}", status),
//! }
//! ```

mod config;
mod error;
mod frontend;
mod handles;
mod operation;
mod status;

pub use config::{BridgeConfig, ConfigError, DEFAULT_SERVICE_CLASS};
pub use error::ConstructionError;
pub use frontend::{CallResult, Frontend};
pub use handles::HandleTable;
pub use operation::{EntryPoint, Operation};
pub use status::{is_authorization_error, Status, StatusCode};
