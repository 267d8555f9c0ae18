//! Startup failures.

use febridge_runtime::{RuntimeError, Signature};
use thiserror::Error;

use crate::config::ConfigError;
use crate::operation::{EntryPoint, Operation};

/// Why a [`crate::Frontend`] could not be built.
///
/// All of these mean the deployment is broken. None are retried.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("invalid bridge configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to attach startup thread to the runtime: {0}")]
    Attach(#[source] RuntimeError),

    #[error("frontend service class {class} not found: {source}")]
    ClassNotFound {
        class: String,
        #[source]
        source: RuntimeError,
    },

    #[error("constructor {class}.<init>{signature} not found: {source}")]
    ConstructorNotFound {
        class: String,
        signature: Signature,
        #[source]
        source: RuntimeError,
    },

    #[error("entry point for {operation} ({entry}) could not be resolved: {source}")]
    EntryPoint {
        operation: Operation,
        entry: EntryPoint,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to instantiate {class}: {source}")]
    Instantiation {
        class: String,
        #[source]
        source: RuntimeError,
    },

    #[error("codec error: {0}")]
    Codec(#[from] febridge_wire::Error),
}
