//! Error types for the runtime boundary.

use std::fmt;

use thiserror::Error;

use crate::handle::{ClassHandle, MethodHandle, ObjectHandle};
use crate::value::Signature;

/// Classification tag carried by every exception raised on the far side.
///
/// This is the primary mechanism callers use to tell failures apart; the
/// exception class name is only consulted when a runtime cannot tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionTag {
    /// The caller is not permitted to perform the operation.
    Authorization,
    /// The service rejected or failed the operation (analysis error,
    /// catalog error, malformed request, ...).
    Operation,
    /// The service faulted unexpectedly (a bug, not a reported failure).
    Internal,
}

impl ExceptionTag {
    const AUTHORIZATION_SUFFIX: &'static str = "AuthorizationException";

    /// Classify an exception by class name, for runtimes that report no tag.
    ///
    /// Classes ending in `AuthorizationException` are authorization failures,
    /// classes ending in `Exception` are operation failures, anything else
    /// (errors, runtime faults) is internal.
    pub fn from_class_name(class_name: &str) -> Self {
        let simple = class_name.rsplit(['.', '$']).next().unwrap_or(class_name);
        if simple.ends_with(Self::AUTHORIZATION_SUFFIX) {
            ExceptionTag::Authorization
        } else if simple.ends_with("Exception") && !is_unchecked(simple) {
            ExceptionTag::Operation
        } else {
            ExceptionTag::Internal
        }
    }
}

fn is_unchecked(simple: &str) -> bool {
    matches!(
        simple,
        "RuntimeException"
            | "NullPointerException"
            | "IllegalStateException"
            | "IllegalArgumentException"
            | "IndexOutOfBoundsException"
            | "ClassCastException"
            | "UnsupportedOperationException"
    )
}

impl fmt::Display for ExceptionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionTag::Authorization => write!(f, "authorization"),
            ExceptionTag::Operation => write!(f, "operation"),
            ExceptionTag::Internal => write!(f, "internal"),
        }
    }
}

/// An exception raised by code running inside the managed runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throwable {
    pub class_name: String,
    pub tag: ExceptionTag,
    pub message: String,
}

impl Throwable {
    /// An exception with an explicit tag.
    pub fn tagged(
        tag: ExceptionTag,
        class_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            tag,
            message: message.into(),
        }
    }

    /// An exception classified from its class name.
    pub fn from_class(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        let class_name = class_name.into();
        let tag = ExceptionTag::from_class_name(&class_name);
        Self {
            class_name,
            tag,
            message: message.into(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::tagged(
            ExceptionTag::Authorization,
            "AuthorizationException",
            message,
        )
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::tagged(ExceptionTag::Operation, "ImpalaException", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::tagged(ExceptionTag::Internal, "InternalError", message)
    }
}

impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class_name, self.message)
    }
}

impl std::error::Error for Throwable {}

/// Errors surfaced by a managed runtime.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// The named class is not loaded in the runtime.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// No method with this name exists on the class.
    #[error("method not found: {class}.{name}")]
    MethodNotFound { class: String, name: String },

    /// The method exists but its signature differs from the one requested.
    #[error("signature mismatch for {class}.{name}: expected {expected}, found {found}")]
    SignatureMismatch {
        class: String,
        name: String,
        expected: Signature,
        found: Signature,
    },

    /// The calling thread has not been attached to the runtime.
    #[error("calling thread is not attached to the runtime")]
    NotAttached,

    /// Attaching the calling thread failed.
    #[error("failed to attach thread: {0}")]
    AttachFailed(String),

    #[error("invalid class handle: {0}")]
    InvalidClass(ClassHandle),

    #[error("invalid method handle: {0}")]
    InvalidMethod(MethodHandle),

    #[error("invalid object handle: {0}")]
    InvalidObject(ObjectHandle),

    /// Arguments passed to a call do not match the declared signature.
    #[error("arguments do not match signature {expected}")]
    ArgumentMismatch { expected: Signature },

    /// Code in the runtime raised an exception.
    #[error("{0}")]
    Thrown(Throwable),
}

impl From<Throwable> for RuntimeError {
    fn from(t: Throwable) -> Self {
        RuntimeError::Thrown(t)
    }
}

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
