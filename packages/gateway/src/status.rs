//! The uniform per-call status.
//!
//! Every failure a wrapper can hit, whether raised by the service, by the
//! runtime, or by the codec, is folded into a [`Status`] here. The mapping is
//! by exception tag, never by message text.

use std::fmt;

use febridge_runtime::{ExceptionTag, RuntimeError, Shape, Throwable};
use thiserror::Error;

use crate::operation::Operation;

/// Classification of a call outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCode {
    #[default]
    Ok,
    /// The service reported a failure, or its response could not be decoded.
    GeneralError,
    /// The caller is not allowed to perform the operation.
    AuthorizationError,
    /// The bridge or the runtime faulted.
    InternalError,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusCode::Ok => "OK",
            StatusCode::GeneralError => "GENERAL_ERROR",
            StatusCode::AuthorizationError => "AUTHORIZATION_ERROR",
            StatusCode::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(s)
    }
}

impl From<ExceptionTag> for StatusCode {
    fn from(tag: ExceptionTag) -> Self {
        match tag {
            ExceptionTag::Authorization => StatusCode::AuthorizationError,
            ExceptionTag::Operation => StatusCode::GeneralError,
            ExceptionTag::Internal => StatusCode::InternalError,
        }
    }
}

/// Outcome of a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{code}: {message}")]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
    /// Class of the remote exception, when the failure came from the service.
    pub exception_class: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            exception_class: None,
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GeneralError, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(StatusCode::AuthorizationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalError, message)
    }

    pub(crate) fn unexpected_shape(operation: Operation, expected: Shape, found: Shape) -> Self {
        Self::general(format!(
            "{} returned {:?}, expected {:?}",
            operation, found, expected
        ))
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }

    pub fn is_authorization_error(&self) -> bool {
        is_authorization_error(self)
    }
}

/// True exactly when `status` is an authorization failure.
pub fn is_authorization_error(status: &Status) -> bool {
    status.code == StatusCode::AuthorizationError
}

impl From<Throwable> for Status {
    fn from(t: Throwable) -> Self {
        Self {
            code: t.tag.into(),
            message: t.message,
            exception_class: Some(t.class_name),
        }
    }
}

impl From<RuntimeError> for Status {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::Thrown(t) => t.into(),
            other => Status::internal(other.to_string()),
        }
    }
}

impl From<febridge_wire::Error> for Status {
    fn from(e: febridge_wire::Error) -> Self {
        if e.is_decode() {
            Status::general(e.to_string())
        } else {
            Status::internal(e.to_string())
        }
    }
}
