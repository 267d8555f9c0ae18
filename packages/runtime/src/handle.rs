//! Opaque handles issued by a managed runtime.
//!
//! Handles are plain ids. Only the runtime that issued a handle can
//! interpret it; callers store and pass them back, nothing more.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw id. Intended for runtime implementations.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw id.
            pub const fn as_raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

opaque_handle!(
    /// A resolved class/type descriptor.
    ClassHandle,
    "class"
);

opaque_handle!(
    /// A resolved callable entry point (method or constructor).
    MethodHandle,
    "method"
);

opaque_handle!(
    /// A live object owned by the runtime.
    ObjectHandle,
    "object"
);

opaque_handle!(
    /// Identity of a runtime instance, used to key per-thread attachment.
    RuntimeId,
    "runtime"
);

static NEXT_RUNTIME_ID: AtomicU64 = AtomicU64::new(1);

impl RuntimeId {
    /// Allocate a process-unique runtime id.
    pub fn next() -> Self {
        Self(NEXT_RUNTIME_ID.fetch_add(1, Ordering::Relaxed))
    }
}
