//! The managed-runtime interface.

use crate::error::Result;
use crate::handle::{ClassHandle, MethodHandle, ObjectHandle, RuntimeId};
use crate::value::{Signature, Value};

/// Name under which constructors are resolved.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A managed execution runtime living in the same process.
///
/// This is the narrow waist between native callers and the managed side.
/// Everything that crosses it is a [`Value`]; everything it hands out is an
/// opaque handle.
///
/// # Threading
///
/// Implementations must accept concurrent calls from many threads. Every
/// thread must be attached (see [`crate::attach`]) before it resolves or
/// calls anything; calls from unattached threads fail with
/// [`crate::RuntimeError::NotAttached`].
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn ManagedRuntime>`.
pub trait ManagedRuntime: Send + Sync {
    /// Process-unique identity of this runtime instance.
    fn runtime_id(&self) -> RuntimeId;

    /// Associate the calling thread with the runtime's execution context.
    fn attach_current_thread(&self) -> Result<()>;

    /// Release the calling thread's association. A no-op if not attached.
    fn detach_current_thread(&self);

    /// Whether the calling thread is currently attached.
    fn is_current_thread_attached(&self) -> bool;

    /// Locate a class by fully-qualified name.
    fn find_class(&self, name: &str) -> Result<ClassHandle>;

    /// Resolve a method (or [`CONSTRUCTOR_NAME`]) by name and exact signature.
    fn method_id(&self, class: ClassHandle, name: &str, signature: &Signature)
        -> Result<MethodHandle>;

    /// Construct a new instance using a resolved constructor.
    fn new_object(
        &self,
        class: ClassHandle,
        ctor: MethodHandle,
        args: &[Value],
    ) -> Result<ObjectHandle>;

    /// Invoke a resolved method against an instance.
    fn call_method(&self, object: ObjectHandle, method: MethodHandle, args: &[Value])
        -> Result<Value>;
}
