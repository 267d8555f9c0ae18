//! Managed-Runtime Boundary
//!
//! This is the narrow waist of the frontend bridge. Everything at this level
//! is opaque: handles are ids, arguments and results are byte arrays or
//! nullable strings, and failures are tagged exceptions.
//!
//! - [`ManagedRuntime`]: the interface a runtime exposes (class lookup,
//!   method resolution, instantiation, invocation, thread attachment)
//! - [`ClassHandle`], [`MethodHandle`], [`ObjectHandle`]: opaque handles
//! - [`Value`], [`Shape`], [`Signature`]: what crosses the boundary
//! - [`Throwable`], [`ExceptionTag`]: failures raised on the far side
//! - [`attach`]: scoped per-thread attachment
//! - [`InProcessRuntime`]: a runtime hosting Rust services in this process
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use febridge_runtime::{
//!     attach, ClassDef, HostedObject, InProcessRuntime, ManagedRuntime, Signature,
//!     Throwable, Value, CONSTRUCTOR_NAME,
//! };
//!
//! struct Greeter;
//!
//! impl HostedObject for Greeter {
//!     fn invoke(&self, _method: &str, _args: &[Value]) -> Result<Value, Throwable> {
//!         Ok(Value::from("hello".to_string()))
//!     }
//! }
//!
//! let runtime: Arc<dyn ManagedRuntime> = Arc::new(InProcessRuntime::new().with_class(
//!     ClassDef::new("demo.Greeter")
//!         .constructor(Signature::unit_to_void(), |_| Ok(Arc::new(Greeter)))
//!         .method("greet", Signature::unit_to_str()),
//! ));
//!
//! attach::ensure_attached(&runtime).unwrap();
//! let class = runtime.find_class("demo.Greeter").unwrap();
//! let ctor = runtime
//!     .method_id(class, CONSTRUCTOR_NAME, &Signature::unit_to_void())
//!     .unwrap();
//! let greet = runtime.method_id(class, "greet", &Signature::unit_to_str()).unwrap();
//! let obj = runtime.new_object(class, ctor, &[]).unwrap();
//!
//! assert_eq!(
//!     runtime.call_method(obj, greet, &[]).unwrap(),
//!     Value::Str(Some("hello".to_string()))
//! );
//! ```

pub use bytes::Bytes;

pub mod attach;
mod error;
mod handle;
mod in_process;
mod traits;
mod value;

pub use attach::{attach_scoped, ensure_attached, AttachGuard};
pub use error::{ExceptionTag, Result, RuntimeError, Throwable};
pub use handle::{ClassHandle, MethodHandle, ObjectHandle, RuntimeId};
pub use in_process::{ClassDef, HostedObject, InProcessRuntime, RuntimeStats};
pub use traits::{ManagedRuntime, CONSTRUCTOR_NAME};
pub use value::{Shape, Signature, Value};
