//! An in-process managed runtime.
//!
//! `InProcessRuntime` hosts service classes written in Rust behind the same
//! handle-based interface a foreign runtime would expose. It is what the
//! bridge runs against when the service is embedded in the same binary
//! (single-process test and bootstrap setups), and it enforces the same
//! rules a real runtime does:
//!
//! - only attached threads may resolve or call anything
//! - arguments must match the declared signature exactly
//! - a panic inside a hosted method becomes an `Internal` exception instead
//!   of unwinding into the caller
//!
//! Return values are handed back as the hosted method produced them; judging
//! whether they match the declared return shape is the caller's business.

use std::collections::{BTreeMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::attach::current_thread_token;
use crate::error::{Result, RuntimeError, Throwable};
use crate::handle::{ClassHandle, MethodHandle, ObjectHandle, RuntimeId};
use crate::traits::{ManagedRuntime, CONSTRUCTOR_NAME};
use crate::value::{Signature, Value};

/// An object living inside an [`InProcessRuntime`].
///
/// Dispatch is by method name; the runtime has already checked that the
/// method exists on the class and that `args` match its signature.
pub trait HostedObject: Send + Sync {
    fn invoke(&self, method: &str, args: &[Value]) -> std::result::Result<Value, Throwable>;
}

type Constructor =
    dyn Fn(&[Value]) -> std::result::Result<Arc<dyn HostedObject>, Throwable> + Send + Sync;

/// Definition of a class that can be registered with an [`InProcessRuntime`].
pub struct ClassDef {
    name: String,
    constructor: Option<(Signature, Box<Constructor>)>,
    methods: BTreeMap<String, Signature>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: None,
            methods: BTreeMap::new(),
        }
    }

    /// Set the constructor. A class without one cannot be instantiated.
    pub fn constructor<F>(mut self, signature: Signature, f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<Arc<dyn HostedObject>, Throwable>
            + Send
            + Sync
            + 'static,
    {
        self.constructor = Some((signature, Box::new(f)));
        self
    }

    /// Declare a method. Calls are routed to [`HostedObject::invoke`].
    pub fn method(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.methods.insert(name.into(), signature);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn signature_of(&self, name: &str) -> Option<&Signature> {
        if name == CONSTRUCTOR_NAME {
            self.constructor.as_ref().map(|(sig, _)| sig)
        } else {
            self.methods.get(name)
        }
    }
}

impl std::fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish()
    }
}

struct ResolvedMethod {
    class: ClassHandle,
    name: String,
    signature: Signature,
}

struct Instance {
    class: ClassHandle,
    object: Arc<dyn HostedObject>,
}

/// Counters describing runtime activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub attaches: u64,
    pub detaches: u64,
    pub attached_threads: usize,
    pub class_lookups: u64,
    pub method_lookups: u64,
    pub instances: usize,
    pub calls: u64,
}

#[derive(Default)]
struct Counters {
    attaches: AtomicU64,
    detaches: AtomicU64,
    class_lookups: AtomicU64,
    method_lookups: AtomicU64,
    calls: AtomicU64,
}

/// A managed runtime hosting Rust-implemented classes in this process.
pub struct InProcessRuntime {
    id: RuntimeId,
    classes: RwLock<Vec<Arc<ClassDef>>>,
    methods: RwLock<Vec<ResolvedMethod>>,
    objects: RwLock<Vec<Instance>>,
    attached: Mutex<HashSet<u64>>,
    counters: Counters,
}

impl InProcessRuntime {
    pub fn new() -> Self {
        Self {
            id: RuntimeId::next(),
            classes: RwLock::new(Vec::new()),
            methods: RwLock::new(Vec::new()),
            objects: RwLock::new(Vec::new()),
            attached: Mutex::new(HashSet::new()),
            counters: Counters::default(),
        }
    }

    /// Builder-style class registration.
    pub fn with_class(self, class: ClassDef) -> Self {
        self.register_class(class);
        self
    }

    /// Register a class. A later registration under the same name shadows
    /// the earlier one for new lookups.
    pub fn register_class(&self, class: ClassDef) {
        debug!(runtime = %self.id, class = class.name(), "registering class");
        write(&self.classes).push(Arc::new(class));
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            attaches: self.counters.attaches.load(Ordering::SeqCst),
            detaches: self.counters.detaches.load(Ordering::SeqCst),
            attached_threads: lock(&self.attached).len(),
            class_lookups: self.counters.class_lookups.load(Ordering::SeqCst),
            method_lookups: self.counters.method_lookups.load(Ordering::SeqCst),
            instances: read(&self.objects).len(),
            calls: self.counters.calls.load(Ordering::SeqCst),
        }
    }

    fn require_attached(&self) -> Result<()> {
        if self.is_current_thread_attached() {
            Ok(())
        } else {
            Err(RuntimeError::NotAttached)
        }
    }

    fn class(&self, handle: ClassHandle) -> Result<Arc<ClassDef>> {
        read(&self.classes)
            .get(handle.as_raw() as usize)
            .cloned()
            .ok_or(RuntimeError::InvalidClass(handle))
    }
}

impl Default for InProcessRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagedRuntime for InProcessRuntime {
    fn runtime_id(&self) -> RuntimeId {
        self.id
    }

    fn attach_current_thread(&self) -> Result<()> {
        let token = current_thread_token().ok_or_else(|| {
            RuntimeError::AttachFailed("thread-local storage unavailable".to_string())
        })?;
        if lock(&self.attached).insert(token) {
            self.counters.attaches.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn detach_current_thread(&self) {
        let Some(token) = current_thread_token() else {
            return;
        };
        if lock(&self.attached).remove(&token) {
            self.counters.detaches.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_current_thread_attached(&self) -> bool {
        current_thread_token().is_some_and(|token| lock(&self.attached).contains(&token))
    }

    fn find_class(&self, name: &str) -> Result<ClassHandle> {
        self.require_attached()?;
        self.counters.class_lookups.fetch_add(1, Ordering::SeqCst);
        read(&self.classes)
            .iter()
            .rposition(|class| class.name == name)
            .map(|index| ClassHandle::from_raw(index as u64))
            .ok_or_else(|| RuntimeError::ClassNotFound(name.to_string()))
    }

    fn method_id(
        &self,
        class: ClassHandle,
        name: &str,
        signature: &Signature,
    ) -> Result<MethodHandle> {
        self.require_attached()?;
        self.counters.method_lookups.fetch_add(1, Ordering::SeqCst);

        let def = self.class(class)?;
        let found = def
            .signature_of(name)
            .ok_or_else(|| RuntimeError::MethodNotFound {
                class: def.name.clone(),
                name: name.to_string(),
            })?;
        if found != signature {
            return Err(RuntimeError::SignatureMismatch {
                class: def.name.clone(),
                name: name.to_string(),
                expected: signature.clone(),
                found: found.clone(),
            });
        }

        let mut methods = write(&self.methods);
        if let Some(index) = methods
            .iter()
            .position(|m| m.class == class && m.name == name)
        {
            return Ok(MethodHandle::from_raw(index as u64));
        }
        methods.push(ResolvedMethod {
            class,
            name: name.to_string(),
            signature: signature.clone(),
        });
        Ok(MethodHandle::from_raw((methods.len() - 1) as u64))
    }

    fn new_object(
        &self,
        class: ClassHandle,
        ctor: MethodHandle,
        args: &[Value],
    ) -> Result<ObjectHandle> {
        self.require_attached()?;
        let def = self.class(class)?;
        {
            let methods = read(&self.methods);
            let resolved = methods
                .get(ctor.as_raw() as usize)
                .filter(|m| m.class == class && m.name == CONSTRUCTOR_NAME)
                .ok_or(RuntimeError::InvalidMethod(ctor))?;
            if !resolved.signature.accepts(args) {
                return Err(RuntimeError::ArgumentMismatch {
                    expected: resolved.signature.clone(),
                });
            }
        }
        let (_, constructor) = def.constructor.as_ref().ok_or(RuntimeError::InvalidMethod(ctor))?;

        let object = guarded(&def.name, CONSTRUCTOR_NAME, || constructor(args))?;
        let mut objects = write(&self.objects);
        objects.push(Instance { class, object });
        debug!(runtime = %self.id, class = %def.name, "instantiated object");
        Ok(ObjectHandle::from_raw((objects.len() - 1) as u64))
    }

    fn call_method(&self, object: ObjectHandle, method: MethodHandle, args: &[Value]) -> Result<Value> {
        self.require_attached()?;
        self.counters.calls.fetch_add(1, Ordering::SeqCst);

        let (class, target) = read(&self.objects)
            .get(object.as_raw() as usize)
            .map(|i| (i.class, Arc::clone(&i.object)))
            .ok_or(RuntimeError::InvalidObject(object))?;

        let (name, signature) = read(&self.methods)
            .get(method.as_raw() as usize)
            .filter(|m| m.class == class && m.name != CONSTRUCTOR_NAME)
            .map(|m| (m.name.clone(), m.signature.clone()))
            .ok_or(RuntimeError::InvalidMethod(method))?;

        if !signature.accepts(args) {
            return Err(RuntimeError::ArgumentMismatch {
                expected: signature,
            });
        }

        let class_name = self.class(class)?.name.clone();
        guarded(&class_name, &name, || target.invoke(&name, args))
    }
}

/// Run hosted code, turning a panic into an `Internal` exception.
fn guarded<T>(
    class: &str,
    method: &str,
    f: impl FnOnce() -> std::result::Result<T, Throwable>,
) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(RuntimeError::Thrown),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RuntimeError::Thrown(Throwable::internal(format!(
                "{}.{} panicked: {}",
                class, method, detail
            ))))
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
