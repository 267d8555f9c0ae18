//! Per-thread attachment to a managed runtime.
//!
//! Every thread that calls into a runtime must first be associated with it,
//! and must release that association when it exits. [`ensure_attached`]
//! does both: the first call on a thread attaches it and parks an
//! [`AttachGuard`] in thread-local storage; the guard detaches the thread
//! when thread-local storage is torn down at thread exit.
//!
//! Explicit scopes are also supported by holding an [`AttachGuard`] directly:
//!
//! ```rust,ignore
//! let rt: Arc<dyn ManagedRuntime> = Arc::new(InProcessRuntime::new());
//! {
//!     let _guard = AttachGuard::attach(&rt)?;
//!     // calls on this thread are attached here
//! }
//! // detached again
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::error::Result;
use crate::handle::RuntimeId;
use crate::traits::ManagedRuntime;

static NEXT_THREAD_TOKEN: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // No destructor: stays readable while other thread-locals are being torn down.
    static THREAD_TOKEN: Cell<u64> = const { Cell::new(0) };

    static ATTACHED: RefCell<Vec<AttachGuard>> = const { RefCell::new(Vec::new()) };
}

/// A process-unique token for the calling thread.
///
/// Unlike `std::thread::current()`, this is safe to call from thread-local
/// destructors, which is where detachment happens. Returns `None` only if
/// thread-local storage is no longer accessible.
pub fn current_thread_token() -> Option<u64> {
    THREAD_TOKEN
        .try_with(|token| {
            if token.get() == 0 {
                token.set(NEXT_THREAD_TOKEN.fetch_add(1, Ordering::Relaxed));
            }
            token.get()
        })
        .ok()
}

/// Holds the calling thread attached to a runtime until dropped.
///
/// Guards are tied to the thread that created them and cannot be sent
/// elsewhere. A guard does not keep its runtime alive; if the runtime is
/// gone by the time the guard drops, there is nothing to detach from.
pub struct AttachGuard {
    id: RuntimeId,
    runtime: Weak<dyn ManagedRuntime>,
    _not_send: PhantomData<*const ()>,
}

impl AttachGuard {
    /// Attach the calling thread to `runtime`.
    pub fn attach(runtime: &Arc<dyn ManagedRuntime>) -> Result<Self> {
        runtime.attach_current_thread()?;
        let id = runtime.runtime_id();
        trace!(runtime = %id, "attached thread");
        Ok(Self {
            id,
            runtime: Arc::downgrade(runtime),
            _not_send: PhantomData,
        })
    }

    /// The runtime this guard keeps the thread attached to.
    pub fn runtime_id(&self) -> RuntimeId {
        self.id
    }
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.detach_current_thread();
        }
    }
}

impl std::fmt::Debug for AttachGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachGuard").field("id", &self.id).finish()
    }
}

/// Make sure the calling thread is attached to `runtime`.
///
/// Attaches on the first call per thread and runtime; later calls are a
/// thread-local lookup. If the thread is already attached by someone else
/// (an explicit [`AttachGuard`] scope), that association is left alone.
pub fn ensure_attached(runtime: &Arc<dyn ManagedRuntime>) -> Result<()> {
    if let Some(guard) = attach_scoped(runtime)? {
        park(guard);
    }
    Ok(())
}

/// Attach the calling thread unless it already is attached to `runtime`.
///
/// Returns the guard for an attach made here, or `None` when there was
/// nothing to do. Dropping the guard undoes the attach; [`park`] keeps it
/// until the thread exits.
pub fn attach_scoped(runtime: &Arc<dyn ManagedRuntime>) -> Result<Option<AttachGuard>> {
    let id = runtime.runtime_id();
    let parked = ATTACHED.with(|attached| attached.borrow().iter().any(|guard| guard.id == id));
    if parked || runtime.is_current_thread_attached() {
        return Ok(None);
    }
    AttachGuard::attach(runtime).map(Some)
}

/// Keep `guard`'s attachment for the rest of the calling thread's life.
///
/// Only one guard per runtime is parked; a second one is dropped, which
/// detaches the thread it attached.
pub fn park(guard: AttachGuard) {
    ATTACHED.with(|attached| {
        let mut attached = attached.borrow_mut();
        if attached.iter().any(|parked| parked.id == guard.id) {
            return;
        }
        attached.retain(|parked| parked.runtime.strong_count() > 0);
        attached.push(guard);
    })
}

/// Detach the calling thread from `runtime` now, if [`ensure_attached`]
/// attached it. Returns whether a detach happened.
pub fn release_current_thread(runtime_id: RuntimeId) -> bool {
    ATTACHED.with(|attached| {
        let mut attached = attached.borrow_mut();
        let before = attached.len();
        // Dropping the guard performs the detach.
        attached.retain(|guard| guard.id != runtime_id);
        attached.len() != before
    })
}
