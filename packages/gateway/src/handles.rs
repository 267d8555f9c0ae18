//! Resolve-all-or-fail handle table.

use febridge_runtime::{ClassHandle, ManagedRuntime, MethodHandle};
use tracing::debug;

use crate::error::ConstructionError;
use crate::operation::Operation;

/// Method handles for every operation, resolved once against one class.
///
/// A table only exists fully resolved; immutable afterwards and safe to
/// share across threads without locking.
#[derive(Debug, Clone)]
pub struct HandleTable {
    class: ClassHandle,
    handles: [MethodHandle; Operation::COUNT],
}

impl HandleTable {
    /// Resolve every operation in [`Operation::ALL`] against `class`.
    ///
    /// Stops at the first operation whose entry point is missing or has a
    /// different signature, and returns no table at all in that case.
    pub fn resolve<R>(runtime: &R, class: ClassHandle) -> Result<Self, ConstructionError>
    where
        R: ManagedRuntime + ?Sized,
    {
        // Every slot is overwritten: `ALL` covers each index exactly once.
        let mut handles = [MethodHandle::from_raw(0); Operation::COUNT];
        for &operation in Operation::ALL {
            let entry = operation.entry_point();
            let handle = runtime
                .method_id(class, entry.name, &entry.signature)
                .map_err(|source| ConstructionError::EntryPoint {
                    operation,
                    entry: entry.clone(),
                    source,
                })?;
            debug!(%operation, entry_point = %entry, %handle, "resolved entry point");
            handles[operation.index()] = handle;
        }
        Ok(Self { class, handles })
    }

    pub fn class(&self) -> ClassHandle {
        self.class
    }

    pub fn get(&self, operation: Operation) -> MethodHandle {
        self.handles[operation.index()]
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Operations paired with their handles, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, MethodHandle)> + '_ {
        Operation::ALL.iter().map(|&op| (op, self.get(op)))
    }
}
