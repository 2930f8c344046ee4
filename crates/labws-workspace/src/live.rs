//! Live backend: a proxy that forwards every operation to a remote host.
//!
//! Nothing is cached; `get` always fetches current data so the view never
//! goes stale. Mutations propagate synchronously, so success is never
//! reported while the local and remote views diverge. Remote failures are
//! translated through [`WorkspaceError`]'s `From<RemoteError>`: channel
//! failures become `Connection` (which the facade turns into a fallback),
//! domain errors pass through unchanged.

use labws_objects::{DataObject, Metadata};
use labws_remote::{ConnectionDescriptor, RemoteTransport};

use crate::backend::WorkspaceBackend;
use crate::error::{WorkspaceError, WorkspaceResult};

/// Proxy backend over a [`RemoteTransport`].
pub struct LiveBackend {
    descriptor: ConnectionDescriptor,
    transport: Box<dyn RemoteTransport>,
}

impl LiveBackend {
    /// Wrap an already-connected transport.
    pub fn new(transport: Box<dyn RemoteTransport>, descriptor: ConnectionDescriptor) -> Self {
        Self { descriptor, transport }
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    /// Trigger a named remote computation. The single live-only operation;
    /// the facade rejects it in standalone mode.
    pub fn invoke(&self, name: &str, params: Metadata) -> WorkspaceResult<Metadata> {
        Ok(self.transport.invoke(name, params)?)
    }
}

impl WorkspaceBackend for LiveBackend {
    fn name(&self) -> &'static str {
        "live"
    }

    fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> WorkspaceResult<()> {
        let mut stored = object.clone();
        stored.set_title(name);
        Ok(self.transport.add(name, &stored, overwrite)?)
    }

    fn get(&self, name: &str) -> WorkspaceResult<DataObject> {
        Ok(self.transport.get(name)?)
    }

    fn remove(&self, name: &str) -> WorkspaceResult<()> {
        Ok(self.transport.remove(name)?)
    }

    fn rename(&self, old_name: &str, new_name: &str) -> WorkspaceResult<()> {
        if old_name == new_name {
            // Nothing moves, but the name must still be bound.
            if self.transport.exists(old_name)? {
                return Ok(());
            }
            return Err(WorkspaceError::NotFound {
                name: old_name.to_string(),
                available: self.transport.list()?,
            });
        }
        Ok(self.transport.rename(old_name, new_name)?)
    }

    fn list(&self) -> WorkspaceResult<Vec<String>> {
        Ok(self.transport.list()?)
    }

    fn exists(&self, name: &str) -> WorkspaceResult<bool> {
        Ok(self.transport.exists(name)?)
    }

    fn clear(&self) -> WorkspaceResult<()> {
        Ok(self.transport.clear()?)
    }

    fn len(&self) -> WorkspaceResult<usize> {
        Ok(self.transport.list()?.len())
    }
}
