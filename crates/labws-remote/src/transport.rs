use labws_objects::{DataObject, Metadata};

use crate::error::RemoteResult;

/// Transport interface to a remote workspace host.
///
/// Each workspace operation maps to exactly one remote call. Implementations
/// must translate every network failure into a connection-class
/// [`RemoteError`](crate::RemoteError), never swallow it, and must not retry
/// on their own. `get` always fetches current data; nothing is cached beyond
/// what `list`/`exists` need.
pub trait RemoteTransport: Send + Sync {
    /// Protocol handshake; used as the liveness check after connecting.
    fn ping(&self) -> RemoteResult<()>;

    /// Names of all objects on the remote host, in listing order.
    fn list(&self) -> RemoteResult<Vec<String>>;

    /// Fetch an object by name.
    fn get(&self, name: &str) -> RemoteResult<DataObject>;

    /// Store an object under a name.
    fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> RemoteResult<()>;

    /// Delete an object by name.
    fn remove(&self, name: &str) -> RemoteResult<()>;

    /// Rename an object, preserving its listing position.
    fn rename(&self, old_name: &str, new_name: &str) -> RemoteResult<()>;

    /// Check whether a name is bound.
    fn exists(&self, name: &str) -> RemoteResult<bool>;

    /// Remove all objects.
    fn clear(&self) -> RemoteResult<()>;

    /// Trigger a named remote computation. Live-only; has no standalone
    /// equivalent.
    fn invoke(&self, name: &str, params: Metadata) -> RemoteResult<Metadata>;
}
