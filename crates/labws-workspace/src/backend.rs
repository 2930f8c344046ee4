use labws_objects::DataObject;

use crate::error::WorkspaceResult;

/// Storage substrate answering workspace operations.
///
/// Exactly one implementation is active per workspace at any time. The
/// facade and the resync logic operate only through this trait, never
/// against backend-specific state. Implementations take `&self`; interior
/// mutability is the backend's concern.
pub trait WorkspaceBackend: Send + Sync {
    /// Short name for status reports and log events.
    fn name(&self) -> &'static str;

    /// Store a deep copy of the object under `name`, stamping the copy's
    /// title with the binding name.
    fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> WorkspaceResult<()>;

    /// Deep copy of the stored object.
    fn get(&self, name: &str) -> WorkspaceResult<DataObject>;

    /// Delete the entry.
    fn remove(&self, name: &str) -> WorkspaceResult<()>;

    /// Move the entry to a new name, keeping its listing position and
    /// retitling the stored object.
    fn rename(&self, old_name: &str, new_name: &str) -> WorkspaceResult<()>;

    /// All bound names in insertion order.
    fn list(&self) -> WorkspaceResult<Vec<String>>;

    /// Whether a name is bound.
    fn exists(&self, name: &str) -> WorkspaceResult<bool>;

    /// Remove every entry.
    fn clear(&self) -> WorkspaceResult<()>;

    /// Number of entries.
    fn len(&self) -> WorkspaceResult<usize>;
}
