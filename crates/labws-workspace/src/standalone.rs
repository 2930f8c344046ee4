//! In-memory standalone backend.
//!
//! All state lives in an ordered name table behind a `RwLock`; every
//! operation is synchronous and purely local. Objects are cloned on the way
//! in and on the way out, so a caller mutating an object it added (or one it
//! fetched) never affects the stored value.

use std::sync::RwLock;

use labws_objects::DataObject;

use crate::backend::WorkspaceBackend;
use crate::error::{WorkspaceError, WorkspaceResult};

/// In-memory ordered mapping from name to object.
#[derive(Debug, Default)]
pub struct StandaloneBackend {
    entries: RwLock<Vec<(String, DataObject)>>,
}

impl StandaloneBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full ordered table, cloned. Used by the resync snapshot and the
    /// persistence layer.
    pub fn entries(&self) -> Vec<(String, DataObject)> {
        self.entries.read().expect("lock poisoned").clone()
    }

    fn not_found(&self, name: &str, entries: &[(String, DataObject)]) -> WorkspaceError {
        WorkspaceError::NotFound {
            name: name.to_string(),
            available: entries.iter().map(|(n, _)| n.clone()).collect(),
        }
    }
}

impl WorkspaceBackend for StandaloneBackend {
    fn name(&self) -> &'static str {
        "standalone"
    }

    fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> WorkspaceResult<()> {
        let mut stored = object.clone();
        stored.set_title(name);

        let mut entries = self.entries.write().expect("lock poisoned");
        match entries.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => {
                if !overwrite {
                    return Err(WorkspaceError::Duplicate(name.to_string()));
                }
                slot.1 = stored;
            }
            None => entries.push((name.to_string(), stored)),
        }
        Ok(())
    }

    fn get(&self, name: &str) -> WorkspaceResult<DataObject> {
        let entries = self.entries.read().expect("lock poisoned");
        entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, obj)| obj.clone())
            .ok_or_else(|| self.not_found(name, &entries))
    }

    fn remove(&self, name: &str) -> WorkspaceResult<()> {
        let mut entries = self.entries.write().expect("lock poisoned");
        match entries.iter().position(|(n, _)| n == name) {
            Some(pos) => {
                entries.remove(pos);
                Ok(())
            }
            None => Err(self.not_found(name, &entries)),
        }
    }

    fn rename(&self, old_name: &str, new_name: &str) -> WorkspaceResult<()> {
        let mut entries = self.entries.write().expect("lock poisoned");
        if !entries.iter().any(|(n, _)| n == old_name) {
            return Err(self.not_found(old_name, &entries));
        }
        if old_name == new_name {
            return Ok(());
        }
        if entries.iter().any(|(n, _)| n == new_name) {
            return Err(WorkspaceError::Duplicate(new_name.to_string()));
        }
        if let Some(slot) = entries.iter_mut().find(|(n, _)| n == old_name) {
            slot.0 = new_name.to_string();
            slot.1.set_title(new_name);
        }
        Ok(())
    }

    fn list(&self) -> WorkspaceResult<Vec<String>> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries.iter().map(|(n, _)| n.clone()).collect())
    }

    fn exists(&self, name: &str) -> WorkspaceResult<bool> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries.iter().any(|(n, _)| n == name))
    }

    fn clear(&self) -> WorkspaceResult<()> {
        self.entries.write().expect("lock poisoned").clear();
        Ok(())
    }

    fn len(&self) -> WorkspaceResult<usize> {
        Ok(self.entries.read().expect("lock poisoned").len())
    }
}
