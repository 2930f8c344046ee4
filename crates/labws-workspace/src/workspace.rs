//! The workspace facade and its mode controller.
//!
//! A [`Workspace`] owns exactly one active backend and forwards every
//! operation to it unchanged. The active backend lives behind
//! `RwLock<Arc<..>>` so reads clone the `Arc` under a short lock and then
//! run with no lock held; a blocking live round trip never starves a
//! concurrent `list()`. A separate mutex serializes the multi-step
//! protocols (mutations, resync, save/load) against each other.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use labws_objects::{DataObject, Metadata, ObjectError};
use labws_protocol::AuthMethod;
use labws_remote::{ConnectionDescriptor, HttpTransport, RemoteError, RemoteTransport};
use labws_snap::{read_snapshot, write_snapshot, SnapshotWriter};
use tracing::{debug, info, warn};

use crate::backend::WorkspaceBackend;
use crate::config::{ModePreference, WorkspaceConfig};
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::live::LiveBackend;
use crate::standalone::StandaloneBackend;

/// Which backend is currently answering operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Standalone,
    Live,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standalone => write!(f, "standalone"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Point-in-time report of workspace state.
#[derive(Clone, Debug)]
pub struct WorkspaceStatus {
    pub mode: Mode,
    pub objects: usize,
    /// Live endpoint, when live.
    pub endpoint: Option<String>,
    /// Set after an automatic live-to-standalone fallback; cleared by the
    /// next successful resync.
    pub fallback: Option<String>,
}

enum ActiveBackend {
    Standalone(StandaloneBackend),
    Live(LiveBackend),
}

impl ActiveBackend {
    fn backend(&self) -> &dyn WorkspaceBackend {
        match self {
            Self::Standalone(s) => s,
            Self::Live(l) => l,
        }
    }

    fn mode(&self) -> Mode {
        match self {
            Self::Standalone(_) => Mode::Standalone,
            Self::Live(_) => Mode::Live,
        }
    }
}

/// The unified data-object store.
///
/// Multiple independent workspaces can coexist in one process; there is no
/// global state.
pub struct Workspace {
    active: RwLock<Arc<ActiveBackend>>,
    /// Serializes mutations, resync, and save/load against each other.
    ops: Mutex<()>,
    config: WorkspaceConfig,
    fallback_note: RwLock<Option<String>>,
}

impl Workspace {
    /// Resolve the starting mode from configuration and construct the
    /// workspace. Never fails: any unreachable or misconfigured live host
    /// degrades to standalone with a logged warning.
    pub fn new(config: WorkspaceConfig) -> Self {
        let active = Self::resolve_startup(&config);
        Self {
            active: RwLock::new(Arc::new(active)),
            ops: Mutex::new(()),
            config,
            fallback_note: RwLock::new(None),
        }
    }

    /// A standalone workspace with no endpoint configured.
    pub fn standalone() -> Self {
        Self::new(WorkspaceConfig {
            mode: ModePreference::Standalone,
            ..Default::default()
        })
    }

    /// Configuration taken from `LABWS_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(WorkspaceConfig::from_env())
    }

    /// A live workspace over an already-connected transport.
    pub fn live(transport: Box<dyn RemoteTransport>, descriptor: ConnectionDescriptor) -> Self {
        Self {
            active: RwLock::new(Arc::new(ActiveBackend::Live(LiveBackend::new(
                transport, descriptor,
            )))),
            ops: Mutex::new(()),
            config: WorkspaceConfig::default(),
            fallback_note: RwLock::new(None),
        }
    }

    fn resolve_startup(config: &WorkspaceConfig) -> ActiveBackend {
        match config.mode {
            ModePreference::Standalone => {
                info!("starting in standalone mode (forced)");
                ActiveBackend::Standalone(StandaloneBackend::new())
            }
            ModePreference::Live => match config.descriptor() {
                Some(descriptor) => {
                    Self::try_live(&descriptor, config.request_timeout, "live mode forced")
                }
                None => {
                    warn!("live mode forced but no endpoint configured, starting standalone");
                    ActiveBackend::Standalone(StandaloneBackend::new())
                }
            },
            ModePreference::Auto => match config.descriptor() {
                Some(descriptor) if HttpTransport::probe(&descriptor, config.probe_timeout) => {
                    Self::try_live(&descriptor, config.request_timeout, "live host detected")
                }
                Some(descriptor) => {
                    debug!(endpoint = %descriptor.endpoint(), "no live host detected, starting standalone");
                    ActiveBackend::Standalone(StandaloneBackend::new())
                }
                None => {
                    debug!("no endpoint configured, starting standalone");
                    ActiveBackend::Standalone(StandaloneBackend::new())
                }
            },
        }
    }

    fn try_live(
        descriptor: &ConnectionDescriptor,
        timeout: Duration,
        reason: &str,
    ) -> ActiveBackend {
        match HttpTransport::connect(descriptor.clone(), timeout) {
            Ok(transport) => {
                info!(endpoint = %descriptor.endpoint(), reason, "starting in live mode");
                ActiveBackend::Live(LiveBackend::new(Box::new(transport), descriptor.clone()))
            }
            Err(err) => {
                warn!(
                    endpoint = %descriptor.endpoint(),
                    error = %err,
                    "live host unreachable, starting standalone"
                );
                ActiveBackend::Standalone(StandaloneBackend::new())
            }
        }
    }

    // ---- operation plumbing ----

    fn active_arc(&self) -> Arc<ActiveBackend> {
        Arc::clone(&self.active.read().expect("lock poisoned"))
    }

    /// Read path: no operation lock; the backend pointer is cloned and the
    /// call runs lock-free.
    fn read_op<T>(
        &self,
        f: impl FnOnce(&dyn WorkspaceBackend) -> WorkspaceResult<T>,
    ) -> WorkspaceResult<T> {
        let active = self.active_arc();
        let result = f(active.backend());
        self.maybe_fall_back(&active, &result);
        result
    }

    /// Mutation path: serialized against resync and save/load.
    fn write_op<T>(
        &self,
        f: impl FnOnce(&dyn WorkspaceBackend) -> WorkspaceResult<T>,
    ) -> WorkspaceResult<T> {
        let guard = self.ops.lock().expect("lock poisoned");
        let active = self.active_arc();
        let result = f(active.backend());
        drop(guard);
        self.maybe_fall_back(&active, &result);
        result
    }

    fn maybe_fall_back<T>(&self, active: &Arc<ActiveBackend>, result: &WorkspaceResult<T>) {
        if let Err(WorkspaceError::Connection(reason)) = result {
            if active.mode() == Mode::Live {
                self.fall_back(active, reason);
            }
        }
    }

    /// Live-to-standalone fallback after a connection-class failure. The
    /// fresh table starts empty; the failure that triggered this is still
    /// returned to the caller, and the loss of state is recorded as a note
    /// visible through `status()`.
    fn fall_back(&self, failed: &Arc<ActiveBackend>, reason: &str) {
        let _guard = self.ops.lock().expect("lock poisoned");
        let mut slot = self.active.write().expect("lock poisoned");
        // Another thread may have already swapped the backend.
        if !Arc::ptr_eq(&slot, failed) {
            return;
        }
        warn!(reason, "live connection lost, falling back to standalone");
        *slot = Arc::new(ActiveBackend::Standalone(StandaloneBackend::new()));
        *self.fallback_note.write().expect("lock poisoned") = Some(format!(
            "live connection lost ({reason}); now standalone with an empty workspace"
        ));
    }

    // ---- store operations ----

    /// Store a deep copy of `object` under `name`.
    pub fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> WorkspaceResult<()> {
        if name.is_empty() {
            return Err(ObjectError::Empty("name").into());
        }
        self.write_op(|b| b.add(name, object, overwrite))
    }

    /// Deep copy of the stored object.
    pub fn get(&self, name: &str) -> WorkspaceResult<DataObject> {
        self.read_op(|b| b.get(name))
    }

    /// Delete an entry.
    pub fn remove(&self, name: &str) -> WorkspaceResult<()> {
        self.write_op(|b| b.remove(name))
    }

    /// Move an entry to a new name, keeping its listing position.
    pub fn rename(&self, old_name: &str, new_name: &str) -> WorkspaceResult<()> {
        if new_name.is_empty() {
            return Err(ObjectError::Empty("name").into());
        }
        self.write_op(|b| b.rename(old_name, new_name))
    }

    /// All bound names in insertion order.
    pub fn list(&self) -> WorkspaceResult<Vec<String>> {
        self.read_op(|b| b.list())
    }

    /// Whether a name is bound.
    pub fn exists(&self, name: &str) -> WorkspaceResult<bool> {
        self.read_op(|b| b.exists(name))
    }

    /// Remove every entry.
    pub fn clear(&self) -> WorkspaceResult<()> {
        self.write_op(|b| b.clear())
    }

    /// Number of entries.
    pub fn len(&self) -> WorkspaceResult<usize> {
        self.read_op(|b| b.len())
    }

    /// Returns `true` if the workspace holds no entries.
    pub fn is_empty(&self) -> WorkspaceResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Restartable owned iterator over the current names.
    pub fn iter(&self) -> WorkspaceResult<std::vec::IntoIter<String>> {
        Ok(self.list()?.into_iter())
    }

    /// Trigger a named remote computation. Live-only; in standalone mode
    /// this fails with `ModeUnavailable`, which is distinct from `NotFound`.
    pub fn invoke(&self, name: &str, params: Metadata) -> WorkspaceResult<Metadata> {
        let active = self.active_arc();
        let result = match &*active {
            ActiveBackend::Live(live) => live.invoke(name, params),
            ActiveBackend::Standalone(_) => {
                Err(WorkspaceError::ModeUnavailable { operation: "invoke" })
            }
        };
        self.maybe_fall_back(&active, &result);
        result
    }

    // ---- mode control ----

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.active_arc().mode()
    }

    /// Note recorded by the last automatic fallback, if any.
    pub fn fallback_note(&self) -> Option<String> {
        self.fallback_note.read().expect("lock poisoned").clone()
    }

    /// Point-in-time status report.
    pub fn status(&self) -> WorkspaceResult<WorkspaceStatus> {
        let active = self.active_arc();
        // Counting goes over the wire in live mode, so a connection loss
        // here falls back like any other operation.
        let counted = active.backend().len();
        self.maybe_fall_back(&active, &counted);
        let objects = counted?;
        let endpoint = match &*active {
            ActiveBackend::Live(live) => Some(live.descriptor().endpoint().to_string()),
            ActiveBackend::Standalone(_) => None,
        };
        Ok(WorkspaceStatus {
            mode: active.mode(),
            objects,
            endpoint,
            fallback: self.fallback_note(),
        })
    }

    /// Attempt the standalone-to-live migration against the configured
    /// endpoint. Returns `true` only when a migration happened; `false`
    /// when the host is unavailable or the store is already live. Never
    /// raises.
    pub fn resync(&self) -> bool {
        let Some(descriptor) = self.config.descriptor() else {
            debug!("resync requested but no endpoint configured");
            return false;
        };
        let timeout = self.config.request_timeout;
        self.resync_with(descriptor, |d| {
            HttpTransport::connect(d.clone(), timeout)
                .map(|t| Box::new(t) as Box<dyn RemoteTransport>)
        })
    }

    /// Explicitly attach to a live host, migrating current contents.
    /// Reports success if already attached.
    pub fn connect(&self, endpoint: &str, token: Option<&str>) -> bool {
        if self.mode() == Mode::Live {
            return true;
        }
        let auth = match token {
            Some(token) => AuthMethod::Bearer(token.to_string()),
            None => AuthMethod::Anonymous,
        };
        let descriptor = ConnectionDescriptor::new(endpoint, auth);
        let timeout = self.config.request_timeout;
        self.resync_with(descriptor, |d| {
            HttpTransport::connect(d.clone(), timeout)
                .map(|t| Box::new(t) as Box<dyn RemoteTransport>)
        })
    }

    /// Migrate to an already-built transport. Useful with custom
    /// [`RemoteTransport`] implementations.
    pub fn resync_with_transport(
        &self,
        descriptor: ConnectionDescriptor,
        transport: Box<dyn RemoteTransport>,
    ) -> bool {
        self.resync_with(descriptor, move |_| Ok(transport))
    }

    /// The migration protocol: snapshot, connect, ordered push, atomic
    /// swap. Runs under the operation lock so no mutation interleaves; any
    /// failure leaves the standalone table untouched and rolls back names
    /// already pushed to the remote, so a partial migration is never
    /// visible on either side.
    fn resync_with(
        &self,
        descriptor: ConnectionDescriptor,
        connect: impl FnOnce(&ConnectionDescriptor) -> Result<Box<dyn RemoteTransport>, RemoteError>,
    ) -> bool {
        let _guard = self.ops.lock().expect("lock poisoned");

        let current = self.active_arc();
        let entries = match &*current {
            ActiveBackend::Standalone(s) => s.entries(),
            ActiveBackend::Live(_) => {
                // There is nothing standalone to migrate.
                debug!("resync requested while already live");
                return false;
            }
        };

        let transport = match connect(&descriptor) {
            Ok(t) => t,
            Err(err) => {
                warn!(endpoint = %descriptor.endpoint(), error = %err, "resync connect failed");
                return false;
            }
        };

        for (i, (name, object)) in entries.iter().enumerate() {
            if let Err(err) = transport.add(name, object, true) {
                warn!(name = %name, error = %err, "resync push failed, rolling back");
                for (pushed, _) in &entries[..i] {
                    if let Err(rollback) = transport.remove(pushed) {
                        debug!(name = %pushed, error = %rollback, "rollback remove failed");
                    }
                }
                return false;
            }
        }

        let mut slot = self.active.write().expect("lock poisoned");
        *slot = Arc::new(ActiveBackend::Live(LiveBackend::new(
            transport,
            descriptor.clone(),
        )));
        *self.fallback_note.write().expect("lock poisoned") = None;
        info!(
            endpoint = %descriptor.endpoint(),
            objects = entries.len(),
            "resynced to live mode"
        );
        true
    }

    // ---- persistence ----

    /// Save the full ordered object set to a snapshot file.
    pub fn save(&self, path: &Path) -> WorkspaceResult<()> {
        let guard = self.ops.lock().expect("lock poisoned");
        let active = self.active_arc();
        let result = save_snapshot(active.backend(), path);
        drop(guard);
        self.maybe_fall_back(&active, &result);
        result
    }

    /// Restore objects from a snapshot file, overwriting colliding names.
    /// The file is fully decoded and validated before the store is touched;
    /// a corrupt file mutates nothing.
    pub fn load(&self, path: &Path) -> WorkspaceResult<()> {
        let guard = self.ops.lock().expect("lock poisoned");
        let active = self.active_arc();
        let result = load_snapshot(active.backend(), path);
        drop(guard);
        self.maybe_fall_back(&active, &result);
        result
    }
}

fn save_snapshot(backend: &dyn WorkspaceBackend, path: &Path) -> WorkspaceResult<()> {
    let mut writer = SnapshotWriter::new();
    for name in backend.list()? {
        let object = backend.get(&name)?;
        writer.push(&name, &object);
    }
    write_snapshot(path, writer)?;
    Ok(())
}

fn load_snapshot(backend: &dyn WorkspaceBackend, path: &Path) -> WorkspaceResult<()> {
    let entries = read_snapshot(path)?;
    for (name, object) in entries {
        backend.add(&name, &object, true)?;
    }
    Ok(())
}
