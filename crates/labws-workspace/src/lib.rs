//! Unified lab workspace store.
//!
//! A [`Workspace`] exposes one stable API over named scientific data
//! objects while the storage substrate is either a purely local in-memory
//! table ([`StandaloneBackend`]) or a proxy to a remote host
//! ([`LiveBackend`]). The mode controller picks the starting backend from
//! configuration, migrates standalone contents to a live host via
//! [`Workspace::resync`], and falls back to standalone automatically when
//! a live connection is lost. Snapshot persistence rides on `labws-snap`.
//!
//! ```no_run
//! use labws_objects::SignalObject;
//! use labws_workspace::Workspace;
//!
//! # fn main() -> Result<(), labws_workspace::WorkspaceError> {
//! let ws = Workspace::standalone();
//! let sine = SignalObject::new("sine", vec![0.0, 1.0, 2.0], vec![0.0, 0.84, 0.91])?;
//! ws.add("sine", &sine.into(), false)?;
//! assert_eq!(ws.list()?, vec!["sine"]);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod live;
pub mod standalone;
pub mod workspace;

pub use backend::WorkspaceBackend;
pub use config::{ModePreference, WorkspaceConfig};
pub use error::{WorkspaceError, WorkspaceResult};
pub use live::LiveBackend;
pub use standalone::StandaloneBackend;
pub use workspace::{Mode, Workspace, WorkspaceStatus};
