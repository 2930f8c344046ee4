//! Remote transport for the lab workspace live backend.
//!
//! The live backend proxies every workspace operation to a remote host.
//! This crate provides the transport seam it goes through:
//!
//! - [`RemoteTransport`] — one method per workspace operation, plus `ping`
//!   and the live-only `invoke`
//! - [`ConnectionDescriptor`] — endpoint address and credential, immutable
//!   once a connection is established
//! - [`HttpTransport`] — blocking HTTP implementation with bounded timeouts
//! - [`RemoteError`] — typed failures split into connection-class errors
//!   (unreachable, timeout, auth rejected) and domain errors forwarded from
//!   the remote host
//!
//! Network failures are never silently swallowed and never retried here;
//! retry policy belongs to the caller.

pub mod descriptor;
pub mod error;
pub mod http;
pub mod transport;

pub use descriptor::ConnectionDescriptor;
pub use error::{RemoteError, RemoteResult};
pub use http::HttpTransport;
pub use transport::RemoteTransport;
