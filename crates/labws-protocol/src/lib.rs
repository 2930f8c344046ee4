//! Wire contract between a lab workspace and a live host.
//!
//! Defines the message types, payload encoding, and authentication used by
//! the live backend when proxying workspace operations to a remote host.
//! Large numeric payloads travel in the compact binary encoding, never a
//! textual one.

pub mod auth;
pub mod codec;
pub mod endpoint;
pub mod error;
pub mod message;

pub use auth::AuthMethod;
pub use codec::WsCodec;
pub use endpoint::{endpoints, HealthResponse};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{error_codes, WsMessage, MAX_MESSAGE_SIZE, PROTOCOL_VERSION};
