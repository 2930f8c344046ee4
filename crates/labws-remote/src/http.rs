use std::time::Duration;

use labws_objects::{DataObject, Metadata};
use labws_protocol::{
    endpoints, error_codes, ProtocolError, WsCodec, WsMessage, PROTOCOL_VERSION,
};
use tracing::{debug, warn};

use crate::descriptor::ConnectionDescriptor;
use crate::error::{RemoteError, RemoteResult};
use crate::transport::RemoteTransport;

/// Default bound on a single remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP transport to a live workspace host.
///
/// Every operation is one POST of a bincode message to the host's RPC
/// endpoint; the response body is decoded back into a message. All calls
/// are bounded by the request timeout, so a dead host fails fast instead
/// of hanging the caller.
#[derive(Debug)]
pub struct HttpTransport {
    descriptor: ConnectionDescriptor,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Connect to a live host: build the client, then handshake to verify
    /// the host is reachable and speaks our protocol version.
    pub fn connect(descriptor: ConnectionDescriptor, timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;
        let transport = Self { descriptor, client, timeout };
        transport.ping()?;
        debug!(endpoint = %transport.descriptor.endpoint(), "connected to live host");
        Ok(transport)
    }

    /// Cheap reachability probe against the health endpoint. Used by mode
    /// detection before committing to a connection; any failure, including
    /// a non-success status, reads as "not reachable".
    pub fn probe(descriptor: &ConnectionDescriptor, timeout: Duration) -> bool {
        let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(_) => return false,
        };
        match client.get(descriptor.url(endpoints::HEALTH)).send() {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(endpoint = %descriptor.endpoint(), error = %e, "health probe failed");
                false
            }
        }
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    /// One RPC round trip: encode, POST, decode. Transport-level failures
    /// map to connection-class errors; a remote `Error` message maps to the
    /// matching domain error.
    fn rpc(&self, request: &WsMessage) -> RemoteResult<WsMessage> {
        let body = WsCodec::encode(request)?;
        let mut builder = self
            .client
            .post(self.descriptor.url(endpoints::RPC))
            .header("content-type", "application/octet-stream")
            .body(body);
        if let Some(value) = self.descriptor.auth().header_value() {
            builder = builder.header("authorization", value);
        }

        let response = builder.send().map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RemoteError::AuthRejected);
        }
        let bytes = response.bytes().map_err(|e| self.map_send_error(e))?;
        let message = WsCodec::decode(&bytes)?;

        if let WsMessage::Error { code, message, names } = message {
            return Err(Self::map_remote_error(request, code, message, names));
        }
        Ok(message)
    }

    fn map_send_error(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout { timeout_ms: self.timeout.as_millis() as u64 }
        } else {
            RemoteError::Unreachable(err.to_string())
        }
    }

    fn map_remote_error(
        request: &WsMessage,
        code: u32,
        message: String,
        names: Vec<String>,
    ) -> RemoteError {
        match code {
            error_codes::NOT_FOUND => RemoteError::NotFound {
                name: Self::request_name(request).unwrap_or_default(),
                available: names,
            },
            error_codes::DUPLICATE => {
                RemoteError::Duplicate(Self::request_name(request).unwrap_or_default())
            }
            error_codes::UNAUTHORIZED => RemoteError::AuthRejected,
            _ => RemoteError::Remote { code, message },
        }
    }

    /// Object name a request refers to, for error reporting.
    fn request_name(request: &WsMessage) -> Option<String> {
        match request {
            WsMessage::GetRequest { name }
            | WsMessage::AddRequest { name, .. }
            | WsMessage::RemoveRequest { name }
            | WsMessage::ExistsRequest { name }
            | WsMessage::InvokeRequest { name, .. } => Some(name.clone()),
            WsMessage::RenameRequest { old_name, new_name } => {
                Some(format!("{old_name} -> {new_name}"))
            }
            _ => None,
        }
    }

    fn unexpected(expected: &'static str, actual: &WsMessage) -> RemoteError {
        ProtocolError::UnexpectedMessage { expected, actual: actual.type_name() }.into()
    }
}

impl RemoteTransport for HttpTransport {
    fn ping(&self) -> RemoteResult<()> {
        let reply = self.rpc(&WsMessage::Hello { version: PROTOCOL_VERSION })?;
        match reply {
            WsMessage::HelloAck { version } if version == PROTOCOL_VERSION => Ok(()),
            WsMessage::HelloAck { version } => {
                warn!(local = PROTOCOL_VERSION, remote = version, "protocol version mismatch");
                Err(ProtocolError::VersionMismatch { local: PROTOCOL_VERSION, remote: version }
                    .into())
            }
            other => Err(Self::unexpected("HelloAck", &other)),
        }
    }

    fn list(&self) -> RemoteResult<Vec<String>> {
        match self.rpc(&WsMessage::ListRequest)? {
            WsMessage::ListResponse { names } => Ok(names),
            other => Err(Self::unexpected("ListResponse", &other)),
        }
    }

    fn get(&self, name: &str) -> RemoteResult<DataObject> {
        match self.rpc(&WsMessage::GetRequest { name: name.into() })? {
            WsMessage::ObjectResponse { object, .. } => Ok(object),
            other => Err(Self::unexpected("ObjectResponse", &other)),
        }
    }

    fn add(&self, name: &str, object: &DataObject, overwrite: bool) -> RemoteResult<()> {
        let request = WsMessage::AddRequest {
            name: name.into(),
            object: object.clone(),
            overwrite,
        };
        match self.rpc(&request)? {
            WsMessage::Ack => Ok(()),
            other => Err(Self::unexpected("Ack", &other)),
        }
    }

    fn remove(&self, name: &str) -> RemoteResult<()> {
        match self.rpc(&WsMessage::RemoveRequest { name: name.into() })? {
            WsMessage::Ack => Ok(()),
            other => Err(Self::unexpected("Ack", &other)),
        }
    }

    fn rename(&self, old_name: &str, new_name: &str) -> RemoteResult<()> {
        let request = WsMessage::RenameRequest {
            old_name: old_name.into(),
            new_name: new_name.into(),
        };
        match self.rpc(&request)? {
            WsMessage::Ack => Ok(()),
            other => Err(Self::unexpected("Ack", &other)),
        }
    }

    fn exists(&self, name: &str) -> RemoteResult<bool> {
        match self.rpc(&WsMessage::ExistsRequest { name: name.into() })? {
            WsMessage::ExistsResponse { exists } => Ok(exists),
            other => Err(Self::unexpected("ExistsResponse", &other)),
        }
    }

    fn clear(&self) -> RemoteResult<()> {
        match self.rpc(&WsMessage::ClearRequest)? {
            WsMessage::Ack => Ok(()),
            other => Err(Self::unexpected("Ack", &other)),
        }
    }

    fn invoke(&self, name: &str, params: Metadata) -> RemoteResult<Metadata> {
        match self.rpc(&WsMessage::InvokeRequest { name: name.into(), params })? {
            WsMessage::InvokeResponse { result } => Ok(result),
            other => Err(Self::unexpected("InvokeResponse", &other)),
        }
    }
}
