use labws_objects::{DataObject, Metadata};
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// All message types exchanged with a live host.
///
/// Every workspace operation is one request/response pair. The `names`
/// field on `Error` carries the currently available object names so a
/// not-found failure can enumerate them without a second round trip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WsMessage {
    Hello { version: u32 },
    HelloAck { version: u32 },
    ListRequest,
    ListResponse { names: Vec<String> },
    GetRequest { name: String },
    ObjectResponse { name: String, object: DataObject },
    AddRequest { name: String, object: DataObject, overwrite: bool },
    RemoveRequest { name: String },
    RenameRequest { old_name: String, new_name: String },
    ExistsRequest { name: String },
    ExistsResponse { exists: bool },
    ClearRequest,
    InvokeRequest { name: String, params: Metadata },
    InvokeResponse { result: Metadata },
    Ack,
    Error { code: u32, message: String, names: Vec<String> },
}

impl WsMessage {
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Hello { .. } => 1,
            Self::HelloAck { .. } => 2,
            Self::ListRequest => 3,
            Self::ListResponse { .. } => 4,
            Self::GetRequest { .. } => 5,
            Self::ObjectResponse { .. } => 6,
            Self::AddRequest { .. } => 7,
            Self::RemoveRequest { .. } => 8,
            Self::RenameRequest { .. } => 9,
            Self::ExistsRequest { .. } => 10,
            Self::ExistsResponse { .. } => 11,
            Self::ClearRequest => 12,
            Self::InvokeRequest { .. } => 13,
            Self::InvokeResponse { .. } => 14,
            Self::Ack => 15,
            Self::Error { .. } => 255,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "Hello",
            Self::HelloAck { .. } => "HelloAck",
            Self::ListRequest => "ListRequest",
            Self::ListResponse { .. } => "ListResponse",
            Self::GetRequest { .. } => "GetRequest",
            Self::ObjectResponse { .. } => "ObjectResponse",
            Self::AddRequest { .. } => "AddRequest",
            Self::RemoveRequest { .. } => "RemoveRequest",
            Self::RenameRequest { .. } => "RenameRequest",
            Self::ExistsRequest { .. } => "ExistsRequest",
            Self::ExistsResponse { .. } => "ExistsResponse",
            Self::ClearRequest => "ClearRequest",
            Self::InvokeRequest { .. } => "InvokeRequest",
            Self::InvokeResponse { .. } => "InvokeResponse",
            Self::Ack => "Ack",
            Self::Error { .. } => "Error",
        }
    }
}

/// Stable error codes carried by `WsMessage::Error`.
pub mod error_codes {
    pub const INVALID: u32 = 400;
    pub const UNAUTHORIZED: u32 = 401;
    pub const NOT_FOUND: u32 = 404;
    pub const DUPLICATE: u32 = 409;
    pub const INTERNAL: u32 = 500;
}

#[cfg(test)]
mod tests {
    use super::*;
    use labws_objects::SignalObject;

    fn sample_messages() -> Vec<WsMessage> {
        let obj: DataObject = SignalObject::new("s", vec![0.0], vec![1.0]).unwrap().into();
        vec![
            WsMessage::Hello { version: 1 },
            WsMessage::HelloAck { version: 1 },
            WsMessage::ListRequest,
            WsMessage::ListResponse { names: vec!["a".into()] },
            WsMessage::GetRequest { name: "a".into() },
            WsMessage::ObjectResponse { name: "a".into(), object: obj.clone() },
            WsMessage::AddRequest { name: "a".into(), object: obj, overwrite: false },
            WsMessage::RemoveRequest { name: "a".into() },
            WsMessage::RenameRequest { old_name: "a".into(), new_name: "b".into() },
            WsMessage::ExistsRequest { name: "a".into() },
            WsMessage::ExistsResponse { exists: true },
            WsMessage::ClearRequest,
            WsMessage::InvokeRequest { name: "normalize".into(), params: Metadata::new() },
            WsMessage::InvokeResponse { result: Metadata::new() },
            WsMessage::Ack,
            WsMessage::Error { code: 404, message: "not found".into(), names: vec![] },
        ]
    }

    #[test]
    fn type_tags_unique() {
        let mut tags: Vec<u8> = sample_messages().iter().map(|m| m.type_tag()).collect();
        let len = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), len, "type tags should be unique");
    }

    #[test]
    fn type_names_correct() {
        let msg = WsMessage::ListRequest;
        assert_eq!(msg.type_name(), "ListRequest");
        let msg = WsMessage::Error { code: 0, message: String::new(), names: vec![] };
        assert_eq!(msg.type_name(), "Error");
    }

    #[test]
    fn error_codes_distinct() {
        let codes = [
            error_codes::INVALID,
            error_codes::UNAUTHORIZED,
            error_codes::NOT_FOUND,
            error_codes::DUPLICATE,
            error_codes::INTERNAL,
        ];
        let mut dedup = codes.to_vec();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), codes.len());
    }
}
