use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{WsMessage, MAX_MESSAGE_SIZE};

/// Codec for encoding/decoding workspace protocol payloads.
///
/// Messages travel as bincode bodies inside an HTTP request/response, so no
/// extra framing is applied here; the codec enforces the size cap and maps
/// serialization failures to typed errors.
pub struct WsCodec;

impl WsCodec {
    /// Encode a message payload.
    pub fn encode(msg: &WsMessage) -> ProtocolResult<Vec<u8>> {
        let payload =
            bincode::serialize(msg).map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        if payload.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        Ok(payload)
    }

    /// Decode a message payload.
    pub fn decode(data: &[u8]) -> ProtocolResult<WsMessage> {
        if data.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: data.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labws_objects::{DataObject, ImageObject, SignalObject};

    #[test]
    fn roundtrip_simple() {
        let msg = WsMessage::ListResponse {
            names: vec!["sine".into(), "frame".into()],
        };
        let bytes = WsCodec::encode(&msg).unwrap();
        let decoded = WsCodec::decode(&bytes).unwrap();
        assert_eq!(decoded.type_tag(), msg.type_tag());
        match decoded {
            WsMessage::ListResponse { names } => assert_eq!(names, vec!["sine", "frame"]),
            other => panic!("unexpected message: {}", other.type_name()),
        }
    }

    #[test]
    fn roundtrip_signal_payload() {
        let mut sig = SignalObject::new("sine", vec![0.0, 1.0, 2.0], vec![0.0, 0.84, 0.91]).unwrap();
        sig.set_error_bars(None, Some(vec![0.01, 0.01, 0.01])).unwrap();
        let obj: DataObject = sig.into();

        let msg = WsMessage::AddRequest {
            name: "sine".into(),
            object: obj.clone(),
            overwrite: true,
        };
        let bytes = WsCodec::encode(&msg).unwrap();
        match WsCodec::decode(&bytes).unwrap() {
            WsMessage::AddRequest { name, object, overwrite } => {
                assert_eq!(name, "sine");
                assert!(overwrite);
                assert_eq!(object, obj);
            }
            other => panic!("unexpected message: {}", other.type_name()),
        }
    }

    #[test]
    fn roundtrip_image_payload() {
        let img = ImageObject::new("frame", vec![0.5; 9], 3, 3).unwrap();
        let msg = WsMessage::ObjectResponse {
            name: "frame".into(),
            object: img.clone().into(),
        };
        let bytes = WsCodec::encode(&msg).unwrap();
        match WsCodec::decode(&bytes).unwrap() {
            WsMessage::ObjectResponse { object, .. } => {
                assert_eq!(object.as_image().unwrap(), &img);
            }
            other => panic!("unexpected message: {}", other.type_name()),
        }
    }

    #[test]
    fn decode_garbage_fails() {
        let err = WsCodec::decode(&[0xFF; 16]).unwrap_err();
        assert!(matches!(err, ProtocolError::Deserialization(_)));
    }

    #[test]
    fn oversized_input_rejected() {
        let data = vec![0u8; MAX_MESSAGE_SIZE + 1];
        let err = WsCodec::decode(&data).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { .. }));
    }
}
