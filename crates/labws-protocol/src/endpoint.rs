/// HTTP endpoint paths on a live host.
pub mod endpoints {
    /// Single RPC endpoint: every workspace operation is one POSTed message.
    pub const RPC: &str = "/v1/rpc";
    /// Health probe used by startup mode detection.
    pub const HEALTH: &str = "/v1/health";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: super::message::PROTOCOL_VERSION,
        }
    }
}
