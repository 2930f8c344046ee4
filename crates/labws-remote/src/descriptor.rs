use labws_protocol::AuthMethod;

/// Endpoint address and access credential for a live connection.
///
/// Immutable once a connection is established; a reconnect replaces the
/// descriptor wholesale rather than mutating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    endpoint: String,
    auth: AuthMethod,
}

impl ConnectionDescriptor {
    /// Create a descriptor. A trailing slash on the endpoint is trimmed so
    /// path joins stay predictable.
    pub fn new(endpoint: impl Into<String>, auth: AuthMethod) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self { endpoint, auth }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth(&self) -> &AuthMethod {
        &self.auth
    }

    /// Full URL for a protocol path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }
}

impl std::fmt::Display for ConnectionDescriptor {
    /// Credential is never rendered.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.endpoint, self.auth.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let d = ConnectionDescriptor::new("http://127.0.0.1:8080/", AuthMethod::Anonymous);
        assert_eq!(d.endpoint(), "http://127.0.0.1:8080");
        assert_eq!(d.url("/v1/rpc"), "http://127.0.0.1:8080/v1/rpc");
    }

    #[test]
    fn display_redacts_credential() {
        let d = ConnectionDescriptor::new(
            "http://host:1234",
            AuthMethod::Bearer("super-secret".into()),
        );
        let shown = format!("{d}");
        assert!(shown.contains("bearer-token"));
        assert!(!shown.contains("super-secret"));
    }
}
