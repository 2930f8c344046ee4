use serde::{Deserialize, Serialize};

/// Access credential attached to every live-host call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMethod {
    Bearer(String),
    Anonymous,
}

impl Default for AuthMethod {
    fn default() -> Self {
        Self::Anonymous
    }
}

impl AuthMethod {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Value for the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Bearer(token) => Some(format!("Bearer {token}")),
            Self::Anonymous => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer-token",
            Self::Anonymous => "anonymous",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_not_authenticated() {
        assert!(!AuthMethod::Anonymous.is_authenticated());
        assert!(AuthMethod::Anonymous.header_value().is_none());
    }

    #[test]
    fn bearer_header_value() {
        let auth = AuthMethod::Bearer("secret".into());
        assert!(auth.is_authenticated());
        assert_eq!(auth.header_value().as_deref(), Some("Bearer secret"));
    }

    #[test]
    fn display_names() {
        assert_eq!(AuthMethod::Anonymous.display_name(), "anonymous");
        assert_eq!(AuthMethod::Bearer("x".into()).display_name(), "bearer-token");
    }

    #[test]
    fn default_is_anonymous() {
        assert!(matches!(AuthMethod::default(), AuthMethod::Anonymous));
    }
}
