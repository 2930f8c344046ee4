//! Workspace configuration: mode override, endpoint, credential, timeouts.

use std::time::Duration;

use labws_protocol::AuthMethod;
use labws_remote::ConnectionDescriptor;
use tracing::warn;

/// Environment variable names read by [`WorkspaceConfig::from_env`].
pub mod env_vars {
    pub const MODE: &str = "LABWS_MODE";
    pub const ENDPOINT: &str = "LABWS_ENDPOINT";
    pub const TOKEN: &str = "LABWS_TOKEN";
    pub const PROBE_TIMEOUT_MS: &str = "LABWS_PROBE_TIMEOUT_MS";
}

/// Mode override supplied by the caller or the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModePreference {
    /// Probe the endpoint; go live if a host answers, standalone otherwise.
    #[default]
    Auto,
    /// Connect live; fall back to standalone with a warning if unreachable.
    Live,
    /// Stay standalone regardless of endpoint reachability.
    Standalone,
}

impl ModePreference {
    /// Parse the recognized override values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "live" => Some(Self::Live),
            "standalone" => Some(Self::Standalone),
            _ => None,
        }
    }
}

/// Construction-time settings for a workspace.
#[derive(Clone, Debug)]
pub struct WorkspaceConfig {
    pub mode: ModePreference,
    /// Live host base URL, e.g. `http://127.0.0.1:8545`.
    pub endpoint: Option<String>,
    /// Bearer credential attached to every live call.
    pub token: Option<String>,
    /// Bound on the startup reachability probe.
    pub probe_timeout: Duration,
    /// Bound on each live round trip.
    pub request_timeout: Duration,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            mode: ModePreference::Auto,
            endpoint: None,
            token: None,
            probe_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl WorkspaceConfig {
    /// Defaults overridden by `LABWS_*` environment variables.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(mode) = std::env::var(env_vars::MODE) {
            match ModePreference::parse(&mode) {
                Some(parsed) => config.mode = parsed,
                None => warn!(value = %mode, "unrecognized {} value, using auto", env_vars::MODE),
            }
        }
        if let Ok(endpoint) = std::env::var(env_vars::ENDPOINT) {
            if !endpoint.trim().is_empty() {
                config.endpoint = Some(endpoint);
            }
        }
        if let Ok(token) = std::env::var(env_vars::TOKEN) {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }
        if let Ok(ms) = std::env::var(env_vars::PROBE_TIMEOUT_MS) {
            match ms.trim().parse::<u64>() {
                Ok(ms) => config.probe_timeout = Duration::from_millis(ms),
                Err(_) => warn!(
                    value = %ms,
                    "unparseable {} value, keeping default", env_vars::PROBE_TIMEOUT_MS
                ),
            }
        }
        config
    }

    /// Descriptor for the configured endpoint, if one is set.
    pub fn descriptor(&self) -> Option<ConnectionDescriptor> {
        let endpoint = self.endpoint.as_deref()?;
        let auth = match &self.token {
            Some(token) => AuthMethod::Bearer(token.clone()),
            None => AuthMethod::Anonymous,
        };
        Some(ConnectionDescriptor::new(endpoint, auth))
    }
}
