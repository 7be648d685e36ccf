//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};

use votechain_types::ElectionParams;

use crate::error::NodeError;

/// Configuration for a votechain node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address the RPC server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// RPC server port. Defaults to the port the UI polls.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Shared secret for admin-gated endpoints. The default is only for
    /// local development; override it in any real deployment.
    #[serde(default = "default_admin_key")]
    pub admin_key: String,

    /// Candidate set and mining policy.
    #[serde(default)]
    pub params: ElectionParams,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_rpc_port() -> u16 {
    5000
}

fn default_admin_key() -> String {
    "admin123".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            rpc_port: default_rpc_port(),
            admin_key: default_admin_key(),
            params: ElectionParams::default(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.rpc_port, config.rpc_port);
        assert_eq!(parsed.params.candidates, config.params.candidates);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.rpc_port, 5000);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.params.difficulty_bits, 12);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rpc_port = 9000
            admin_key = "s3cret"

            [params]
            candidates = ["Alice", "Bob"]
            difficulty_bits = 8
            max_block_transactions = 4
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rpc_port, 9000);
        assert_eq!(config.admin_key, "s3cret");
        assert_eq!(config.params.candidates, vec!["Alice", "Bob"]);
        assert_eq!(config.bind, "0.0.0.0"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/votechain.toml");
        assert!(matches!(result.unwrap_err(), NodeError::Config(_)));
    }
}
