//! Server configuration.
//!
//! Read from environment variables by the binary:
//! - `AZMON_PORT`: listen port (default 2400)
//! - `AZMON_TARGET`: name of the remotely callable target (default "monitor")
//! - `AZMON_LOG_COMMANDS`: log each `/api` request URL (default true)

use crate::dispatch::capability::is_valid_name;
use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 2400;
pub const DEFAULT_TARGET: &str = "monitor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// The single target name registered for remote calls.
    pub target: String,
    pub log_commands: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            target: DEFAULT_TARGET.to_string(),
            log_commands: true,
        }
    }
}

impl ServerConfig {
    /// Builds a config from the process environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(raw) = lookup("AZMON_PORT") {
            config.port = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: "AZMON_PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(raw) = lookup("AZMON_TARGET") {
            let target = raw.trim();
            if !is_valid_name(target) {
                return Err(ConfigError::InvalidValue {
                    var: "AZMON_TARGET",
                    value: raw,
                    reason: "expected a lowercase identifier starting with a letter".to_string(),
                });
            }
            config.target = target.to_string();
        }

        if let Some(raw) = lookup("AZMON_LOG_COMMANDS") {
            config.log_commands = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "AZMON_LOG_COMMANDS",
                value: raw.clone(),
                reason: "expected true/false, 1/0, yes/no or on/off".to_string(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 2400);
        assert_eq!(config.target, "monitor");
        assert!(config.log_commands);
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("AZMON_PORT", "2500"),
            ("AZMON_TARGET", "camera"),
            ("AZMON_LOG_COMMANDS", "off"),
        ]))
        .unwrap();
        assert_eq!(config.port, 2500);
        assert_eq!(config.target, "camera");
        assert!(!config.log_commands);
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("AZMON_PORT", "99999")])).unwrap_err();
        assert!(err.to_string().contains("AZMON_PORT"));
    }

    #[test]
    fn rejects_bad_flag_and_empty_target() {
        assert!(ServerConfig::from_lookup(lookup(&[("AZMON_LOG_COMMANDS", "maybe")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("AZMON_TARGET", "  ")])).is_err());
    }

    #[test]
    fn rejects_target_names_the_registry_would_refuse() {
        for name in ["Monitor", "my-target", "_x", "9lives"] {
            let err = ServerConfig::from_lookup(lookup(&[("AZMON_TARGET", name)])).unwrap_err();
            assert!(err.to_string().contains("AZMON_TARGET"), "{name}");
        }
        let config = ServerConfig::from_lookup(lookup(&[("AZMON_TARGET", " procs_2 ")])).unwrap();
        assert_eq!(config.target, "procs_2");
    }

    #[test]
    fn accepted_target_builds_app_state() {
        use std::sync::Arc;

        use azmon_core::InMemoryMonitor;

        use crate::state::AppState;

        let config = ServerConfig::from_lookup(lookup(&[("AZMON_TARGET", "camera")])).unwrap();
        assert!(AppState::new(&config, Arc::new(InMemoryMonitor::new())).is_ok());
    }
}
