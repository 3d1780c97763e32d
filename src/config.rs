//! Application configuration.
//!
//! All configuration comes from environment variables, read once at startup
//! into an explicit struct that the rest of the service receives by
//! reference. Request handling never touches the environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Fallback substituted for every metadata field whose source is absent.
pub const LOCAL_FALLBACK: &str = "local";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP listener binds (`PORT`, default 8080).
    pub port: u16,

    /// Service name (`K_SERVICE`, default `local`).
    pub service: String,

    /// Deployment revision (`K_REVISION`, default `local`).
    pub revision: String,

    /// Owning project (`GOOGLE_CLOUD_PROJECT`, default `local`).
    pub project: String,

    /// Base URL of the metadata server (`METADATA_SERVER_URL`).
    pub metadata_server_url: String,

    /// Base URL of the public IP lookup service (`IP_LOOKUP_URL`).
    pub ip_lookup_url: String,

    /// Bound applied to each outbound lookup (`LOOKUP_TIMEOUT_SECS`).
    pub lookup_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Absent or empty variables silently take their defaults. A `PORT`
    /// that is set but unparsable is a startup error rather than a silent
    /// fallback to 8080.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) if !raw.is_empty() => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {:?}", raw))?,
            _ => 8080,
        };

        let lookup_timeout_secs = env::var("LOOKUP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            port,
            service: env_or_local("K_SERVICE"),
            revision: env_or_local("K_REVISION"),
            project: env_or_local("GOOGLE_CLOUD_PROJECT"),
            metadata_server_url: env_or("METADATA_SERVER_URL", "http://metadata.google.internal"),
            ip_lookup_url: env_or("IP_LOOKUP_URL", "https://api.ipify.org"),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
        })
    }
}

/// Read an environment variable, substituting `default` when it is absent
/// or empty.
fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn env_or_local(name: &str) -> String {
    env_or(name, LOCAL_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 7] = [
        "PORT",
        "K_SERVICE",
        "K_REVISION",
        "GOOGLE_CLOUD_PROJECT",
        "METADATA_SERVER_URL",
        "IP_LOOKUP_URL",
        "LOOKUP_TIMEOUT_SECS",
    ];

    #[test]
    fn test_env_or_substitutes_on_absent_or_empty() {
        env::remove_var("INSTANCE_INFO_TEST_ABSENT");
        assert_eq!(env_or("INSTANCE_INFO_TEST_ABSENT", "fallback"), "fallback");

        env::set_var("INSTANCE_INFO_TEST_EMPTY", "");
        assert_eq!(env_or("INSTANCE_INFO_TEST_EMPTY", "fallback"), "fallback");
        env::remove_var("INSTANCE_INFO_TEST_EMPTY");

        env::set_var("INSTANCE_INFO_TEST_SET", "value");
        assert_eq!(env_or("INSTANCE_INFO_TEST_SET", "fallback"), "value");
        env::remove_var("INSTANCE_INFO_TEST_SET");
    }

    // Single test exercising from_env so parallel tests never race on the
    // shared process environment.
    #[test]
    fn test_from_env_defaults_overrides_and_invalid_port() {
        for name in ENV_VARS {
            env::remove_var(name);
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.service, LOCAL_FALLBACK);
        assert_eq!(config.revision, LOCAL_FALLBACK);
        assert_eq!(config.project, LOCAL_FALLBACK);
        assert_eq!(config.metadata_server_url, "http://metadata.google.internal");
        assert_eq!(config.ip_lookup_url, "https://api.ipify.org");
        assert_eq!(config.lookup_timeout, Duration::from_secs(5));

        env::set_var("PORT", "9090");
        env::set_var("K_SERVICE", "greeter");
        env::set_var("K_REVISION", "greeter-00042-xyz");
        env::set_var("GOOGLE_CLOUD_PROJECT", "demo-project");
        env::set_var("METADATA_SERVER_URL", "http://127.0.0.1:9999");
        env::set_var("IP_LOOKUP_URL", "http://127.0.0.1:9998");
        env::set_var("LOOKUP_TIMEOUT_SECS", "2");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.service, "greeter");
        assert_eq!(config.revision, "greeter-00042-xyz");
        assert_eq!(config.project, "demo-project");
        assert_eq!(config.metadata_server_url, "http://127.0.0.1:9999");
        assert_eq!(config.ip_lookup_url, "http://127.0.0.1:9998");
        assert_eq!(config.lookup_timeout, Duration::from_secs(2));

        env::set_var("PORT", "not-a-port");
        assert!(AppConfig::from_env().is_err());

        for name in ENV_VARS {
            env::remove_var(name);
        }
    }
}
