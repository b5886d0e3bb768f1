use crate::{ConfigError, env_non_empty};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

/// Port used for plain HTTP when none is given
pub const DEFAULT_HTTP_PORT: u16 = 80;
/// Port used for HTTPS when none is given
pub const DEFAULT_TLS_PORT: u16 = 443;

/// PEM certificate and key files used to terminate TLS
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl TlsConfig {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    /// Reads AUDIT_LOG_TLS_CERT and AUDIT_LOG_TLS_KEY; both are required
    pub fn from_env() -> Result<Self, ConfigError> {
        let cert = env_non_empty("AUDIT_LOG_TLS_CERT")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUDIT_LOG_TLS_CERT".to_string()))?;
        let key = env_non_empty("AUDIT_LOG_TLS_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUDIT_LOG_TLS_KEY".to_string()))?;

        Ok(Self::new(cert, key))
    }
}

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tls: Option<TlsConfig>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            tls: None,
        }
    }

    /// Build a config where an unset port falls back to 80, or 443 when TLS is enabled
    pub fn resolve(host: String, port: Option<u16>, tls: Option<TlsConfig>) -> Self {
        let port = port.unwrap_or(if tls.is_some() {
            DEFAULT_TLS_PORT
        } else {
            DEFAULT_HTTP_PORT
        });

        Self { host, port, tls }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the configured host/port to a bindable socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", self.address(), e)))?
            .next()
            .ok_or_else(|| ConfigError::Invalid(format!("{} did not resolve", self.address())))
    }
}
