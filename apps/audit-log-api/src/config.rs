use clap::Parser;
use core_config::server::{ServerConfig, TlsConfig};
use core_config::{AppInfo, FromEnv, app_info};
use std::path::PathBuf;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Command line flags, each with an environment fallback
#[derive(Parser, Debug, Clone)]
#[command(name = "audit-log-api", version, about = "Stores and queries audit events")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on [default: 80, or 443 with --tls]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Serve HTTPS using AUDIT_LOG_TLS_CERT and AUDIT_LOG_TLS_KEY
    #[arg(short, long, env = "AUDIT_LOG_TLS")]
    pub tls: bool,

    /// Shared bearer token; empty disables authentication
    #[arg(long, env = "AUDIT_LOG_API_TOKEN", default_value = "", hide_env_values = true)]
    pub api_token: String,

    /// JSON-Schema (draft-07) that every event must satisfy
    #[arg(long, env = "AUDIT_LOG_EVENT_SCHEMA_FILE")]
    pub schema_file: PathBuf,
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub api_token: String,
    pub schema_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name);

        let tls = if cli.tls {
            Some(TlsConfig::from_env()?)
        } else {
            None
        };
        let server = ServerConfig::resolve(cli.host, cli.port, tls);

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
            api_token: cli.api_token,
            schema_file: cli.schema_file,
        })
    }

    pub fn auth_enabled(&self) -> bool {
        !self.api_token.is_empty()
    }
}
