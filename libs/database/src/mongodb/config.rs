#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_non_empty, env_or_default};

/// Database used when none is configured
pub const DEFAULT_DATABASE: &str = "auditlog";
/// Collection holding audit events
pub const DEFAULT_COLLECTION: &str = "event";

/// MongoDB connection settings
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "auditlog")
///     .with_collection("event");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    pub collection: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Compose a connection string from its parts.
    ///
    /// Credentials are only included when both are present and are
    /// percent-encoded so that `@`, `:` and `/` survive.
    pub fn build_url(host: &str, port: &str, credentials: Option<(&str, &str)>) -> String {
        match credentials {
            Some((user, password)) => format!(
                "mongodb://{}:{}@{}:{}",
                urlencoding::encode(user),
                urlencoding::encode(password),
                host,
                port
            ),
            None => format!("mongodb://{}:{}", host, port),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The URL with any password replaced, safe to log
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 10,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` (optional) - full connection string; when unset the URL is
///   built from `AUDIT_LOG_DB_HOST` (default `localhost`), `AUDIT_LOG_DB_PORT`
///   (default `27017`), and `AUDIT_LOG_DB_USERNAME` / `AUDIT_LOG_DB_PASSWORD`
///   (used only when both are set)
/// - `AUDIT_LOG_DB_NAME` (default `auditlog`)
/// - `AUDIT_LOG_DB_COLLECTION` (default `event`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` / `MONGODB_MIN_POOL_SIZE` (default 100 / 5)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = match env_non_empty("MONGODB_URL") {
            Some(url) => url,
            None => {
                let host = env_non_empty("AUDIT_LOG_DB_HOST").unwrap_or_else(|| "localhost".into());
                let port = env_non_empty("AUDIT_LOG_DB_PORT").unwrap_or_else(|| "27017".into());
                let user = env_non_empty("AUDIT_LOG_DB_USERNAME");
                let password = env_non_empty("AUDIT_LOG_DB_PASSWORD");
                let credentials = user.as_deref().zip(password.as_deref());

                Self::build_url(&host, &port, credentials)
            }
        };

        let parse_u32 = |key: &str, default: &str| -> Result<u32, ConfigError> {
            env_or_default(key, default)
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        };

        Ok(Self {
            url,
            database: env_or_default("AUDIT_LOG_DB_NAME", DEFAULT_DATABASE),
            collection: env_or_default("AUDIT_LOG_DB_COLLECTION", DEFAULT_COLLECTION),
            app_name: env_non_empty("MONGODB_APP_NAME"),
            max_pool_size: parse_u32("MONGODB_MAX_POOL_SIZE", "100")?,
            min_pool_size: parse_u32("MONGODB_MIN_POOL_SIZE", "5")?,
            ..Self::default()
        })
    }
}
