//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (with `.env` support), passed explicitly into every
//! tool so nothing reads the process environment ambiently.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials.
    pub credentials: CredentialsConfig,

    /// SMTP relay used by the mail tools.
    pub smtp: SmtpConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Credentials for the external services the tools call.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct CredentialsConfig {
    /// CWA open-data platform authorization key (weather/earthquake tools).
    pub cwa_auth_key: Option<String>,

    /// Google Maps Platform API key (places tools).
    pub places_api_key: Option<String>,

    /// Pre-provisioned OAuth access token for Google Drive (drive tools).
    pub drive_access_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("cwa_auth_key", &self.cwa_auth_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "drive_access_token",
                &self.drive_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// SMTP relay configuration for outbound mail.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host, e.g. "smtp.gmail.com".
    pub host: String,

    /// Relay port. 465 = implicit TLS, anything else = STARTTLS.
    pub port: u16,

    /// Account used to authenticate and as the From address.
    pub username: String,

    /// Account password or app password.
    pub password: String,
}

impl SmtpConfig {
    /// Whether enough settings are present to attempt a send.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Custom Debug implementation to redact the password from logs.
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Directories the filesystem-touching tools may operate in.
    /// Empty list = no restrictions.
    pub allowed_roots: Vec<PathBuf>,

    /// Whether to allow symlinks in path validation.
    /// If true, symlinks are followed and their targets are validated.
    /// If false, symlinks pointing outside the allowed roots are rejected.
    pub allow_symlinks: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_roots: Vec::new(),
            allow_symlinks: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "toolbox-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            smtp: SmtpConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server-level settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...); service credentials keep
    /// their service-specific names (`CWA_AUTH_KEY`, `GOOGLE_MAPS_API_KEY`,
    /// `GOOGLE_DRIVE_ACCESS_TOKEN`, `SMTP_*`, `FILESERVER_PATHS`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(key) = std::env::var("CWA_AUTH_KEY") {
            config.credentials.cwa_auth_key = Some(key);
        } else {
            warn!("CWA_AUTH_KEY not set - weather and earthquake tools will fail");
        }

        if let Ok(key) = std::env::var("GOOGLE_MAPS_API_KEY") {
            config.credentials.places_api_key = Some(key);
        } else {
            warn!("GOOGLE_MAPS_API_KEY not set - places tools will fail");
        }

        if let Ok(token) = std::env::var("GOOGLE_DRIVE_ACCESS_TOKEN") {
            config.credentials.drive_access_token = Some(token);
        } else {
            warn!("GOOGLE_DRIVE_ACCESS_TOKEN not set - drive tools will fail");
        }

        if let Ok(host) = std::env::var("SMTP_HOST") {
            config.smtp.host = host;
        }
        if let Ok(port) = std::env::var("SMTP_PORT") {
            config.smtp.port = port.parse().unwrap_or(587);
        }
        if let Ok(username) = std::env::var("SMTP_USERNAME") {
            config.smtp.username = username;
        }
        if let Ok(password) = std::env::var("SMTP_PASSWORD") {
            config.smtp.password = password;
        }
        if !config.smtp.is_configured() {
            warn!("SMTP_HOST/SMTP_USERNAME/SMTP_PASSWORD not set - mail tools will fail");
        }

        // Comma-separated list of directories the fs/sheet/mail/places tools
        // are allowed to touch.
        if let Ok(paths) = std::env::var("FILESERVER_PATHS") {
            config.security.allowed_roots = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
            info!(
                "Path security enabled: {} allowed root(s)",
                config.security.allowed_roots.len()
            );
        } else {
            warn!("FILESERVER_PATHS not set - no path restrictions active");
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = allow_symlinks.parse().unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("CWA_AUTH_KEY", "CWA-TEST-KEY-1234");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.cwa_auth_key.as_deref(),
            Some("CWA-TEST-KEY-1234")
        );
        unsafe {
            std::env::remove_var("CWA_AUTH_KEY");
        }
    }

    #[test]
    fn test_allowed_roots_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("FILESERVER_PATHS", "/data/shared, /tmp/scratch ,");
        }
        let config = Config::from_env();
        assert_eq!(
            config.security.allowed_roots,
            vec![PathBuf::from("/data/shared"), PathBuf::from("/tmp/scratch")]
        );
        unsafe {
            std::env::remove_var("FILESERVER_PATHS");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            cwa_auth_key: Some("super_secret_key".to_string()),
            places_api_key: Some("another_secret".to_string()),
            drive_access_token: None,
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("another_secret"));
    }

    #[test]
    fn test_smtp_password_redacted_in_debug() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "bot@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug_str = format!("{:?}", smtp);
        assert!(debug_str.contains("smtp.example.com"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_smtp_is_configured() {
        let mut smtp = SmtpConfig::default();
        assert!(!smtp.is_configured());
        smtp.host = "smtp.example.com".to_string();
        smtp.username = "bot@example.com".to_string();
        smtp.password = "pw".to_string();
        assert!(smtp.is_configured());
    }

    #[test]
    fn test_default_has_no_restrictions() {
        let config = Config::default();
        assert!(config.security.allowed_roots.is_empty());
        assert!(config.security.allow_symlinks);
    }
}
