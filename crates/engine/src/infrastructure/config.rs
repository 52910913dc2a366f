//! Application configuration
//!
//! Settings are layered, later sources winning:
//! 1. `appsettings.json` in the content root
//! 2. `appsettings.{Environment}.json`
//! 3. `FITNESSAPP__SECTION__KEY` environment variables
//!
//! The environment name itself comes from `FITNESSAPP_ENVIRONMENT`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, File, FileFormat};
use serde::Deserialize;

/// Variable naming the hosting environment.
pub const ENVIRONMENT_VAR: &str = "FITNESSAPP_ENVIRONMENT";

const ENV_PREFIX: &str = "FITNESSAPP";
const ENV_SEPARATOR: &str = "__";
/// Upper bound on a sign-in session, one year.
const MAX_SESSION_HOURS: i64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("Connection string 'fitness_app_database' is required")]
    MissingConnectionString,
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),
}

/// Hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    /// Reads [`ENVIRONMENT_VAR`], falling back to `Production`.
    pub fn from_env() -> Self {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to Production");
                Self::Production
            }),
            Err(_) => Self::Production,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Staging => "Staging",
            Self::Production => "Production",
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettings {
    #[serde(skip)]
    pub environment: Environment,
    #[serde(default)]
    pub connection_strings: ConnectionStrings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub https: HttpsSettings,
    #[serde(default)]
    pub identity: IdentitySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub content: ContentSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionStrings {
    #[serde(default)]
    pub fitness_app_database: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpsSettings {
    pub required: bool,
    /// Port used in redirects; derived from the environment when unset.
    pub port: Option<u16>,
}

impl Default for HttpsSettings {
    fn default() -> Self {
        Self {
            required: true,
            port: None,
        }
    }
}

impl HttpsSettings {
    pub fn redirect_port(&self, environment: Environment) -> u16 {
        self.port
            .unwrap_or(if environment.is_production() { 443 } else { 44349 })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_display_name: String,
    pub session_hours: i64,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            admin_email: None,
            admin_password: None,
            admin_display_name: "Administrator".to_string(),
            session_hours: 12,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "fitnessapp_engine=info,tower_http=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    pub static_dir: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            static_dir: "wwwroot".to_string(),
        }
    }
}

impl AppSettings {
    /// Settings with every default and the given database.
    pub fn new(environment: Environment, database_url: impl Into<String>) -> Self {
        Self {
            environment,
            connection_strings: ConnectionStrings {
                fitness_app_database: database_url.into(),
            },
            server: ServerSettings::default(),
            https: HttpsSettings::default(),
            identity: IdentitySettings::default(),
            logging: LoggingSettings::default(),
            content: ContentSettings::default(),
        }
    }

    /// Loads layered settings for `environment` from `content_root`.
    pub fn load(content_root: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let base = content_root.join("appsettings.json");
        let overlay = content_root.join(format!("appsettings.{}.json", environment.name()));

        let config = Config::builder()
            .add_source(File::from(base).format(FileFormat::Json).required(false))
            .add_source(File::from(overlay).format(FileFormat::Json).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: AppSettings = config.try_deserialize()?;
        settings.environment = environment;

        if settings
            .connection_strings
            .fitness_app_database
            .trim()
            .is_empty()
        {
            return Err(ConfigError::MissingConnectionString);
        }

        Ok(settings)
    }

    /// Sign-in lifetime, kept between one hour and one year.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.identity.session_hours.clamp(1, MAX_SESSION_HOURS))
    }
}
