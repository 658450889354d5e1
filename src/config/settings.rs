use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::config::config_spec::ConfigSpec;
use crate::config::cors::CorsPolicy;
use crate::config::errors::SettingsError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Settings for the item store service
pub struct ServerSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    frontend_url: Option<String>,
    public_host: Option<String>,
}

impl ServerSettings {
    /// Load server settings from the given environment provider
    ///
    /// `DATABASE_URL` takes precedence. Without it the MySQL URL is assembled
    /// from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SettingsError> {
        let database_url = match ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .load()?
        {
            Some(config_value) => config_value.value,
            None => Self::assemble_database_url(env_provider.clone())?,
        };

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_value()?;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("5000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load_value()?;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let frontend_url = ConfigSpec::new(env_provider.clone())
            .env_override("FRONTEND_URL")
            .validator(ConfigSpec::validate_http_url)
            .load()?
            .map(|config_value| config_value.value);

        let public_host = ConfigSpec::new(env_provider)
            .env_override("PUBLIC_HOST")
            .validator(ConfigSpec::validate_host_address)
            .load()?
            .map(|config_value| config_value.value);

        Ok(Self {
            database_url,
            server_host,
            server_port,
            frontend_url,
            public_host,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn assemble_database_url(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<String, SettingsError> {
        let host = ConfigSpec::new(env_provider.clone())
            .env_override("DB_HOST")
            .default_value("mysql")
            .validator(ConfigSpec::validate_host_address)
            .load_value()?;
        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("DB_PORT")
            .default_value("3306")
            .load_value()?;
        let port = ConfigSpec::parse_port(&port_value, "DB_PORT")?;
        let user = ConfigSpec::new(env_provider.clone())
            .env_override("DB_USER")
            .default_value("admin")
            .load_value()?;
        let password = ConfigSpec::new(env_provider.clone())
            .env_override("DB_PASSWORD")
            .default_value("admin123")
            .load_value()?;
        let name = ConfigSpec::new(env_provider)
            .env_override("DB_NAME")
            .default_value("cruddb")
            .load_value()?;

        let mut url = Url::parse(&format!("mysql://{}:{}/{}", host, port, name))
            .map_err(|e| SettingsError::invalid("DB_HOST", e.to_string()))?;
        // Userinfo is percent-encoded by the setters
        url.set_username(&user)
            .map_err(|_| SettingsError::invalid("DB_USER", "cannot be used in a database URL"))?;
        url.set_password(Some(&password)).map_err(|_| {
            SettingsError::invalid("DB_PASSWORD", "cannot be used in a database URL")
        })?;

        Ok(url.to_string())
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn frontend_url(&self) -> Option<&str> {
        self.frontend_url.as_deref()
    }

    pub fn public_host(&self) -> Option<&str> {
        self.public_host.as_deref()
    }

    /// Cross-origin policy derived from the frontend URL and public host
    pub fn cors_policy(&self) -> CorsPolicy {
        CorsPolicy::from_settings(self.frontend_url(), self.public_host())
    }
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("database_url", &"[redacted]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("frontend_url", &self.frontend_url)
            .field("public_host", &self.public_host)
            .finish()
    }
}

/// Settings for the terminal client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    api_url: String,
}

impl ClientSettings {
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SettingsError> {
        let api_url = ConfigSpec::new(env_provider)
            .env_override("API_URL")
            .default_value("http://localhost:5000/api")
            .validator(ConfigSpec::validate_http_url)
            .load_value()?;

        Ok(Self::with_api_url(api_url))
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Build settings for an explicit base URL, e.g. from a command-line flag
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of the API, without a trailing slash
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
