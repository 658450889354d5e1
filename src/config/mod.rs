mod config_spec;
mod cors;
mod database;
mod env_provider;
mod errors;
mod logging;
mod settings;

pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use cors::CorsPolicy;
pub use database::{connect_database, migrate_database};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::SettingsError;
pub use logging::{LoggingConfig, LoggingError, init_logging, init_logging_with};
pub use settings::{ClientSettings, ServerSettings};
