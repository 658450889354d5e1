use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::SettingsError;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// Configuration specification with environment override → default priority
///
/// An environment variable that is set but empty counts as unset.
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    env_override: Option<String>,
    default_value: Option<String>,
    required: bool,
    validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    /// Resolve the setting
    ///
    /// # Returns
    /// * `Ok(Some(ConfigValue))` - Value from the environment or the default
    /// * `Ok(None)` - Optional setting with no value
    /// * `Err(SettingsError)` - Validation failed, or a required setting is missing
    pub fn load(&self) -> Result<Option<ConfigValue>, SettingsError> {
        let setting_name = self.setting_name();

        let from_env = self.env_override.as_ref().and_then(|name| {
            self.env_provider
                .get_var(name)
                .filter(|value| !value.is_empty())
                .map(|value| ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable { name: name.clone() },
                })
        });

        let resolved = from_env.or_else(|| {
            self.default_value.as_ref().map(|value| ConfigValue {
                value: value.clone(),
                source: ConfigValueSource::Default,
            })
        });

        match resolved {
            Some(config_value) => {
                self.validate_value(&config_value.value, &setting_name)?;
                tracing::trace!("Setting {} resolved from {:?}", setting_name, config_value.source);
                Ok(Some(config_value))
            }
            None if self.required => Err(SettingsError::MissingRequiredSetting { setting_name }),
            None => Ok(None),
        }
    }

    /// Resolve a setting that always has a value (required, or defaulted)
    pub fn load_value(&self) -> Result<String, SettingsError> {
        self.load()?
            .map(|config_value| config_value.value)
            .ok_or_else(|| SettingsError::MissingRequiredSetting {
                setting_name: self.setting_name(),
            })
    }

    fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), SettingsError> {
        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| SettingsError::invalid(setting_name, reason))?;
        }
        Ok(())
    }

    fn setting_name(&self) -> String {
        self.env_override
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    /// Parse a port number, reporting failures against `setting_name`
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, SettingsError> {
        Self::validate_port_range(value, 1, 65535)
            .map_err(|reason| SettingsError::invalid(setting_name, reason))?;

        value
            .parse::<u16>()
            .map_err(|e| SettingsError::invalid(setting_name, e.to_string()))
    }

    /// Validate a port number is within the specified range
    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a bind or public host address
    ///
    /// Accepts hostnames, IPv4 and IPv6 literals. Rejects empty values and
    /// values containing whitespace or a scheme.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace".to_string());
        }

        if value.contains("://") {
            return Err("Host address must not include a scheme".to_string());
        }

        if value == "[]" {
            return Err("Invalid IPv6 address format".to_string());
        }

        Ok(())
    }

    /// Validate a URL has an http or https scheme
    pub fn validate_http_url(value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err(format!("Expected an http:// or https:// URL, got: {}", value))
        }
    }
}
