use thiserror::Error;

/// Errors raised while loading settings from the environment
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A setting is present but its value is unusable
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting {
        setting_name: String,
        reason: String,
    },

    /// A required setting has no value and no default
    #[error("Required setting '{setting_name}' is missing")]
    MissingRequiredSetting { setting_name: String },
}

impl SettingsError {
    pub fn invalid(setting_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.into(),
            reason: reason.into(),
        }
    }
}
