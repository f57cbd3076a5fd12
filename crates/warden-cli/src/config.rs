//! Configuration loading and the signing-secret lookup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use warden_core::{CoreError, CredentialPolicy, PasswordPolicy};
use warden_crypto::SigningSecret;

/// Full configuration for the `warden` tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WardenConfig {
    /// Credential issuance settings.
    #[serde(default)]
    pub credentials: CredentialPolicy,

    /// Password length bounds and hashing cost.
    #[serde(default)]
    pub password: PasswordPolicy,

    /// User seed file settings.
    #[serde(default)]
    pub users: UsersConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsersConfig {
    /// Path to a TOML file of `[[users]]` records.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WardenConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<WardenConfig>(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.credentials.validate()?;
        self.password.validate()?;
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(CoreError::InvalidConfig(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }

    /// Read the signing secret from the environment variable named in
    /// `credentials.secret_env`. Missing or empty is fatal.
    pub fn signing_secret(&self) -> Result<SigningSecret, CoreError> {
        let var = &self.credentials.secret_env;
        let value = std::env::var(var).map_err(|_| {
            CoreError::SigningConfiguration(format!("environment variable {} is not set", var))
        })?;
        SigningSecret::new(value.into_bytes()).map_err(|_| {
            CoreError::SigningConfiguration(format!("environment variable {} is empty", var))
        })
    }
}
