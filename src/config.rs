//! Configuration types.

use crate::error::ConfigError;
use crate::intake::{IntakeSettings, Variant};

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Address the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Which questionnaire new sessions run.
    pub variant: Variant,
    /// Also run an interactive session on stdin/stdout.
    pub cli: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            variant: Variant::default(),
            cli: false,
        }
    }
}

impl IntakeConfig {
    /// Build from `ENERGY_INTAKE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("ENERGY_INTAKE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("ENERGY_INTAKE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "ENERGY_INTAKE_PORT".to_string(),
                message: format!("'{raw}' is not a valid port"),
            })?,
            None => defaults.port,
        };

        let variant = match lookup("ENERGY_INTAKE_VARIANT") {
            Some(raw) => raw.parse::<Variant>().map_err(|message| ConfigError::InvalidValue {
                key: "ENERGY_INTAKE_VARIANT".to_string(),
                message,
            })?,
            None => defaults.variant,
        };

        let cli = match lookup("ENERGY_INTAKE_CLI") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "ENERGY_INTAKE_CLI".to_string(),
                message: format!("'{raw}' is not a boolean"),
            })?,
            None => defaults.cli,
        };

        Ok(Self {
            host,
            port,
            variant,
            cli,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session settings with the standard catalog and price table.
    pub fn intake_settings(&self) -> IntakeSettings {
        IntakeSettings {
            variant: self.variant,
            ..IntakeSettings::default()
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
