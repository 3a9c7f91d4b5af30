use crate::error::DropVaultError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

const MAX_FILE_SIZE_MB: u64 = 100;
const TICK_INTERVAL_MS: u64 = 200;
const MAX_INCREMENT: f64 = 15.0;
const MAX_TICKS: u32 = 10_000;
const NOTIFICATION_TTL_MS: u64 = 3000;

pub const DEFAULT_ALLOWED_TYPES: [&str; 9] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/zip",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Runtime settings for intake limits and the upload timer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DropVaultConfig {
    pub max_file_size_bytes: u64,
    pub allowed_media_types: Vec<String>,
    pub tick_interval_ms: u64,
    /// Upper bound (exclusive) of a single progress increment.
    pub max_increment: f64,
    /// Ticks after which an unfinished upload is failed as stalled.
    pub max_ticks: u32,
    pub notification_ttl_ms: u64,
}

impl Default for DropVaultConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_media_types: DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            tick_interval_ms: TICK_INTERVAL_MS,
            max_increment: MAX_INCREMENT,
            max_ticks: MAX_TICKS,
            notification_ttl_ms: NOTIFICATION_TTL_MS,
        }
    }
}

impl DropVaultConfig {
    /// Reads the optional JSON file named by `DROPVAULT_CONFIG`, then applies
    /// `DROPVAULT_*` environment overrides on top.
    pub fn load() -> Result<Self, DropVaultError> {
        let mut config = match env::var("DROPVAULT_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, DropVaultError> {
        tracing::debug!(path = %path.display(), "Reading configuration file");
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bytes) = lookup("DROPVAULT_MAX_FILE_SIZE_MB")
            .and_then(|v| v.parse::<u64>().ok())
            .and_then(|mb| mb.checked_mul(1024 * 1024))
        {
            self.max_file_size_bytes = bytes;
        }

        if let Some(types) = lookup("DROPVAULT_ALLOWED_TYPES") {
            let types: Vec<String> = types
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !types.is_empty() {
                self.allowed_media_types = types;
            }
        }

        self.tick_interval_ms = lookup("DROPVAULT_TICK_INTERVAL_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.tick_interval_ms);

        self.max_ticks = lookup("DROPVAULT_MAX_TICKS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.max_ticks);
    }

    pub fn validate(&self) -> Result<(), DropVaultError> {
        if self.tick_interval_ms == 0 {
            return Err(DropVaultError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_increment.is_nan() || self.max_increment <= 0.0 {
            return Err(DropVaultError::Config(
                "max_increment must be positive".to_string(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(DropVaultError::Config(
                "max_ticks must be greater than zero".to_string(),
            ));
        }
        if self.allowed_media_types.is_empty() {
            return Err(DropVaultError::Config(
                "allowed_media_types must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_intake_rules() {
        let config = DropVaultConfig::default();
        assert_eq!(config.max_file_size_bytes, 104_857_600);
        assert_eq!(config.allowed_media_types.len(), 9);
        assert!(config
            .allowed_media_types
            .contains(&"application/msword".to_string()));
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_interval_ms": 5, "max_ticks": 40 }}"#).unwrap();

        let config = DropVaultConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 5);
        assert_eq!(config.max_ticks, 40);
        assert_eq!(config.max_file_size_bytes, 104_857_600);
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = DropVaultConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DropVaultError::Json(_)));
    }

    #[test]
    fn validate_rejects_zero_interval_and_empty_allow_list() {
        let config = DropVaultConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DropVaultConfig {
            allowed_media_types: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    fn overrides<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn env_overrides_replace_defaults() {
        let mut config = DropVaultConfig::default();
        config.apply_overrides(overrides(&[
            ("DROPVAULT_MAX_FILE_SIZE_MB", "5"),
            ("DROPVAULT_ALLOWED_TYPES", " Image/PNG , text/plain,"),
            ("DROPVAULT_TICK_INTERVAL_MS", "50"),
        ]));

        assert_eq!(config.max_file_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.allowed_media_types, vec!["image/png", "text/plain"]);
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.max_ticks, 10_000);
    }

    #[test]
    fn overflowing_size_override_keeps_current_limit() {
        let mut config = DropVaultConfig::default();
        config.apply_overrides(overrides(&[(
            "DROPVAULT_MAX_FILE_SIZE_MB",
            "18446744073709551615",
        )]));
        assert_eq!(config.max_file_size_bytes, 104_857_600);

        config.apply_overrides(overrides(&[("DROPVAULT_MAX_FILE_SIZE_MB", "lots")]));
        assert_eq!(config.max_file_size_bytes, 104_857_600);
        assert!(config.validate().is_ok());
    }
}
