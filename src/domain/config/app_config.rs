//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::audio::Duration;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub duration: Option<String>,
    pub camera: Option<u32>,
    pub qr_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            duration: Some("10s".to_string()),
            camera: Some(0),
            qr_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            duration: other.duration.or(self.duration),
            camera: other.camera.or(self.camera),
            qr_dir: other.qr_dir.or(self.qr_dir),
        }
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get camera index, or 0 if not set
    pub fn camera_or_default(&self) -> u32 {
        self.camera.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.duration, Some("10s".to_string()));
        assert_eq!(config.camera, Some(0));
        assert!(config.qr_dir.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.duration.is_none());
        assert!(config.camera.is_none());
        assert!(config.qr_dir.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            duration: Some("10s".to_string()),
            camera: Some(0),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            duration: None, // Should not override
            camera: Some(1),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.duration, Some("10s".to_string())); // Kept from base
        assert_eq!(merged.camera, Some(1));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            api_key: Some("key".to_string()),
            qr_dir: Some("/tmp/qr".to_string()),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.api_key, Some("key".to_string()));
        assert_eq!(merged.qr_dir, Some("/tmp/qr".to_string()));
    }

    #[test]
    fn duration_or_default_parses() {
        let config = AppConfig {
            duration: Some("30s".to_string()),
            ..Default::default()
        };
        assert_eq!(config.duration_or_default().as_secs(), 30);
    }

    #[test]
    fn duration_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            duration: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.duration_or_default().as_secs(), 10);
    }

    #[test]
    fn camera_or_default() {
        assert_eq!(AppConfig::empty().camera_or_default(), 0);
        let config = AppConfig {
            camera: Some(2),
            ..Default::default()
        };
        assert_eq!(config.camera_or_default(), 2);
    }
}
