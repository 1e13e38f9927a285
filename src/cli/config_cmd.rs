//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::audio::Duration;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "duration" => config.duration = Some(value.to_string()),
        "camera" => {
            config.camera = Some(value.parse().map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be a camera index (e.g., 0)".to_string(),
            })?)
        }
        "qr_dir" => config.qr_dir = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "api_key" => config.api_key.map(|s| mask_api_key(&s)),
        "duration" => config.duration,
        "camera" => config.camera.map(|c| c.to_string()),
        "qr_dir" => config.qr_dir,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "api_key",
        &config
            .api_key
            .map(|s| mask_api_key(&s))
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "duration",
        config.duration.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "camera",
        &config
            .camera
            .map(|c| c.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value("qr_dir", config.qr_dir.as_deref().unwrap_or("(not set)"));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "camera" => {
            value
                .parse::<u32>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a camera index (e.g., 0)".to_string(),
                })?;
        }
        _ => {} // api_key and qr_dir accept any string
    }
    Ok(())
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_api_key_long() {
        let masked = mask_api_key("abcdefghijklmnop");
        assert_eq!(masked, "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        let masked = mask_api_key("short");
        assert_eq!(masked, "*****");
    }

    #[test]
    fn validate_duration_valid() {
        assert!(validate_config_value("duration", "30s").is_ok());
        assert!(validate_config_value("duration", "1m").is_ok());
        assert!(validate_config_value("duration", "2m30s").is_ok());
    }

    #[test]
    fn validate_duration_invalid() {
        assert!(validate_config_value("duration", "invalid").is_err());
    }

    #[test]
    fn validate_camera_valid() {
        assert!(validate_config_value("camera", "0").is_ok());
        assert!(validate_config_value("camera", "3").is_ok());
    }

    #[test]
    fn validate_camera_invalid() {
        assert!(validate_config_value("camera", "front").is_err());
        assert!(validate_config_value("camera", "-1").is_err());
    }

    #[test]
    fn validate_api_key_accepts_anything() {
        assert!(validate_config_value("api_key", "whatever").is_ok());
    }
}
