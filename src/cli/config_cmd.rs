//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::hotkey::KeyCombo;

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
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "api_url" => config.api_url = Some(value.to_string()),
        "auth_token" => config.auth_token = Some(value.to_string()),
        "timezone" => config.timezone = Some(value.to_string()),
        "hotkey" => config.hotkey = Some(value.to_string()),
        "notify" => config.notify = Some(value == "true"),
        "save_captures" => config.save_captures = Some(value == "true"),
        "save_dir" => config.save_dir = Some(value.to_string()),
        _ => {
            return Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: "Unknown key".to_string(),
            })
        }
    }

    store.save(&config).await?;
    presenter.success(&format!("Set {} = {}", key, display_value(key, value)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;
    let value = get_value(&config, key);
    presenter.key_value(key, &value.unwrap_or_else(|| "(not set)".to_string()));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key);
        presenter.key_value(key, &value.unwrap_or_else(|| "(not set)".to_string()));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

/// Read one config field as display text
fn get_value(config: &crate::domain::config::AppConfig, key: &str) -> Option<String> {
    match key {
        "api_url" => config.api_url.clone(),
        "auth_token" => config.auth_token.as_ref().map(|_| "********".to_string()),
        "timezone" => config.timezone.clone(),
        "hotkey" => config.hotkey.clone(),
        "notify" => config.notify.map(|v| v.to_string()),
        "save_captures" => config.save_captures.map(|v| v.to_string()),
        "save_dir" => config.save_dir.clone(),
        _ => None,
    }
}

/// Mask secrets in confirmation output
fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if key == "auth_token" {
        "********"
    } else {
        value
    }
}

/// Validate a config value for its key
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "api_url" => {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "must start with http:// or https://".to_string(),
                })
            }
        }
        "hotkey" => value
            .parse::<KeyCombo>()
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError {
                key: key.to_string(),
                message: e.to_string(),
            }),
        "notify" | "save_captures" => match value {
            "true" | "false" => Ok(()),
            _ => Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: "must be 'true' or 'false'".to_string(),
            }),
        },
        "timezone" | "auth_token" | "save_dir" => {
            if value.trim().is_empty() {
                Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                })
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    fn store() -> (tempfile::TempDir, XdgConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        (dir, store)
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (_dir, store) = store();
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "timezone".to_string(),
                value: "Asia/Seoul".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.timezone, Some("Asia/Seoul".to_string()));
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let (_dir, store) = store();
        let presenter = Presenter::new();

        let err = handle_config_command(
            ConfigAction::Set {
                key: "bogus".to_string(),
                value: "x".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn validate_api_url() {
        assert!(validate_config_value("api_url", "http://localhost:8000").is_ok());
        assert!(validate_config_value("api_url", "https://api.example.com").is_ok());
        assert!(validate_config_value("api_url", "localhost").is_err());
    }

    #[test]
    fn validate_hotkey() {
        assert!(validate_config_value("hotkey", "cmd+ctrl+alt+l").is_ok());
        assert!(validate_config_value("hotkey", "not a combo").is_err());
    }

    #[test]
    fn validate_booleans() {
        assert!(validate_config_value("notify", "true").is_ok());
        assert!(validate_config_value("notify", "false").is_ok());
        assert!(validate_config_value("notify", "maybe").is_err());
        assert!(validate_config_value("save_captures", "yes").is_err());
    }

    #[test]
    fn validate_non_empty_strings() {
        assert!(validate_config_value("timezone", "UTC").is_ok());
        assert!(validate_config_value("timezone", "  ").is_err());
        assert!(validate_config_value("auth_token", "").is_err());
    }

    #[test]
    fn auth_token_is_masked() {
        let config = crate::domain::config::AppConfig {
            auth_token: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(get_value(&config, "auth_token").unwrap(), "********");
        assert_eq!(display_value("auth_token", "secret"), "********");
        assert_eq!(display_value("timezone", "UTC"), "UTC");
    }
}
