//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::RoutePreference;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration for startup from the process environment.
pub fn load(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup.
///
/// Reads the file when a path is given (defaults otherwise), applies
/// `N8N_WEBHOOK_*` overrides from `lookup`, then validates the result.
pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Override destinations from the environment.
///
/// Only non-empty values override; an empty variable leaves the file value alone.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for route in RoutePreference::ALL {
        match lookup(route.env_var()) {
            Some(value) if !value.trim().is_empty() => {
                tracing::debug!(route = %route, var = route.env_var(), "Destination set from environment");
                config.destinations.insert(route, value);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [destinations]
            predefined = "https://n8n.example.com/webhook/predefined"
            "#,
        );

        let config = load_with_env(Some(file.path()), |_| None).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert!(config.destinations.contains_key(&RoutePreference::Predefined));
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let file = write_config(
            r#"
            [destinations]
            trip-design = "not-a-url"
            "#,
        );

        match load_with_env(Some(file.path()), |_| None) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "destinations.trip-design");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_with_env(Some(Path::new("/definitely/not/here.toml")), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_bad_toml() {
        let file = write_config("[listener\nbind_address = ");
        assert!(matches!(load_with_env(Some(file.path()), |_| None), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_env_replaces_invalid_file_destination() {
        let file = write_config(
            r#"
            [destinations]
            trip-design = "not-a-url"
            "#,
        );

        let config = load_with_env(Some(file.path()), |key| {
            (key == "N8N_WEBHOOK_TRIP_DESIGN_URL").then(|| "https://env.example.com/b".to_string())
        })
        .unwrap();
        assert_eq!(config.destinations[&RoutePreference::TripDesign], "https://env.example.com/b");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load_with_env(None, |_| None).unwrap();
        assert_eq!(config.relay.path, "/api/webhooks/n8n");
        assert!(config.destinations.is_empty());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config = RelayConfig::default();
        config
            .destinations
            .insert(RoutePreference::Predefined, "https://file.example.com/a".into());

        let env: HashMap<&str, &str> = HashMap::from([
            ("N8N_WEBHOOK_PREDEFINED_URL", "https://env.example.com/a"),
            ("N8N_WEBHOOK_TRIP_DESIGN_URL", "https://env.example.com/b"),
        ]);
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.destinations[&RoutePreference::Predefined], "https://env.example.com/a");
        assert_eq!(config.destinations[&RoutePreference::TripDesign], "https://env.example.com/b");
    }

    #[test]
    fn test_empty_env_value_does_not_override() {
        let mut config = RelayConfig::default();
        config
            .destinations
            .insert(RoutePreference::TripDesign, "https://file.example.com/b".into());

        apply_env_overrides(&mut config, |_| Some(String::new()));

        assert_eq!(config.destinations[&RoutePreference::TripDesign], "https://file.example.com/b");
        assert!(!config.destinations.contains_key(&RoutePreference::Predefined));
    }
}
