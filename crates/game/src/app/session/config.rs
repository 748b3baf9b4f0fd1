use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub(crate) const SESSION_CONFIG_FILE: &str = "session.json";
pub(crate) const TARGET_SCENE_ENV_VAR: &str = "DESENTIENCE_TARGET_SCENE";

const DEFAULT_TARGET_SCENE: &str = "FirstLevel";
const DEFAULT_TITLE_SCENE: &str = "TitleScreen";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Scene loaded by "start game".
    pub(crate) target_scene: String,
    /// Menu scene in which pause toggling is suppressed.
    pub(crate) title_scene: String,
    pub(crate) start_paused: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_scene: DEFAULT_TARGET_SCENE.to_string(),
            title_scene: DEFAULT_TITLE_SCENE.to_string(),
            start_paused: false,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read session config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid session config {path} at `{field}`: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads `path`. A missing file is not an error and yields `Ok(None)`.
pub(crate) fn load_session_config(path: &Path) -> Result<Option<SessionConfig>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_session_config(&raw, path).map(Some)
}

fn parse_session_config(raw: &str, path: &Path) -> Result<SessionConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        ConfigError::Parse {
            path: path.to_path_buf(),
            field,
            source: error.into_inner(),
        }
    })
}

pub(crate) fn apply_target_scene_override(config: &mut SessionConfig, value: Option<String>) {
    if let Some(target) = value.map(|raw| raw.trim().to_string()) {
        if !target.is_empty() {
            config.target_scene = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_session_config(&dir.path().join(SESSION_CONFIG_FILE)).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SESSION_CONFIG_FILE);
        fs::write(&path, r#"{ "target_scene": "ZachTestingScene" }"#).expect("write");

        let config = load_session_config(&path).expect("load").expect("config");
        assert_eq!(config.target_scene, "ZachTestingScene");
        assert_eq!(config.title_scene, DEFAULT_TITLE_SCENE);
        assert!(!config.start_paused);
    }

    #[test]
    fn parse_error_names_offending_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SESSION_CONFIG_FILE);
        fs::write(&path, r#"{ "start_paused": "yes" }"#).expect("write");

        let error = load_session_config(&path).unwrap_err();
        match error {
            ConfigError::Parse { field, .. } => assert_eq!(field, "start_paused"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = parse_session_config(r#"{ "game_scene": "X" }"#, Path::new("inline"))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_override_replaces_target_unless_blank() {
        let mut config = SessionConfig::default();
        apply_target_scene_override(&mut config, Some("   ".to_string()));
        assert_eq!(config.target_scene, DEFAULT_TARGET_SCENE);

        apply_target_scene_override(&mut config, Some(" Basement ".to_string()));
        assert_eq!(config.target_scene, "Basement");
    }
}
