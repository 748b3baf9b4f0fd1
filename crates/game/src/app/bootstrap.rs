use std::path::PathBuf;

use engine::{resolve_app_paths, LoopConfig, SceneError, SceneMachine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::scenes::{GameContext, LevelLayout, LevelScene, TitleScene};
use super::session::{
    apply_target_scene_override, load_session_config, SessionConfig, SESSION_CONFIG_FILE,
    TARGET_SCENE_ENV_VAR,
};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scenes: SceneMachine<GameContext>,
    pub(crate) context: GameContext,
}

pub(crate) fn build_app() -> Result<AppWiring, SceneError> {
    init_tracing();
    info!("=== Desentience Startup ===");

    let mut session_config = load_config_or_default();
    apply_target_scene_override(
        &mut session_config,
        std::env::var(TARGET_SCENE_ENV_VAR).ok(),
    );
    info!(
        target_scene = %session_config.target_scene,
        title_scene = %session_config.title_scene,
        start_paused = session_config.start_paused,
        "session_config"
    );

    let scenes = build_scenes(&session_config)?;
    let context = GameContext::new(session_config);

    Ok(AppWiring {
        config: LoopConfig::default(),
        scenes,
        context,
    })
}

/// Title first, then the gameplay level under whatever name "start game" targets.
pub(crate) fn build_scenes(
    config: &SessionConfig,
) -> Result<SceneMachine<GameContext>, SceneError> {
    let mut scenes: SceneMachine<GameContext> = SceneMachine::new(
        config.title_scene.clone(),
        Box::new(TitleScene::new(config.title_scene.clone())),
    );
    scenes.register(
        config.target_scene.clone(),
        Box::new(LevelScene::new(
            config.target_scene.clone(),
            LevelLayout::default(),
        )),
    )?;
    Ok(scenes)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_config_or_default() -> SessionConfig {
    let Some(path) = session_config_path() else {
        return SessionConfig::default();
    };
    match load_session_config(&path) {
        Ok(Some(config)) => {
            info!(path = %path.display(), "session_config_loaded");
            config
        }
        Ok(None) => {
            info!(path = %path.display(), "session_config_missing_using_defaults");
            SessionConfig::default()
        }
        Err(error) => {
            warn!(error = %error, "session_config_invalid_using_defaults");
            SessionConfig::default()
        }
    }
}

fn session_config_path() -> Option<PathBuf> {
    match resolve_app_paths() {
        Ok(paths) => Some(paths.config_dir.join(SESSION_CONFIG_FILE)),
        Err(error) => {
            warn!(error = %error, "app_root_unresolved_using_default_config");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_start_on_title_with_target_registered() {
        let config = SessionConfig::default();
        let mut scenes = build_scenes(&config).expect("scenes");
        let mut context = GameContext::new(config.clone());

        assert_eq!(scenes.active_scene(), config.title_scene);
        scenes
            .load_scene(&config.target_scene, &mut context)
            .expect("target scene registered");
    }

    #[test]
    fn target_equal_to_title_is_rejected() {
        let config = SessionConfig {
            target_scene: "TitleScreen".to_string(),
            ..SessionConfig::default()
        };

        assert!(matches!(
            build_scenes(&config),
            Err(SceneError::DuplicateScene(name)) if name == "TitleScreen"
        ));
    }
}
