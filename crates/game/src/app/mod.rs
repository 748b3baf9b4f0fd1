mod bootstrap;
mod loop_runner;
mod scenes;
mod session;

use std::process::ExitCode;

use tracing::error;

pub(crate) fn run() -> ExitCode {
    match bootstrap::build_app() {
        Ok(app) => loop_runner::run(app),
        Err(err) => {
            error!(error = %err, "scene_wiring_failed");
            ExitCode::FAILURE
        }
    }
}
