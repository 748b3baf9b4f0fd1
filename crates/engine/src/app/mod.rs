mod clock;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use clock::SimClock;
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{world_to_screen, Renderer, Viewport, PIXELS_PER_WORLD};
pub use scene::{
    Camera2D, Entity, EntityId, RenderableDesc, RenderableKind, Scene, SceneCommand, SceneError,
    SceneMachine, SceneWorld, Transform, Vec2,
};
