use thiserror::Error;

use super::clock::SimClock;
use super::input::InputSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    LoadScene(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no scene registered under name `{0}`")]
    UnknownScene(String),
    #[error("a scene is already registered under name `{0}`")]
    DuplicateScene(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Camera2D {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableKind {
    Placeholder,
    Solid([u8; 4]),
}

#[derive(Debug, Clone)]
pub struct RenderableDesc {
    pub kind: RenderableKind,
    pub debug_name: &'static str,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub transform: Transform,
    pub renderable: RenderableDesc,
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Entity storage for one scene. Spawns and despawns are deferred until
/// [`SceneWorld::apply_pending`].
#[derive(Debug, Default)]
pub struct SceneWorld {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
    camera: Camera2D,
}

impl SceneWorld {
    pub fn spawn(&mut self, transform: Transform, renderable: RenderableDesc) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            transform,
            renderable,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }

        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
        self.camera = Camera2D::default();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }
}

/// A loadable scene. `C` is the caller-owned context handed to every hook, so
/// state that outlives scenes is passed in rather than looked up.
pub trait Scene<C> {
    fn load(&mut self, ctx: &mut C, world: &mut SceneWorld);
    fn update(
        &mut self,
        clock: &mut SimClock,
        input: &InputSnapshot,
        ctx: &mut C,
        world: &mut SceneWorld,
    ) -> SceneCommand;
    fn unload(&mut self, ctx: &mut C, world: &mut SceneWorld);
    fn screen_tint(&self, _ctx: &C) -> Option<[u8; 4]> {
        None
    }
    fn debug_title(&self, _ctx: &C, _world: &SceneWorld) -> Option<String> {
        None
    }
}

struct SceneRuntime<C> {
    name: String,
    scene: Box<dyn Scene<C>>,
    world: SceneWorld,
    is_loaded: bool,
}

/// Named scenes with single-scene load semantics: loading a scene unloads the
/// active one first.
pub struct SceneMachine<C> {
    scenes: Vec<SceneRuntime<C>>,
    active: usize,
}

impl<C> SceneMachine<C> {
    pub fn new(name: impl Into<String>, initial: Box<dyn Scene<C>>) -> Self {
        Self {
            scenes: vec![SceneRuntime {
                name: name.into(),
                scene: initial,
                world: SceneWorld::default(),
                is_loaded: false,
            }],
            active: 0,
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        scene: Box<dyn Scene<C>>,
    ) -> Result<(), SceneError> {
        let name = name.into();
        if self.index_of(&name).is_some() {
            return Err(SceneError::DuplicateScene(name));
        }
        self.scenes.push(SceneRuntime {
            name,
            scene,
            world: SceneWorld::default(),
            is_loaded: false,
        });
        Ok(())
    }

    pub fn active_scene(&self) -> &str {
        &self.active_runtime_ref().name
    }

    pub fn is_active_loaded(&self) -> bool {
        self.active_runtime_ref().is_loaded
    }

    pub fn load_active(&mut self, ctx: &mut C) {
        let runtime = self.active_runtime_mut();
        if runtime.is_loaded {
            return;
        }
        runtime.scene.load(ctx, &mut runtime.world);
        runtime.is_loaded = true;
    }

    pub fn update_active(
        &mut self,
        clock: &mut SimClock,
        input: &InputSnapshot,
        ctx: &mut C,
    ) -> SceneCommand {
        let runtime = self.active_runtime_mut();
        runtime.scene.update(clock, input, ctx, &mut runtime.world)
    }

    pub fn apply_pending_active(&mut self) {
        self.active_runtime_mut().world.apply_pending();
    }

    pub fn active_world(&self) -> &SceneWorld {
        &self.active_runtime_ref().world
    }

    pub fn screen_tint_active(&self, ctx: &C) -> Option<[u8; 4]> {
        self.active_runtime_ref().scene.screen_tint(ctx)
    }

    pub fn debug_title_active(&self, ctx: &C) -> Option<String> {
        let runtime = self.active_runtime_ref();
        runtime.scene.debug_title(ctx, &runtime.world)
    }

    /// Unloads the active scene and loads `name` from a clean world. Loading the
    /// active scene again resets it.
    pub fn load_scene(&mut self, name: &str, ctx: &mut C) -> Result<(), SceneError> {
        let next = self
            .index_of(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;

        Self::unload_runtime(self.active_runtime_mut(), ctx);
        self.active = next;
        let runtime = self.active_runtime_mut();
        runtime.scene.load(ctx, &mut runtime.world);
        runtime.world.apply_pending();
        runtime.is_loaded = true;
        Ok(())
    }

    pub fn shutdown_all(&mut self, ctx: &mut C) {
        for runtime in &mut self.scenes {
            Self::unload_runtime(runtime, ctx);
        }
    }

    fn unload_runtime(runtime: &mut SceneRuntime<C>, ctx: &mut C) {
        if !runtime.is_loaded {
            return;
        }
        runtime.scene.unload(ctx, &mut runtime.world);
        runtime.world.clear();
        runtime.is_loaded = false;
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|runtime| runtime.name == name)
    }

    fn active_runtime_mut(&mut self) -> &mut SceneRuntime<C> {
        &mut self.scenes[self.active]
    }

    fn active_runtime_ref(&self) -> &SceneRuntime<C> {
        &self.scenes[self.active]
    }
}
