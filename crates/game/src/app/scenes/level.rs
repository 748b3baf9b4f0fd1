use std::cell::RefCell;
use std::rc::Rc;

use engine::{
    EntityId, InputAction, InputSnapshot, RenderableDesc, RenderableKind, Scene, SceneCommand,
    SceneWorld, SimClock, Transform, Vec2,
};
use tracing::{info, warn};

use super::{EngineHost, GameContext};
use crate::app::session::{
    BindingSet, Collaborator, ElevatorControl, KeyCardItem, PlayerAvatar, Role, SessionEvent,
};

const PLAYER_SPEED_UNITS_PER_SECOND: f32 = 4.0;
const KEY_CARD_PICKUP_RADIUS: f32 = 0.6;
const ELEVATOR_ENTRY_RADIUS: f32 = 0.75;

const PLAYER_COLOR: [u8; 4] = [232, 232, 240, 255];
const KEY_CARD_COLOR: [u8; 4] = [240, 200, 40, 255];
const ELEVATOR_LOCKED_COLOR: [u8; 4] = [150, 40, 40, 255];
const ELEVATOR_OPEN_COLOR: [u8; 4] = [40, 180, 90, 255];

/// World positions for the three gameplay objects of a level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LevelLayout {
    pub(crate) player_spawn: Vec2,
    pub(crate) key_card: Vec2,
    pub(crate) elevator: Vec2,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            player_spawn: Vec2 { x: 0.0, y: 0.0 },
            key_card: Vec2 { x: 2.0, y: 0.0 },
            elevator: Vec2 { x: 4.0, y: 0.0 },
        }
    }
}

struct PlayerBody {
    entity: EntityId,
}

impl PlayerAvatar for PlayerBody {
    fn entity_id(&self) -> EntityId {
        self.entity
    }
}

struct ElevatorCar {
    entity: EntityId,
    powered: bool,
}

impl ElevatorControl for ElevatorCar {
    fn activate(&mut self) {
        if !self.powered {
            info!(entity = self.entity.0, "elevator_powered");
        }
        self.powered = true;
    }

    fn is_available(&self) -> bool {
        self.powered
    }
}

struct KeyCardPickup {
    entity: EntityId,
}

impl KeyCardItem for KeyCardPickup {}

/// Strong handles for everything this scene registers. Dropping them on unload
/// is what leaves the session's bindings empty for the next scene.
struct LevelObjects {
    player: Rc<RefCell<PlayerBody>>,
    elevator: Rc<RefCell<ElevatorCar>>,
    key_card: Option<Rc<RefCell<KeyCardPickup>>>,
}

pub(crate) struct LevelScene {
    name: String,
    layout: LevelLayout,
    objects: Option<LevelObjects>,
    exit_reached: bool,
}

impl LevelScene {
    pub(crate) fn new(name: impl Into<String>, layout: LevelLayout) -> Self {
        Self {
            name: name.into(),
            layout,
            objects: None,
            exit_reached: false,
        }
    }

    fn spawn_objects(&self, world: &mut SceneWorld) -> LevelObjects {
        let player = world.spawn(
            Transform {
                position: self.layout.player_spawn,
            },
            RenderableDesc {
                kind: RenderableKind::Solid(PLAYER_COLOR),
                debug_name: "player",
            },
        );
        let key_card = world.spawn(
            Transform {
                position: self.layout.key_card,
            },
            RenderableDesc {
                kind: RenderableKind::Solid(KEY_CARD_COLOR),
                debug_name: "key_card",
            },
        );
        let elevator = world.spawn(
            Transform {
                position: self.layout.elevator,
            },
            RenderableDesc {
                kind: RenderableKind::Solid(ELEVATOR_LOCKED_COLOR),
                debug_name: "elevator",
            },
        );

        LevelObjects {
            player: Rc::new(RefCell::new(PlayerBody { entity: player })),
            elevator: Rc::new(RefCell::new(ElevatorCar {
                entity: elevator,
                powered: false,
            })),
            key_card: Some(Rc::new(RefCell::new(KeyCardPickup { entity: key_card }))),
        }
    }

    fn pause_events(input: &InputSnapshot, paused: bool) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if input.pause_pressed() || (paused && input.confirm_pressed()) {
            events.push(SessionEvent::PauseToggleRequested);
        }
        if paused && input.quit_pressed() {
            events.push(SessionEvent::QuitRequested);
        }
        events
    }
}

impl Scene<GameContext> for LevelScene {
    fn load(&mut self, ctx: &mut GameContext, world: &mut SceneWorld) {
        self.exit_reached = false;
        let objects = self.spawn_objects(world);

        let mut set = BindingSet::default();
        set.register(Role::Player, Collaborator::Player(objects.player.clone()));
        set.register(
            Role::Elevator,
            Collaborator::Elevator(objects.elevator.clone()),
        );
        if let Some(key_card) = &objects.key_card {
            set.register(Role::KeyCard, Collaborator::KeyCard(key_card.clone()));
        }
        let report = ctx.session_mut().bind_scene(&self.name, set);
        self.objects = Some(objects);

        info!(
            scene = %report.scene,
            clean = report.is_clean(),
            key_card = ?report.outcome(Role::KeyCard),
            entity_count = world.entity_count(),
            "level_loaded"
        );
    }

    fn update(
        &mut self,
        clock: &mut SimClock,
        input: &InputSnapshot,
        ctx: &mut GameContext,
        world: &mut SceneWorld,
    ) -> SceneCommand {
        ctx.sync_clock_once(clock);

        let mut host = EngineHost::new(clock);
        let paused = ctx.session().is_paused();
        for event in Self::pause_events(input, paused) {
            ctx.session_mut().handle_event(event, &self.name, &mut host);
        }
        let command = host.into_command();
        if ctx.session().is_paused() {
            return command;
        }

        let Some(objects) = self.objects.as_mut() else {
            warn!(scene = %self.name, "level_updated_before_load");
            return command;
        };

        let player_id = objects.player.borrow().entity;
        let delta = movement_delta(input, clock.scaled_dt(), PLAYER_SPEED_UNITS_PER_SECOND);
        let Some(player_position) = world.find_entity_mut(player_id).map(|player| {
            player.transform.position.x += delta.x;
            player.transform.position.y += delta.y;
            player.transform.position
        }) else {
            return command;
        };

        let touched_card = objects.key_card.as_ref().and_then(|card| {
            let card_id = card.borrow().entity;
            let card_position = world.find_entity(card_id)?.transform.position;
            (player_position.distance(card_position) <= KEY_CARD_PICKUP_RADIUS).then_some(card_id)
        });
        if let Some(card_id) = touched_card {
            world.despawn(card_id);
            ctx.session_mut().collect_key_card();
            objects.key_card = None;
        }

        let elevator_id = objects.elevator.borrow().entity;
        let available = ctx.session().is_elevator_available();
        if let Some(elevator) = world.find_entity_mut(elevator_id) {
            let color = if available {
                ELEVATOR_OPEN_COLOR
            } else {
                ELEVATOR_LOCKED_COLOR
            };
            elevator.renderable.kind = RenderableKind::Solid(color);
            if available
                && !self.exit_reached
                && player_position.distance(elevator.transform.position) <= ELEVATOR_ENTRY_RADIUS
            {
                self.exit_reached = true;
                ctx.session_mut().notify_level_complete(&self.name);
            }
        }

        command
    }

    fn unload(&mut self, ctx: &mut GameContext, _world: &mut SceneWorld) {
        self.objects = None;
        ctx.report_diagnostics(&self.name);
        info!(scene = %self.name, "level_unloaded");
    }

    fn screen_tint(&self, ctx: &GameContext) -> Option<[u8; 4]> {
        ctx.overlay_tint()
    }

    fn debug_title(&self, ctx: &GameContext, world: &SceneWorld) -> Option<String> {
        let session = ctx.session();
        Some(format!(
            "{} | {:?} | {:?} | card in scene {} | overlay {:?} | entities {} | completed {}",
            self.name,
            session.pause_state(),
            session.progression_state(),
            session.has_key_card(),
            ctx.overlay(),
            world.entity_count(),
            session.levels_completed()
        ))
    }
}

fn movement_delta(input: &InputSnapshot, dt_seconds: f32, speed: f32) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        y += 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        y -= 1.0;
    }

    let len_sq = x * x + y * y;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        y *= inv_len;
    }

    Vec2 {
        x: x * speed * dt_seconds,
        y: y * speed * dt_seconds,
    }
}
