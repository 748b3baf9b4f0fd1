#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

/// Input state for one simulation tick.
///
/// `*_pressed` flags are edges: they are true for exactly one tick per key press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pause_pressed: bool,
    confirm_pressed: bool,
    quit_pressed: bool,
    actions: ActionStates,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        pause_pressed: bool,
        confirm_pressed: bool,
        quit_pressed: bool,
        actions: ActionStates,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            pause_pressed,
            confirm_pressed,
            quit_pressed,
            actions,
            window_width,
            window_height,
        }
    }

    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }

    pub fn confirm_pressed(&self) -> bool {
        self.confirm_pressed
    }

    pub fn quit_pressed(&self) -> bool {
        self.quit_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_pause_pressed(mut self, pause_pressed: bool) -> Self {
        self.pause_pressed = pause_pressed;
        self
    }

    pub fn with_confirm_pressed(mut self, confirm_pressed: bool) -> Self {
        self.confirm_pressed = confirm_pressed;
        self
    }

    pub fn with_quit_pressed(mut self, quit_pressed: bool) -> Self {
        self.quit_pressed = quit_pressed;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
