/// Engine-facing side effects the session requests. Every call is
/// fire-and-forget; success or failure belongs to the host.
pub(crate) trait SessionHost {
    fn time_scale(&self) -> f32;
    fn set_time_scale(&mut self, scale: f32);
    fn load_scene(&mut self, name: &str);
    fn terminate(&mut self);
}

pub(crate) const NORMAL_TIME_SCALE: f32 = 1.0;
pub(crate) const FROZEN_TIME_SCALE: f32 = 0.0;
