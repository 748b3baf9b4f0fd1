use tracing::warn;

/// Fixed-step simulation clock with a global time scale.
///
/// A scale of `1.0` is normal speed and `0.0` freezes simulated time. Ticks keep
/// counting while frozen so input is still sampled every step.
#[derive(Debug, Clone)]
pub struct SimClock {
    fixed_dt_seconds: f32,
    time_scale: f32,
    tick: u64,
    scaled_elapsed_seconds: f64,
}

impl SimClock {
    pub fn new(fixed_dt_seconds: f32) -> Self {
        Self {
            fixed_dt_seconds,
            time_scale: 1.0,
            tick: 0,
            scaled_elapsed_seconds: 0.0,
        }
    }

    pub fn fixed_dt_seconds(&self) -> f32 {
        self.fixed_dt_seconds
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale < 0.0 {
            warn!(
                requested = scale,
                kept = self.time_scale,
                "time_scale_rejected"
            );
            return;
        }
        self.time_scale = scale;
    }

    pub fn is_frozen(&self) -> bool {
        self.time_scale == 0.0
    }

    pub fn scaled_dt(&self) -> f32 {
        self.fixed_dt_seconds * self.time_scale
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn scaled_elapsed_seconds(&self) -> f64 {
        self.scaled_elapsed_seconds
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
        self.scaled_elapsed_seconds += f64::from(self.scaled_dt());
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scale_freezes_elapsed_time_but_counts_ticks() {
        let mut clock = SimClock::new(0.5);
        clock.set_time_scale(0.0);
        clock.advance();
        clock.advance();

        assert!(clock.is_frozen());
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.scaled_elapsed_seconds(), 0.0);
        assert_eq!(clock.scaled_dt(), 0.0);
    }

    #[test]
    fn normal_scale_accumulates_fixed_steps() {
        let mut clock = SimClock::new(0.25);
        clock.advance();
        clock.advance();

        assert!((clock.scaled_elapsed_seconds() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_scale_keeps_previous_value() {
        let mut clock = SimClock::new(0.25);
        clock.set_time_scale(0.5);
        clock.set_time_scale(-1.0);
        clock.set_time_scale(f32::NAN);

        assert_eq!(clock.time_scale(), 0.5);
    }
}
