#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ProgressionState {
    #[default]
    Locked,
    Unlocked,
}

/// One-way gate: nothing transitions back to `Locked`.
#[derive(Debug, Default)]
pub(crate) struct ProgressionMachine {
    state: ProgressionState,
}

impl ProgressionMachine {
    pub(crate) fn state(&self) -> ProgressionState {
        self.state
    }

    /// Returns true only on the Locked to Unlocked transition.
    pub(crate) fn unlock(&mut self) -> bool {
        let changed = self.state == ProgressionState::Locked;
        self.state = ProgressionState::Unlocked;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_monotonic() {
        let mut progression = ProgressionMachine::default();
        assert_eq!(progression.state(), ProgressionState::Locked);

        assert!(progression.unlock());
        assert!(!progression.unlock());
        assert_eq!(progression.state(), ProgressionState::Unlocked);
    }
}
