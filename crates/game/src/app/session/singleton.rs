use tracing::warn;

use super::diagnostics::SessionDiagnostic;
use super::Session;

/// Owner of the one canonical [`Session`].
///
/// The first session constructed becomes canonical when the cell is created.
/// Every later candidate offered to the cell is dropped on the spot, so there is
/// never a second reachable instance.
pub(crate) struct SessionCell {
    canonical: Session,
    discarded: u32,
}

impl SessionCell {
    pub(crate) fn new(first: Session) -> Self {
        Self {
            canonical: first,
            discarded: 0,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn offer(&mut self, candidate: Session) {
        drop(candidate);
        self.discarded = self.discarded.saturating_add(1);
        warn!(
            discarded_total = self.discarded,
            "session_singleton_collision"
        );
        self.canonical
            .diagnostics
            .push(SessionDiagnostic::SingletonCollision {
                discarded_total: self.discarded,
            });
    }

    pub(crate) fn instance(&self) -> &Session {
        &self.canonical
    }

    pub(crate) fn instance_mut(&mut self) -> &mut Session {
        &mut self.canonical
    }

    pub(crate) fn discarded(&self) -> u32 {
        self.discarded
    }
}
