use thiserror::Error;

use super::roles::Role;

/// A required role had no usable registration when a scene was bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not find {role} object in scene `{scene}`, it should be registered as {role}")]
pub(crate) struct ConfigurationFault {
    pub(crate) role: Role,
    pub(crate) scene: String,
}

/// Structured record of something the session noticed. Nothing here is returned
/// as an error to callers; the channel is drained by whoever wants to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionDiagnostic {
    ConfigurationFault(ConfigurationFault),
    SingletonCollision { discarded_total: u32 },
    LevelComplete { scene: String, total: u32 },
}

#[derive(Debug, Default)]
pub(crate) struct DiagnosticChannel {
    pending: Vec<SessionDiagnostic>,
}

impl DiagnosticChannel {
    pub(crate) fn push(&mut self, diagnostic: SessionDiagnostic) {
        self.pending.push(diagnostic);
    }

    pub(crate) fn drain(&mut self) -> Vec<SessionDiagnostic> {
        std::mem::take(&mut self.pending)
    }
}
