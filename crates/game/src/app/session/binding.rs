use tracing::warn;

use super::diagnostics::ConfigurationFault;
use super::roles::{Collaborator, Role};

struct Registration {
    tag: Role,
    object: Collaborator,
}

/// Registrations collected while a scene loads. Consumed by one binding pass.
#[derive(Default)]
pub(crate) struct BindingSet {
    registrations: Vec<Registration>,
}

impl BindingSet {
    pub(crate) fn register(&mut self, tag: Role, object: Collaborator) {
        self.registrations.push(Registration { tag, object });
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }

    /// First registration under `role` whose capability matches the tag. A tagged
    /// object lacking the capability counts as not found.
    pub(crate) fn resolve(&self, role: Role) -> Option<&Collaborator> {
        self.registrations
            .iter()
            .filter(|entry| entry.tag == role)
            .find_map(|entry| {
                if entry.object.capability() == role {
                    Some(&entry.object)
                } else {
                    warn!(
                        tag = %role,
                        capability = %entry.object.capability(),
                        "registration_capability_mismatch"
                    );
                    None
                }
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingOutcome {
    /// A live reference from an earlier pass was kept.
    Retained,
    Bound,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BindingReport {
    pub(crate) scene: String,
    pub(crate) outcomes: Vec<(Role, BindingOutcome)>,
    pub(crate) faults: Vec<ConfigurationFault>,
}

impl BindingReport {
    pub(crate) fn new(scene: &str) -> Self {
        Self {
            scene: scene.to_string(),
            outcomes: Vec::with_capacity(Role::BINDING_ORDER.len()),
            faults: Vec::new(),
        }
    }

    pub(crate) fn outcome(&self, role: Role) -> Option<BindingOutcome> {
        self.outcomes
            .iter()
            .find(|(entry_role, _)| *entry_role == role)
            .map(|(_, outcome)| *outcome)
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::app::session::roles::{ElevatorControl, KeyCardItem};

    struct Card;

    impl KeyCardItem for Card {}

    struct Lift;

    impl ElevatorControl for Lift {
        fn activate(&mut self) {}

        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn tag_without_matching_capability_is_not_found() {
        let mut set = BindingSet::default();
        set.register(
            Role::Elevator,
            Collaborator::KeyCard(Rc::new(RefCell::new(Card))),
        );

        assert!(set.resolve(Role::Elevator).is_none());
        assert!(set.resolve(Role::KeyCard).is_none());
    }

    #[test]
    fn first_matching_registration_wins() {
        let mut set = BindingSet::default();
        set.register(
            Role::Elevator,
            Collaborator::KeyCard(Rc::new(RefCell::new(Card))),
        );
        set.register(
            Role::Elevator,
            Collaborator::Elevator(Rc::new(RefCell::new(Lift))),
        );

        let resolved = set.resolve(Role::Elevator).expect("elevator");
        assert_eq!(resolved.capability(), Role::Elevator);
        assert_eq!(set.len(), 2);
    }
}
