use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use engine::EntityId;

/// Logical role tag a scene object registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Role {
    Player,
    Elevator,
    KeyCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    Required,
    Optional,
}

impl Role {
    pub(crate) const BINDING_ORDER: [Role; 3] = [Role::Player, Role::Elevator, Role::KeyCard];

    pub(crate) fn requirement(self) -> Requirement {
        match self {
            Role::Player | Role::Elevator => Requirement::Required,
            Role::KeyCard => Requirement::Optional,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Role::Player => "Player",
            Role::Elevator => "Elevator",
            Role::KeyCard => "KeyCard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overlay {
    TitleMenu,
    PauseMenu,
}

pub(crate) trait PlayerAvatar {
    fn entity_id(&self) -> EntityId;
}

pub(crate) trait ElevatorControl {
    fn activate(&mut self);
    fn is_available(&self) -> bool;
}

/// Presence-only capability: the session never calls into a key card.
pub(crate) trait KeyCardItem {}

pub(crate) trait UiSurface {
    /// `None` clears whatever overlay is showing.
    fn show_overlay(&mut self, overlay: Option<Overlay>);
}

/// A scene object offered to the binding pass, already narrowed to one capability.
pub(crate) enum Collaborator {
    Player(Rc<RefCell<dyn PlayerAvatar>>),
    Elevator(Rc<RefCell<dyn ElevatorControl>>),
    KeyCard(Rc<RefCell<dyn KeyCardItem>>),
}

impl Collaborator {
    pub(crate) fn capability(&self) -> Role {
        match self {
            Collaborator::Player(_) => Role::Player,
            Collaborator::Elevator(_) => Role::Elevator,
            Collaborator::KeyCard(_) => Role::KeyCard,
        }
    }
}

/// Non-owning reference to a collaborator. The owner (a scene object or the
/// bootstrap) keeps the strong handle; once it is dropped the binding reads as
/// empty.
pub(crate) struct Bound<T: ?Sized> {
    target: Option<Weak<RefCell<T>>>,
}

impl<T: ?Sized> Bound<T> {
    pub(crate) fn empty() -> Self {
        Self { target: None }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.get().is_some()
    }

    pub(crate) fn get(&self) -> Option<Rc<RefCell<T>>> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn attach(&mut self, target: &Rc<RefCell<T>>) {
        self.target = Some(Rc::downgrade(target));
    }
}

impl<T: ?Sized> Default for Bound<T> {
    fn default() -> Self {
        Self::empty()
    }
}
