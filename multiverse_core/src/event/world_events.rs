use std::sync::Arc;

use crate::world::MultiverseWorld;

/// Fired after a world was registered.
#[derive(Clone)]
pub struct WorldAddedEvent {
    pub world: Arc<MultiverseWorld>,
}

impl super::Event<()> for WorldAddedEvent {}

/// Fired when adding a world failed; carries the localized message shown to the user.
#[derive(Clone)]
pub struct WorldAddFailedEvent {
    pub world: String,
    pub message: String,
}

impl super::Event<()> for WorldAddFailedEvent {}
