use crate::{MultiverseCore, Shared};

/// Fired once the core has loaded its stored worlds.
pub struct CoreEnabledEvent {
    pub core: Shared<MultiverseCore>,
    pub loaded_worlds: usize,
}

impl super::Event<()> for CoreEnabledEvent {}
