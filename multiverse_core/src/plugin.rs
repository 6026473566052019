use crate::{MultiverseCore, Shared};

/// Implemented by plugins that build on the core.
pub trait MultiversePlugin: Send + Sync {
    fn core(&self) -> Option<Shared<MultiverseCore>>;

    fn set_core(&mut self, core: Shared<MultiverseCore>);

    /// The [`crate::PROTOCOL_VERSION`] the plugin was built against.
    fn protocol_version(&self) -> i32;
}
