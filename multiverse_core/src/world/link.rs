use std::sync::{Arc, PoisonError, RwLock};

use multiverse_lib::{BasePlayer, FacingCoordinates, WorldTime};
use uuid::Uuid;

/// A world as the host server runs it.
pub trait HostWorld: Send + Sync {
    fn name(&self) -> &str;

    fn uid(&self) -> Uuid;

    /// The seed the host generated the world with.
    fn seed(&self) -> i64;

    fn players(&self) -> Vec<BasePlayer>;

    fn set_spawn(&self, location: FacingCoordinates);

    fn time_ticks(&self) -> u64;

    fn set_time_ticks(&self, ticks: u64);
}

/// Binds a [`super::MultiverseWorld`] to the host world it currently describes.
pub struct WorldLink {
    host: RwLock<Arc<dyn HostWorld>>,
}

impl WorldLink {
    pub fn new(host: Arc<dyn HostWorld>) -> Self {
        Self {
            host: RwLock::new(host),
        }
    }

    pub fn host(&self) -> Arc<dyn HostWorld> {
        Arc::clone(&self.host.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Points the link at a different host world, e.g. after the world was reloaded.
    pub fn link_to_world(&self, host: Arc<dyn HostWorld>) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = host;
    }

    pub fn players(&self) -> Vec<BasePlayer> {
        self.host().players()
    }

    pub fn time(&self) -> WorldTime {
        WorldTime::from_ticks(self.host().time_ticks())
    }

    pub fn set_time(&self, time: WorldTime) {
        self.host().set_time_ticks(time.ticks());
    }

    pub fn set_spawn(&self, location: FacingCoordinates) {
        self.host().set_spawn(location);
    }
}
