//! A host that keeps its worlds in memory. Backs the demo server and the tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::debug;
use multiverse_lib::{BasePlayer, FacingCoordinates, WorldEnvironment};
use uuid::Uuid;

use super::{
    MultiverseWorld, link::HostWorld, manager::WorldProvisioner, settings::WorldCreationSettings,
};
use crate::error::WorldCreationError;

pub struct MemoryWorld {
    name: String,
    uid: Uuid,
    seed: i64,
    environment: WorldEnvironment,
    spawn: Mutex<FacingCoordinates>,
    time: AtomicU64,
    players: Mutex<Vec<BasePlayer>>,
}

impl MemoryWorld {
    pub fn new(settings: &WorldCreationSettings) -> Self {
        Self {
            name: settings.name().to_string(),
            uid: Uuid::new_v4(),
            seed: settings.seed.unwrap_or_else(|| Uuid::new_v4().as_u64_pair().0 as i64),
            environment: settings.environment,
            spawn: Mutex::new(FacingCoordinates::new(0.0, 64.0, 0.0, 0.0, 0.0)),
            time: AtomicU64::new(0),
            players: Mutex::new(Vec::new()),
        }
    }

    pub fn environment(&self) -> WorldEnvironment {
        self.environment
    }

    pub fn spawn(&self) -> FacingCoordinates {
        *self.spawn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn join(&self, player: BasePlayer) {
        self.players
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(player);
    }
}

impl HostWorld for MemoryWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn uid(&self) -> Uuid {
        self.uid
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn players(&self) -> Vec<BasePlayer> {
        self.players
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_spawn(&self, location: FacingCoordinates) {
        *self.spawn.lock().unwrap_or_else(PoisonError::into_inner) = location;
    }

    fn time_ticks(&self) -> u64 {
        self.time.load(Ordering::Relaxed)
    }

    fn set_time_ticks(&self, ticks: u64) {
        self.time.store(ticks, Ordering::Relaxed);
    }
}

/// Provisions [`MemoryWorld`]s. Generators listed as broken make creation fail, the way a
/// missing generator plugin would on a real host.
#[derive(Default)]
pub struct MemoryHost {
    loaded: Mutex<HashMap<String, Arc<MemoryWorld>>>,
    broken_generators: HashSet<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_broken_generator(mut self, generator: &str) -> Self {
        self.broken_generators.insert(generator.to_string());
        self
    }

    pub fn loaded_world(&self, name: &str) -> Option<Arc<MemoryWorld>> {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Forgets a host world, as if the host unloaded it.
    pub fn unload(&self, name: &str) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }
}

impl WorldProvisioner for MemoryHost {
    fn create_world(
        &self,
        settings: &WorldCreationSettings,
    ) -> Result<MultiverseWorld, WorldCreationError> {
        if let Some(generator) = settings.generator.as_deref() {
            if self.broken_generators.contains(generator) {
                return Err(WorldCreationError::failed(
                    settings.name(),
                    format!("generator '{generator}' is not available"),
                ));
            }
        }

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if loaded.contains_key(settings.name()) {
            return Err(WorldCreationError::failed(
                settings.name(),
                "the host already has a world loaded under this name",
            ));
        }

        let host = Arc::new(MemoryWorld::new(settings));
        loaded.insert(settings.name().to_string(), Arc::clone(&host));
        debug!(
            "Created in-memory world '{}' ({})",
            settings.name(),
            settings.environment.dimension_key()
        );

        Ok(MultiverseWorld::from_host(settings, host))
    }
}
