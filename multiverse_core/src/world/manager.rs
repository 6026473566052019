use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, info, warn};
use multiverse_lib::{WorldEnvironment, WorldType};

use super::{MultiverseWorld, WorldCreationSettings, properties::WorldProperties, settings::parse_seed};
use crate::{
    error::WorldCreationError,
    messages::{Message, Messages},
};

/// Creates or loads worlds on the host.
pub trait WorldProvisioner: Send + Sync {
    /// Creates the world described by `settings`, or loads it if it already exists on disk.
    ///
    /// Any failure is an error, including the host already having a world of this name
    /// loaded through some other route.
    fn create_world(
        &self,
        settings: &WorldCreationSettings,
    ) -> Result<MultiverseWorld, WorldCreationError>;
}

enum Slot {
    /// A creation for this name is in flight.
    Reserved,
    Ready(Arc<MultiverseWorld>),
}

/// The registry of every world the core manages, keyed by world name.
pub struct WorldManager {
    provisioner: Arc<dyn WorldProvisioner>,
    messages: Arc<Messages>,
    worlds: RwLock<HashMap<String, Slot>>,
}

/// Releases a reserved name unless the creation completed.
struct Reservation<'a> {
    manager: &'a WorldManager,
    name: String,
    armed: bool,
}

impl Reservation<'_> {
    fn complete(mut self, world: Arc<MultiverseWorld>) {
        self.manager
            .write()
            .insert(self.name.clone(), Slot::Ready(world));
        self.armed = false;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Releasing reserved world name '{}'", self.name);
            self.manager.write().remove(&self.name);
        }
    }
}

impl WorldManager {
    pub fn new(provisioner: Arc<dyn WorldProvisioner>, messages: Arc<Messages>) -> Self {
        Self {
            provisioner,
            messages,
            worlds: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Slot>> {
        self.worlds.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Slot>> {
        self.worlds.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// [`Self::add_world_adjusting`] with spawn adjustment on.
    pub fn add_world_with(
        &self,
        name: &str,
        environment: WorldEnvironment,
        seed: Option<&str>,
        world_type: Option<WorldType>,
        generate_structures: Option<bool>,
        generator: Option<&str>,
    ) -> Result<Arc<MultiverseWorld>, WorldCreationError> {
        self.add_world_adjusting(
            name,
            environment,
            seed,
            world_type,
            generate_structures,
            generator,
            true,
        )
    }

    /// Adds a world from loosely typed input. A seed that is not a number is hashed.
    #[allow(clippy::too_many_arguments)]
    pub fn add_world_adjusting(
        &self,
        name: &str,
        environment: WorldEnvironment,
        seed: Option<&str>,
        world_type: Option<WorldType>,
        generate_structures: Option<bool>,
        generator: Option<&str>,
        use_spawn_adjust: bool,
    ) -> Result<Arc<MultiverseWorld>, WorldCreationError> {
        let mut settings = WorldCreationSettings::new(name)
            .environment(environment)
            .world_type(world_type)
            .generate_structures(generate_structures)
            .generator(generator)
            .adjust_spawn(use_spawn_adjust);
        settings.seed = seed.and_then(parse_seed);

        self.add_world(settings)
    }

    /// Creates or loads the world and registers it under its name.
    ///
    /// The name is reserved before the provisioner runs, so a concurrent call for the same
    /// name fails instead of creating the world twice, and released again if creation fails.
    pub fn add_world(
        &self,
        settings: WorldCreationSettings,
    ) -> Result<Arc<MultiverseWorld>, WorldCreationError> {
        let reservation = self.reserve(settings.name())?;

        let world = self
            .provisioner
            .create_world(&settings)
            .map_err(|err| err.localize(&self.messages))?;
        world.set_adjust_spawn(settings.adjust_spawn);

        let world = Arc::new(world);
        reservation.complete(Arc::clone(&world));
        info!("{}", self.messages.render(Message::WorldLoaded, &[world.name()]));
        Ok(world)
    }

    /// Provisions a world from a stored property bag and installs that bag on it.
    pub fn load_world(
        &self,
        properties: WorldProperties,
    ) -> Result<Arc<MultiverseWorld>, WorldCreationError> {
        let settings = properties.creation_settings();
        let reservation = self.reserve(settings.name())?;

        let world = self
            .provisioner
            .create_world(&settings)
            .map_err(|err| err.localize(&self.messages))?;
        world.restore(properties);

        let world = Arc::new(world);
        reservation.complete(Arc::clone(&world));
        info!("{}", self.messages.render(Message::WorldLoaded, &[world.name()]));
        Ok(world)
    }

    fn reserve(&self, name: &str) -> Result<Reservation<'_>, WorldCreationError> {
        if name.trim().is_empty() {
            return Err(WorldCreationError::new(Message::InvalidWorldName, name)
                .localize(&self.messages));
        }

        let mut worlds = self.write();
        if worlds.contains_key(name) {
            warn!("Refusing to add world '{}': the name is taken", name);
            return Err(WorldCreationError::new(Message::WorldAlreadyExists, name)
                .localize(&self.messages));
        }
        worlds.insert(name.to_string(), Slot::Reserved);

        Ok(Reservation {
            manager: self,
            name: name.to_string(),
            armed: true,
        })
    }

    /// Whether `name` is a fully registered world. Names still being created are not.
    pub fn is_mv_world(&self, name: &str) -> bool {
        matches!(self.read().get(name), Some(Slot::Ready(_)))
    }

    pub fn mv_world(&self, name: &str) -> Option<Arc<MultiverseWorld>> {
        match self.read().get(name) {
            Some(Slot::Ready(world)) => Some(Arc::clone(world)),
            _ => None,
        }
    }

    /// A snapshot of all registered worlds, sorted by name. Changing it does not change the
    /// registry, and worlds added later do not appear in it.
    pub fn mv_worlds(&self) -> Vec<Arc<MultiverseWorld>> {
        let mut worlds: Vec<Arc<MultiverseWorld>> = self
            .read()
            .values()
            .filter_map(|slot| match slot {
                Slot::Ready(world) => Some(Arc::clone(world)),
                Slot::Reserved => None,
            })
            .collect();
        worlds.sort_by(|a, b| a.name().cmp(b.name()));
        worlds
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }
}
