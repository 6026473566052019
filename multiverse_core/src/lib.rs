//! Manages many worlds inside one host server: a registry of worlds, their configurable
//! properties, and the workflow that creates or loads them.

/// Bumped whenever a change breaks plugins built against the core.
pub const PROTOCOL_VERSION: i32 = 20;

pub type Shared<T> = Arc<Mutex<T>>;

pub mod config;
pub mod error;
pub mod event;
pub mod messages;
pub mod plugin;
pub mod world;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info, warn};
use tokio::{sync::Mutex, task};

use crate::{
    config::CoreConfig,
    error::{ConfigError, WorldCreationError},
    event::{
        EventBus,
        core_events::CoreEnabledEvent,
        world_events::{WorldAddFailedEvent, WorldAddedEvent},
    },
    messages::{Message, Messages},
    plugin::MultiversePlugin,
    world::{
        MultiverseWorld, WorldCreationSettings, WorldManager, WorldProvisioner,
        properties::WorldProperties, store::WorldStore,
    },
};

pub struct MultiverseCore {
    pub config: CoreConfig,
    pub event_bus: Arc<EventBus>,
    data_folder: PathBuf,
    world_manager: Arc<WorldManager>,
    store: Arc<WorldStore>,
    /// Stored worlds that are not loaded, kept so saving does not drop them.
    unloaded: BTreeMap<String, WorldProperties>,
}

impl MultiverseCore {
    /// Builds the core on top of the host's world provisioner. Config paths are resolved
    /// against `data_folder`.
    pub fn new(
        config: CoreConfig,
        data_folder: impl Into<PathBuf>,
        provisioner: Arc<dyn WorldProvisioner>,
    ) -> Shared<MultiverseCore> {
        let data_folder = data_folder.into();
        let messages = Messages::load(
            &config.resolve(&data_folder, &config.messages_dir),
            &config.locale,
        );
        let store = WorldStore::new(config.resolve(&data_folder, &config.worlds_file));

        Arc::new(Mutex::new(MultiverseCore {
            world_manager: Arc::new(WorldManager::new(provisioner, Arc::new(messages))),
            store: Arc::new(store),
            unloaded: BTreeMap::new(),
            event_bus: Arc::new(EventBus::default()),
            data_folder,
            config,
        }))
    }

    pub fn world_manager(&self) -> Arc<WorldManager> {
        Arc::clone(&self.world_manager)
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Names of stored worlds that were not loaded, either because they do not auto-load
    /// or because loading them failed.
    pub fn unloaded_worlds(&self) -> Vec<&str> {
        self.unloaded.keys().map(String::as_str).collect()
    }

    /// Loads every stored world marked for auto-loading. Worlds that fail to load are
    /// logged and kept as unloaded. Returns how many were loaded.
    pub async fn enable(core: &Shared<MultiverseCore>) -> Result<usize, ConfigError> {
        let core_lock = core.lock().await;
        let manager = Arc::clone(&core_lock.world_manager);
        let store = Arc::clone(&core_lock.store);
        let event_bus = Arc::clone(&core_lock.event_bus);
        if core_lock.config.first_run {
            info!("First run, no worlds have been configured yet");
        }
        drop(core_lock);

        let stored = store.load()?;
        let (loaded, unloaded) = task::spawn_blocking(move || {
            let mut loaded = Vec::new();
            let mut unloaded = Vec::new();
            for properties in stored {
                if !properties.is_auto_load() {
                    debug!("Not auto-loading world '{}'", properties.name());
                    unloaded.push(properties);
                    continue;
                }
                match manager.load_world(properties.clone()) {
                    Ok(world) => loaded.push(world),
                    Err(err) => {
                        warn!("{}", err);
                        unloaded.push(properties);
                    }
                }
            }
            (loaded, unloaded)
        })
        .await?;

        core.lock().await.unloaded.extend(
            unloaded
                .into_iter()
                .map(|properties| (properties.name().to_string(), properties)),
        );

        for world in &loaded {
            event_bus
                .dispatch::<WorldAddedEvent, ()>(&Arc::new(WorldAddedEvent {
                    world: Arc::clone(world),
                }))
                .await;
        }

        info!("Enabled with {} world(s) from {}", loaded.len(), store.path().display());
        event_bus
            .dispatch::<CoreEnabledEvent, ()>(&Arc::new(CoreEnabledEvent {
                core: Arc::clone(core),
                loaded_worlds: loaded.len(),
            }))
            .await;

        Ok(loaded.len())
    }

    /// Adds a world without blocking the runtime while the host creates it, then announces
    /// the outcome on the event bus.
    pub async fn add_world(
        core: &Shared<MultiverseCore>,
        settings: WorldCreationSettings,
    ) -> Result<Arc<MultiverseWorld>, WorldCreationError> {
        let core_lock = core.lock().await;
        let manager = Arc::clone(&core_lock.world_manager);
        let event_bus = Arc::clone(&core_lock.event_bus);
        drop(core_lock);

        let name = settings.name().to_string();
        let creator = Arc::clone(&manager);
        let result = match task::spawn_blocking(move || creator.add_world(settings)).await {
            Ok(result) => result,
            Err(err) => Err(WorldCreationError::new(Message::WorldCreationFailed, &name)
                .with_source(err)
                .localize(manager.messages())),
        };

        match &result {
            Ok(world) => {
                event_bus
                    .dispatch::<WorldAddedEvent, ()>(&Arc::new(WorldAddedEvent {
                        world: Arc::clone(world),
                    }))
                    .await;
            }
            Err(err) => {
                event_bus
                    .dispatch::<WorldAddFailedEvent, ()>(&Arc::new(WorldAddFailedEvent {
                        world: name,
                        message: err.message().to_string(),
                    }))
                    .await;
            }
        }

        result
    }

    /// Writes every registered world, plus the stored worlds that were not loaded, to the
    /// world store. A registered world replaces an unloaded one of the same name.
    pub async fn save_worlds(core: &Shared<MultiverseCore>) -> Result<usize, ConfigError> {
        let core_lock = core.lock().await;
        let manager = Arc::clone(&core_lock.world_manager);
        let store = Arc::clone(&core_lock.store);
        let mut worlds = core_lock.unloaded.clone();
        drop(core_lock);

        for world in manager.mv_worlds() {
            worlds.insert(world.name().to_string(), world.snapshot());
        }
        let count = worlds.len();
        store.save(worlds.into_values())?;
        debug!("Saved {} world(s) to {}", count, store.path().display());
        Ok(count)
    }

    /// Hands the core to an add-on plugin. Returns false, and leaves the plugin detached,
    /// if it was built against another protocol version.
    pub fn attach_plugin(core: &Shared<MultiverseCore>, plugin: &mut dyn MultiversePlugin) -> bool {
        if plugin.protocol_version() != PROTOCOL_VERSION {
            warn!(
                "Plugin expects protocol {}, the core speaks {}",
                plugin.protocol_version(),
                PROTOCOL_VERSION
            );
            return false;
        }
        plugin.set_core(Arc::clone(core));
        true
    }
}
