use std::{io, path::PathBuf, sync::Arc};

use log::{error, info};
use multiverse_core::{
    MultiverseCore,
    config::CoreConfig,
    event::world_events::{WorldAddFailedEvent, WorldAddedEvent},
    world::{WorldCreationSettings, memory::MemoryHost},
};
use multiverse_lib::{BasePlayer, Difficulty, PortalType, WorldEnvironment, WorldType};
use once_cell::sync::Lazy;
use uuid::Uuid;

static DATA_FOLDER: Lazy<PathBuf> = Lazy::new(|| PathBuf::from("plugins/Multiverse-Core"));

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    let config = CoreConfig::load(&DATA_FOLDER.join("config.toml"))
        .map_err(io::Error::other)?;
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let host = Arc::new(MemoryHost::new().with_broken_generator("MissingGen"));
    let core = MultiverseCore::new(config, DATA_FOLDER.as_path(), host.clone());
    {
        let event_bus = &core.lock().await.event_bus;

        event_bus
            .listen::<WorldAddedEvent, _, _, _>(false, |event| async move {
                info!(
                    "Now managing '{}' ({}, seed {})",
                    event.world.alias(),
                    event.world.environment(),
                    event.world.seed()
                );
                None::<()>
            })
            .await;

        event_bus
            .listen::<WorldAddFailedEvent, _, _, _>(true, |event| async move {
                error!("{}", event.message);
                None::<()>
            })
            .await;
    }

    let loaded = MultiverseCore::enable(&core).await.map_err(|err| {
        io::Error::other(format!("Could not enable: {}", err))
    })?;

    if loaded == 0 {
        let requests = [
            WorldCreationSettings::new("world"),
            WorldCreationSettings::new("world_nether")
                .environment(WorldEnvironment::Nether)
                .seed_text("world"),
            WorldCreationSettings::new("creative")
                .world_type(Some(WorldType::Flat))
                .generate_structures(Some(false))
                .adjust_spawn(false),
            WorldCreationSettings::new("skylands").generator(Some("MissingGen")),
        ];
        for settings in requests {
            // Failures are reported through the event bus.
            let _ = MultiverseCore::add_world(&core, settings).await;
        }
    }

    let manager = core.lock().await.world_manager();
    if let Some(nether) = manager.mv_world("world_nether") {
        nether.set_scale(PortalType::Nether, 8.0);
        nether.set_difficulty(Difficulty::Hard);
    }
    if let Some(creative) = manager.mv_world("creative") {
        if !creative.set_property_unchecked("gameMode", "creative") {
            error!("Could not switch 'creative' to creative mode");
        }
        creative.set_alias(Some("Creative Plots"));
    }
    if let Some(world) = host.loaded_world("world") {
        world.join(BasePlayer::new("Notch", Uuid::new_v4()));
    }

    for world in manager.mv_worlds() {
        info!(
            "{:<16} players={} pvp={} mode={} time={}",
            world.alias(),
            world.players().len(),
            world.is_pvp_enabled(),
            world.game_mode(),
            world.time()
        );
    }

    let saved = MultiverseCore::save_worlds(&core)
        .await
        .map_err(|err| io::Error::other(format!("Could not save worlds: {}", err)))?;
    info!("Saved {} world(s)", saved);

    Ok(())
}
