use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use multiverse_core::{
    MultiverseCore, PROTOCOL_VERSION, Shared,
    config::CoreConfig,
    event::{core_events::CoreEnabledEvent, world_events::{WorldAddFailedEvent, WorldAddedEvent}},
    plugin::MultiversePlugin,
    world::{WorldCreationSettings, memory::MemoryHost, store::WorldStore},
};

fn core_in(dir: &std::path::Path) -> Shared<MultiverseCore> {
    MultiverseCore::new(CoreConfig::default(), dir, Arc::new(MemoryHost::new()))
}

#[tokio::test]
async fn add_world_announces_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_in(dir.path());

    let added = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(std::sync::Mutex::new(Vec::new()));
    {
        let event_bus = Arc::clone(&core.lock().await.event_bus);
        let counter = Arc::clone(&added);
        event_bus
            .listen::<WorldAddedEvent, _, _, _>(false, move |_| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    None::<()>
                }
            })
            .await;
        let messages = Arc::clone(&failed);
        event_bus
            .listen::<WorldAddFailedEvent, _, _, _>(false, move |event| {
                let messages = Arc::clone(&messages);
                async move {
                    messages.lock().unwrap().push(event.message.clone());
                    None::<()>
                }
            })
            .await;
    }

    MultiverseCore::add_world(&core, WorldCreationSettings::new("alpha"))
        .await
        .unwrap();
    assert!(
        MultiverseCore::add_world(&core, WorldCreationSettings::new("alpha"))
            .await
            .is_err()
    );

    assert_eq!(added.load(Ordering::SeqCst), 1);
    assert_eq!(
        *failed.lock().unwrap(),
        vec!["World 'alpha' already exists!".to_string()]
    );
}

#[tokio::test]
async fn saved_worlds_are_auto_loaded_on_enable() {
    let dir = tempfile::tempdir().unwrap();

    let core = core_in(dir.path());
    let alpha = MultiverseCore::add_world(&core, WorldCreationSettings::new("alpha").seed(1))
        .await
        .unwrap();
    alpha.set_alias(Some("Home"));
    let beta = MultiverseCore::add_world(&core, WorldCreationSettings::new("beta"))
        .await
        .unwrap();
    beta.set_auto_load(false);
    assert_eq!(MultiverseCore::save_worlds(&core).await.unwrap(), 2);

    // A fresh core, as after a restart.
    let restarted = core_in(dir.path());
    let enabled = Arc::new(AtomicUsize::new(usize::MAX));
    {
        let seen = Arc::clone(&enabled);
        let event_bus = Arc::clone(&restarted.lock().await.event_bus);
        event_bus
            .listen::<CoreEnabledEvent, _, _, _>(false, move |event| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.store(event.loaded_worlds, Ordering::SeqCst);
                    None::<()>
                }
            })
            .await;
    }

    assert_eq!(MultiverseCore::enable(&restarted).await.unwrap(), 1);
    assert_eq!(enabled.load(Ordering::SeqCst), 1);

    let manager = restarted.lock().await.world_manager();
    let alpha = manager.mv_world("alpha").unwrap();
    assert_eq!(alpha.alias(), "Home");
    assert_eq!(alpha.seed(), 1);
    assert!(!manager.is_mv_world("beta"));
    assert_eq!(restarted.lock().await.unloaded_worlds(), vec!["beta"]);

    // Saving again keeps the world that was not loaded.
    assert_eq!(MultiverseCore::save_worlds(&restarted).await.unwrap(), 2);
    let stored = WorldStore::new(dir.path().join("worlds.toml")).load().unwrap();
    let names: Vec<&str> = stored.iter().map(|properties| properties.name()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(!stored[1].is_auto_load());

    let again = core_in(dir.path());
    assert_eq!(MultiverseCore::enable(&again).await.unwrap(), 1);
    assert_eq!(again.lock().await.unloaded_worlds(), vec!["beta"]);
}

#[tokio::test]
async fn worlds_that_fail_to_load_stay_stored() {
    let dir = tempfile::tempdir().unwrap();

    let core = core_in(dir.path());
    MultiverseCore::add_world(&core, WorldCreationSettings::new("alpha"))
        .await
        .unwrap();
    MultiverseCore::add_world(&core, WorldCreationSettings::new("gamma").generator(Some("Plots")))
        .await
        .unwrap();
    MultiverseCore::save_worlds(&core).await.unwrap();

    let broken = MultiverseCore::new(
        CoreConfig::default(),
        dir.path(),
        Arc::new(MemoryHost::new().with_broken_generator("Plots")),
    );
    assert_eq!(MultiverseCore::enable(&broken).await.unwrap(), 1);
    assert_eq!(broken.lock().await.unloaded_worlds(), vec!["gamma"]);
    assert_eq!(MultiverseCore::save_worlds(&broken).await.unwrap(), 2);

    let stored = WorldStore::new(dir.path().join("worlds.toml")).load().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].name(), "gamma");
    assert_eq!(stored[1].generator(), "Plots");
}

#[tokio::test]
async fn loaded_worlds_come_back_with_their_time_and_spawn() {
    let dir = tempfile::tempdir().unwrap();

    let core = core_in(dir.path());
    let alpha = MultiverseCore::add_world(&core, WorldCreationSettings::new("alpha"))
        .await
        .unwrap();
    alpha.set_property("time", "sunset").unwrap();
    alpha.set_property("spawn", "3,72,-9").unwrap();
    MultiverseCore::save_worlds(&core).await.unwrap();

    let host = Arc::new(MemoryHost::new());
    let restarted = MultiverseCore::new(CoreConfig::default(), dir.path(), host.clone());
    MultiverseCore::enable(&restarted).await.unwrap();

    let live = host.loaded_world("alpha").unwrap();
    assert_eq!(live.spawn(), multiverse_lib::FacingCoordinates::new(3.0, 72.0, -9.0, 0.0, 0.0));
    let alpha = restarted.lock().await.world_manager().mv_world("alpha").unwrap();
    assert_eq!(alpha.time(), "18:00");
}

struct Portals {
    core: Option<Shared<MultiverseCore>>,
    protocol: i32,
}

impl MultiversePlugin for Portals {
    fn core(&self) -> Option<Shared<MultiverseCore>> {
        self.core.clone()
    }

    fn set_core(&mut self, core: Shared<MultiverseCore>) {
        self.core = Some(core);
    }

    fn protocol_version(&self) -> i32 {
        self.protocol
    }
}

#[tokio::test]
async fn plugins_attach_only_with_matching_protocol() {
    let dir = tempfile::tempdir().unwrap();
    let core = core_in(dir.path());

    let mut stale = Portals {
        core: None,
        protocol: PROTOCOL_VERSION - 1,
    };
    assert!(!MultiverseCore::attach_plugin(&core, &mut stale));
    assert!(stale.core().is_none());

    let mut current = Portals {
        core: None,
        protocol: PROTOCOL_VERSION,
    };
    assert!(MultiverseCore::attach_plugin(&core, &mut current));
    assert!(Arc::ptr_eq(&current.core().unwrap(), &core));
}
