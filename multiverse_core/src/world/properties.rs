use std::collections::BTreeMap;

use multiverse_lib::{
    Difficulty, FacingCoordinates, GameMode, PortalType, WorldEnvironment, WorldType,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings::WorldCreationSettings;

/// Price charged for entering a world. `currency` -1 is the economy plugin's money,
/// anything else is an item id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFee {
    pub amount: f64,
    pub currency: i32,
}

impl Default for EntryFee {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency: -1,
        }
    }
}

/// Spawn rate for one creature category; -1 leaves the host's value alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub ticks: i64,
    pub limit: i32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            ticks: -1,
            limit: -1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spawning {
    pub animals: SpawnSettings,
    pub monsters: SpawnSettings,
    pub ambient: SpawnSettings,
    pub water: SpawnSettings,
}

/// How a world is joined to another through one kind of portal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectedWorld {
    pub scale: f64,
    pub portal_form: bool,
}

impl Default for ConnectedWorld {
    fn default() -> Self {
        Self {
            scale: 1.0,
            portal_form: true,
        }
    }
}

/// Everything configurable about one world. Lives independently of the host world it
/// describes, so it can be stored while the world is unloaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldProperties {
    name: String,
    uuid: Uuid,
    alias: String,

    pvp: bool,
    hidden: bool,
    format_chat: bool,
    allow_weather: bool,
    keep_spawn_in_memory: bool,
    hunger: bool,
    auto_heal: bool,
    adjust_spawn: bool,
    auto_load: bool,
    bed_respawn: bool,

    #[serde(rename = "type")]
    world_type: WorldType,
    seed: i64,
    generator: String,
    environment: WorldEnvironment,
    time: String,
    difficulty: Difficulty,
    game_mode: GameMode,
    player_limit: i32,

    entry_fee: EntryFee,
    respawn_world: String,
    world_blacklist: Vec<String>,
    spawning: Spawning,
    spawn_location: FacingCoordinates,
    /// Keyed by the portal type's name so the table stays plain in TOML.
    connected_worlds: BTreeMap<String, ConnectedWorld>,
}

impl Default for WorldProperties {
    fn default() -> Self {
        WorldProperties::new("")
    }
}

impl WorldProperties {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: Uuid::nil(),
            alias: String::new(),
            pvp: true,
            hidden: false,
            format_chat: true,
            allow_weather: true,
            keep_spawn_in_memory: true,
            hunger: true,
            auto_heal: true,
            adjust_spawn: true,
            auto_load: true,
            bed_respawn: true,
            world_type: WorldType::default(),
            seed: 0,
            generator: String::new(),
            environment: WorldEnvironment::default(),
            time: String::new(),
            difficulty: Difficulty::default(),
            game_mode: GameMode::default(),
            player_limit: -1,
            entry_fee: EntryFee::default(),
            respawn_world: String::new(),
            world_blacklist: Vec::new(),
            spawning: Spawning::default(),
            spawn_location: FacingCoordinates::NULL,
            connected_worlds: BTreeMap::new(),
        }
    }

    /// Properties for a freshly provisioned world.
    pub fn from_settings(settings: &WorldCreationSettings, uuid: Uuid, seed: i64) -> Self {
        let mut properties = WorldProperties::new(settings.name());
        properties.uuid = uuid;
        properties.seed = settings.seed.unwrap_or(seed);
        properties.environment = settings.environment;
        properties.world_type = settings.world_type.unwrap_or_default();
        properties.generator = settings.generator.clone().unwrap_or_default();
        properties.adjust_spawn = settings.adjust_spawn;
        properties
    }

    /// The settings that recreate this world on the host.
    pub fn creation_settings(&self) -> WorldCreationSettings {
        WorldCreationSettings::new(self.name.clone())
            .environment(self.environment)
            .seed(self.seed)
            .world_type(Some(self.world_type))
            .generator(Some(&self.generator))
            .adjust_spawn(self.adjust_spawn)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Sets the UUID unless one was already assigned. Returns whether it was set.
    pub fn assign_uuid(&mut self, uuid: Uuid) -> bool {
        if !self.uuid.is_nil() {
            return false;
        }
        self.uuid = uuid;
        true
    }

    /// The stored alias, possibly empty.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
    }

    pub fn is_pvp_enabled(&self) -> bool {
        self.pvp
    }

    pub fn set_pvp_enabled(&mut self, pvp: bool) {
        self.pvp = pvp;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_formatting_chat(&self) -> bool {
        self.format_chat
    }

    pub fn set_formatting_chat(&mut self, format_chat: bool) {
        self.format_chat = format_chat;
    }

    pub fn is_allow_weather(&self) -> bool {
        self.allow_weather
    }

    pub fn set_allow_weather(&mut self, allow_weather: bool) {
        self.allow_weather = allow_weather;
    }

    pub fn is_keep_spawn_in_memory(&self) -> bool {
        self.keep_spawn_in_memory
    }

    pub fn set_keep_spawn_in_memory(&mut self, keep: bool) {
        self.keep_spawn_in_memory = keep;
    }

    pub fn is_hunger(&self) -> bool {
        self.hunger
    }

    pub fn set_hunger(&mut self, hunger: bool) {
        self.hunger = hunger;
    }

    pub fn is_auto_heal(&self) -> bool {
        self.auto_heal
    }

    pub fn set_auto_heal(&mut self, auto_heal: bool) {
        self.auto_heal = auto_heal;
    }

    pub fn is_adjusting_spawn(&self) -> bool {
        self.adjust_spawn
    }

    pub fn set_adjusting_spawn(&mut self, adjust_spawn: bool) {
        self.adjust_spawn = adjust_spawn;
    }

    pub fn is_auto_load(&self) -> bool {
        self.auto_load
    }

    pub fn set_auto_load(&mut self, auto_load: bool) {
        self.auto_load = auto_load;
    }

    pub fn is_bed_respawn(&self) -> bool {
        self.bed_respawn
    }

    pub fn set_bed_respawn(&mut self, bed_respawn: bool) {
        self.bed_respawn = bed_respawn;
    }

    pub fn world_type(&self) -> WorldType {
        self.world_type
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn set_generator(&mut self, generator: impl Into<String>) {
        self.generator = generator.into();
    }

    pub fn environment(&self) -> WorldEnvironment {
        self.environment
    }

    pub fn set_environment(&mut self, environment: WorldEnvironment) {
        self.environment = environment;
    }

    /// Last time of day requested for this world, as `HH:MM`, or empty if never set.
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    pub fn set_game_mode(&mut self, game_mode: GameMode) {
        self.game_mode = game_mode;
    }

    /// -1 means unlimited, 0 keeps everyone out.
    pub fn player_limit(&self) -> i32 {
        self.player_limit
    }

    pub fn set_player_limit(&mut self, limit: i32) {
        self.player_limit = limit.max(-1);
    }

    pub fn entry_fee(&self) -> &EntryFee {
        &self.entry_fee
    }

    pub fn entry_fee_mut(&mut self) -> &mut EntryFee {
        &mut self.entry_fee
    }

    pub fn respawn_world(&self) -> &str {
        &self.respawn_world
    }

    pub fn set_respawn_world(&mut self, world: impl Into<String>) {
        self.respawn_world = world.into();
    }

    pub fn world_blacklist(&self) -> &[String] {
        &self.world_blacklist
    }

    pub(crate) fn world_blacklist_mut(&mut self) -> &mut Vec<String> {
        &mut self.world_blacklist
    }

    pub fn spawning(&self) -> &Spawning {
        &self.spawning
    }

    pub fn spawning_mut(&mut self) -> &mut Spawning {
        &mut self.spawning
    }

    pub fn spawn_location(&self) -> FacingCoordinates {
        self.spawn_location
    }

    pub fn set_spawn_location(&mut self, location: FacingCoordinates) {
        self.spawn_location = location;
    }

    /// The connection for `portal_type`, created with defaults on first use.
    pub fn connected_world(&mut self, portal_type: PortalType) -> &mut ConnectedWorld {
        self.connected_worlds
            .entry(portal_type.as_str().to_string())
            .or_default()
    }

    /// Read-only form of [`Self::connected_world`]; an untouched portal type reads as the default.
    pub fn connection(&self, portal_type: PortalType) -> ConnectedWorld {
        self.connected_worlds
            .get(portal_type.as_str())
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_is_assigned_once() {
        let mut properties = WorldProperties::new("alpha");
        let first = Uuid::new_v4();
        assert!(properties.assign_uuid(first));
        assert!(!properties.assign_uuid(Uuid::new_v4()));
        assert_eq!(properties.uuid(), first);
    }

    #[test]
    fn negative_limits_collapse_to_unlimited() {
        let mut properties = WorldProperties::new("alpha");
        properties.set_player_limit(-30);
        assert_eq!(properties.player_limit(), -1);
        properties.set_player_limit(0);
        assert_eq!(properties.player_limit(), 0);
    }

    #[test]
    fn entry_fee_reads_as_a_pair() {
        let mut properties = WorldProperties::new("alpha");
        let fee = properties.entry_fee_mut();
        fee.amount = 10.0;
        fee.currency = 5;
        assert_eq!(
            *properties.entry_fee(),
            EntryFee {
                amount: 10.0,
                currency: 5
            }
        );
    }

    #[test]
    fn connections_grow_on_mutable_access_only() {
        let mut properties = WorldProperties::new("alpha");
        assert_eq!(properties.connection(PortalType::Ender), ConnectedWorld::default());
        assert!(properties.connected_worlds.is_empty());

        properties.connected_world(PortalType::Nether).scale = 8.0;
        assert_eq!(properties.connection(PortalType::Nether).scale, 8.0);
        assert_eq!(properties.connected_worlds.len(), 1);
    }

    #[test]
    fn settings_round_trip() {
        let settings = WorldCreationSettings::new("alpha")
            .environment(WorldEnvironment::Nether)
            .seed(99)
            .world_type(Some(WorldType::Flat))
            .generator(Some("Plots"))
            .adjust_spawn(false);
        let properties = WorldProperties::from_settings(&settings, Uuid::new_v4(), 1);

        assert_eq!(properties.seed(), 99);
        assert_eq!(properties.environment(), WorldEnvironment::Nether);
        assert!(!properties.is_adjusting_spawn());

        let again = properties.creation_settings();
        assert_eq!(again.name(), "alpha");
        assert_eq!(again.seed, Some(99));
        assert_eq!(again.world_type, Some(WorldType::Flat));
        assert_eq!(again.generator.as_deref(), Some("Plots"));
    }

    #[test]
    fn host_seed_used_when_settings_have_none() {
        let settings = WorldCreationSettings::new("alpha");
        let properties = WorldProperties::from_settings(&settings, Uuid::nil(), -77);
        assert_eq!(properties.seed(), -77);
        assert_eq!(properties.world_type(), WorldType::Normal);
        assert_eq!(properties.generator(), "");
    }

    #[test]
    fn survives_toml() {
        let mut properties = WorldProperties::new("alpha");
        properties.connected_world(PortalType::Nether).portal_form = false;
        properties.world_blacklist_mut().push("beta".to_string());
        properties.set_spawn_location(FacingCoordinates::new(1.5, 70.0, -2.0, 90.0, 0.0));

        let text = toml::to_string(&properties).unwrap();
        let back: WorldProperties = toml::from_str(&text).unwrap();
        assert_eq!(back, properties);
    }
}
