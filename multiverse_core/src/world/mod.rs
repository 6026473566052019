pub mod fields;
pub mod link;
pub mod manager;
pub mod memory;
pub mod properties;
pub mod settings;
pub mod store;

use std::{
    collections::BTreeMap,
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use multiverse_lib::{
    BasePlayer, Difficulty, FacingCoordinates, GameMode, PortalType, WorldEnvironment,
    WorldTime, WorldType,
};
use uuid::Uuid;

use crate::error::{PropertyError, UnsupportedFeature};
use fields::PropertyValue;
use link::{HostWorld, WorldLink};
use properties::WorldProperties;

pub use manager::{WorldManager, WorldProvisioner};
pub use settings::WorldCreationSettings;

/// Per-creature exception to a world's spawn rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnException {
    pub creature_type: String,
    pub allowed: bool,
}

/// A world managed by the core: its properties plus the host world they apply to.
///
/// Two values with the same name are the same world, whatever their properties say.
pub struct MultiverseWorld {
    name: String,
    properties: RwLock<WorldProperties>,
    link: WorldLink,
}

impl PartialEq for MultiverseWorld {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MultiverseWorld {}

impl Hash for MultiverseWorld {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Debug for MultiverseWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiverseWorld")
            .field("name", &self.name)
            .field("properties", &*self.properties())
            .finish_non_exhaustive()
    }
}

impl MultiverseWorld {
    pub fn new(properties: WorldProperties, host: Arc<dyn HostWorld>) -> Self {
        Self {
            name: properties.name().to_string(),
            properties: RwLock::new(properties),
            link: WorldLink::new(host),
        }
    }

    /// Wraps a host world that was just created from `settings`.
    pub fn from_host(settings: &WorldCreationSettings, host: Arc<dyn HostWorld>) -> Self {
        let properties = WorldProperties::from_settings(settings, host.uid(), host.seed());
        Self::new(properties, host)
    }

    pub(crate) fn properties(&self) -> RwLockReadGuard<'_, WorldProperties> {
        self.properties.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn properties_mut(&self) -> RwLockWriteGuard<'_, WorldProperties> {
        self.properties.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current property bag, e.g. for saving.
    pub fn snapshot(&self) -> WorldProperties {
        self.properties().clone()
    }

    /// Replaces the property bag with a stored one and applies its time and spawn to the
    /// host. The name never changes, and a stored bag without a UUID keeps the current one.
    pub(crate) fn restore(&self, mut stored: WorldProperties) {
        {
            let mut properties = self.properties_mut();
            stored.set_name(&self.name);
            stored.assign_uuid(properties.uuid());
            *properties = stored;
        }
        self.push_to_host(fields::TIME);
        self.push_to_host(fields::SPAWN_LOCATION);
    }

    /// Applies the stored value of a host-backed property to the host world. Unset times and
    /// null spawns are left alone.
    fn push_to_host(&self, path: &str) {
        match path {
            fields::TIME => {
                let time = self.properties().time().parse::<WorldTime>();
                if let Ok(time) = time {
                    self.link.set_time(time);
                }
            }
            fields::SPAWN_LOCATION => {
                let location = self.properties().spawn_location();
                if !location.is_null() {
                    self.link.set_spawn(location);
                }
            }
            _ => {}
        }
    }

    pub fn link(&self) -> &WorldLink {
        &self.link
    }

    /// Rebinds this world to another host world without touching its properties.
    pub fn link_to_world(&self, host: Arc<dyn HostWorld>) {
        self.link.link_to_world(host);
    }

    /// The permanent name. Players usually want [`Self::alias`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world_uid(&self) -> Uuid {
        self.properties().uuid()
    }

    pub fn world_type(&self) -> WorldType {
        self.properties().world_type()
    }

    /// The host's current time of day.
    pub fn time(&self) -> String {
        self.link.time().to_string()
    }

    /// Accepts anything [`WorldTime`] parses and moves the host's clock there.
    pub fn set_time(&self, time: &str) -> Result<(), PropertyError> {
        let parsed: WorldTime = time.parse().map_err(|err: multiverse_lib::ParseError| {
            PropertyError::IllegalArgument {
                property: "time".to_string(),
                value: time.to_string(),
                reason: err.to_string(),
            }
        })?;
        self.properties_mut().set_time(parsed.to_string());
        self.link.set_time(parsed);
        Ok(())
    }

    pub fn players(&self) -> Vec<BasePlayer> {
        self.link.players()
    }

    pub fn environment(&self) -> WorldEnvironment {
        self.properties().environment()
    }

    pub fn set_environment(&self, environment: WorldEnvironment) {
        self.properties_mut().set_environment(environment);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.properties().difficulty()
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) {
        self.properties_mut().set_difficulty(difficulty);
    }

    pub fn seed(&self) -> i64 {
        self.properties().seed()
    }

    pub fn set_seed(&self, seed: i64) {
        self.properties_mut().set_seed(seed);
    }

    pub fn generator(&self) -> String {
        self.properties().generator().to_string()
    }

    pub fn set_generator(&self, generator: Option<&str>) {
        self.properties_mut().set_generator(generator.unwrap_or_default());
    }

    /// The display name, falling back to the world name when no alias is set.
    pub fn alias(&self) -> String {
        let properties = self.properties();
        match properties.alias() {
            "" => self.name.clone(),
            alias => alias.to_string(),
        }
    }

    pub fn set_alias(&self, alias: Option<&str>) {
        self.properties_mut().set_alias(alias.unwrap_or_default());
    }

    pub fn is_pvp_enabled(&self) -> bool {
        self.properties().is_pvp_enabled()
    }

    pub fn set_pvp(&self, pvp: bool) {
        self.properties_mut().set_pvp_enabled(pvp);
    }

    pub fn is_hidden(&self) -> bool {
        self.properties().is_hidden()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.properties_mut().set_hidden(hidden);
    }

    pub fn is_format_chat_enabled(&self) -> bool {
        self.properties().is_formatting_chat()
    }

    pub fn set_format_chat(&self, format_chat: bool) {
        self.properties_mut().set_formatting_chat(format_chat);
    }

    pub fn is_weather_enabled(&self) -> bool {
        self.properties().is_allow_weather()
    }

    pub fn set_enable_weather(&self, enable_weather: bool) {
        self.properties_mut().set_allow_weather(enable_weather);
    }

    pub fn is_keep_spawn_in_memory_enabled(&self) -> bool {
        self.properties().is_keep_spawn_in_memory()
    }

    pub fn set_keep_spawn_in_memory(&self, keep: bool) {
        self.properties_mut().set_keep_spawn_in_memory(keep);
    }

    pub fn spawn_location(&self) -> FacingCoordinates {
        self.properties().spawn_location()
    }

    /// `None` clears the spawn to [`FacingCoordinates::NULL`]; only real locations reach the host.
    pub fn set_spawn_location(&self, location: Option<FacingCoordinates>) {
        let location = location.unwrap_or(FacingCoordinates::NULL);
        self.properties_mut().set_spawn_location(location);
        if !location.is_null() {
            self.link.set_spawn(location);
        }
    }

    pub fn is_hunger_enabled(&self) -> bool {
        self.properties().is_hunger()
    }

    pub fn set_hunger(&self, hunger: bool) {
        self.properties_mut().set_hunger(hunger);
    }

    pub fn game_mode(&self) -> GameMode {
        self.properties().game_mode()
    }

    pub fn set_game_mode(&self, game_mode: GameMode) {
        self.properties_mut().set_game_mode(game_mode);
    }

    pub fn price(&self) -> f64 {
        self.properties().entry_fee().amount
    }

    pub fn set_price(&self, price: f64) {
        self.properties_mut().entry_fee_mut().amount = price;
    }

    pub fn currency(&self) -> i32 {
        self.properties().entry_fee().currency
    }

    pub fn set_currency(&self, currency: i32) {
        self.properties_mut().entry_fee_mut().currency = currency;
    }

    pub fn respawn_to_world(&self) -> String {
        self.properties().respawn_world().to_string()
    }

    pub fn set_respawn_to_world(&self, world: Option<&str>) {
        self.properties_mut().set_respawn_world(world.unwrap_or_default());
    }

    pub fn is_auto_heal_enabled(&self) -> bool {
        self.properties().is_auto_heal()
    }

    pub fn set_auto_heal(&self, heal: bool) {
        self.properties_mut().set_auto_heal(heal);
    }

    pub fn is_adjust_spawn_enabled(&self) -> bool {
        self.properties().is_adjusting_spawn()
    }

    pub fn set_adjust_spawn(&self, adjust: bool) {
        self.properties_mut().set_adjusting_spawn(adjust);
    }

    pub fn is_auto_load_enabled(&self) -> bool {
        self.properties().is_auto_load()
    }

    pub fn set_auto_load(&self, auto_load: bool) {
        self.properties_mut().set_auto_load(auto_load);
    }

    pub fn is_bed_respawn_enabled(&self) -> bool {
        self.properties().is_bed_respawn()
    }

    pub fn set_bed_respawn(&self, bed_respawn: bool) {
        self.properties_mut().set_bed_respawn(bed_respawn);
    }

    pub fn player_limit(&self) -> i32 {
        self.properties().player_limit()
    }

    pub fn set_player_limit(&self, limit: i32) {
        self.properties_mut().set_player_limit(limit);
    }

    pub fn world_blacklist(&self) -> Vec<String> {
        self.properties().world_blacklist().to_vec()
    }

    pub fn ticks_per_animal_spawn(&self) -> i64 {
        self.properties().spawning().animals.ticks
    }

    pub fn set_ticks_per_animal_spawn(&self, ticks: i64) {
        self.properties_mut().spawning_mut().animals.ticks = ticks;
    }

    pub fn ticks_per_monster_spawn(&self) -> i64 {
        self.properties().spawning().monsters.ticks
    }

    pub fn set_ticks_per_monster_spawn(&self, ticks: i64) {
        self.properties_mut().spawning_mut().monsters.ticks = ticks;
    }

    pub fn animal_spawn_limit(&self) -> i32 {
        self.properties().spawning().animals.limit
    }

    pub fn set_animal_spawn_limit(&self, limit: i32) {
        self.properties_mut().spawning_mut().animals.limit = limit;
    }

    pub fn monster_spawn_limit(&self) -> i32 {
        self.properties().spawning().monsters.limit
    }

    pub fn set_monster_spawn_limit(&self, limit: i32) {
        self.properties_mut().spawning_mut().monsters.limit = limit;
    }

    pub fn ambient_spawn_limit(&self) -> i32 {
        self.properties().spawning().ambient.limit
    }

    pub fn set_ambient_spawn_limit(&self, limit: i32) {
        self.properties_mut().spawning_mut().ambient.limit = limit;
    }

    pub fn water_animal_spawn_limit(&self) -> i32 {
        self.properties().spawning().water.limit
    }

    pub fn set_water_animal_spawn_limit(&self, limit: i32) {
        self.properties_mut().spawning_mut().water.limit = limit;
    }

    pub fn is_preventing_spawns_list(&self) -> Result<bool, UnsupportedFeature> {
        Err(UnsupportedFeature("spawn prevention lists"))
    }

    pub fn set_preventing_spawns_list(&self, _prevent: bool) -> Result<(), UnsupportedFeature> {
        Err(UnsupportedFeature("spawn prevention lists"))
    }

    pub fn spawn_exceptions(&self) -> Result<BTreeMap<String, SpawnException>, UnsupportedFeature> {
        Err(UnsupportedFeature("spawn exceptions"))
    }

    pub fn add_or_update_spawn_exception(
        &self,
        _exception: SpawnException,
    ) -> Result<(), UnsupportedFeature> {
        Err(UnsupportedFeature("spawn exceptions"))
    }

    pub fn remove_spawn_exception(&self, _creature_type: &str) -> Result<(), UnsupportedFeature> {
        Err(UnsupportedFeature("spawn exceptions"))
    }

    pub fn scale(&self, portal_type: PortalType) -> f64 {
        self.properties_mut().connected_world(portal_type).scale
    }

    pub fn set_scale(&self, portal_type: PortalType, scale: f64) {
        self.properties_mut().connected_world(portal_type).scale = scale;
    }

    pub fn portal_form(&self, portal_type: PortalType) -> bool {
        self.properties_mut().connected_world(portal_type).portal_form
    }

    pub fn set_portal_form(&self, portal_type: PortalType, portal_form: bool) {
        self.properties_mut().connected_world(portal_type).portal_form = portal_form;
    }

    /// Reads a property by path or alias. `time` is read from the host clock, like [`Self::time`].
    pub fn get_property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        if fields::resolve(name)?.path() == fields::TIME {
            return Ok(PropertyValue::Text(self.time()));
        }
        self.properties().get_property(name)
    }

    /// Writes a property by path or alias. `time` and `spawnLocation` also reach the host.
    pub fn set_property(&self, name: &str, value: &str) -> Result<(), PropertyError> {
        let path = fields::resolve(name)?.path();
        self.properties_mut().set_property(name, value)?;
        self.push_to_host(path);
        Ok(())
    }

    pub fn add_property(&self, name: &str, value: &str) -> Result<(), PropertyError> {
        self.properties_mut().add_property(name, value)
    }

    pub fn remove_property(&self, name: &str, value: &str) -> Result<(), PropertyError> {
        self.properties_mut().remove_property(name, value)
    }

    pub fn clear_property(&self, name: &str, value: Option<&str>) -> Result<(), PropertyError> {
        self.properties_mut().clear_property(name, value)
    }

    pub fn get_property_unchecked(&self, name: &str) -> Option<PropertyValue> {
        fields::discard(name, self.get_property(name))
    }

    pub fn set_property_unchecked(&self, name: &str, value: &str) -> bool {
        fields::discard(name, self.set_property(name, value)).is_some()
    }

    pub fn add_property_unchecked(&self, name: &str, value: &str) -> bool {
        self.properties_mut().add_property_unchecked(name, value)
    }

    pub fn remove_property_unchecked(&self, name: &str, value: &str) -> bool {
        self.properties_mut().remove_property_unchecked(name, value)
    }

    pub fn clear_property_unchecked(&self, name: &str, value: Option<&str>) -> bool {
        self.properties_mut().clear_property_unchecked(name, value)
    }

    /// Paths accepted by the named-property methods that can be changed.
    pub fn all_property_names() -> Vec<&'static str> {
        fields::all_property_names()
    }

    pub fn property_description_key(name: &str) -> Result<&'static str, PropertyError> {
        fields::property_description_key(name)
    }
}
