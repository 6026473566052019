//! String-keyed access to [`WorldProperties`].
//!
//! Every property is described once in a static table: its dotted path, a description key,
//! a getter, and, for mutable properties, a setter that parses user input. List properties
//! additionally expose the list itself for add/remove/clear.

use std::{fmt, str::FromStr};

use log::debug;
use multiverse_lib::{FacingCoordinates, PortalType, WorldTime};
use once_cell::sync::Lazy;

use super::{properties::WorldProperties, settings::parse_seed};
use crate::error::PropertyError;

/// A property read through the named-property interface.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Int(value) => write!(f, "{value}"),
            PropertyValue::Float(value) => write!(f, "{value}"),
            PropertyValue::Text(value) => f.write_str(value),
            PropertyValue::List(values) => f.write_str(&values.join(",")),
        }
    }
}

type Getter = fn(&WorldProperties) -> PropertyValue;
type Setter = fn(&mut WorldProperties, &str) -> Result<(), String>;
type ListAccess = fn(&mut WorldProperties) -> &mut Vec<String>;

pub(crate) struct PropertyField {
    path: &'static str,
    description: &'static str,
    get: Getter,
    set: Option<Setter>,
    list: Option<ListAccess>,
}

impl PropertyField {
    pub(crate) fn path(&self) -> &'static str {
        self.path
    }

    fn is_immutable(&self) -> bool {
        self.set.is_none()
    }
}

/// Paths whose values also live in the host world.
pub(crate) const TIME: &str = "time";
pub(crate) const SPAWN_LOCATION: &str = "spawnLocation";

fn fixed(path: &'static str, get: Getter) -> PropertyField {
    PropertyField {
        path,
        description: "",
        get,
        set: None,
        list: None,
    }
}

fn scalar(path: &'static str, description: &'static str, get: Getter, set: Setter) -> PropertyField {
    PropertyField {
        path,
        description,
        get,
        set: Some(set),
        list: None,
    }
}

fn list(
    path: &'static str,
    description: &'static str,
    get: Getter,
    set: Setter,
    list: ListAccess,
) -> PropertyField {
    PropertyField {
        path,
        description,
        get,
        set: Some(set),
        list: Some(list),
    }
}

fn parse<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse::<T>().map_err(|err| err.to_string())
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn text(value: &str) -> PropertyValue {
    PropertyValue::Text(value.to_string())
}

/// Expands to the scale and portal-form fields of one portal type.
macro_rules! portal_fields {
    ($portal:expr, $scale:literal, $form:literal) => {
        [
            scalar(
                $scale,
                "property.portal.scale",
                |p| PropertyValue::Float(p.connection($portal).scale),
                |p, v| {
                    p.connected_world($portal).scale = parse(v)?;
                    Ok(())
                },
            ),
            scalar(
                $form,
                "property.portal.form",
                |p| PropertyValue::Bool(p.connection($portal).portal_form),
                |p, v| {
                    p.connected_world($portal).portal_form = parse_bool(v)?;
                    Ok(())
                },
            ),
        ]
    };
}

/// Expands to the tick and limit fields of one spawn category.
macro_rules! spawn_fields {
    ($category:ident, $ticks:literal, $limit:literal) => {
        [
            scalar(
                $ticks,
                "property.spawning.ticks",
                |p| PropertyValue::Int(p.spawning().$category.ticks),
                |p, v| {
                    p.spawning_mut().$category.ticks = parse(v)?;
                    Ok(())
                },
            ),
            scalar(
                $limit,
                "property.spawning.limit",
                |p| PropertyValue::Int(p.spawning().$category.limit as i64),
                |p, v| {
                    p.spawning_mut().$category.limit = parse(v)?;
                    Ok(())
                },
            ),
        ]
    };
}

static FIELDS: Lazy<Vec<PropertyField>> = Lazy::new(|| {
    let mut fields = vec![
        fixed("name", |p| text(p.name())),
        fixed("uuid", |p| PropertyValue::Text(p.uuid().to_string())),
        fixed("type", |p| text(p.world_type().as_str())),
        scalar("alias", "property.alias", |p| text(p.alias()), |p, v| {
            p.set_alias(v);
            Ok(())
        }),
        scalar("pvp", "property.pvp", |p| PropertyValue::Bool(p.is_pvp_enabled()), |p, v| {
            p.set_pvp_enabled(parse_bool(v)?);
            Ok(())
        }),
        scalar("hidden", "property.hidden", |p| PropertyValue::Bool(p.is_hidden()), |p, v| {
            p.set_hidden(parse_bool(v)?);
            Ok(())
        }),
        scalar(
            "formatChat",
            "property.format_chat",
            |p| PropertyValue::Bool(p.is_formatting_chat()),
            |p, v| {
                p.set_formatting_chat(parse_bool(v)?);
                Ok(())
            },
        ),
        scalar(
            "allowWeather",
            "property.allow_weather",
            |p| PropertyValue::Bool(p.is_allow_weather()),
            |p, v| {
                p.set_allow_weather(parse_bool(v)?);
                Ok(())
            },
        ),
        scalar(
            "keepSpawnInMemory",
            "property.keep_spawn_in_memory",
            |p| PropertyValue::Bool(p.is_keep_spawn_in_memory()),
            |p, v| {
                p.set_keep_spawn_in_memory(parse_bool(v)?);
                Ok(())
            },
        ),
        scalar("hunger", "property.hunger", |p| PropertyValue::Bool(p.is_hunger()), |p, v| {
            p.set_hunger(parse_bool(v)?);
            Ok(())
        }),
        scalar("autoHeal", "property.auto_heal", |p| PropertyValue::Bool(p.is_auto_heal()), |p, v| {
            p.set_auto_heal(parse_bool(v)?);
            Ok(())
        }),
        scalar(
            "adjustSpawn",
            "property.adjust_spawn",
            |p| PropertyValue::Bool(p.is_adjusting_spawn()),
            |p, v| {
                p.set_adjusting_spawn(parse_bool(v)?);
                Ok(())
            },
        ),
        scalar("autoLoad", "property.auto_load", |p| PropertyValue::Bool(p.is_auto_load()), |p, v| {
            p.set_auto_load(parse_bool(v)?);
            Ok(())
        }),
        scalar(
            "bedRespawn",
            "property.bed_respawn",
            |p| PropertyValue::Bool(p.is_bed_respawn()),
            |p, v| {
                p.set_bed_respawn(parse_bool(v)?);
                Ok(())
            },
        ),
        scalar("seed", "property.seed", |p| PropertyValue::Int(p.seed()), |p, v| {
            let seed = parse_seed(v.trim()).ok_or("a seed cannot be empty")?;
            p.set_seed(seed);
            Ok(())
        }),
        scalar("generator", "property.generator", |p| text(p.generator()), |p, v| {
            p.set_generator(v.trim());
            Ok(())
        }),
        scalar(
            "environment",
            "property.environment",
            |p| text(p.environment().as_str()),
            |p, v| {
                p.set_environment(parse(v)?);
                Ok(())
            },
        ),
        scalar(TIME, "property.time", |p| text(p.time()), |p, v| {
            let time: WorldTime = parse(v)?;
            p.set_time(time.to_string());
            Ok(())
        }),
        scalar(
            "difficulty",
            "property.difficulty",
            |p| text(p.difficulty().as_str()),
            |p, v| {
                p.set_difficulty(parse(v)?);
                Ok(())
            },
        ),
        scalar("gameMode", "property.game_mode", |p| text(p.game_mode().as_str()), |p, v| {
            p.set_game_mode(parse(v)?);
            Ok(())
        }),
        scalar(
            "playerLimit",
            "property.player_limit",
            |p| PropertyValue::Int(p.player_limit() as i64),
            |p, v| {
                p.set_player_limit(parse(v)?);
                Ok(())
            },
        ),
        scalar(
            "entryFee.amount",
            "property.entry_fee.amount",
            |p| PropertyValue::Float(p.entry_fee().amount),
            |p, v| {
                p.entry_fee_mut().amount = parse(v)?;
                Ok(())
            },
        ),
        scalar(
            "entryFee.currency",
            "property.entry_fee.currency",
            |p| PropertyValue::Int(p.entry_fee().currency as i64),
            |p, v| {
                p.entry_fee_mut().currency = parse(v)?;
                Ok(())
            },
        ),
        scalar(
            "respawnWorld",
            "property.respawn_world",
            |p| text(p.respawn_world()),
            |p, v| {
                p.set_respawn_world(v.trim());
                Ok(())
            },
        ),
        list(
            "worldBlacklist",
            "property.world_blacklist",
            |p| PropertyValue::List(p.world_blacklist().to_vec()),
            |p, v| {
                *p.world_blacklist_mut() = split_list(v);
                Ok(())
            },
            WorldProperties::world_blacklist_mut,
        ),
        scalar(
            SPAWN_LOCATION,
            "property.spawn_location",
            |p| PropertyValue::Text(p.spawn_location().to_string()),
            |p, v| {
                let location: FacingCoordinates = parse(v)?;
                p.set_spawn_location(location);
                Ok(())
            },
        ),
    ];

    fields.extend(spawn_fields!(animals, "spawning.animals.ticks", "spawning.animals.limit"));
    fields.extend(spawn_fields!(monsters, "spawning.monsters.ticks", "spawning.monsters.limit"));
    fields.extend(spawn_fields!(ambient, "spawning.ambient.ticks", "spawning.ambient.limit"));
    fields.extend(spawn_fields!(water, "spawning.water.ticks", "spawning.water.limit"));
    fields.extend(portal_fields!(PortalType::Nether, "portal.nether.scale", "portal.nether.portalForm"));
    fields.extend(portal_fields!(PortalType::Ender, "portal.ender.scale", "portal.ender.portalForm"));
    fields
});

/// Short names accepted in place of full property paths.
const ALIASES: &[(&str, &str)] = &[
    ("price", "entryFee.amount"),
    ("currency", "entryFee.currency"),
    ("curr", "entryFee.currency"),
    ("weather", "allowWeather"),
    ("respawn", "respawnWorld"),
    ("limit", "playerLimit"),
    ("mode", "gameMode"),
    ("gamemode", "gameMode"),
    ("diff", "difficulty"),
    ("heal", "autoHeal"),
    ("blacklist", "worldBlacklist"),
    ("spawn", "spawnLocation"),
];

pub(crate) fn resolve(name: &str) -> Result<&'static PropertyField, PropertyError> {
    let name = name.trim();
    let path = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, path)| *path)
        .unwrap_or(name);

    FIELDS
        .iter()
        .find(|field| field.path.eq_ignore_ascii_case(path))
        .ok_or_else(|| PropertyError::NoSuchField(name.to_string()))
}

/// Paths of every property that can be changed.
pub fn all_property_names() -> Vec<&'static str> {
    FIELDS
        .iter()
        .filter(|field| !field.is_immutable())
        .map(|field| field.path)
        .collect()
}

/// The description key of a mutable property. Unknown and immutable properties have none.
pub fn property_description_key(name: &str) -> Result<&'static str, PropertyError> {
    let field = resolve(name)?;
    if field.is_immutable() {
        return Err(PropertyError::NoSuchField(name.trim().to_string()));
    }
    Ok(field.description)
}

fn list_of<'a>(
    properties: &'a mut WorldProperties,
    field: &PropertyField,
    operation: &'static str,
) -> Result<&'a mut Vec<String>, PropertyError> {
    match field.list {
        Some(access) => Ok(access(properties)),
        None => Err(PropertyError::IllegalAccess {
            property: field.path.to_string(),
            operation,
        }),
    }
}

pub(crate) fn discard<T>(name: &str, result: Result<T, PropertyError>) -> Option<T> {
    result
        .map_err(|err| debug!("Ignoring property failure for '{}': {}", name, err))
        .ok()
}

impl WorldProperties {
    pub fn get_property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        let field = resolve(name)?;
        Ok((field.get)(self))
    }

    /// Parses `value` and stores it in the named property.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let field = resolve(name)?;
        let set = field.set.ok_or_else(|| PropertyError::Veto {
            property: field.path.to_string(),
            reason: "it is immutable".to_string(),
        })?;

        set(self, value).map_err(|reason| PropertyError::IllegalArgument {
            property: field.path.to_string(),
            value: value.to_string(),
            reason,
        })
    }

    /// Appends `value` to a list property unless it is already present.
    pub fn add_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let field = resolve(name)?;
        let list = list_of(self, field, "add")?;
        let value = value.trim();
        if !list.iter().any(|entry| entry == value) {
            list.push(value.to_string());
        }
        Ok(())
    }

    pub fn remove_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let field = resolve(name)?;
        let list = list_of(self, field, "remove")?;
        let value = value.trim();
        let before = list.len();
        list.retain(|entry| entry != value);
        if list.len() == before {
            return Err(PropertyError::IllegalArgument {
                property: field.path.to_string(),
                value: value.to_string(),
                reason: "not in the list".to_string(),
            });
        }
        Ok(())
    }

    /// Empties a list property. `_value` exists for symmetry with the other list operations.
    pub fn clear_property(&mut self, name: &str, _value: Option<&str>) -> Result<(), PropertyError> {
        let field = resolve(name)?;
        list_of(self, field, "clear")?.clear();
        Ok(())
    }

    pub fn get_property_unchecked(&self, name: &str) -> Option<PropertyValue> {
        discard(name, self.get_property(name))
    }

    pub fn set_property_unchecked(&mut self, name: &str, value: &str) -> bool {
        discard(name, self.set_property(name, value)).is_some()
    }

    pub fn add_property_unchecked(&mut self, name: &str, value: &str) -> bool {
        discard(name, self.add_property(name, value)).is_some()
    }

    pub fn remove_property_unchecked(&mut self, name: &str, value: &str) -> bool {
        discard(name, self.remove_property(name, value)).is_some()
    }

    pub fn clear_property_unchecked(&mut self, name: &str, value: Option<&str>) -> bool {
        discard(name, self.clear_property(name, value)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use multiverse_lib::{Difficulty, GameMode};

    use super::*;

    fn props() -> WorldProperties {
        WorldProperties::new("alpha")
    }

    #[test]
    fn every_path_is_unique() {
        let mut paths: Vec<String> = FIELDS.iter().map(|f| f.path.to_ascii_lowercase()).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn aliases_point_at_real_fields() {
        for (alias, _) in ALIASES {
            assert!(resolve(alias).is_ok(), "alias {alias} is dangling");
        }
    }

    #[test]
    fn sets_and_reads_scalars() {
        let mut p = props();
        p.set_property("pvp", "false").unwrap();
        p.set_property("DIFFICULTY", "hard").unwrap();
        p.set_property("mode", "creative").unwrap();
        p.set_property("price", "2.5").unwrap();

        assert!(!p.is_pvp_enabled());
        assert_eq!(p.difficulty(), Difficulty::Hard);
        assert_eq!(p.game_mode(), GameMode::Creative);
        assert_eq!(p.get_property("entryFee.amount").unwrap(), PropertyValue::Float(2.5));
    }

    #[test]
    fn time_is_stored_normalized() {
        let mut p = props();
        p.set_property("time", "noon").unwrap();
        assert_eq!(p.time(), "12:00");
    }

    #[test]
    fn seed_text_is_hashed() {
        let mut p = props();
        p.set_property("seed", "12345").unwrap();
        assert_eq!(p.seed(), 12345);
        p.set_property("seed", "hello").unwrap();
        assert_eq!(p.seed(), 99_162_322);
        assert!(matches!(
            p.set_property("seed", "  "),
            Err(PropertyError::IllegalArgument { .. })
        ));
    }

    #[test]
    fn unknown_paths_are_no_such_field() {
        let mut p = props();
        assert_eq!(
            p.get_property("spawning.dragons.limit"),
            Err(PropertyError::NoSuchField("spawning.dragons.limit".to_string()))
        );
        assert!(matches!(
            p.set_property("colour", "red"),
            Err(PropertyError::NoSuchField(_))
        ));
    }

    #[test]
    fn immutable_fields_veto_writes() {
        let mut p = props();
        assert!(matches!(
            p.set_property("name", "beta"),
            Err(PropertyError::Veto { .. })
        ));
        assert_eq!(p.name(), "alpha");
        assert_eq!(p.get_property("name").unwrap(), PropertyValue::Text("alpha".into()));
    }

    #[test]
    fn bad_values_are_illegal_arguments() {
        let mut p = props();
        let err = p.set_property("playerLimit", "lots").unwrap_err();
        assert!(matches!(err, PropertyError::IllegalArgument { .. }));
        assert!(err.to_string().contains("playerLimit"));
        assert!(p.set_property("environment", "moon").is_err());
        assert!(p.set_property("spawnLocation", "1,2").is_err());
    }

    #[test]
    fn list_operations() {
        let mut p = props();
        p.add_property("blacklist", "beta").unwrap();
        p.add_property("worldBlacklist", "gamma").unwrap();
        p.add_property("worldBlacklist", "beta").unwrap();
        assert_eq!(p.world_blacklist(), ["beta", "gamma"]);

        p.remove_property("worldBlacklist", "beta").unwrap();
        assert!(p.remove_property("worldBlacklist", "beta").is_err());
        assert_eq!(p.world_blacklist(), ["gamma"]);

        p.set_property("worldBlacklist", "x, y,,z").unwrap();
        assert_eq!(
            p.get_property("worldBlacklist").unwrap(),
            PropertyValue::List(vec!["x".into(), "y".into(), "z".into()])
        );

        p.clear_property("worldBlacklist", None).unwrap();
        assert!(p.world_blacklist().is_empty());
    }

    #[test]
    fn list_operations_on_scalars_are_illegal_access() {
        let mut p = props();
        assert_eq!(
            p.add_property("pvp", "true"),
            Err(PropertyError::IllegalAccess {
                property: "pvp".to_string(),
                operation: "add"
            })
        );
        assert!(matches!(
            p.clear_property("alias", Some("x")),
            Err(PropertyError::IllegalAccess { .. })
        ));
    }

    #[test]
    fn unchecked_variants_report_booleans() {
        let mut p = props();
        assert!(p.set_property_unchecked("hunger", "no"));
        assert!(!p.is_hunger());
        assert!(!p.set_property_unchecked("hunger", "maybe"));
        assert!(!p.set_property_unchecked("nope", "1"));
        assert!(!p.add_property_unchecked("hunger", "1"));
        assert!(p.add_property_unchecked("worldBlacklist", "beta"));
        assert!(p.remove_property_unchecked("worldBlacklist", "beta"));
        assert!(!p.remove_property_unchecked("worldBlacklist", "beta"));
        assert!(p.clear_property_unchecked("worldBlacklist", None));
        assert_eq!(p.get_property_unchecked("nope"), None);
        assert_eq!(p.get_property_unchecked("hunger"), Some(PropertyValue::Bool(false)));
    }

    #[test]
    fn portal_fields_default_before_use() {
        let mut p = props();
        assert_eq!(p.get_property("portal.ender.scale").unwrap(), PropertyValue::Float(1.0));
        p.set_property("portal.nether.scale", "8").unwrap();
        p.set_property("portal.nether.portalForm", "off").unwrap();
        assert_eq!(p.connection(PortalType::Nether).scale, 8.0);
        assert!(!p.connection(PortalType::Nether).portal_form);
    }

    #[test]
    fn spawning_fields() {
        let mut p = props();
        p.set_property("spawning.monsters.limit", "70").unwrap();
        p.set_property("spawning.animals.ticks", "400").unwrap();
        assert_eq!(p.spawning().monsters.limit, 70);
        assert_eq!(p.spawning().animals.ticks, 400);
        assert_eq!(p.get_property("spawning.water.limit").unwrap(), PropertyValue::Int(-1));
    }

    #[test]
    fn names_and_descriptions() {
        let names = all_property_names();
        assert!(names.contains(&"pvp"));
        assert!(names.contains(&"entryFee.currency"));
        assert!(!names.contains(&"name"));
        assert!(!names.contains(&"uuid"));

        assert_eq!(property_description_key("pvp").unwrap(), "property.pvp");
        assert_eq!(property_description_key("curr").unwrap(), "property.entry_fee.currency");
        assert!(matches!(
            property_description_key("type"),
            Err(PropertyError::NoSuchField(_))
        ));
        assert!(property_description_key("nothing").is_err());
    }
}
