use std::{collections::HashMap, fmt, fs, path::Path};

use log::{debug, warn};

/// Keys of every user-facing message the core can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    WorldAlreadyExists,
    InvalidWorldName,
    WorldCreationFailed,
    WorldLoaded,
}

impl Message {
    pub const ALL: &'static [Message] = &[
        Message::WorldAlreadyExists,
        Message::InvalidWorldName,
        Message::WorldCreationFailed,
        Message::WorldLoaded,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Message::WorldAlreadyExists => "world.already_exists",
            Message::InvalidWorldName => "world.invalid_name",
            Message::WorldCreationFailed => "world.creation_failed",
            Message::WorldLoaded => "world.loaded",
        }
    }

    /// English text; `{0}`, `{1}`, ... are replaced by the arguments.
    pub fn default_template(&self) -> &'static str {
        match self {
            Message::WorldAlreadyExists => "World '{0}' already exists!",
            Message::InvalidWorldName => "'{0}' is not a valid world name.",
            Message::WorldCreationFailed => "World '{0}' could not be created: {1}",
            Message::WorldLoaded => "World '{0}' loaded.",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A locale's message templates, falling back to the built-in English ones.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    locale: String,
    overrides: HashMap<String, String>,
}

impl Messages {
    /// Reads `<dir>/<locale>.toml`, a flat table of `key = "template"` pairs.
    /// A missing or unreadable file leaves the English defaults in place.
    pub fn load(dir: &Path, locale: &str) -> Messages {
        let path = dir.join(format!("{locale}.toml"));
        let overrides = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<HashMap<String, String>>(&text) {
                Ok(table) => table,
                Err(err) => {
                    warn!("Ignoring malformed message file {}: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(_) => {
                debug!("No message file at {}, using defaults", path.display());
                HashMap::new()
            }
        };

        Messages {
            locale: locale.to_string(),
            overrides,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn template(&self, message: Message) -> &str {
        self.overrides
            .get(message.key())
            .map(String::as_str)
            .unwrap_or_else(|| message.default_template())
    }

    pub fn render(&self, message: Message, args: &[&str]) -> String {
        fill(self.template(message), args)
    }
}

fn fill(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (i, arg)| {
            text.replace(&format!("{{{i}}}"), arg)
        })
}
