use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;

use crate::messages::{Message, Messages};

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A world could not be added: the name is taken or invalid, or the host failed to provide it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct WorldCreationError {
    key: Message,
    world: String,
    reason: Option<String>,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl WorldCreationError {
    pub fn new(key: Message, world: impl Into<String>) -> Self {
        let mut err = Self {
            key,
            world: world.into(),
            reason: None,
            message: String::new(),
            source: None,
        };
        err.message = err.render(&Messages::default());
        err
    }

    /// A host-side failure for `world`, described by `reason`.
    pub fn failed(world: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(Message::WorldCreationFailed, world).with_reason(reason)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self.message = self.render(&Messages::default());
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        if self.reason.is_none() {
            self = self.with_reason(source.to_string());
        }
        self.source = Some(source);
        self
    }

    /// Re-renders the message in the given locale.
    pub fn localize(mut self, messages: &Messages) -> Self {
        self.message = self.render(messages);
        self
    }

    pub fn key(&self) -> Message {
        self.key
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn render(&self, messages: &Messages) -> String {
        let reason = self.reason.as_deref().unwrap_or("unknown error");
        messages.render(self.key, &[&self.world, reason])
    }
}

/// Failures of the named-property interface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("no such property '{0}'")]
    NoSuchField(String),

    #[error("property '{property}' cannot be changed: {reason}")]
    Veto { property: String, reason: String },

    #[error("invalid value '{value}' for property '{property}': {reason}")]
    IllegalArgument {
        property: String,
        value: String,
        reason: String,
    },

    #[error("property '{property}' does not support {operation}")]
    IllegalAccess {
        property: String,
        operation: &'static str,
    },
}

/// Returned by features that are part of the world API but not provided by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not supported")]
pub struct UnsupportedFeature(pub &'static str);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("loading stored worlds was interrupted: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_error_carries_key_and_world() {
        let err = WorldCreationError::new(Message::WorldAlreadyExists, "alpha");
        assert_eq!(err.key(), Message::WorldAlreadyExists);
        assert_eq!(err.world(), "alpha");
        assert_eq!(err.to_string(), "World 'alpha' already exists!");
    }

    #[test]
    fn source_supplies_the_reason() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "region files are read-only");
        let err = WorldCreationError::new(Message::WorldCreationFailed, "beta").with_source(io);
        assert_eq!(
            err.to_string(),
            "World 'beta' could not be created: region files are read-only"
        );
        assert!(StdError::source(&err).is_some());
    }
}
