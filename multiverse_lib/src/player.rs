use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The host's view of a connected player, as much of it as the core needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePlayer {
    pub name: String,
    pub uuid: Uuid,
}

impl BasePlayer {
    pub fn new(name: impl Into<String>, uuid: Uuid) -> Self {
        Self {
            name: name.into(),
            uuid,
        }
    }
}
