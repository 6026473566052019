use serde::{Deserialize, Serialize};

named_enum! {
    /// Travel mechanism used to key per-world portal connections.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PortalType as "portal type" {
        Nether => "nether",
        Ender => "ender" | "end",
    }
}
