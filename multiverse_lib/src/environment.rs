use serde::{Deserialize, Serialize};

named_enum! {
    /// The dimension a world is generated as.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum WorldEnvironment as "environment" {
        #[default]
        Normal => "normal" | "overworld",
        Nether => "nether" | "the_nether" | "hell",
        TheEnd => "the_end" | "end" | "theend",
    }
}

impl WorldEnvironment {
    /// Returns the namespaced dimension type key the host registers this environment under.
    pub fn dimension_key(&self) -> &'static str {
        match self {
            WorldEnvironment::Normal => "minecraft:overworld",
            WorldEnvironment::Nether => "minecraft:the_nether",
            WorldEnvironment::TheEnd => "minecraft:the_end",
        }
    }
}

named_enum! {
    /// Terrain generation preset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum WorldType as "world type" {
        #[default]
        Normal => "normal" | "default",
        Flat => "flat" | "superflat",
        LargeBiomes => "large_biomes" | "largebiomes",
        Amplified => "amplified",
    }
}
