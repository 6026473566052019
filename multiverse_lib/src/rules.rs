use serde::{Deserialize, Serialize};

named_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Difficulty as "difficulty" {
        Peaceful => "peaceful" | "0",
        Easy => "easy" | "1",
        #[default]
        Normal => "normal" | "2",
        Hard => "hard" | "3",
    }
}

named_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum GameMode as "game mode" {
        #[default]
        Survival => "survival" | "0" | "s",
        Creative => "creative" | "1" | "c",
        Adventure => "adventure" | "2" | "a",
        Spectator => "spectator" | "3" | "sp",
    }
}
