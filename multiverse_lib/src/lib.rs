//! Minecraft-side value types shared between the multiverse core and the host server.

/// Declares a plain enum with a stable lowercase name per variant, extra accepted
/// spellings, and the matching `Display`/`FromStr` implementations.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $display:literal $(| $alias:literal)* ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $display),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($display) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )*
                Err($crate::error::ParseError::UnknownVariant {
                    kind: $kind,
                    value: value.to_string(),
                })
            }
        }
    };
}

pub mod environment;
pub mod error;
pub mod location;
pub mod player;
pub mod portal;
pub mod rules;
pub mod time;

pub use environment::{WorldEnvironment, WorldType};
pub use error::ParseError;
pub use location::FacingCoordinates;
pub use player::BasePlayer;
pub use portal::PortalType;
pub use rules::{Difficulty, GameMode};
pub use time::WorldTime;
