use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("invalid location '{0}', expected x,y,z[,yaw,pitch]")]
    InvalidLocation(String),

    #[error("invalid time '{0}', expected a name like 'noon', HH:MM or a tick count")]
    InvalidTime(String),
}
