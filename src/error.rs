//! Error types.

use thiserror::Error;

use crate::ast::{GeoKind, GeoOp};

/// Errors raised while building or compiling spatial expressions, or while
/// loading a dialect profile.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The operation exists on the type but this library does not build it.
    #[error("{op} is not implemented for {kind} expressions")]
    NotImplemented { kind: GeoKind, op: GeoOp },

    /// The dialect declined and no portable formula fits the operands.
    #[error("dialect '{dialect}' has no lowering for {kind}.{op} and the operands cannot be emulated")]
    NoEmulation {
        kind: GeoKind,
        op: GeoOp,
        dialect: String,
    },

    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),

    /// Profile key that does not name a `<kind>.<operation>` pair.
    #[error("unknown spatial operation '{0}'")]
    UnknownOperation(String),

    #[error("invalid dialect profile: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeoResult<T> = Result<T, GeoError>;
