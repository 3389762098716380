//! Error taxonomy shared by dice, games, analyzers and configuration.
use thiserror::Error;

/// Broad category of a [`DiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input to a constructor or operation.
    InvalidArgument,
    /// A referenced face does not exist on the die.
    Lookup,
    /// A roll-history source does not honour the history contract.
    Type,
    /// Configuration could not be parsed.
    Config,
}

/// Errors raised by dice, games and analyzers.
///
/// Faces are carried in their `Debug` rendering so the error type stays
/// independent of the face type.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("a die needs at least one face")]
    EmptyFaces,
    #[error("face {face} appears more than once")]
    DuplicateFace { face: String },
    #[error("face {face} does not exist on this die")]
    UnknownFace { face: String },
    #[error("weight for face {face} must be a positive finite number (got {weight})")]
    InvalidWeight { face: String, weight: f64 },
    #[error("a game needs at least one die")]
    NoDice,
    #[error("number of rolls must be a positive integer (got {requested})")]
    NonPositiveRolls { requested: usize },
    #[error("unknown result form {form:?}; expected \"wide\" or \"narrow\"")]
    UnknownForm { form: String },
    #[error("die copies must be at least 1")]
    ZeroCopies,
    #[error("roll history is malformed: {reason}")]
    MalformedHistory { reason: String },
    #[error("invalid game configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl DiceError {
    /// Category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyFaces
            | Self::DuplicateFace { .. }
            | Self::InvalidWeight { .. }
            | Self::NoDice
            | Self::NonPositiveRolls { .. }
            | Self::UnknownForm { .. }
            | Self::ZeroCopies => ErrorKind::InvalidArgument,
            Self::UnknownFace { .. } => ErrorKind::Lookup,
            Self::MalformedHistory { .. } => ErrorKind::Type,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedHistory {
            reason: reason.into(),
        }
    }
}
