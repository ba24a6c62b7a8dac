//! Error types for the duel engine.
//!
//! Nothing here is fatal. A rejected shot leaves the session untouched and the
//! caller is free to ignore it; a tuning error stops a session from being built
//! with values that would break the flight or damage rules.

use std::fmt;

use crate::sim::GamePhase;

/// Why a shot was not accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotRejected {
    /// The game has ended; nobody is allowed to fire.
    GameOver,
    /// A shot is already in flight or being resolved for this turn.
    NotAwaitingInput {
        /// Phase the session was in when the shot arrived.
        phase: GamePhase,
    },
    /// Angle or power was NaN or infinite.
    NonFiniteInput,
}

impl fmt::Display for ShotRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotRejected::GameOver => write!(f, "shot rejected: the game is over"),
            ShotRejected::NotAwaitingInput { phase } => {
                write!(f, "shot rejected: session is in {:?}, not awaiting input", phase)
            }
            ShotRejected::NonFiniteInput => {
                write!(f, "shot rejected: angle and power must be finite numbers")
            }
        }
    }
}

impl std::error::Error for ShotRejected {}

/// Invalid tuning values.
#[derive(Debug)]
pub enum TuningError {
    /// A numeric value is outside its allowed range.
    OutOfRange {
        /// Field name (for logging).
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human-readable description of the allowed range.
        expected: &'static str,
    },
    /// The tuning JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::OutOfRange {
                name,
                value,
                expected,
            } => write!(f, "tuning '{}' = {} is outside {}", name, value, expected),
            TuningError::Parse(err) => write!(f, "tuning JSON is invalid: {}", err),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Convenience alias for shot submission.
pub type ShotResult<T> = Result<T, ShotRejected>;

/// Convenience alias for tuning validation.
pub type TuningResult<T> = Result<T, TuningError>;
