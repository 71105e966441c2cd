//! Error types for the energy intake engine.

use uuid::Uuid;

use crate::intake::field::Field;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Internal invariant violations.
///
/// These are never caused by user input: field validation rejects anything
/// that could produce them. Reaching one means the engine itself is broken,
/// so they propagate to the transport as hard errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantError {
    #[error("No price configured for income stratum {0}")]
    UnknownStratum(u8),

    #[error("Appliance hours has {got} entries but the catalog has {expected}")]
    HoursCountMismatch { expected: usize, got: usize },

    #[error("Field {0} is required to compute the summary but is missing")]
    MissingField(Field),
}

/// Session registry errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Session {id} failed: {source}")]
    Failed {
        id: Uuid,
        #[source]
        source: InvariantError,
    },
}

/// A user answer that does not satisfy the pending field's rule.
///
/// The `Display` text is the corrective message shown to the user before the
/// question is asked again. Parse failures and range violations on the same
/// field carry different messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("I didn't catch that, please type an answer.")]
    Empty,

    #[error("Please enter a valid whole number of people.")]
    NotAWholeNumber,

    #[error("At least one person has to live in the home.")]
    OccupantsOutOfRange,

    #[error("Please enter exactly {expected} values separated by commas (you entered {got}).")]
    HoursCountMismatch { expected: usize, got: usize },

    #[error("Please enter numbers only, separated by commas (for example: {example}).")]
    HoursNotNumeric { example: String },

    #[error("Hours of use cannot be negative.")]
    NegativeHours,

    #[error("A day only has 24 hours. Please enter hours of use per day.")]
    HoursOutOfRange,

    #[error("Please enter a valid whole number between 1 and 7.")]
    StratumNotAWholeNumber,

    #[error("The stratum must be between 1 and 7. Try again.")]
    StratumOutOfRange,

    #[error("Please enter a valid percentage as a number between 0 and 100.")]
    OffsetNotNumeric,

    #[error("The percentage must be between 0 and 100. Try again.")]
    OffsetOutOfRange,
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
