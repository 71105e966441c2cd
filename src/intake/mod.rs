//! Intake conversation: collects household energy data one field per turn.
//!
//! A session asks for each field in a fixed order, validates the answer,
//! and once every field is filled hands the record to the calculator. A
//! marker-word tally runs alongside on every utterance.

pub mod field;
pub mod prompts;
pub mod record;
pub mod registry;
pub mod session;
pub mod tally;
pub mod validate;

pub use field::{Field, Variant};
pub use record::{AnswerRecord, FieldValue};
pub use registry::SessionRegistry;
pub use session::{IntakeSettings, Reply, Session, SessionStatus};
pub use tally::{MarkerTally, TallySnapshot};
