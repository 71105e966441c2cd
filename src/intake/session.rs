//! Conversation session: drives the slot-filling state machine.
//!
//! The session is a linear chain: one `awaiting(field)` state per field of
//! the active variant, then a terminal state. A valid answer moves to the
//! next field, an invalid one re-asks the same field, and nothing ever moves
//! backwards.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::calculator::{self, Summary};
use crate::catalog::{ApplianceCatalog, PriceTable};
use crate::error::InvariantError;

use super::field::{Field, Variant};
use super::prompts::{THANKS, corrective_prompt, prompt_for};
use super::record::AnswerRecord;
use super::tally::{DEFAULT_MARKERS, MarkerTally, TallySnapshot};
use super::validate::validate;

/// Reference data and options shared by every session.
#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub catalog: ApplianceCatalog,
    pub prices: PriceTable,
    pub variant: Variant,
    /// Marker words tallied across utterances.
    pub markers: Vec<String>,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            catalog: ApplianceCatalog::standard(),
            prices: PriceTable::standard(),
            variant: Variant::default(),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// What the engine says back after an utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// Question for the next unfilled field.
    Prompt { field: Field, message: String },
    /// The answer was rejected; the same field is asked again.
    Correction { field: Field, message: String },
    /// All fields are filled.
    Summary { message: String, summary: Summary },
}

impl Reply {
    pub fn message(&self) -> &str {
        match self {
            Self::Prompt { message, .. }
            | Self::Correction { message, .. }
            | Self::Summary { message, .. } => message,
        }
    }

    /// The field being asked for, if the session is not terminal.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Prompt { field, .. } | Self::Correction { field, .. } => Some(*field),
            Self::Summary { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Self::Summary { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn is_correction(&self) -> bool {
        matches!(self, Self::Correction { .. })
    }
}

/// Progress report for a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub id: Uuid,
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awaiting: Option<Field>,
    pub filled: usize,
    pub total: usize,
    pub completed: bool,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub tally: TallySnapshot,
}

/// One intake conversation.
pub struct Session {
    id: Uuid,
    settings: Arc<IntakeSettings>,
    record: AnswerRecord,
    tally: MarkerTally,
    /// Computed once when the last field is filled.
    summary: Option<Summary>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(settings: Arc<IntakeSettings>) -> Self {
        Self::with_id(Uuid::new_v4(), settings)
    }

    pub fn with_id(id: Uuid, settings: Arc<IntakeSettings>) -> Self {
        let tally = MarkerTally::new(&settings.markers);
        Self {
            id,
            settings,
            record: AnswerRecord::new(),
            tally,
            summary: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    pub fn tally(&self) -> &MarkerTally {
        &self.tally
    }

    pub fn is_terminal(&self) -> bool {
        self.summary.is_some()
    }

    /// The opening question.
    pub fn welcome(&self) -> Reply {
        self.prompt(Field::Name)
    }

    /// Discard all answers and counts and return the opening question.
    pub fn reset(&mut self) -> Reply {
        self.record = AnswerRecord::new();
        self.tally.reset();
        self.summary = None;
        self.started_at = Utc::now();
        self.completed_at = None;
        info!(session_id = %self.id, "Intake session reset");
        self.welcome()
    }

    /// Feed one user utterance to the session.
    ///
    /// The marker tally is updated first, whatever the state. Validation
    /// failures come back as `Reply::Correction` and leave the record
    /// untouched; only an internal inconsistency is returned as `Err`.
    pub fn advance(&mut self, utterance: &str) -> Result<Reply, InvariantError> {
        self.tally.observe(utterance);

        let variant = self.settings.variant;
        let Some(field) = self.record.next_missing(variant) else {
            return self.terminal_reply();
        };

        let value = match validate(field, utterance, &self.settings.catalog) {
            Ok(value) => value,
            Err(e) => {
                debug!(session_id = %self.id, %field, reason = %e, "Answer rejected");
                return Ok(Reply::Correction {
                    field,
                    message: corrective_prompt(&e, field, &self.record, &self.settings.catalog),
                });
            }
        };

        // Commit only once the whole step has succeeded.
        let mut candidate = self.record.clone();
        candidate.apply(value);
        debug!(session_id = %self.id, %field, "Answer accepted");

        match candidate.next_missing(variant) {
            Some(next) => {
                self.record = candidate;
                Ok(self.prompt(next))
            }
            None => {
                let summary = self.compute(&candidate)?;
                self.record = candidate;
                self.completed_at = Some(Utc::now());
                info!(
                    session_id = %self.id,
                    daily_kwh = summary.consumption_kwh.daily,
                    monthly_cost = summary.cost.monthly,
                    "Intake session completed"
                );
                let reply = self.summary_reply(&summary);
                self.summary = Some(summary);
                Ok(reply)
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            variant: self.settings.variant,
            awaiting: self.record.next_missing(self.settings.variant),
            filled: self.record.filled_count(),
            total: self.settings.variant.fields().len(),
            completed: self.is_terminal(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            tally: self.tally.snapshot(),
        }
    }

    fn terminal_reply(&mut self) -> Result<Reply, InvariantError> {
        let summary = match &self.summary {
            Some(summary) => summary.clone(),
            None => {
                let summary = self.compute(&self.record)?;
                self.summary = Some(summary.clone());
                summary
            }
        };
        Ok(self.summary_reply(&summary))
    }

    fn compute(&self, record: &AnswerRecord) -> Result<Summary, InvariantError> {
        calculator::compute(
            record,
            &self.settings.catalog,
            &self.settings.prices,
            self.tally.snapshot(),
        )
        .inspect_err(|e| {
            error!(session_id = %self.id, error = %e, "Summary computation failed");
        })
    }

    /// The cached figures with the current tally.
    fn summary_reply(&self, summary: &Summary) -> Reply {
        let summary = Summary {
            tally: self.tally.snapshot(),
            ..summary.clone()
        };
        Reply::Summary {
            message: format!("{THANKS}\n\n{}", summary.render()),
            summary,
        }
    }

    fn prompt(&self, field: Field) -> Reply {
        Reply::Prompt {
            field,
            message: prompt_for(field, &self.record, &self.settings.catalog),
        }
    }
}
