//! Answer record: typed slots filled one per turn.

use super::field::{Field, Variant};

/// A validated answer for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(String),
    Motivation(String),
    Department(String),
    Municipality(String),
    OccupantCount(u32),
    /// Hours per day, positionally matched to the appliance catalog.
    ApplianceHours(Vec<f64>),
    IncomeStratum(u8),
    /// Already normalized to `0.0..=1.0`.
    OffsetFraction(f64),
}

impl FieldValue {
    /// The slot this value fills.
    pub fn field(&self) -> Field {
        match self {
            Self::Name(_) => Field::Name,
            Self::Motivation(_) => Field::Motivation,
            Self::Department(_) => Field::Department,
            Self::Municipality(_) => Field::Municipality,
            Self::OccupantCount(_) => Field::OccupantCount,
            Self::ApplianceHours(_) => Field::ApplianceHours,
            Self::IncomeStratum(_) => Field::IncomeStratum,
            Self::OffsetFraction(_) => Field::OffsetFraction,
        }
    }
}

/// The partially-filled answers of one conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerRecord {
    pub name: Option<String>,
    pub motivation: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub occupant_count: Option<u32>,
    pub appliance_hours: Option<Vec<f64>>,
    pub income_stratum: Option<u8>,
    pub offset_fraction: Option<f64>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a previous turn has filled `field`.
    pub fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.is_some(),
            Field::Motivation => self.motivation.is_some(),
            Field::Department => self.department.is_some(),
            Field::Municipality => self.municipality.is_some(),
            Field::OccupantCount => self.occupant_count.is_some(),
            Field::ApplianceHours => self.appliance_hours.is_some(),
            Field::IncomeStratum => self.income_stratum.is_some(),
            Field::OffsetFraction => self.offset_fraction.is_some(),
        }
    }

    /// The first unfilled field for `variant`, or `None` once complete.
    pub fn next_missing(&self, variant: Variant) -> Option<Field> {
        variant
            .fields()
            .iter()
            .copied()
            .find(|field| !self.is_filled(*field))
    }

    pub fn is_complete(&self, variant: Variant) -> bool {
        self.next_missing(variant).is_none()
    }

    pub fn filled_count(&self) -> usize {
        Field::ORDER.iter().filter(|f| self.is_filled(**f)).count()
    }

    /// Store a validated value. Filled slots are never overwritten; returns
    /// `false` if the slot already held a value.
    pub fn apply(&mut self, value: FieldValue) -> bool {
        if self.is_filled(value.field()) {
            return false;
        }
        match value {
            FieldValue::Name(v) => self.name = Some(v),
            FieldValue::Motivation(v) => self.motivation = Some(v),
            FieldValue::Department(v) => self.department = Some(v),
            FieldValue::Municipality(v) => self.municipality = Some(v),
            FieldValue::OccupantCount(v) => self.occupant_count = Some(v),
            FieldValue::ApplianceHours(v) => self.appliance_hours = Some(v),
            FieldValue::IncomeStratum(v) => self.income_stratum = Some(v),
            FieldValue::OffsetFraction(v) => self.offset_fraction = Some(v),
        }
        true
    }
}
