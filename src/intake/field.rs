//! Intake fields: the ordered slots the conversation fills.

use serde::{Deserialize, Serialize};

/// One answer slot in the intake conversation.
///
/// Slots are filled strictly in declaration order: Name → Motivation →
/// Department → Municipality → OccupantCount → ApplianceHours →
/// IncomeStratum → OffsetFraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Motivation,
    Department,
    Municipality,
    OccupantCount,
    ApplianceHours,
    IncomeStratum,
    OffsetFraction,
}

impl Field {
    /// Every field, in fill order.
    pub const ORDER: [Field; 8] = [
        Field::Name,
        Field::Motivation,
        Field::Department,
        Field::Municipality,
        Field::OccupantCount,
        Field::ApplianceHours,
        Field::IncomeStratum,
        Field::OffsetFraction,
    ];

    /// The field asked after this one, if any.
    pub fn next(&self) -> Option<Field> {
        use Field::*;
        match self {
            Name => Some(Motivation),
            Motivation => Some(Department),
            Department => Some(Municipality),
            Municipality => Some(OccupantCount),
            OccupantCount => Some(ApplianceHours),
            ApplianceHours => Some(IncomeStratum),
            IncomeStratum => Some(OffsetFraction),
            OffsetFraction => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Motivation => "motivation",
            Self::Department => "department",
            Self::Municipality => "municipality",
            Self::OccupantCount => "occupant_count",
            Self::ApplianceHours => "appliance_hours",
            Self::IncomeStratum => "income_stratum",
            Self::OffsetFraction => "offset_fraction",
        };
        write!(f, "{s}")
    }
}

/// Which questionnaire a session runs.
///
/// `Basic` stops after the income stratum and reports consumption and cost
/// only. `Extended` also asks for the solar offset and reports savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Basic,
    #[default]
    Extended,
}

impl Variant {
    /// The fields this variant asks for, in order.
    pub fn fields(&self) -> &'static [Field] {
        static ORDER: [Field; 8] = Field::ORDER;
        match self {
            Self::Basic => &ORDER[..7],
            Self::Extended => &ORDER,
        }
    }

    /// Whether the variant includes `field`.
    pub fn includes(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "extended" => Ok(Self::Extended),
            other => Err(format!("unknown variant '{other}', expected basic or extended")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_fields() {
        let mut current = Field::Name;
        for expected in &Field::ORDER[1..] {
            let next = current.next().unwrap();
            assert_eq!(next, *expected);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn order_matches_ord() {
        let mut sorted = Field::ORDER;
        sorted.sort();
        assert_eq!(sorted, Field::ORDER);
    }

    #[test]
    fn display_matches_serde() {
        for field in Field::ORDER {
            let display = format!("{field}");
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {field:?}"
            );
        }
    }

    #[test]
    fn basic_variant_skips_offset() {
        assert_eq!(Variant::Basic.fields().len(), 7);
        assert!(!Variant::Basic.includes(Field::OffsetFraction));
        assert_eq!(Variant::Extended.fields().len(), 8);
        assert!(Variant::Extended.includes(Field::OffsetFraction));
        assert_eq!(Variant::default(), Variant::Extended);
    }

    #[test]
    fn variant_parses() {
        assert_eq!("basic".parse::<Variant>().unwrap(), Variant::Basic);
        assert_eq!(" Extended ".parse::<Variant>().unwrap(), Variant::Extended);
        assert!("full".parse::<Variant>().is_err());
    }
}
