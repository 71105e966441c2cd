//! Consumption, cost and savings calculator.
//!
//! Pure functions over a completed answer record. Consumption scales
//! linearly with the number of occupants, and the calendar is approximated
//! as 30-day months and 12-month years.

use serde::Serialize;

use crate::catalog::{ApplianceCatalog, PriceTable};
use crate::error::InvariantError;
use crate::intake::field::Field;
use crate::intake::record::AnswerRecord;
use crate::intake::tally::TallySnapshot;

/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Months per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// A figure at the three reporting horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Horizons {
    pub daily: f64,
    pub monthly: f64,
    pub annual: f64,
}

impl Horizons {
    /// Expand a daily figure to monthly and annual.
    pub fn from_daily(daily: f64) -> Self {
        let monthly = daily * DAYS_PER_MONTH;
        Self {
            daily,
            monthly,
            annual: monthly * MONTHS_PER_YEAR,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            daily: self.daily * factor,
            monthly: self.monthly * factor,
            annual: self.annual * factor,
        }
    }

    pub fn minus(&self, other: &Horizons) -> Self {
        Self {
            daily: self.daily - other.daily,
            monthly: self.monthly - other.monthly,
            annual: self.annual - other.annual,
        }
    }
}

/// Reported use of one appliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceUsage {
    pub name: String,
    pub hours: f64,
    /// Daily kWh for one occupant.
    pub daily_kwh: f64,
}

/// Result of the consumption calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub consumption_kwh: Horizons,
    /// Price per kWh for the household's stratum.
    pub unit_price: f64,
    pub cost: Horizons,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Horizons>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_cost: Option<Horizons>,
    pub appliances: Vec<ApplianceUsage>,
    pub tally: TallySnapshot,
}

/// Compute consumption, cost and (when an offset was given) savings.
///
/// Savings are `cost * offset_fraction`, in the same currency as cost.
pub fn compute(
    record: &AnswerRecord,
    catalog: &ApplianceCatalog,
    prices: &PriceTable,
    tally: TallySnapshot,
) -> Result<Summary, InvariantError> {
    let occupants = record
        .occupant_count
        .ok_or(InvariantError::MissingField(Field::OccupantCount))?;
    let hours = record
        .appliance_hours
        .as_ref()
        .ok_or(InvariantError::MissingField(Field::ApplianceHours))?;
    let stratum = record
        .income_stratum
        .ok_or(InvariantError::MissingField(Field::IncomeStratum))?;

    if hours.len() != catalog.len() {
        return Err(InvariantError::HoursCountMismatch {
            expected: catalog.len(),
            got: hours.len(),
        });
    }

    let unit_price = prices.price_for(stratum)?;

    let appliances: Vec<ApplianceUsage> = catalog
        .iter()
        .zip(hours)
        .map(|(appliance, h)| ApplianceUsage {
            name: appliance.name.clone(),
            hours: *h,
            daily_kwh: appliance.kwh_per_hour * h,
        })
        .collect();

    let per_occupant: f64 = appliances.iter().map(|a| a.daily_kwh).sum();
    let consumption_kwh = Horizons::from_daily(per_occupant * f64::from(occupants));
    let cost = consumption_kwh.scale(unit_price);

    let savings = record.offset_fraction.map(|fraction| cost.scale(fraction));
    let net_cost = savings.as_ref().map(|s| cost.minus(s));

    Ok(Summary {
        consumption_kwh,
        unit_price,
        cost,
        offset_fraction: record.offset_fraction,
        savings,
        net_cost,
        appliances,
        tally,
    })
}

impl Summary {
    /// Human-readable report.
    pub fn render(&self) -> String {
        let mut parts = vec!["Consumption and cost summary:".to_string(), String::new()];

        parts.push(format!("Daily consumption: {:.2} kWh", self.consumption_kwh.daily));
        parts.push(format!("Monthly consumption: {:.2} kWh", self.consumption_kwh.monthly));
        parts.push(format!("Annual consumption: {:.2} kWh", self.consumption_kwh.annual));

        parts.push(String::new());
        parts.push(format!("Costs without savings (at ${:.2} COP/kWh):", self.unit_price));
        push_money(&mut parts, &self.cost);

        if let (Some(savings), Some(net)) = (&self.savings, &self.net_cost) {
            let percent = self.offset_fraction.unwrap_or_default() * 100.0;
            parts.push(String::new());
            parts.push(format!("Savings from solar panels ({percent:.1}%):"));
            push_money(&mut parts, savings);
            parts.push(String::new());
            parts.push("Costs with savings:".to_string());
            push_money(&mut parts, net);
        }

        if !self.tally.is_empty() {
            parts.push(String::new());
            parts.push("Word count:".to_string());
            for (marker, count) in &self.tally {
                parts.push(format!("\"{marker}\" mentioned: {count} times"));
            }
        }

        parts.join("\n")
    }
}

fn push_money(parts: &mut Vec<String>, h: &Horizons) {
    parts.push(format!("Daily: ${:.2} COP", h.daily));
    parts.push(format!("Monthly: ${:.2} COP", h.monthly));
    parts.push(format!("Annual: ${:.2} COP", h.annual));
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Appliance;
    use std::collections::BTreeMap;

    fn two_appliances() -> ApplianceCatalog {
        ApplianceCatalog::new(vec![Appliance::new("a", 1.0), Appliance::new("b", 0.5)])
    }

    fn record(offset: Option<f64>) -> AnswerRecord {
        AnswerRecord {
            name: Some("Ana".into()),
            motivation: Some("bills".into()),
            department: Some("Antioquia".into()),
            municipality: Some("Envigado".into()),
            occupant_count: Some(2),
            appliance_hours: Some(vec![2.0, 4.0]),
            income_stratum: Some(1),
            offset_fraction: offset,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn consumption_and_cost_scale_with_occupants() {
        let summary = compute(
            &record(None),
            &two_appliances(),
            &PriceTable::standard(),
            BTreeMap::new(),
        )
        .unwrap();

        assert!(close(summary.consumption_kwh.daily, 8.0));
        assert!(close(summary.consumption_kwh.monthly, 240.0));
        assert!(close(summary.consumption_kwh.annual, 2880.0));
        assert_eq!(summary.unit_price, 200.0);
        assert!(close(summary.cost.daily, 1600.0));
        assert!(close(summary.cost.monthly, 48_000.0));
        assert!(close(summary.cost.annual, 576_000.0));
        assert!(summary.savings.is_none());
        assert!(summary.net_cost.is_none());
        assert_eq!(summary.appliances.len(), 2);
        assert!(close(summary.appliances[1].daily_kwh, 2.0));
    }

    #[test]
    fn savings_are_a_fraction_of_cost() {
        let summary = compute(
            &record(Some(0.5)),
            &two_appliances(),
            &PriceTable::standard(),
            BTreeMap::new(),
        )
        .unwrap();

        let savings = summary.savings.unwrap();
        let net = summary.net_cost.unwrap();
        assert!(close(savings.daily, 800.0));
        assert!(close(net.daily, 800.0));
        assert!(close(savings.annual + net.annual, summary.cost.annual));
    }

    #[test]
    fn savings_are_not_multiplied_by_price_twice() {
        // Re-applying the unit price to savings would report 160000 here.
        let summary = compute(
            &record(Some(0.5)),
            &two_appliances(),
            &PriceTable::standard(),
            BTreeMap::new(),
        )
        .unwrap();
        let savings = summary.savings.unwrap();
        assert!(close(savings.daily, summary.cost.daily * 0.5));
        assert!(!close(savings.daily, summary.cost.daily * 0.5 * summary.unit_price));
    }

    #[test]
    fn zero_and_full_offset() {
        let catalog = two_appliances();
        let prices = PriceTable::standard();
        let none = compute(&record(Some(0.0)), &catalog, &prices, BTreeMap::new()).unwrap();
        assert!(close(none.net_cost.unwrap().monthly, none.cost.monthly));

        let full = compute(&record(Some(1.0)), &catalog, &prices, BTreeMap::new()).unwrap();
        assert!(close(full.net_cost.unwrap().annual, 0.0));
    }

    #[test]
    fn compute_is_deterministic() {
        let catalog = ApplianceCatalog::standard();
        let mut r = record(Some(0.37));
        r.appliance_hours = Some(vec![24.0, 1.3, 5.5, 8.0, 0.7, 0.25]);
        r.income_stratum = Some(4);
        let first = compute(&r, &catalog, &PriceTable::standard(), BTreeMap::new()).unwrap();
        let second = compute(&r, &catalog, &PriceTable::standard(), BTreeMap::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_stratum_is_invariant_error() {
        let mut r = record(None);
        r.income_stratum = Some(9);
        let err = compute(&r, &two_appliances(), &PriceTable::standard(), BTreeMap::new())
            .unwrap_err();
        assert_eq!(err, InvariantError::UnknownStratum(9));
    }

    #[test]
    fn hours_length_mismatch_is_invariant_error() {
        let err = compute(
            &record(None),
            &ApplianceCatalog::standard(),
            &PriceTable::standard(),
            BTreeMap::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvariantError::HoursCountMismatch {
                expected: 6,
                got: 2
            }
        );
    }

    #[test]
    fn missing_field_is_invariant_error() {
        let mut r = record(None);
        r.occupant_count = None;
        let err = compute(&r, &two_appliances(), &PriceTable::standard(), BTreeMap::new())
            .unwrap_err();
        assert_eq!(err, InvariantError::MissingField(Field::OccupantCount));
    }

    #[test]
    fn render_includes_sections() {
        let tally = BTreeMap::from([("ahorro".to_string(), 2), ("energia".to_string(), 1)]);
        let summary =
            compute(&record(Some(0.5)), &two_appliances(), &PriceTable::standard(), tally).unwrap();
        let text = summary.render();
        assert!(text.contains("Daily consumption: 8.00 kWh"));
        assert!(text.contains("Daily: $1600.00 COP"));
        assert!(text.contains("Savings from solar panels (50.0%)"));
        assert!(text.contains("\"ahorro\" mentioned: 2 times"));

        let basic = compute(&record(None), &two_appliances(), &PriceTable::standard(), BTreeMap::new())
            .unwrap()
            .render();
        assert!(!basic.contains("Savings"));
        assert!(!basic.contains("Word count"));
    }

    #[test]
    fn summary_serializes_without_absent_savings() {
        let summary = compute(
            &record(None),
            &two_appliances(),
            &PriceTable::standard(),
            BTreeMap::new(),
        )
        .unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["consumption_kwh"]["daily"], 8.0);
        assert!(json.get("savings").is_none());
        assert!(json.get("net_cost").is_none());
    }
}
