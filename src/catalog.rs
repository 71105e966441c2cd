//! Static reference data: appliance power draws and per-stratum tariffs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::InvariantError;

/// An appliance and its hourly power draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appliance {
    pub name: String,
    /// kWh consumed per hour of use.
    pub kwh_per_hour: f64,
}

impl Appliance {
    pub fn new(name: impl Into<String>, kwh_per_hour: f64) -> Self {
        Self {
            name: name.into(),
            kwh_per_hour,
        }
    }
}

/// Ordered appliance catalog.
///
/// Reported hours are matched to appliances by position, so the order is
/// part of the contract with the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApplianceCatalog {
    appliances: Vec<Appliance>,
}

impl ApplianceCatalog {
    pub fn new(appliances: Vec<Appliance>) -> Self {
        Self { appliances }
    }

    /// The household appliance set used by default.
    pub fn standard() -> Self {
        Self::new(vec![
            Appliance::new("fridge", 1.2),
            Appliance::new("washing_machine", 0.5),
            Appliance::new("television", 0.1),
            Appliance::new("computer", 0.2),
            Appliance::new("air_conditioner", 1.5),
            Appliance::new("microwave", 1.2),
        ])
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Appliance> {
        self.appliances.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appliance> {
        self.appliances.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.appliances.iter().map(|a| a.name.as_str()).collect()
    }

    /// A comma-separated sample answer with one value per appliance.
    pub fn example_answer(&self) -> String {
        const SAMPLE: [u32; 6] = [5, 2, 3, 0, 4, 1];
        (0..self.len())
            .map(|i| SAMPLE[i % SAMPLE.len()].to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for ApplianceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-kWh price by income stratum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<u8, f64>,
}

impl PriceTable {
    pub fn new(prices: BTreeMap<u8, f64>) -> Self {
        Self { prices }
    }

    /// COP per kWh for strata 1 through 7.
    pub fn standard() -> Self {
        Self::new(BTreeMap::from([
            (1, 200.0),
            (2, 300.0),
            (3, 400.0),
            (4, 500.0),
            (5, 600.0),
            (6, 700.0),
            (7, 700.0),
        ]))
    }

    /// Look up the unit price. A miss is an engine bug, not a user error.
    pub fn price_for(&self, stratum: u8) -> Result<f64, InvariantError> {
        self.prices
            .get(&stratum)
            .copied()
            .ok_or(InvariantError::UnknownStratum(stratum))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.prices.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_order_is_fixed() {
        let catalog = ApplianceCatalog::standard();
        assert_eq!(
            catalog.names(),
            vec![
                "fridge",
                "washing_machine",
                "television",
                "computer",
                "air_conditioner",
                "microwave"
            ]
        );
        assert_eq!(catalog.get(4).unwrap().kwh_per_hour, 1.5);
        assert!(catalog.get(6).is_none());
    }

    #[test]
    fn example_answer_matches_catalog_size() {
        let catalog = ApplianceCatalog::standard();
        assert_eq!(catalog.example_answer(), "5,2,3,0,4,1");

        let small = ApplianceCatalog::new(vec![Appliance::new("a", 1.0), Appliance::new("b", 0.5)]);
        assert_eq!(small.example_answer(), "5,2");
    }

    #[test]
    fn standard_prices_cover_all_strata() {
        let prices = PriceTable::standard();
        for stratum in 1..=7 {
            assert!(prices.price_for(stratum).is_ok(), "stratum {stratum} missing");
        }
        assert_eq!(prices.price_for(1).unwrap(), 200.0);
        assert_eq!(prices.price_for(7).unwrap(), 700.0);
    }

    #[test]
    fn price_lookup_miss_is_invariant_error() {
        let prices = PriceTable::standard();
        assert_eq!(prices.price_for(0), Err(InvariantError::UnknownStratum(0)));
        assert_eq!(prices.price_for(8), Err(InvariantError::UnknownStratum(8)));
    }

    #[test]
    fn catalog_serializes_as_list() {
        let catalog = ApplianceCatalog::new(vec![Appliance::new("a", 1.0)]);
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[0]["kwh_per_hour"], 1.0);
    }
}
