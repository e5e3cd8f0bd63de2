//! Fuel kind cleaning.

use super::patterns::{FUEL_DIESEL, FUEL_GAS, FUEL_HUNDRED, FUEL_OCTANE};
use super::{dedup, FieldCategory, FieldCleaner};

/// Canonical value for diesel fuels.
pub const DIESEL: &str = "ДТ";
/// Canonical value for propane and LPG.
pub const GAS: &str = "ГАЗ";
/// Canonical value for the "hundred" grade.
pub const HUNDRED: &str = "100";

/// Fuel kind cleaner.
pub struct FuelCleaner;

impl FieldCleaner for FuelCleaner {
    fn category(&self) -> FieldCategory {
        FieldCategory::Fuel
    }

    fn clean(&self, snippet: &str) -> Vec<String> {
        clean_fuel(snippet)
    }
}

/// Fuel kinds mentioned in the snippet.
///
/// All checks run independently: diesel, gas, the "hundred" word and
/// octane numbers.
pub fn clean_fuel(snippet: &str) -> Vec<String> {
    let mut found = Vec::new();

    if FUEL_DIESEL.iter().any(|p| p.is_match(snippet)) {
        found.push(DIESEL.to_string());
    }
    if FUEL_GAS.iter().any(|p| p.is_match(snippet)) {
        found.push(GAS.to_string());
    }
    if FUEL_HUNDRED.is_match(snippet) {
        found.push(HUNDRED.to_string());
    }
    found.extend(
        FUEL_OCTANE
            .captures_iter(snippet)
            .map(|caps| caps["num"].to_string()),
    );

    dedup(found)
}
