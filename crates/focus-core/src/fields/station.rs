//! Station number cleaning.

use super::patterns::DIGIT_RUN;
use super::{dedup, FieldCategory, FieldCleaner};

/// Station number cleaner.
pub struct StationCleaner;

impl FieldCleaner for StationCleaner {
    fn category(&self) -> FieldCategory {
        FieldCategory::Station
    }

    fn clean(&self, snippet: &str) -> Vec<String> {
        clean_station(snippet)
    }
}

/// Every digit run in the snippet, in order of first appearance.
pub fn clean_station(snippet: &str) -> Vec<String> {
    dedup(
        DIGIT_RUN
            .find_iter(snippet)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_numbers() {
        assert_eq!(clean_station("АЗС №123, потом 45 и снова 123"), vec!["123", "45"]);
        assert!(clean_station("на заправке").is_empty());
    }
}
