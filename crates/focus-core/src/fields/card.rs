//! Loyalty card number cleaning.

use super::patterns::{CARD_FALLBACK, CARD_NOISE, CARD_SHAPES};
use super::{dedup, FieldCategory, FieldCleaner};

/// Card number cleaner.
pub struct CardCleaner;

impl FieldCleaner for CardCleaner {
    fn category(&self) -> FieldCategory {
        FieldCategory::Card
    }

    fn clean(&self, snippet: &str) -> Vec<String> {
        clean_card(snippet)
    }
}

/// Extract masked or full card numbers from a snippet.
///
/// Only digits and `*` are kept. The first shape in `CARD_SHAPES` that
/// matches supplies all values; otherwise the first digit/mask run is used.
/// Values contained in a longer kept value are dropped.
pub fn clean_card(snippet: &str) -> Vec<String> {
    let norm = CARD_NOISE.replace_all(snippet, "");

    let mut matches: Vec<String> = CARD_SHAPES
        .iter()
        .map(|shape| {
            shape
                .find_iter(&norm)
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    if matches.is_empty() {
        if let Some(m) = CARD_FALLBACK.find(&norm) {
            matches.push(m.as_str().to_string());
        }
    }

    let unique = dedup(matches);
    unique
        .iter()
        .filter(|value| {
            !unique
                .iter()
                .any(|other| other != *value && other.contains(value.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_masked_card() {
        assert_eq!(clean_card("карта ************1794"), vec!["************1794"]);
        assert_eq!(clean_card("2200 **** **** 2086"), vec!["2200********2086"]);
    }

    #[test]
    fn test_full_card_with_prefix() {
        assert_eq!(clean_card("7825 6806 0125 2380"), vec!["7825680601252380"]);
    }

    #[test]
    fn test_short_masked_id() {
        assert_eq!(clean_card("карта *9119"), vec!["*9119"]);
    }

    #[test]
    fn test_masked_wins_over_plain_digits() {
        assert_eq!(clean_card("****1234, 1234"), vec!["****1234"]);
    }

    #[test]
    fn test_substring_dominance() {
        // Two captures where one is contained in the other.
        assert_eq!(clean_card("*1234 и ***1234"), vec!["***1234"]);
    }

    #[test]
    fn test_fallback_run() {
        assert_eq!(clean_card("5678****"), vec!["5678****"]);
        assert_eq!(clean_card("номер 12345"), vec!["12345"]);
    }

    #[test]
    fn test_no_digits() {
        assert!(clean_card("нет карты").is_empty());
    }
}
