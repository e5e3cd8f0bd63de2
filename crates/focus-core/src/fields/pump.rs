//! Pump (dispenser) number cleaning.

use super::patterns::{ORDINAL_ROOTS, PUMP_TOKEN};
use super::{dedup, FieldCategory, FieldCleaner};

/// Pump number cleaner.
pub struct PumpCleaner;

impl FieldCleaner for PumpCleaner {
    fn category(&self) -> FieldCategory {
        FieldCategory::Pump
    }

    fn clean(&self, snippet: &str) -> Vec<String> {
        clean_pump(snippet)
    }
}

/// Pump numbers written as 1-2 digit numbers or Russian ordinal words.
pub fn clean_pump(snippet: &str) -> Vec<String> {
    let norm = snippet.to_lowercase();

    let found = PUMP_TOKEN
        .captures_iter(&norm)
        .filter_map(|caps| {
            if let Some(num) = caps.name("num") {
                let num = num.as_str();
                return (num.chars().count() <= 2).then(|| num.to_string());
            }
            let word = caps.name("ord")?.as_str();
            ORDINAL_ROOTS
                .iter()
                .find(|(root, _)| word.starts_with(root))
                .map(|(_, value)| value.to_string())
        })
        .collect();

    dedup(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ordinal_word() {
        assert_eq!(clean_pump("третьей колонки"), vec!["3"]);
        assert_eq!(clean_pump("Седьмая ТРК"), vec!["7"]);
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(clean_pump("колонка 5"), vec!["5"]);
        assert_eq!(clean_pump("ТРК 12, потом 5 и снова 12"), vec!["12", "5"]);
    }

    #[test]
    fn test_long_numbers_ignored() {
        assert!(clean_pump("чек 123456").is_empty());
    }
}
