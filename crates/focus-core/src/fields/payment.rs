//! Payment note cleaning.

use super::patterns::WHITESPACE_RUN;
use super::{FieldCategory, FieldCleaner};

/// Payment note cleaner.
pub struct PaymentCleaner;

impl FieldCleaner for PaymentCleaner {
    fn category(&self) -> FieldCategory {
        FieldCategory::Payment
    }

    fn clean(&self, snippet: &str) -> Vec<String> {
        clean_payment(snippet)
    }
}

/// The snippet with whitespace runs collapsed; empty notes yield nothing.
pub fn clean_payment(snippet: &str) -> Vec<String> {
    let note = WHITESPACE_RUN.replace_all(snippet, " ").trim().to_string();
    if note.is_empty() {
        Vec::new()
    } else {
        vec![note]
    }
}
