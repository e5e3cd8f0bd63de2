//! Field normalization: raw snippets to canonical field values.

pub mod card;
pub mod fuel;
pub mod patterns;
pub mod payment;
pub mod pump;
pub mod station;

pub use card::{clean_card, CardCleaner};
pub use fuel::{clean_fuel, FuelCleaner};
pub use payment::{clean_payment, PaymentCleaner};
pub use pump::{clean_pump, PumpCleaner};
pub use station::{clean_station, StationCleaner};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::text::AnnotatedText;

/// Separator between sub-values packed into one parsed field.
pub const ENTITY_SEPARATOR: &str = "<|ENT_SEP|>";

/// Separator used when rendering a canonical field.
pub const VALUE_SEPARATOR: &str = ", ";

/// Target field categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Card,
    Station,
    Pump,
    Fuel,
    Payment,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 5] = [
        FieldCategory::Card,
        FieldCategory::Station,
        FieldCategory::Pump,
        FieldCategory::Fuel,
        FieldCategory::Payment,
    ];

    /// Entity label used by the tagger for this category.
    pub fn label(self) -> &'static str {
        match self {
            FieldCategory::Card => "card",
            FieldCategory::Station => "azs",
            FieldCategory::Pump => "trk",
            FieldCategory::Fuel => "fuel",
            FieldCategory::Payment => "payment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Cleaner responsible for this category.
    pub fn cleaner(self) -> &'static dyn FieldCleaner {
        match self {
            FieldCategory::Card => &CardCleaner,
            FieldCategory::Station => &StationCleaner,
            FieldCategory::Pump => &PumpCleaner,
            FieldCategory::Fuel => &FuelCleaner,
            FieldCategory::Payment => &PaymentCleaner,
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trait for category-specific snippet cleaners.
pub trait FieldCleaner: Send + Sync {
    /// Category this cleaner produces values for.
    fn category(&self) -> FieldCategory;

    /// Canonical values found in a raw snippet. No match is an empty result.
    fn clean(&self, snippet: &str) -> Vec<String>;
}

/// Remove repeated values, keeping first appearance order.
pub(crate) fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Final field strings, one per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalFields {
    pub card: String,
    pub station: String,
    pub pump: String,
    pub fuel: String,
    pub payment: String,
}

impl CanonicalFields {
    pub fn get(&self, category: FieldCategory) -> &str {
        match category {
            FieldCategory::Card => &self.card,
            FieldCategory::Station => &self.station,
            FieldCategory::Pump => &self.pump,
            FieldCategory::Fuel => &self.fuel,
            FieldCategory::Payment => &self.payment,
        }
    }

    fn slot_mut(&mut self, category: FieldCategory) -> &mut String {
        match category {
            FieldCategory::Card => &mut self.card,
            FieldCategory::Station => &mut self.station,
            FieldCategory::Pump => &mut self.pump,
            FieldCategory::Fuel => &mut self.fuel,
            FieldCategory::Payment => &mut self.payment,
        }
    }
}

/// Accumulates cleaned values from parsed fields and tagged spans.
///
/// Values are kept as a set per category, so the rendered field is sorted
/// lexicographically regardless of the order sources were added in.
#[derive(Debug, Default)]
pub struct FieldCollector {
    values: BTreeMap<FieldCategory, BTreeSet<String>>,
}

impl FieldCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw parsed snippet, which may pack several values.
    pub fn add_snippet(&mut self, category: FieldCategory, raw: &str) {
        let cleaner = category.cleaner();
        for part in raw.split(ENTITY_SEPARATOR) {
            if part.trim().is_empty() {
                continue;
            }
            let cleaned = cleaner.clean(part);
            debug!("{} snippet {:?} -> {:?}", category, part, cleaned);
            self.values.entry(category).or_default().extend(cleaned);
        }
    }

    /// Add every span of `text` whose category is a target field.
    pub fn add_spans(&mut self, text: &AnnotatedText) {
        for span in text.spans() {
            if let Some(category) = FieldCategory::from_label(&span.category) {
                self.add_snippet(category, text.span_text(span));
            }
        }
    }

    pub fn finish(self) -> CanonicalFields {
        let mut fields = CanonicalFields::default();
        for (category, values) in self.values {
            *fields.slot_mut(category) = values
                .into_iter()
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(VALUE_SEPARATOR);
        }
        fields
    }
}
