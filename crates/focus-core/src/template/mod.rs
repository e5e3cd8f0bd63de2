//! Message templates: recognition and anchor-based field parsing.

mod classifier;
mod parsers;

pub use classifier::{classify, TemplateRule, RULES};
pub use parsers::{clean_field, parse_message};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::FieldCategory;

/// Known message layouts, in classifier evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    /// Placeholder for messages that only carry attachments.
    NoText,
    /// Automated ticket export with starred section headers.
    TicketExport,
    /// Loyalty account removal request.
    AccountRemoval,
    /// Standardized web form.
    StandardForm,
    /// User device complaint form.
    DeviceComplaint,
    /// Hotline forward whose body is a voice message or auto-reply.
    HotlineEmpty,
    /// Hotline forward of a web form submission.
    HotlineForward,
    /// Hotline forward of a free-form letter.
    HotlineFreeText,
    /// Site feedback form.
    HotlineFeedback,
    /// Forwarded corporate correspondence.
    CorporateResponse,
    /// Complaint book entry.
    ComplaintBook,
    /// Anything else.
    Other,
}

impl TemplateId {
    /// Position in the classifier decision list.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::NoText => "NoText",
            TemplateId::TicketExport => "TicketExport",
            TemplateId::AccountRemoval => "AccountRemoval",
            TemplateId::StandardForm => "StandardForm",
            TemplateId::DeviceComplaint => "DeviceComplaint",
            TemplateId::HotlineEmpty => "HotlineEmpty",
            TemplateId::HotlineForward => "HotlineForward",
            TemplateId::HotlineFreeText => "HotlineFreeText",
            TemplateId::HotlineFeedback => "HotlineFeedback",
            TemplateId::CorporateResponse => "CorporateResponse",
            TemplateId::ComplaintBook => "ComplaintBook",
            TemplateId::Other => "Other",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field names a template parser can produce besides the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsedField {
    Card,
    Station,
    Pump,
    Fuel,
    Answer,
    Phone,
    RequestType,
    RequestTopic,
}

impl ParsedField {
    /// Canonical category fed by this field, if any.
    pub fn category(self) -> Option<FieldCategory> {
        match self {
            ParsedField::Card => Some(FieldCategory::Card),
            ParsedField::Station => Some(FieldCategory::Station),
            ParsedField::Pump => Some(FieldCategory::Pump),
            ParsedField::Fuel => Some(FieldCategory::Fuel),
            ParsedField::Answer
            | ParsedField::Phone
            | ParsedField::RequestType
            | ParsedField::RequestTopic => None,
        }
    }
}

/// Result of a template parse: the residual body plus raw field snippets.
///
/// Multi-valued snippets pack their values with
/// [`ENTITY_SEPARATOR`](crate::fields::ENTITY_SEPARATOR).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFields {
    pub body: String,
    pub fields: BTreeMap<ParsedField, String>,
}

impl ParsedFields {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: ParsedField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub(crate) fn set(&mut self, field: ParsedField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    fn block(header: &str, value: &str) -> String {
        format!("{header}\n{}\n{value}\n", "*".repeat(31))
    }

    /// A ticket export with the given card slots.
    pub(crate) fn ticket(cards: [&str; 3]) -> String {
        [
            "Письмо сгенерировано автоматически\nДАННЫЕ ДЛЯ OTRS\n".to_string(),
            block("ТИП ОБРАЩЕНИЯ", "Жалоба"),
            block("ТЕМА ВОПРОСА", "Качество топлива"),
            block("ТИП ВОПРОСА", "Претензия"),
            block("НОМЕР КАРТЫ", cards[0]),
            block("КАК К ВАМ ОБРАЩАТЬСЯ?", "Иван"),
            block("НОМЕР СТАРОЙ КАРТЫ", cards[1]),
            block("НОМЕР НОВОЙ КАРТЫ", cards[2]),
            block("СООБЩЕНИЕ", "Заправился на третьей колонке, машина заглохла."),
            block("ФАЙЛ", ""),
            block("НОМЕР АЗС", "№ 42"),
            block("НОМЕР КОЛОНКИ", "3"),
            block("ВИД ТОПЛИВА", "АИ-95"),
            block("ДАТА ПОСЕЩЕНИЯ АЗС", "01.02.2024"),
        ]
        .concat()
    }
}
