//! Automated ticket export.
//!
//! Sections look like `HEADER\n*******************************\nvalue`.

use super::{between, clean_field, find_anchor, skip_chars};
use crate::error::ParseError;
use crate::fields::ENTITY_SEPARATOR;
use crate::template::{ParsedField, ParsedFields, TemplateId};

/// Width of the star rule under each header.
const RULE_WIDTH: usize = 31;

/// Value of section `header`, up to the next section `next`.
fn section(msg: &str, header: &str, next: &str) -> Result<String, ParseError> {
    let start = find_anchor(msg, &format!("{header}\n*"), TemplateId::TicketExport)?;
    let end = find_anchor(msg, &format!("{next}\n*"), TemplateId::TicketExport)?;
    let begin = skip_chars(msg, start, header.chars().count() + 1 + RULE_WIDTH + 1);
    Ok(clean_field(between(msg, begin, end)))
}

pub(super) fn parse(msg: &str) -> Result<ParsedFields, ParseError> {
    let mut parsed = ParsedFields::default();

    parsed.set(
        ParsedField::RequestType,
        section(msg, "ТИП ОБРАЩЕНИЯ", "ТЕМА ВОПРОСА")?,
    );
    parsed.set(
        ParsedField::RequestTopic,
        section(msg, "ТЕМА ВОПРОСА", "ТИП ВОПРОСА")?,
    );

    let mut cards = vec![
        section(msg, "НОМЕР КАРТЫ", "КАК К ВАМ ОБРАЩАТЬСЯ?")?,
        section(msg, "НОМЕР СТАРОЙ КАРТЫ", "НОМЕР НОВОЙ КАРТЫ")?,
        section(msg, "НОМЕР НОВОЙ КАРТЫ", "СООБЩЕНИЕ")?,
    ];
    cards.retain(|card| !card.is_empty());
    cards.sort();
    parsed.set(ParsedField::Card, cards.join(ENTITY_SEPARATOR));

    parsed.body = section(msg, "СООБЩЕНИЕ", "ФАЙЛ")?;
    parsed.set(ParsedField::Station, section(msg, "НОМЕР АЗС", "НОМЕР КОЛОНКИ")?);
    parsed.set(ParsedField::Pump, section(msg, "НОМЕР КОЛОНКИ", "ВИД ТОПЛИВА")?);
    parsed.set(ParsedField::Fuel, section(msg, "ВИД ТОПЛИВА", "ДАТА ПОСЕЩЕНИЯ АЗС")?);

    Ok(parsed)
}
