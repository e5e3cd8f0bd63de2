//! Structured forms: account removal, standard web form, device complaint.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use super::{clean_field, skip_chars};
use crate::fields::ENTITY_SEPARATOR;
use crate::template::{ParsedField, ParsedFields};

const NO_CARDS: &str = "Карты лояльности отсутствуют";
const MAX_REMOVAL_CARDS: usize = 2;

const ORDER_MARKER: &str = "Номер заказа:";
const NOTE_MARKER: &str = "Примечание:";
const SERVICE_MARKERS: [&str; 5] = ["Контактный телефон:", "Номер карты", "Объект:", "Адрес:", "Отправлено"];

lazy_static! {
    static ref PHONE: Regex = Regex::new(r"\b[78]\d{10}\b").unwrap();

    static ref WISHES_BLOCK: Regex =
        Regex::new(r"(?is)Напишите\s+ваши\s+пожелания.*?Нам\s+это\s+очень\s+важно\.?").unwrap();

    // Whitespace before a marker becomes a line break.
    static ref MARKER_BREAKS: Vec<(Regex, String)> = SERVICE_MARKERS
        .iter()
        .chain([ORDER_MARKER, NOTE_MARKER].iter())
        .map(|marker| {
            let pattern = Regex::new(&format!(r"\s*{}", regex::escape(marker))).unwrap();
            (pattern, format!("\n{marker}"))
        })
        .collect();

    // "12:30, 5 марта 2024 г.," mail quote headers
    static ref QUOTE_TIMESTAMP: Regex = Regex::new(r"^\d{2}:\d{2},\s+\d+\s+\w+\s+\d+\s+г\.,").unwrap();
    static ref MAIL_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();

    static ref DEVICE_TOPIC: Regex = Regex::new(r"(?s)Причина обращения:\s*(.*?),?\s*Номер ОРТ").unwrap();
    static ref DEVICE_BODY: Regex = Regex::new(
        r"(?s)Краткое описание обращения\(хронология\):\s*(.*?)(?:\n\n|\n>|\nНомер обращения:|\nС уважением|\nИнициатор:|\z)"
    ).unwrap();
    static ref DEVICE_PUMP: Regex = Regex::new(r"(?s)Номер ТРК:\s*(.*?),?\s*Вид НП").unwrap();
    static ref DEVICE_FUEL: Regex =
        Regex::new(r"(?s)Вид НП:\s*(.*?),?\s*Сумма внесённых денежных средств").unwrap();
}

/// Numbered card lines and a phone number; the body is always empty.
pub(super) fn parse_account_removal(msg: &str) -> ParsedFields {
    let mut parsed = ParsedFields::default();

    let cards = if msg.contains(NO_CARDS) {
        String::new()
    } else {
        let mut cards = Vec::new();
        for n in 1..=MAX_REMOVAL_CARDS {
            let label = format!("Номер карты лояльности №{n}:");
            let Some(start) = msg.find(&label) else {
                break;
            };
            let begin = skip_chars(msg, start, label.chars().count() + 1);
            let end = msg[begin..].find('\n').map_or(msg.len(), |i| begin + i);
            cards.push(msg[begin..end].trim().to_string());
        }
        cards.join(ENTITY_SEPARATOR)
    };
    parsed.set(ParsedField::Card, cards);

    if let Some(phone) = PHONE.find(msg) {
        parsed.set(ParsedField::Phone, phone.as_str());
    }
    parsed
}

/// Web form: the free-text comment lines, without service lines.
pub(super) fn parse_standard(msg: &str) -> ParsedFields {
    let rest = WISHES_BLOCK.replace(msg, "");
    ParsedFields::with_body(clean_field(&filter_service_lines(rest.trim())))
}

fn filter_service_lines(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in MARKER_BREAKS.iter() {
        text = pattern.replace_all(&text, NoExpand(replacement)).into_owned();
    }

    let mut kept = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty()
            || line.starts_with('>')
            || QUOTE_TIMESTAMP.is_match(line)
            || MAIL_TAG.is_match(line)
            || line.contains("«АЗС Газпромнефть")
        {
            continue;
        }

        if let Some(comment) = line.strip_prefix(ORDER_MARKER) {
            let comment = comment.trim();
            if !comment.is_empty() {
                kept.push(comment);
            }
        } else if let Some(note) = line.strip_prefix(NOTE_MARKER) {
            let note = note.trim();
            if !note.is_empty() && !note.starts_with("Сообщение подано") {
                kept.push(note);
            }
        } else if !SERVICE_MARKERS.iter().any(|marker| line.starts_with(marker)) {
            kept.push(line);
        }
    }
    kept.join(" ").trim().to_string()
}

/// Labelled device complaint form. Missing labels leave fields empty.
pub(super) fn parse_device_complaint(msg: &str) -> ParsedFields {
    let mut parsed = ParsedFields::with_body(labelled_value(&DEVICE_BODY, msg));
    parsed.set(ParsedField::RequestTopic, labelled_value(&DEVICE_TOPIC, msg));
    parsed.set(ParsedField::Pump, labelled_value(&DEVICE_PUMP, msg));
    parsed.set(ParsedField::Fuel, labelled_value(&DEVICE_FUEL, msg));
    parsed
}

fn labelled_value(pattern: &Regex, msg: &str) -> String {
    pattern
        .captures(msg)
        .and_then(|caps| caps.get(1))
        .map(|value| clean_field(value.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{parse_message, TemplateId};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_account_removal_cards_and_phone() {
        let msg = "УДАЛИТЬ АККАУНТ\nНомер карты лояльности №1: 7825 **** **** 1234\n\
                   Номер карты лояльности №2: ****5678\nТелефон: 79161234567\n";
        let parsed = parse_message(TemplateId::AccountRemoval, msg).unwrap();

        let expected = format!("7825 **** **** 1234{ENTITY_SEPARATOR}****5678");
        assert_eq!(parsed.get(ParsedField::Card), Some(expected.as_str()));
        assert_eq!(parsed.get(ParsedField::Phone), Some("79161234567"));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_account_removal_without_cards() {
        let msg = "УДАЛИТЬ АККАУНТ\nКарты лояльности отсутствуют\nНомер карты лояльности №1: 1234";
        let parsed = parse_message(TemplateId::AccountRemoval, msg).unwrap();
        assert_eq!(parsed.get(ParsedField::Card), Some(""));
        assert_eq!(parsed.get(ParsedField::Phone), None);
    }

    #[test]
    fn test_standard_form_keeps_comments() {
        let msg = "Контактный телефон: 89990001122 Номер карты ПЛ: 1234\n\
                   Объект: АЗС 15 Адрес: Москва\n\
                   Номер заказа: Не пробили чек\n\
                   Примечание: Кассир грубил\n\
                   > цитата\n\
                   Напишите ваши пожелания по улучшению. Нам это очень важно.\n\
                   Отправлено из приложения";
        let parsed = parse_message(TemplateId::StandardForm, msg).unwrap();
        assert_eq!(parsed.body, "Не пробили чек Кассир грубил");
    }

    #[test]
    fn test_standard_form_skips_submission_note() {
        let msg = "Примечание: Сообщение подано через сайт\nПросто текст отзыва.";
        let parsed = parse_message(TemplateId::StandardForm, msg).unwrap();
        assert_eq!(parsed.body, "Просто текст отзыва");
    }

    #[test]
    fn test_device_complaint_labels() {
        let msg = "Причина обращения: Не прошла оплата, Номер ОРТ: 17\n\
                   Номер ТРК: 4, Вид НП: АИ-92, Сумма внесённых денежных средств: 1000\n\
                   Наличие транзакции: нет\n\
                   Краткое описание обращения(хронология): Деньги списали, топливо не налили.\n\n\
                   Номер обращения: 55";
        let parsed = parse_message(TemplateId::DeviceComplaint, msg).unwrap();

        assert_eq!(parsed.body, "Деньги списали, топливо не налили");
        assert_eq!(parsed.get(ParsedField::RequestTopic), Some("Не прошла оплата"));
        assert_eq!(parsed.get(ParsedField::Pump), Some("4"));
        assert_eq!(parsed.get(ParsedField::Fuel), Some("АИ-92"));
    }

    #[test]
    fn test_device_complaint_missing_labels() {
        let parsed = parse_message(TemplateId::DeviceComplaint, "Причина обращения: ---, Номер ОРТ").unwrap();
        assert_eq!(parsed.get(ParsedField::RequestTopic), Some(""));
        assert_eq!(parsed.get(ParsedField::Pump), Some(""));
        assert_eq!(parsed.body, "");
    }
}
