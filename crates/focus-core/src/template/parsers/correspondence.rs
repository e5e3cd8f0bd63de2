//! Forwarded correspondence and complaint book entries.

use super::{anchored_section, between, clean_field, find_anchor, skip_chars};
use crate::error::ParseError;
use crate::template::{ParsedField, ParsedFields, TemplateId};

/// Subject markers; the last occurrence in the message wins.
const SUBJECT_MARKERS: [&str; 3] = ["Subject: [☝❗EXTERNAL❗]", "Subject: [??EXTERNAL?]", "Subject:"];
/// Signature cutoffs, by priority.
const SIGNATURE_CUTOFFS: [&str; 3] = ["С уважением", "Отправлено", "--"];

const STATION_LABELS: [&str; 3] = ["№ Магазина и АЗС", "№ АЗС", "АЗС"];
const DATE_LABELS: [&str; 2] = ["Дата обращения клиента", "Дата"];

/// Body after the last subject line, up to the signature, one sentence per line.
pub(super) fn parse_corporate(msg: &str) -> ParsedFields {
    let mut latest: Option<(usize, &str)> = None;
    for marker in SUBJECT_MARKERS {
        if let Some(pos) = msg.rfind(marker) {
            if latest.is_none_or(|(best, _)| pos > best) {
                latest = Some((pos, marker));
            }
        }
    }
    let mut text = match latest {
        Some((pos, marker)) => &msg[pos + marker.len()..],
        None => msg,
    };

    if let Some(pos) = SIGNATURE_CUTOFFS.iter().find_map(|cutoff| text.find(cutoff)) {
        text = &text[..pos];
    }

    let body = clean_field(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.ends_with(['.', '!', '?']) {
                line.to_string()
            } else {
                format!("{line}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    ParsedFields::with_body(body)
}

/// First label, in priority order, present in `msg`.
fn first_label<'a>(msg: &str, labels: &[&'a str]) -> Option<(usize, &'a str)> {
    labels
        .iter()
        .find_map(|label| msg.find(label).map(|pos| (pos, *label)))
}

pub(super) fn parse_complaint_book(raw: &str) -> Result<ParsedFields, ParseError> {
    let msg = raw
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let template = TemplateId::ComplaintBook;

    let mut parsed = ParsedFields::with_body(anchored_section(&msg, "Суть обращения", "Принятые меры", template)?);

    let answer_label = "Ответ клиенту";
    let answer_start = find_anchor(&msg, answer_label, template)?;
    let answer_begin = skip_chars(&msg, answer_start, answer_label.chars().count() + 1);
    parsed.set(ParsedField::Answer, clean_field(&msg[answer_begin..]));

    let station = match (
        first_label(&msg, &STATION_LABELS),
        first_label(&msg, &DATE_LABELS),
    ) {
        (Some((station_pos, label)), Some((date_pos, _))) => {
            clean_field(&between(&msg, station_pos + label.len(), date_pos).replace('\n', ""))
        }
        _ => String::new(),
    };
    parsed.set(ParsedField::Station, station);

    Ok(parsed)
}
