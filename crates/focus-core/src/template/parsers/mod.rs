//! Per-template field parsers.
//!
//! Parsers cut the message between literal anchors. Offsets are byte
//! positions in the message; anchor decorations are skipped by characters.

mod correspondence;
mod forms;
mod hotline;
mod ticket;

use tracing::debug;

use super::{ParsedFields, TemplateId};
use crate::error::ParseError;

/// Whether `c` counts as a word character for field trimming.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('А'..='я').contains(&c)
}

/// Trim whitespace, then any leading and trailing non-word characters.
///
/// Interior punctuation is kept.
pub fn clean_field(text: &str) -> String {
    text.trim()
        .trim_start_matches(|c: char| !is_word_char(c))
        .trim_end_matches(|c: char| !is_word_char(c))
        .to_string()
}

/// Parse a message already classified as `template`.
pub fn parse_message(template: TemplateId, msg: &str) -> Result<ParsedFields, ParseError> {
    let mut parsed = match template {
        TemplateId::TicketExport => ticket::parse(msg)?,
        TemplateId::AccountRemoval => forms::parse_account_removal(msg),
        TemplateId::StandardForm => forms::parse_standard(msg),
        TemplateId::DeviceComplaint => forms::parse_device_complaint(msg),
        TemplateId::HotlineForward => hotline::parse_forward(msg)?,
        TemplateId::HotlineFreeText => hotline::parse_free_text(msg)?,
        TemplateId::HotlineFeedback => hotline::parse_feedback(msg)?,
        TemplateId::CorporateResponse => correspondence::parse_corporate(msg),
        TemplateId::ComplaintBook => correspondence::parse_complaint_book(msg)?,
        TemplateId::NoText | TemplateId::HotlineEmpty => ParsedFields::default(),
        TemplateId::Other => ParsedFields::with_body(msg),
    };
    parsed.body = clean_field(&parsed.body);

    debug!(
        "Parsed {} message: body {} chars, {} fields",
        template,
        parsed.body.chars().count(),
        parsed.fields.len()
    );
    Ok(parsed)
}

/// Byte position of the first occurrence of a required anchor.
fn find_anchor(msg: &str, anchor: &str, template: TemplateId) -> Result<usize, ParseError> {
    msg.find(anchor).ok_or_else(|| ParseError::AnchorNotFound {
        template,
        anchor: anchor.to_string(),
    })
}

/// Byte position `count` characters after `pos`, clamped to the end.
fn skip_chars(msg: &str, pos: usize, count: usize) -> usize {
    msg[pos..]
        .char_indices()
        .nth(count)
        .map(|(offset, _)| pos + offset)
        .unwrap_or(msg.len())
}

/// Text between two byte positions; empty when the range is inverted.
fn between(msg: &str, begin: usize, end: usize) -> &str {
    if begin >= end { "" } else { &msg[begin..end] }
}

/// Text after `anchor` plus one decoration character, up to `terminator`.
fn anchored_section(
    msg: &str,
    anchor: &str,
    terminator: &str,
    template: TemplateId,
) -> Result<String, ParseError> {
    let start = find_anchor(msg, anchor, template)?;
    let end = find_anchor(msg, terminator, template)?;
    let begin = skip_chars(msg, start, anchor.chars().count() + 1);
    Ok(clean_field(between(msg, begin, end)))
}
