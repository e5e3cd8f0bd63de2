//! Hotline forwards and site feedback.

use super::{anchored_section, clean_field, skip_chars};
use crate::error::ParseError;
use crate::template::{ParsedFields, TemplateId};

/// Subject markers for free-form letters, tried in order, with the number of
/// decoration characters following each.
const FREE_TEXT_SUBJECTS: [(&str, usize); 3] = [
    ("Тема: [☝❗EXTERNAL❗]", 1),
    ("Тема: ", 0),
    ("Subject: [☝❗EXTERNAL❗]", 1),
];

pub(super) fn parse_forward(msg: &str) -> Result<ParsedFields, ParseError> {
    let body = anchored_section(
        msg,
        "Текст сообщения:",
        "Сообщение сгенерировано автоматически.",
        TemplateId::HotlineForward,
    )?;
    Ok(ParsedFields::with_body(body))
}

pub(super) fn parse_feedback(msg: &str) -> Result<ParsedFields, ParseError> {
    let body = anchored_section(
        msg,
        "Ваше сообщение:",
        "Я ознакомлен(-а) с положением",
        TemplateId::HotlineFeedback,
    )?;
    Ok(ParsedFields::with_body(body))
}

/// Body runs from the first known subject marker to the end of the message.
pub(super) fn parse_free_text(msg: &str) -> Result<ParsedFields, ParseError> {
    for (marker, decoration) in FREE_TEXT_SUBJECTS {
        if let Some(start) = msg.find(marker) {
            let begin = skip_chars(msg, start, marker.chars().count() + decoration);
            return Ok(ParsedFields::with_body(clean_field(&msg[begin..])));
        }
    }
    let anchors: Vec<_> = FREE_TEXT_SUBJECTS.iter().map(|(marker, _)| *marker).collect();
    Err(ParseError::AnchorNotFound {
        template: TemplateId::HotlineFreeText,
        anchor: anchors.join(" | "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_message;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_forward_body() {
        let msg = "Сообщение из формы HOTLINE\nТекст сообщения: Кассир обсчитал на 200 рублей.\n\n\
                   Сообщение сгенерировано автоматически.";
        let parsed = parse_message(TemplateId::HotlineForward, msg).unwrap();
        assert_eq!(parsed.body, "Кассир обсчитал на 200 рублей");
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn test_feedback_body() {
        let msg = "Ваше сообщение:\nНе начислили баллы!\nЯ ознакомлен(-а) с положением о персональных данных";
        let parsed = parse_message(TemplateId::HotlineFeedback, msg).unwrap();
        assert_eq!(parsed.body, "Не начислили баллы");
    }

    #[test]
    fn test_free_text_subjects() {
        let parsed = parse_message(TemplateId::HotlineFreeText, "From: x\nТема: [☝❗EXTERNAL❗] Жалоба на АЗС").unwrap();
        assert_eq!(parsed.body, "Жалоба на АЗС");

        let parsed = parse_message(TemplateId::HotlineFreeText, "Тема: Жалоба\nтекст письма").unwrap();
        assert_eq!(parsed.body, "Жалоба\nтекст письма");

        let parsed = parse_message(TemplateId::HotlineFreeText, "Subject: [☝❗EXTERNAL❗] Refund").unwrap();
        assert_eq!(parsed.body, "Refund");
    }

    #[test]
    fn test_free_text_without_subject() {
        let err = parse_message(TemplateId::HotlineFreeText, "просто текст").unwrap_err();
        assert!(matches!(
            err,
            ParseError::AnchorNotFound { template: TemplateId::HotlineFreeText, .. }
        ));
    }
}
