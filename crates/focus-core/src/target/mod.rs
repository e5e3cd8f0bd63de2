//! Target text: the body without boilerplate and value-only lines.

mod clear;

pub use clear::clear_text;

use crate::error::TextError;
use crate::text::AnnotatedText;

/// Boilerplate categories removed together with their text.
pub const NOISE_CATEGORIES: [&str; 4] = ["corp_info", "mail_info", "tech_info", "greetings"];

/// Structured-value categories. A line made only of these carries no prose.
pub const MEANINGFUL_CATEGORIES: [&str; 12] = [
    "address", "azs", "card", "company", "date", "fuel", "litr", "money", "phone", "time", "trk",
    "payment",
];

/// Characters stripped from line ends before looking for residual prose.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~«»—…0123456789";

/// Denoise tagged body text.
///
/// Multi-line entities are flattened onto one line, noise spans and their
/// text are dropped, and the lines that still carry prose are joined with
/// single spaces. The returned spans are valid against the returned text.
pub fn extract_target_text(body: &AnnotatedText) -> Result<AnnotatedText, TextError> {
    let flattened = body.replace_in_spans(|span| !is_noise(&span.category), '\n', ' ');
    let denoised = flattened.drop_categories(&NOISE_CATEGORIES, true)?;

    let mut lines = Vec::new();
    for line in denoised.split_on('\n')? {
        if has_prose(&line)? {
            lines.push(line);
        }
    }
    Ok(AnnotatedText::concat_all(&lines, " "))
}

fn is_noise(category: &str) -> bool {
    NOISE_CATEGORIES.contains(&category)
}

/// Whether a line has text left once structured values are removed.
fn has_prose(line: &AnnotatedText) -> Result<bool, TextError> {
    let residual = line.drop_categories(&MEANINGFUL_CATEGORIES, true)?;
    let stripped = residual
        .text()
        .trim_matches(|c: char| PUNCTUATION.contains(c) || c == ' ' || c == '\t')
        .trim();
    Ok(!stripped.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_noise_and_value_lines_removed() {
        let body = AnnotatedText::new(
            "Здравствуйте!\n****1234\nна АЗС 42 не работает\nС уважением, Иван",
            vec![
                Span::new(0, 13, "greetings"),
                Span::new(14, 22, "card"),
                Span::new(26, 32, "azs"),
                Span::new(45, 62, "greetings"),
            ],
        )
        .unwrap();

        let target = extract_target_text(&body).unwrap();
        assert_eq!(target.text(), "на АЗС 42 не работает");
        assert_eq!(target.spans(), &[Span::new(3, 9, "azs")]);
    }

    #[test]
    fn test_multiline_entity_flattened() {
        let body = AnnotatedText::new(
            "адрес: ул. Ленина,\nд. 5\nспасибо",
            vec![Span::new(7, 23, "address")],
        )
        .unwrap();

        let target = extract_target_text(&body).unwrap();
        assert_eq!(target.text(), "адрес: ул. Ленина, д. 5 спасибо");
        assert_eq!(target.span_text(&target.spans()[0]), "ул. Ленина, д. 5");
    }

    #[test]
    fn test_punctuation_only_residual_dropped() {
        let body = AnnotatedText::new("12.03.2024, 15:40 —\nзалил не тот бензин", vec![
            Span::new(0, 10, "date"),
            Span::new(12, 17, "time"),
        ])
        .unwrap();

        let target = extract_target_text(&body).unwrap();
        assert_eq!(target.text(), "залил не тот бензин");
        assert!(target.spans().is_empty());
    }

    #[test]
    fn test_untagged_text_keeps_prose_lines() {
        let body = AnnotatedText::plain("первая строка\n\n 42 \nвторая");
        let target = extract_target_text(&body).unwrap();
        assert_eq!(target.text(), "первая строка вторая");
    }

    #[test]
    fn test_empty_body() {
        let target = extract_target_text(&AnnotatedText::default()).unwrap();
        assert_eq!(target, AnnotatedText::default());
    }
}
