//! Final clearing of target text before topic classification.

use lazy_static::lazy_static;
use regex::Regex;

use crate::fields::patterns::WHITESPACE_RUN;

/// Single characters removed everywhere.
const REMOVED_SYMBOLS: [char; 7] = ['\u{a0}', '>', '<', '❗', '☝', '[', ']'];

/// Literal fragments removed everywhere.
const REMOVED_FRAGMENTS: [&str; 1] = ["EXTERNAL"];

lazy_static! {
    static ref LINK: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref FOOTNOTE: Regex = Regex::new(r"\[\d+\]").unwrap();
    static ref ATTACHMENT_NAME: Regex = Regex::new(r"(?i)\b[\w\-]+\.(?:pdf|png|jpg)\b").unwrap();
}

/// Strip links, footnote markers, mail decorations and attachment names.
pub fn clear_text(text: &str) -> String {
    let text = LINK.replace_all(text, "");
    let text = FOOTNOTE.replace_all(&text, "");
    let text: String = text.chars().filter(|c| !REMOVED_SYMBOLS.contains(c)).collect();

    let text = ATTACHMENT_NAME.replace_all(&text, "");
    let mut text = WHITESPACE_RUN.replace_all(&text, " ").trim().to_string();

    for fragment in REMOVED_FRAGMENTS {
        text = text.replace(fragment, "");
    }
    text.trim_matches([' ', '\t']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_text() {
        let text = "Тема: [☝❗EXTERNAL❗] Жалоба https://x.ru/a?b=1 [12] файл scan_01.PDF\u{a0} тут";
        assert_eq!(clear_text(text), "Тема:  Жалоба файл тут");
    }

    #[test]
    fn test_clear_keeps_plain_text() {
        assert_eq!(clear_text("  обычный текст, 95-й бензин "), "обычный текст, 95-й бензин");
    }

    #[test]
    fn test_quote_marks_removed() {
        assert_eq!(clear_text("> цитата <ответ>"), "цитата ответ");
    }
}
