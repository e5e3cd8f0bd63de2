//! Operations on annotated text: concatenation, splitting and filtering.

use crate::error::TextError;

use super::{byte_offset, char_boundaries, AnnotatedText, Span};

/// Characters a text may be split at.
const DELIMITERS: [char; 2] = [' ', '\n'];

impl AnnotatedText {
    /// Concatenate `self`, `sep` and `other`.
    ///
    /// Spans of `other` are shifted by the length of `self` plus `sep`.
    pub fn concat(&self, other: &AnnotatedText, sep: &str) -> AnnotatedText {
        let shift = self.len + sep.chars().count();

        let mut text = String::with_capacity(self.text.len() + sep.len() + other.text.len());
        text.push_str(&self.text);
        text.push_str(sep);
        text.push_str(&other.text);

        let spans = self
            .spans
            .iter()
            .cloned()
            .chain(
                other
                    .spans
                    .iter()
                    .map(|s| s.with_bounds(s.begin + shift, s.end + shift)),
            )
            .collect();

        AnnotatedText::from_parts(text, spans)
    }

    /// Concatenate all texts with `sep` between neighbours.
    pub fn concat_all(texts: &[AnnotatedText], sep: &str) -> AnnotatedText {
        let Some((first, rest)) = texts.split_first() else {
            return AnnotatedText::default();
        };
        rest.iter()
            .fold(first.clone(), |acc, text| acc.concat(text, sep))
    }

    /// Split at the delimiter character at `index`, removing it.
    ///
    /// A span crossing the delimiter is cut in two pieces of the same
    /// category; the delimiter itself belongs to neither.
    pub fn split_at(&self, index: usize) -> Result<(AnnotatedText, AnnotatedText), TextError> {
        let found = self
            .text
            .chars()
            .nth(index)
            .ok_or(TextError::IndexOutOfRange {
                index,
                len: self.len,
            })?;
        if !DELIMITERS.contains(&found) {
            return Err(TextError::InvalidSplitPoint { index, found });
        }

        let byte = byte_offset(&self.text, index);
        let left_text = self.text[..byte].to_string();
        let right_text = self.text[byte + found.len_utf8()..].to_string();

        let cut = index + 1;
        let mut left = Vec::new();
        let mut right = Vec::new();
        for span in &self.spans {
            if span.end <= index {
                left.push(span.clone());
            } else if span.begin >= cut {
                right.push(span.with_bounds(span.begin - cut, span.end - cut));
            } else {
                if span.begin < index {
                    left.push(span.with_bounds(span.begin, index));
                }
                if span.end > cut {
                    right.push(span.with_bounds(0, span.end - cut));
                }
            }
        }

        Ok((
            AnnotatedText::from_parts(left_text, left),
            AnnotatedText::from_parts(right_text, right),
        ))
    }

    /// Split on every occurrence of `symbol`, which is consumed.
    pub fn split_on(&self, symbol: char) -> Result<Vec<AnnotatedText>, TextError> {
        let mut parts = Vec::new();
        let mut current = self.clone();
        while let Some(index) = current.text.chars().position(|c| c == symbol) {
            let (left, right) = current.split_at(index)?;
            parts.push(left);
            current = right;
        }
        parts.push(current);
        Ok(parts)
    }

    /// Split at several delimiter positions given in the coordinates of `self`.
    pub fn split_at_indices(&self, indices: &[usize]) -> Result<Vec<AnnotatedText>, TextError> {
        if indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TextError::UnsortedIndices(indices.to_vec()));
        }

        let mut parts = Vec::with_capacity(indices.len() + 1);
        let mut current = self.clone();
        let mut shift = 0;
        for &index in indices {
            let (left, right) = current.split_at(index - shift)?;
            shift += left.len + 1;
            parts.push(left);
            current = right;
        }
        parts.push(current);
        Ok(parts)
    }

    /// Remove spans whose category is in `drop`, together with their text.
    ///
    /// With `drop_empty_lines`, lines left empty or blank are removed as well.
    pub fn drop_categories(
        &self,
        drop: &[&str],
        drop_empty_lines: bool,
    ) -> Result<AnnotatedText, TextError> {
        let bounds = char_boundaries(&self.text);
        let slice = |begin: usize, end: usize| &self.text[bounds[begin]..bounds[end]];

        let mut text = String::with_capacity(self.text.len());
        let mut len = 0;
        let mut spans = Vec::new();
        let mut cursor = 0;
        for span in &self.spans {
            text.push_str(slice(cursor, span.begin));
            len += span.begin - cursor;
            if !drop.contains(&span.category.as_str()) {
                text.push_str(slice(span.begin, span.end));
                spans.push(span.with_bounds(len, len + span.len()));
                len += span.len();
            }
            cursor = span.end;
        }
        text.push_str(slice(cursor, self.len));

        let result = AnnotatedText::from_parts(text, spans);
        if drop_empty_lines {
            result.drop_empty_lines()
        } else {
            Ok(result)
        }
    }

    /// Remove empty and whitespace-only lines.
    pub fn drop_empty_lines(&self) -> Result<AnnotatedText, TextError> {
        let lines: Vec<AnnotatedText> = self
            .split_on('\n')?
            .into_iter()
            .filter(|line| !line.text.trim().is_empty())
            .collect();
        Ok(AnnotatedText::concat_all(&lines, "\n"))
    }

    /// Replace `from` with `to` inside the spans accepted by `select`.
    ///
    /// Offsets are unchanged since one character replaces one character.
    pub fn replace_in_spans<F>(&self, select: F, from: char, to: char) -> AnnotatedText
    where
        F: Fn(&Span) -> bool,
    {
        let bounds = char_boundaries(&self.text);
        let mut text = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for span in self.spans.iter().filter(|s| select(s)) {
            text.push_str(&self.text[bounds[cursor]..bounds[span.begin]]);
            text.extend(
                self.text[bounds[span.begin]..bounds[span.end]]
                    .chars()
                    .map(|c| if c == from { to } else { c }),
            );
            cursor = span.end;
        }
        text.push_str(&self.text[bounds[cursor]..]);

        AnnotatedText::from_parts(text, self.spans.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> AnnotatedText {
        // "карта ****1234\nна АЗС 42"
        AnnotatedText::new(
            "карта ****1234\nна АЗС 42",
            vec![Span::new(6, 14, "card"), Span::new(18, 24, "azs")],
        )
        .unwrap()
    }

    #[test]
    fn test_concat_shifts_right_spans() {
        let a = AnnotatedText::new("ДТ", vec![Span::new(0, 2, "fuel")]).unwrap();
        let b = AnnotatedText::new("колонка 5", vec![Span::new(0, 9, "trk")]).unwrap();

        let joined = a.concat(&b, ", ");
        assert_eq!(joined.text(), "ДТ, колонка 5");
        assert_eq!(joined.len(), a.len() + 2 + b.len());
        assert_eq!(
            joined.spans(),
            &[Span::new(0, 2, "fuel"), Span::new(4, 13, "trk")]
        );
    }

    #[test]
    fn test_concat_all_empty() {
        assert_eq!(AnnotatedText::concat_all(&[], " "), AnnotatedText::default());
    }

    #[test]
    fn test_concat_all_separators() {
        let parts = vec![
            AnnotatedText::plain("a"),
            AnnotatedText::new("b", vec![Span::new(0, 1, "x")]).unwrap(),
            AnnotatedText::plain("c"),
        ];
        let joined = AnnotatedText::concat_all(&parts, "--");
        assert_eq!(joined.text(), "a--b--c");
        assert_eq!(joined.spans(), &[Span::new(3, 4, "x")]);
    }

    #[test]
    fn test_split_at_newline() {
        let (left, right) = sample().split_at(14).unwrap();
        assert_eq!(left.text(), "карта ****1234");
        assert_eq!(left.spans(), &[Span::new(6, 14, "card")]);
        assert_eq!(right.text(), "на АЗС 42");
        assert_eq!(right.spans(), &[Span::new(3, 9, "azs")]);
    }

    #[test]
    fn test_split_at_cuts_straddling_span() {
        let text = AnnotatedText::new("ул. Ленина 5", vec![Span::new(0, 12, "address")]).unwrap();
        let (left, right) = text.split_at(3).unwrap();
        assert_eq!(left.spans(), &[Span::new(0, 3, "address")]);
        assert_eq!(right.text(), "Ленина 5");
        assert_eq!(right.spans(), &[Span::new(0, 8, "address")]);
    }

    #[test]
    fn test_split_at_span_starting_on_delimiter() {
        let text = AnnotatedText::new("ab cd", vec![Span::new(2, 5, "x")]).unwrap();
        let (left, right) = text.split_at(2).unwrap();
        assert!(left.spans().is_empty());
        assert_eq!(right.spans(), &[Span::new(0, 2, "x")]);
    }

    #[test]
    fn test_split_round_trip() {
        let original = sample();
        let (left, right) = original.split_at(5).unwrap();
        let rejoined = left.concat(&right, " ");
        assert_eq!(rejoined.text(), original.text());
        assert_eq!(rejoined.spans(), original.spans());
    }

    #[test]
    fn test_split_at_errors() {
        let text = sample();
        assert_eq!(
            text.split_at(0).unwrap_err(),
            TextError::InvalidSplitPoint { index: 0, found: 'к' }
        );
        assert_eq!(
            text.split_at(24).unwrap_err(),
            TextError::IndexOutOfRange { index: 24, len: 24 }
        );
    }

    #[test]
    fn test_split_on_symbol() {
        let lines = sample().split_on('\n').unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans(), &[Span::new(3, 9, "azs")]);

        let single = AnnotatedText::plain("без переносов").split_on('\n').unwrap();
        assert_eq!(single, vec![AnnotatedText::plain("без переносов")]);
    }

    #[test]
    fn test_split_on_consecutive_delimiters() {
        let parts = AnnotatedText::plain("a\n\nb").split_on('\n').unwrap();
        let texts: Vec<&str> = parts.iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_at_indices() {
        let parts = sample().split_at_indices(&[5, 14, 21]).unwrap();
        let texts: Vec<&str> = parts.iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["карта", "****1234", "на АЗС", "42"]);
        assert_eq!(parts[1].spans(), &[Span::new(0, 8, "card")]);
        assert_eq!(parts[2].spans(), &[Span::new(3, 6, "azs")]);
        assert_eq!(parts[3].spans(), &[Span::new(0, 2, "azs")]);
    }

    #[test]
    fn test_split_at_indices_unsorted() {
        assert_eq!(
            sample().split_at_indices(&[14, 5]).unwrap_err(),
            TextError::UnsortedIndices(vec![14, 5])
        );
        assert!(sample().split_at_indices(&[5, 5]).is_err());
    }

    #[test]
    fn test_drop_categories_removes_text() {
        let text = AnnotatedText::new(
            "Добрый день! Карта ****1234 не работает",
            vec![Span::new(0, 12, "greetings"), Span::new(19, 27, "card")],
        )
        .unwrap();

        let dropped = text.drop_categories(&["greetings"], true).unwrap();
        assert_eq!(dropped.text(), " Карта ****1234 не работает");
        assert_eq!(dropped.spans(), &[Span::new(7, 15, "card")]);
        assert_eq!(dropped.span_text(&dropped.spans()[0]), "****1234");
    }

    #[test]
    fn test_drop_categories_empty_set_is_noop() {
        let text = sample();
        let dropped = text.drop_categories(&[], true).unwrap();
        assert_eq!(dropped, text);
    }

    #[test]
    fn test_drop_categories_collapses_blank_lines() {
        let text = AnnotatedText::new(
            "С уважением,\nИванов\n\n  \nкарта 1234",
            vec![Span::new(0, 19, "corp_info"), Span::new(24, 34, "card")],
        )
        .unwrap();

        let dropped = text.drop_categories(&["corp_info"], true).unwrap();
        assert_eq!(dropped.text(), "карта 1234");
        assert_eq!(dropped.spans(), &[Span::new(0, 10, "card")]);

        let kept_lines = text.drop_categories(&["corp_info"], false).unwrap();
        assert_eq!(kept_lines.text(), "\n\n  \nкарта 1234");
    }

    #[test]
    fn test_replace_in_spans() {
        let text = AnnotatedText::new(
            "ул. Ленина,\nд. 5\nспасибо",
            vec![Span::new(0, 16, "address")],
        )
        .unwrap();
        let flat = text.replace_in_spans(|s| s.category == "address", '\n', ' ');
        assert_eq!(flat.text(), "ул. Ленина, д. 5\nспасибо");
        assert_eq!(flat.spans(), text.spans());
    }
}
