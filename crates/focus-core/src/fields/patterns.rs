//! Regex rule tables for field cleaning.

use lazy_static::lazy_static;
use regex::Regex;

/// Ordinal word stems mapped to pump numbers.
pub const ORDINAL_ROOTS: [(&str, &str); 10] = [
    ("перв", "1"),
    ("втор", "2"),
    ("трет", "3"),
    ("четв", "4"),
    ("пят", "5"),
    ("шест", "6"),
    ("седьм", "7"),
    ("восьм", "8"),
    ("девят", "9"),
    ("десят", "10"),
];

lazy_static! {
    // Card numbers: everything but digits and the mask character is noise
    pub static ref CARD_NOISE: Regex = Regex::new(r"[^0-9*]").unwrap();

    /// Card shapes in priority order; the first shape with a match wins.
    pub static ref CARD_SHAPES: Vec<Regex> = vec![
        // ************1794
        Regex::new(r"\*{12}\d{4}").unwrap(),
        // 2200********2086
        Regex::new(r"\d{4}\*+\d{4}").unwrap(),
        // 7825********1234, masked or not
        Regex::new(r"(?:7825|9000)[\d*]{12}").unwrap(),
        // *9119, ***1234
        Regex::new(r"\*+\d{1,4}").unwrap(),
        // 7825680601252380
        Regex::new(r"(?:7825|9000)\d{12}").unwrap(),
    ];

    pub static ref CARD_FALLBACK: Regex = Regex::new(r"[\d*]+").unwrap();

    // Station numbers
    pub static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();

    // Pump numbers: an ordinal word or a digit run (only 1-2 digit runs are kept)
    pub static ref PUMP_TOKEN: Regex = Regex::new(&format!(
        r"(?i)(?P<ord>(?:{})\w*)|(?P<num>\d+)",
        ORDINAL_ROOTS.iter().map(|(root, _)| *root).collect::<Vec<_>>().join("|")
    )).unwrap();

    // Fuel kinds
    pub static ref FUEL_DIESEL: Vec<Regex> = vec![
        Regex::new(r"(?i)\bдиз(?:ел|топ)\w*\b").unwrap(),
        Regex::new(r"(?i)\bдиз\.\s*топлив\w*\b").unwrap(),
        Regex::new(r"(?i)\bд/т\b").unwrap(),
        Regex::new(r"(?i)\bдт\b").unwrap(),
    ];

    pub static ref FUEL_GAS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(?:пропан|газ)\w*\b").unwrap(),
        Regex::new(r"(?i)\bсуг\b").unwrap(),
    ];

    pub static ref FUEL_HUNDRED: Regex = Regex::new(r"(?i)\bсот\w*\b").unwrap();

    // АИ-95, A92, G-100, 95-го
    pub static ref FUEL_OCTANE: Regex = Regex::new(
        r"(?i)\b(?:(?:аи|а|g)[-\s]?)?(?P<num>\d{2,3})(?:-м|-?го)?\b"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
