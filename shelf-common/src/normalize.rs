//! Product title normalization
//!
//! Maps a free-text listing title to a canonical key so that listings for the
//! same product compare equal regardless of accents, unit spelling,
//! punctuation, case and spacing:
//!
//! 1. Diacritic folding (NFD, combining marks dropped)
//! 2. Portuguese unit words replaced by their abbreviations
//! 3. Quantities of 1000 ml / 1000 g or more folded to L / kg
//! 4. Everything but ASCII letters, digits and whitespace removed
//! 5. Lowercased, whitespace collapsed and trimmed
//!
//! The steps run in this order; each consumes the previous step's output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Unit words and the abbreviation each one is replaced with
pub const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("quilo", "kg"),
    ("quilos", "kg"),
    ("litro", "L"),
    ("litros", "L"),
    ("grama", "g"),
    ("gramas", "g"),
    ("mililitro", "ml"),
    ("mililitros", "ml"),
];

/// Lowercase unit word -> abbreviation
static UNIT_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| UNIT_SYNONYMS.iter().copied().collect());

/// Any unit word, longest first so "quilos" is not cut short at "quilo"
static UNIT_WORD: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&str> = UNIT_SYNONYMS.iter().map(|(word, _)| *word).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    Regex::new(&format!("(?i){}", words.join("|"))).expect("unit word pattern is valid")
});

/// A number followed by a unit abbreviation ending on a word boundary
static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(kg|ml|g|l)\b").expect("quantity pattern is valid")
});

/// Normalize a listing title to its canonical key
///
/// Total and pure: every input maps to some output, and empty or
/// whitespace-only input maps to the empty string.
///
/// # Examples
///
/// ```
/// use shelf_common::normalize;
///
/// assert_eq!(normalize("Açúcar Refinado - 1kg"), "acucar refinado 1kg");
/// assert_eq!(normalize("Leite Integral 1000ml"), "leite integral 1l");
/// assert_eq!(normalize("Arroz 5 Quilos"), "arroz 5kg");
/// ```
pub fn normalize(title: &str) -> String {
    let folded = fold_diacritics(title);
    let units = substitute_unit_words(&folded);
    let quantities = fold_quantities(&units);
    let stripped = strip_special_characters(&quantities);
    collapse_whitespace(&stripped)
}

/// Word-order-insensitive key used to decide whether two titles match
///
/// The normalized title with its space-separated words sorted.
///
/// ```
/// use shelf_common::equality_key;
///
/// assert_eq!(equality_key("1kg Arroz Tio João"), equality_key("Arroz Tio Joao 1 kg"));
/// ```
pub fn equality_key(title: &str) -> String {
    sort_words(&normalize(title))
}

/// Sort the space-separated words of an already normalized title
pub fn sort_words(normalized: &str) -> String {
    let mut words: Vec<&str> = normalized.split(' ').collect();
    words.sort_unstable();
    words.join(" ")
}

/// Decompose accented characters and drop the combining marks
fn fold_diacritics(title: &str) -> String {
    title.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Replace whole-word unit synonyms, ignoring case
///
/// A candidate touching a letter or digit on either side is part of a longer
/// word ("quilombo") and is left alone.
fn substitute_unit_words(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last = 0;

    for candidate in UNIT_WORD.find_iter(title) {
        let before = title[..candidate.start()].chars().next_back();
        let after = title[candidate.end()..].chars().next();
        if before.is_some_and(char::is_alphanumeric) || after.is_some_and(char::is_alphanumeric) {
            continue;
        }

        // Unicode case folding can match spellings outside the table
        let Some(abbreviation) = UNIT_TABLE.get(candidate.as_str().to_lowercase().as_str()) else {
            continue;
        };

        out.push_str(&title[last..candidate.start()]);
        out.push_str(abbreviation);
        last = candidate.end();
    }

    out.push_str(&title[last..]);
    out
}

/// Fold large quantities into the next unit and attach numbers to their units
///
/// `1500ml` becomes `1.5L`, `2000 g` becomes `2kg`; smaller quantities keep
/// their value and only lose the space between number and unit.
fn fold_quantities(title: &str) -> String {
    QUANTITY
        .replace_all(title, |caps: &Captures<'_>| {
            let number = &caps[1];
            let unit = &caps[2];

            let larger_unit = match unit.to_ascii_lowercase().as_str() {
                "ml" => Some("L"),
                "g" => Some("kg"),
                _ => None,
            };

            match larger_unit.and_then(|larger| thousandths(number).map(|value| (value, larger))) {
                Some((value, larger)) => format!("{value}{larger}"),
                None => format!("{number}{unit}"),
            }
        })
        .into_owned()
}

/// `number / 1000` without trailing zeros, if `number` is at least 1000
///
/// Numbers outside the decimal range are treated as not foldable.
fn thousandths(number: &str) -> Option<String> {
    let value = Decimal::from_str(number).ok()?;
    let thousand = Decimal::from(1000);
    if value < thousand {
        return None;
    }
    let quotient = value.checked_div(thousand)?;
    Some(quotient.normalize().to_string())
}

/// Keep ASCII letters, ASCII digits and whitespace only
fn strip_special_characters(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Lowercase, collapse whitespace runs and trim
fn collapse_whitespace(title: &str) -> String {
    title
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
