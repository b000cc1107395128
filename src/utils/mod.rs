//! Number words for the verbalizer
//!
//! Cardinals ("two"), ordinals ("fourth", "4th") and fraction denominators
//! ("half", "thirds"). Only the small range that spoken math actually needs
//! is spelled out; larger numbers fall back to numerals.

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const ORDINALS: [&str; 20] = [
    "zeroth",
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
];

/// Spells out `n` for `n < 20`; larger numbers are returned as numerals.
///
/// # Examples
/// ```
/// use mathwords::utils::cardinal;
///
/// assert_eq!(cardinal(2), "two");
/// assert_eq!(cardinal(42), "42");
/// ```
#[must_use]
pub fn cardinal(n: usize) -> String {
    ONES.get(n).map_or_else(|| n.to_string(), |word| (*word).to_owned())
}

/// Spells out the ordinal of `n` for `n < 20`, falling back to
/// [`ordinal_suffix`].
#[must_use]
pub fn ordinal_word(n: usize) -> String {
    ORDINALS
        .get(n)
        .map_or_else(|| ordinal_suffix(n), |word| (*word).to_owned())
}

/// Writes `n` as a numeral with its English ordinal suffix: `1st`, `12th`,
/// `23rd`.
#[must_use]
pub fn ordinal_suffix(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Word naming the parts of a whole split `denominator` ways, for the
/// denominators read as common fractions (2 to 10).
///
/// `plural` selects "thirds" over "third"; a half is "half" or "halves".
#[must_use]
pub fn denominator_word(denominator: u32, plural: bool) -> Option<&'static str> {
    let (one, many) = match denominator {
        2 => ("half", "halves"),
        3 => ("third", "thirds"),
        4 => ("quarter", "quarters"),
        5 => ("fifth", "fifths"),
        6 => ("sixth", "sixths"),
        7 => ("seventh", "sevenths"),
        8 => ("eighth", "eighths"),
        9 => ("ninth", "ninths"),
        10 => ("tenth", "tenths"),
        _ => return None,
    };
    Some(if plural { many } else { one })
}

/// Parses a token of plain ASCII digits as an integer.
#[must_use]
pub fn small_integer(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
