//! Unicode superscript and subscript characters
//!
//! Pre-rendered scripts such as `x²` or `a₁` show up in copy-pasted math.
//! The parser rewrites a run of them into an ordinary `^{...}` or `_{...}`
//! argument, so `x²` and `x^{2}` produce the same tree.

use phf::phf_map;

/// Which way a Unicode script character is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// A raised character, read as an exponent.
    Superscript,
    /// A lowered character, read as a subscript.
    Subscript,
}

use ScriptKind::{Subscript as Sub, Superscript as Sup};

static SCRIPT_CHARS: phf::Map<char, (ScriptKind, &'static str)> = phf_map! {
    '\u{2070}' => (Sup, "0"),
    '\u{b9}' => (Sup, "1"),
    '\u{b2}' => (Sup, "2"),
    '\u{b3}' => (Sup, "3"),
    '\u{2074}' => (Sup, "4"),
    '\u{2075}' => (Sup, "5"),
    '\u{2076}' => (Sup, "6"),
    '\u{2077}' => (Sup, "7"),
    '\u{2078}' => (Sup, "8"),
    '\u{2079}' => (Sup, "9"),
    '\u{207a}' => (Sup, "+"),
    '\u{207b}' => (Sup, "-"),
    '\u{207c}' => (Sup, "="),
    '\u{207d}' => (Sup, "("),
    '\u{207e}' => (Sup, ")"),
    '\u{2071}' => (Sup, "i"),
    '\u{207f}' => (Sup, "n"),
    '\u{1d40}' => (Sup, "T"),
    '\u{2080}' => (Sub, "0"),
    '\u{2081}' => (Sub, "1"),
    '\u{2082}' => (Sub, "2"),
    '\u{2083}' => (Sub, "3"),
    '\u{2084}' => (Sub, "4"),
    '\u{2085}' => (Sub, "5"),
    '\u{2086}' => (Sub, "6"),
    '\u{2087}' => (Sub, "7"),
    '\u{2088}' => (Sub, "8"),
    '\u{2089}' => (Sub, "9"),
    '\u{208a}' => (Sub, "+"),
    '\u{208b}' => (Sub, "-"),
    '\u{208c}' => (Sub, "="),
    '\u{208d}' => (Sub, "("),
    '\u{208e}' => (Sub, ")"),
    '\u{2090}' => (Sub, "a"),
    '\u{2091}' => (Sub, "e"),
    '\u{2095}' => (Sub, "h"),
    '\u{1d62}' => (Sub, "i"),
    '\u{2c7c}' => (Sub, "j"),
    '\u{2096}' => (Sub, "k"),
    '\u{2097}' => (Sub, "l"),
    '\u{2098}' => (Sub, "m"),
    '\u{2099}' => (Sub, "n"),
    '\u{2092}' => (Sub, "o"),
    '\u{209a}' => (Sub, "p"),
    '\u{1d63}' => (Sub, "r"),
    '\u{209b}' => (Sub, "s"),
    '\u{209c}' => (Sub, "t"),
    '\u{1d64}' => (Sub, "u"),
    '\u{1d65}' => (Sub, "v"),
    '\u{2093}' => (Sub, "x"),
};

/// Classifies a Unicode script character and returns its plain form.
#[must_use]
pub fn script_char(ch: char) -> Option<(ScriptKind, &'static str)> {
    SCRIPT_CHARS.get(&ch).copied()
}

/// Like [`script_char`], for a token text holding exactly one character.
#[must_use]
pub fn script_text(text: &str) -> Option<(ScriptKind, &'static str)> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    script_char(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_classification() {
        assert_eq!(script_char('²'), Some((ScriptKind::Superscript, "2")));
        assert_eq!(script_char('₁'), Some((ScriptKind::Subscript, "1")));
        assert_eq!(script_char('ⁿ'), Some((ScriptKind::Superscript, "n")));
        assert_eq!(script_char('2'), None);
    }

    #[test]
    fn test_script_text_requires_single_char() {
        assert!(script_text("²").is_some());
        assert!(script_text("²³").is_none());
        assert!(script_text("").is_none());
    }
}
