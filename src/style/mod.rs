//! Speech style registry
//!
//! A speech style is a fixed bundle of phrasing rules: how fractions,
//! powers and bounds are worded, whether grouping is announced with
//! delimiter names or with "the quantity", and which operator words replace
//! the defaults from [`crate::symbols`]. Styles are static data shared by
//! reference; the registry is never modified at run time.
//!
//! # Examples
//!
//! ```rust
//! use mathwords::style::{get_style, style_names};
//!
//! assert_eq!(style_names(), ["ClearSpeak", "SimpleSpeak"]);
//! assert_eq!(get_style("simplespeak").map(|s| s.name), Some("SimpleSpeak"));
//! assert!(get_style("Nemeth").is_none());
//! ```

mod clearspeak;
mod simplespeak;

use crate::symbols;

pub use clearspeak::CLEARSPEAK;
pub use simplespeak::SIMPLESPEAK;

/// Name of the style used when the caller does not pick one.
pub const DEFAULT_SPEECH_STYLE: &str = "ClearSpeak";

/// How a fraction that is not a plain `a over b` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionPhrasing {
    /// "the fraction with numerator N and denominator D"
    Verbose,
    /// "fraction, N over D, end fraction"
    Bracketed,
}

/// How the bounds of a big operator are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPhrasing {
    /// "the sum from i equals 1 to n of ..."
    FromTo,
    /// "the sum over i from 1 to n of ..."
    RangingOver,
}

/// How small counts (matrix rows, root degrees) are said.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberForm {
    /// "row two", "the fourth root"
    Words,
    /// "row 2", "the 4th root"
    Numerals,
}

/// A named bundle of phrasing rules.
#[derive(Debug)]
pub struct SpeechStyle {
    /// Registered name, as listed by [`style_names`].
    pub name: &'static str,
    /// Phrasing of compound fractions.
    pub fraction: FractionPhrasing,
    /// Read small numeric fractions as "2 thirds".
    pub common_fractions: bool,
    /// Read numeric exponents as ordinals: "to the 4th power".
    pub ordinal_powers: bool,
    /// Phrasing of big-operator bounds.
    pub bounds: BoundsPhrasing,
    /// Form of row numbers and root degrees.
    pub numbers: NumberForm,
    /// Speak parentheses and brackets by name even in inline mode.
    pub speak_delimiters: bool,
    /// Put "the" before a known function applied to an argument.
    pub function_article: bool,
    /// Phrase announcing a grouped sub-expression.
    pub quantity: &'static str,
    /// Word for a prefix minus sign.
    pub negative: &'static str,
    /// Marker closing a compound exponent.
    pub end_exponent: &'static str,
    /// Marker closing a compound radicand.
    pub end_root: &'static str,
    /// Marker closing a compound subscript.
    pub end_subscript: &'static str,
    /// Operator and symbol words replacing the defaults, keyed by the
    /// source text (`\cdot`, `<`).
    pub words: phf::Map<&'static str, &'static str>,
}

impl SpeechStyle {
    /// Spoken word for an operator or symbol: this style's override, else
    /// the default from the symbol table.
    #[must_use]
    pub fn symbol_word(&self, text: &str) -> Option<&'static str> {
        self.words
            .get(text)
            .copied()
            .or_else(|| symbols::lookup(text).map(|symbol| symbol.speech))
    }

    /// Says a small count the way this style says numbers.
    #[must_use]
    pub fn count(&self, n: usize) -> String {
        match self.numbers {
            NumberForm::Words => crate::utils::cardinal(n),
            NumberForm::Numerals => n.to_string(),
        }
    }

    /// Says an ordinal the way this style says numbers.
    #[must_use]
    pub fn ordinal(&self, n: usize) -> String {
        match self.numbers {
            NumberForm::Words => crate::utils::ordinal_word(n),
            NumberForm::Numerals => crate::utils::ordinal_suffix(n),
        }
    }
}

/// Every registered style, in listing order.
static STYLES: [&SpeechStyle; 2] = [&CLEARSPEAK, &SIMPLESPEAK];

/// Finds a style by name, ignoring ASCII case.
#[must_use]
pub fn get_style(name: &str) -> Option<&'static SpeechStyle> {
    STYLES
        .iter()
        .copied()
        .find(|style| style.name.eq_ignore_ascii_case(name))
}

/// Names of the registered styles, default first.
#[must_use]
pub fn style_names() -> Vec<&'static str> {
    STYLES.iter().map(|style| style.name).collect()
}
