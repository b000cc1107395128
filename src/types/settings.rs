use bon::bon;
use strum::{AsRefStr, Display};

use crate::style::DEFAULT_SPEECH_STYLE;

/// Markup language of the input expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// LaTeX math source, without `$` delimiters.
    #[default]
    Latex,
    /// A presentation MathML `<math>` element.
    MathMl,
}

/// Configuration for one verbalization call.
///
/// Settings are plain data: they are built once by the caller, borrowed by
/// the parser and verbalizer, and never mutated during a conversion. Use
/// [`Settings::builder`] to override individual values; every option left
/// unset takes the documented default.
///
/// # Examples
///
/// ```rust
/// use mathwords::Settings;
///
/// let settings = Settings::builder()
///     .display_mode(true)
///     .speech_style("SimpleSpeak".to_owned())
///     .build();
/// assert!(settings.display_mode);
/// assert_eq!(settings.speech_style, "SimpleSpeak");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Whether the expression is a standalone (display) equation.
    ///
    /// Display mode produces fuller phrasing: spoken delimiters, verbose
    /// fractions, "the" before big operators and an explicit end-of-matrix
    /// marker. Inline mode reads the same structure more tersely.
    pub display_mode: bool,
    /// Name of the speech style to use, one of
    /// [`get_speech_styles`](crate::get_speech_styles).
    pub speech_style: String,
    /// Maximum nesting depth of groups, arguments, scripts and delimiters.
    ///
    /// Deeper input is rejected with a parse error rather than risking
    /// unbounded recursion on hostile input.
    pub max_nesting: usize,
    /// Whether the expression is LaTeX or presentation MathML.
    pub input_format: InputFormat,
}

#[bon]
impl Settings {
    /// Creates a new [`Settings`] instance from optional configuration values.
    ///
    /// # Default Values
    /// - `display_mode`: `false` (inline)
    /// - `speech_style`: `"ClearSpeak"`
    /// - `max_nesting`: `256`
    /// - `input_format`: [`InputFormat::Latex`]
    #[must_use]
    #[builder]
    pub fn new(
        /// Display mode (true for standalone equations, false for inline).
        display_mode: Option<bool>,
        /// Name of a registered speech style.
        speech_style: Option<String>,
        /// Maximum nesting depth accepted by the parser.
        max_nesting: Option<usize>,
        /// Markup language of the input.
        input_format: Option<InputFormat>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            speech_style: speech_style.unwrap_or_else(|| DEFAULT_SPEECH_STYLE.to_owned()),
            max_nesting: max_nesting.unwrap_or(256).max(1),
            input_format: input_format.unwrap_or_default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.display_mode);
        assert_eq!(settings.speech_style, "ClearSpeak");
        assert_eq!(settings.max_nesting, 256);
        assert_eq!(settings.input_format, InputFormat::Latex);
    }

    #[test]
    fn test_input_format_names() {
        assert_eq!(InputFormat::MathMl.to_string(), "mathml");
        assert_eq!(InputFormat::Latex.as_ref(), "latex");
    }

    #[test]
    fn test_zero_nesting_is_clamped() {
        let settings = Settings::builder().max_nesting(0).build();
        assert_eq!(settings.max_nesting, 1);
    }
}
