//! mathwords - LaTeX mathematics read aloud in English
//!
//! Converts LaTeX math source into a single line of English suitable for a
//! screen reader or text-to-speech engine. Presentation MathML is accepted
//! as well, through [`verbalize_mathml`]. Conversion runs in three stages:
//! the [`lexer`] (or the [`mathml`] reader) splits the source into tokens,
//! the [`parser`] builds an expression tree with explicit precedence, and
//! the verbalizer walks that tree in a chosen speech style.
//!
//! # Examples
//!
//! ```rust
//! use mathwords::verbalize;
//!
//! let speech = verbalize(r"\frac{1}{2}", false, "ClearSpeak").unwrap();
//! assert_eq!(speech, "1 half");
//!
//! let speech = verbalize(r"(a+b)^2", false, "SimpleSpeak").unwrap();
//! assert!(speech.contains("squared"));
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
pub mod build_speech;
pub mod core;
pub mod define_environment;
pub mod define_function;
pub mod functions;
pub mod lexer;
/// Presentation MathML input, read into the parser's token stream.
pub mod mathml;
pub mod namespace;
/// Tokenizing and parsing in one step.
pub mod parse_tree;
/// Recursive-descent parser for LaTeX mathematical expressions.
pub mod parser;
pub mod style;
pub mod symbols;
pub mod types;
pub mod unicode;
pub mod utils;
pub mod utterance;

/// Converts one LaTeX expression to English speech.
///
/// # Parameters
///
/// * `expression` - LaTeX math source, without surrounding `$` delimiters
/// * `display_mode` - `true` for a standalone equation, which is read more
///   explicitly
/// * `speech_style` - one of [`get_speech_styles`], matched ignoring case
///
/// # Errors
///
/// - [`MathwordsError::EmptyInput`] for blank or content-free input
/// - [`MathwordsError::UnknownStyle`] for an unregistered style name
/// - [`MathwordsError::Lex`] and [`MathwordsError::Parse`] for malformed or
///   unsupported LaTeX, with the byte offset of the fault
/// - [`MathwordsError::Mathml`] for malformed MathML, through
///   [`verbalize_mathml`] or [`Settings::input_format`]
///
/// # Examples
///
/// ```rust
/// use mathwords::{MathwordsError, verbalize};
///
/// assert_eq!(
///     verbalize(r"\sqrt{x}", false, "ClearSpeak").unwrap(),
///     "the square root of x"
/// );
///
/// match verbalize(r"\frac{a}{", false, "ClearSpeak") {
///     Err(MathwordsError::Parse(err)) => println!("bad input: {err}"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub use crate::core::verbalize;

/// Converts one expression using a full [`Settings`] value.
pub use crate::core::verbalize_with_settings;

/// Converts one presentation MathML `<math>` element to English speech.
///
/// ```rust
/// use mathwords::verbalize_mathml;
///
/// let mathml = "<math><msqrt><mi>x</mi></msqrt></math>";
/// assert_eq!(verbalize_mathml(mathml, false, "ClearSpeak").unwrap(), "the square root of x");
/// ```
pub use crate::core::verbalize_mathml;

/// Converts a list of `(expression, display_mode)` pairs in one style.
///
/// The first failing item aborts the whole call.
///
/// ```rust
/// use mathwords::verbalize_batch;
///
/// let speech = verbalize_batch(&[("x^2", None), ("y^3", Some(true))], "ClearSpeak").unwrap();
/// assert_eq!(speech, ["x squared", "y cubed"]);
/// ```
pub use crate::core::verbalize_batch;

/// Lists the registered speech style names, default first.
pub use crate::core::get_speech_styles;

/// Parses an expression and returns its expression tree.
///
/// The tree is exposed for inspection and testing; the speech functions are
/// the stable interface.
pub use crate::parse_tree::parse_tree;

/// Error type returned by every public entry point.
pub use crate::types::MathwordsError;

/// Syntax error with the location of the offending token.
pub use crate::types::{LexError, MathmlError, ParseError};

/// Per-call configuration, built with `Settings::builder()`.
pub use crate::types::{InputFormat, Settings};

pub use crate::style::DEFAULT_SPEECH_STYLE;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
