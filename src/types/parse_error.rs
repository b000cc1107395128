//! Positioned errors for the lexer and the parser
//!
//! Both error types carry the byte offset (and length) of the fault and
//! render a short excerpt of the surrounding source with the faulty span
//! underlined, so a caller scraping thousands of formulas can see at a
//! glance what went wrong.

use crate::types::SourceLocation;
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;
use thiserror::Error;

/// Structural failure while turning tokens into an expression tree.
#[derive(Debug, Error)]
#[error("Parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// The start position based on the passed-in token
    pub position: Option<usize>,
    /// The length of affected text based on the passed-in token
    pub length: Option<usize>,
    /// Additional context to render alongside the error.
    context: ErrorContext,
    /// Backtrace of the error stack
    #[cfg(feature = "backtrace")]
    pub backtrace: Box<Backtrace>,
}

impl ParseError {
    /// Create a new ParseError without location information.
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self::from_kind(kind.into(), ErrorContext::None)
    }

    /// Create a new ParseError located at a token (or anything else that
    /// knows its source span).
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        Self::from_kind(kind.into(), ErrorContext::from_provider(token))
    }

    fn from_kind(kind: ParseErrorKind, context: ErrorContext) -> Self {
        let (position, length) = context.span().unzip();
        Self {
            kind: Box::new(kind),
            position,
            length,
            context,
            #[cfg(feature = "backtrace")]
            backtrace: Box::new(Backtrace::force_capture()),
        }
    }
}

/// Describes the specific reason for a [`ParseError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `{` without its `}`, a stray `}`, or any other group that is not
    /// closed by the expected token.
    #[error("Expected '{expected}', found {found}")]
    UnbalancedBrace {
        /// The closing token that was required.
        expected: String,
        /// What was found instead.
        found: String,
    },
    /// A control sequence the registry does not know, typically an
    /// author-defined macro.
    #[error("Undefined control sequence: {name}")]
    UnknownCommand {
        /// The command including its backslash.
        name: String,
    },
    /// A token that cannot appear where it was found.
    #[error("Unexpected {found}, expected {expected}")]
    UnexpectedToken {
        /// The token that was found.
        found: String,
        /// What the grammar allowed at that point.
        expected: &'static str,
    },
    /// A command, script or operator whose argument is absent or empty.
    #[error("Missing argument for {command}")]
    MissingArgument {
        /// The command, script marker or operator missing an argument.
        command: String,
    },
    /// An environment that is not registered, or a `\begin` closed by an
    /// `\end` of a different name.
    #[error("{}", environment_message(.name, .closed_by))]
    UnknownEnvironment {
        /// The environment named by `\begin`.
        name: String,
        /// The mismatched name given to `\end`, if that was the failure.
        closed_by: Option<String>,
    },
    /// Blank input, or input with no content once comments and spacing are
    /// removed.
    #[error("Input string is empty")]
    EmptyInput,
}

fn environment_message(name: &str, closed_by: &Option<String>) -> String {
    match closed_by {
        Some(end) => format!(r"Mismatched: \begin{{{name}}} matched by \end{{{end}}}"),
        None => format!("No such environment: {name}"),
    }
}

/// Failure to split the source into tokens.
#[derive(Debug, Error)]
#[error("Lex error: {reason}{context}")]
pub struct LexError {
    /// Why the character sequence was rejected.
    pub reason: LexErrorReason,
    /// Byte offset of the offending character.
    pub position: usize,
    context: ErrorContext,
}

impl LexError {
    /// Create a lex error covering `loc`.
    #[must_use]
    pub fn new(reason: LexErrorReason, loc: SourceLocation) -> Self {
        Self {
            reason,
            position: loc.start,
            context: ErrorContext::Location(loc),
        }
    }
}

/// Describes the specific reason for a [`LexError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexErrorReason {
    /// A character with no meaning in math mode (`#`, `$`, control
    /// characters).
    #[error("Unexpected character: {character:?}")]
    UnexpectedCharacter {
        /// The rejected character.
        character: char,
    },
    /// A backslash at the very end of the input.
    #[error("Backslash with no following command name")]
    DanglingBackslash,
}

#[derive(Debug)]
enum ErrorContext {
    None,
    Location(SourceLocation),
}

impl ErrorContext {
    fn from_provider(provider: &dyn ErrorLocationProvider) -> Self {
        provider
            .loc()
            .filter(|loc| loc.start() <= loc.end())
            .map_or(Self::None, |loc| Self::Location(loc.clone()))
    }

    fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::None => None,
            Self::Location(loc) => Some((loc.start, loc.end.saturating_sub(loc.start))),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Location(SourceLocation { input, start, end }) = self else {
            return Ok(());
        };
        let input_len = input.len();
        if *start == input_len {
            write!(f, " at end of input: ")?;
        } else {
            write!(f, " at position {}: ", start + 1)?;
        }

        let prefix_start = adjust_char_boundary(input, start.saturating_sub(15), false);
        if prefix_start > 0 {
            write!(f, "\u{2026}")?;
        }
        write!(f, "{}", &input[prefix_start..*start])?;
        for c in input[*start..*end].chars() {
            write!(f, "{c}\u{0332}")?;
        }
        let suffix_end = adjust_char_boundary(input, (*end + 15).min(input_len), true);
        write!(f, "{}", &input[*end..suffix_end])?;
        if suffix_end < input_len {
            write!(f, "\u{2026}")?;
        }
        Ok(())
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Trait for types that can provide error location information.
pub trait ErrorLocationProvider {
    /// Get the source location if available
    fn loc(&self) -> Option<&SourceLocation>;
}
