use thiserror::Error;

use crate::types::{LexError, ParseError};

/// Every way a public conversion call can fail.
///
/// Each variant is terminal for the call that produced it: no partial
/// output is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum MathwordsError {
    /// The expression was empty or whitespace only.
    #[error("Input string is empty")]
    EmptyInput,
    /// A batch call was given no expressions.
    #[error("Expression list is empty")]
    EmptyBatch,
    /// The requested speech style is not registered.
    #[error("Unknown speech style: {name}")]
    UnknownStyle {
        /// The rejected style name.
        name: String,
    },
    /// The source contains a character sequence the lexer rejects.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens do not form a supported expression.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The MathML input is malformed or uses unsupported markup.
    #[error(transparent)]
    Mathml(#[from] MathmlError),
}

/// Failure to read a presentation MathML document.
#[derive(Debug, Error)]
pub enum MathmlError {
    /// The input is not well-formed XML.
    #[error("Malformed MathML: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The document element is something other than `<math>`.
    #[error("Expected a <math> element, found <{found}>")]
    NotMath {
        /// Local name of the document element.
        found: String,
    },
    /// An element with no reading in this crate.
    #[error("Unsupported MathML element <{name}> at position {position}")]
    UnsupportedElement {
        /// Local name of the element.
        name: String,
        /// Byte offset of the element's start tag.
        position: usize,
    },
    /// A layout element with the wrong number of children (`<mfrac>` with
    /// one child).
    #[error("<{name}> at position {position} needs {expected} children, found {found}")]
    WrongArity {
        /// Local name of the element.
        name: String,
        /// Number of element children the layout requires.
        expected: usize,
        /// Number of element children present.
        found: usize,
        /// Byte offset of the element's start tag.
        position: usize,
    },
    /// Elements nested deeper than [`Settings::max_nesting`](crate::Settings::max_nesting).
    #[error("MathML nested deeper than {limit} at position {position}")]
    TooDeep {
        /// The configured nesting limit.
        limit: usize,
        /// Byte offset of the first element past the limit.
        position: usize,
    },
}

impl MathmlError {
    /// Byte offset of the offending element, when known.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::UnsupportedElement { position, .. }
            | Self::WrongArity { position, .. }
            | Self::TooDeep { position, .. } => Some(*position),
            Self::Xml(_) | Self::NotMath { .. } => None,
        }
    }
}

impl MathwordsError {
    /// Byte offset of the fault in the source expression, when known.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lex(err) => Some(err.position),
            Self::Parse(err) => err.position,
            Self::Mathml(err) => err.position(),
            Self::EmptyInput | Self::EmptyBatch | Self::UnknownStyle { .. } => None,
        }
    }

    /// Returns `true` for caller mistakes (empty input, empty batch, unknown
    /// style) as opposed to problems with the mathematics itself.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::EmptyBatch | Self::UnknownStyle { .. }
        )
    }
}
