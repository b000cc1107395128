//! Core type definitions shared by the lexer, parser and verbalizer

mod source_location;
pub use source_location::SourceLocation;

mod parse_error;
pub use parse_error::{ErrorLocationProvider, LexError, LexErrorReason, ParseError, ParseErrorKind};

mod error;
pub use error::{MathmlError, MathwordsError};

mod tokens;
pub use tokens::{Token, TokenKind};

mod settings;
pub use settings::{InputFormat, Settings};
