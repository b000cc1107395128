use strum::AsRefStr;

use crate::types::{ErrorLocationProvider, SourceLocation};

/// Lexical category of a [`Token`].
///
/// The lexer decides the category once; the parser never re-inspects raw
/// characters to find out what a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// A backslash command: `\frac`, `\alpha`, `\{`, `\,`. The token text
    /// keeps the backslash.
    ControlSequence,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `^`
    Superscript,
    /// `_`
    Subscript,
    /// `'`, one token per prime.
    Prime,
    /// A run of digits with at most one decimal point: `10000`, `3.14`.
    Number,
    /// A single letter. Multi-letter names are juxtaposed letters, as in
    /// LaTeX.
    Identifier,
    /// Any other single printable character: `+`, `=`, `,`, `×`, `!`.
    Symbol,
    /// `(`, `)`, `[`, `]` or `|`.
    Delimiter,
    /// `\begin{name}`; the token text is `name`.
    EnvironmentBegin,
    /// `\end{name}`; the token text is `name`.
    EnvironmentEnd,
    /// `&` column separator.
    Ampersand,
    /// `\\` row separator.
    RowSeparator,
    /// A run of whitespace, significant only inside text arguments.
    Space,
    /// End of input.
    Eof,
}

/// A single lexical token from the LaTeX source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What sort of token this is.
    pub kind: TokenKind,
    /// The token's text. For commands this includes the backslash
    /// (`"\\sqrt"`); for environment markers it is only the environment name.
    pub text: String,
    /// Where the token came from, for error reporting. Tokens synthesised by
    /// the parser (split digit runs, normalised Unicode scripts) keep the
    /// location of the token they were derived from.
    pub loc: Option<SourceLocation>,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, loc: Option<SourceLocation>) -> Self {
        Self { kind, text, loc }
    }

    /// Returns `true` when this token is of `kind` and its text equals `text`.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Human readable form used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_owned(),
            TokenKind::EnvironmentBegin => format!(r"\begin{{{}}}", self.text),
            TokenKind::EnvironmentEnd => format!(r"\end{{{}}}", self.text),
            TokenKind::Space => "whitespace".to_owned(),
            _ => self.text.clone(),
        }
    }

    /// Computes a new token of `kind` spanning from this token to
    /// `end_token`.
    #[must_use]
    pub fn range(&self, end_token: &Self, kind: TokenKind, text: String) -> Self {
        Self {
            kind,
            text,
            loc: SourceLocation::range(self.loc.as_ref(), end_token.loc.as_ref()),
        }
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}

impl ErrorLocationProvider for Option<Token> {
    fn loc(&self) -> Option<&SourceLocation> {
        self.as_ref()?.loc.as_ref()
    }
}
