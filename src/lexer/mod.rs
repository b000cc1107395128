//! The lexer splits LaTeX math source into a flat stream of typed tokens.
//!
//! Its main exposed function is [`tokenize`], which lexes the whole input up
//! front and terminates the stream with an EOF token. The [`Lexer`] itself
//! hands out one token per call to [`Lexer::lex`]; each call tries the
//! `match_*` helpers in a fixed order and classifies whatever matched.
//!
//! Brace matching is deliberately not checked here: an unbalanced `{` is a
//! structural problem the parser reports with better context. The lexer
//! only rejects character sequences that can never be valid math, such as a
//! trailing backslash or a stray `$`.

use crate::types::{LexError, LexErrorReason, SourceLocation, Token, TokenKind};
use alloc::sync::Arc;

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_comment(s: &str) -> Option<usize> {
    if !s.starts_with('%') {
        return None;
    }
    Some(s.find('\n').map_or(s.len(), |nl| nl + 1))
}

fn match_number(s: &str) -> Option<usize> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &s.as_bytes()[digits..];
    if rest.first() == Some(&b'.') {
        let fraction = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if fraction > 0 {
            return Some(digits + 1 + fraction);
        }
    }
    Some(digits)
}

fn match_control_word(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let letters = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    (letters > 0).then_some(1 + letters)
}

fn match_control_symbol(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next()? != '\\' {
        return None;
    }
    let c = chars.next()?;
    Some(1 + c.len_utf8())
}

/// Matches `\begin{name}` / `\end{name}` (spaces allowed before the brace),
/// returning the total length and the byte range of `name` within `s`.
fn match_environment(s: &str, command: &str) -> Option<(usize, usize, usize)> {
    let rest = s.strip_prefix(command)?;
    if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let spaces = match_space(rest).unwrap_or(0);
    let rest = rest[spaces..].strip_prefix('{')?;
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic() || *b == b'*')
        .count();
    if name_len == 0 || rest.as_bytes().get(name_len) != Some(&b'}') {
        return None;
    }
    let name_start = command.len() + spaces + 1;
    Some((name_start + name_len + 1, name_start, name_start + name_len))
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '#' | '$') || (c.is_control() && !matches!(c, ' ' | '\r' | '\n' | '\t'))
}

#[derive(PartialEq, Eq)]
enum BranchKind {
    Space,
    Comment,
    EnvironmentBegin,
    EnvironmentEnd,
    RowSeparator,
    ControlWord,
    ControlSymbol,
    DanglingBackslash,
    Number,
    Char(char),
}

struct TokenMatch {
    branch: BranchKind,
    mlen: usize,
    /// Byte range of the payload (environment name) relative to the match.
    payload: Option<(usize, usize)>,
}

fn exec(slice: &str) -> Option<TokenMatch> {
    let simple = |branch, mlen| TokenMatch {
        branch,
        mlen,
        payload: None,
    };
    if let Some(l) = match_space(slice) {
        return Some(simple(BranchKind::Space, l));
    }
    if let Some(l) = match_comment(slice) {
        return Some(simple(BranchKind::Comment, l));
    }
    if slice.starts_with('\\') {
        if let Some((l, a, b)) = match_environment(slice, r"\begin") {
            return Some(TokenMatch {
                branch: BranchKind::EnvironmentBegin,
                mlen: l,
                payload: Some((a, b)),
            });
        }
        if let Some((l, a, b)) = match_environment(slice, r"\end") {
            return Some(TokenMatch {
                branch: BranchKind::EnvironmentEnd,
                mlen: l,
                payload: Some((a, b)),
            });
        }
        if slice.starts_with(r"\\") {
            return Some(simple(BranchKind::RowSeparator, 2));
        }
        if let Some(l) = match_control_word(slice) {
            return Some(simple(BranchKind::ControlWord, l));
        }
        if let Some(l) = match_control_symbol(slice) {
            return Some(simple(BranchKind::ControlSymbol, l));
        }
        return Some(simple(BranchKind::DanglingBackslash, 1));
    }
    if let Some(l) = match_number(slice) {
        return Some(simple(BranchKind::Number, l));
    }
    let ch = slice.chars().next()?;
    Some(simple(BranchKind::Char(ch), ch.len_utf8()))
}

pub(crate) fn char_kind(ch: char) -> TokenKind {
    match ch {
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        '^' => TokenKind::Superscript,
        '_' => TokenKind::Subscript,
        '\'' => TokenKind::Prime,
        '&' => TokenKind::Ampersand,
        '(' | ')' | '[' | ']' | '|' => TokenKind::Delimiter,
        c if c.is_alphabetic() => TokenKind::Identifier,
        _ => TokenKind::Symbol,
    }
}

/// The core lexer for tokenizing LaTeX mathematical expressions.
pub struct Lexer {
    input: Arc<str>,
    last_index: usize,
}

impl Lexer {
    /// Creates a new `Lexer` positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: Arc<str>) -> Self {
        Self {
            input,
            last_index: 0,
        }
    }

    /// Tokenizes and returns the next token from the current position.
    ///
    /// Comments are skipped transparently. Once the input is exhausted every
    /// further call returns an [`TokenKind::Eof`] token.
    pub fn lex(&mut self) -> Result<Token, LexError> {
        loop {
            let start = self.last_index;
            let slice = &self.input[start..];
            let Some(matched) = exec(slice) else {
                return Ok(Token::new(
                    TokenKind::Eof,
                    "EOF".to_owned(),
                    Some(self.location(start, start)),
                ));
            };
            self.last_index += matched.mlen;
            let end = self.last_index;

            let kind = match matched.branch {
                BranchKind::Comment => continue,
                BranchKind::Space => TokenKind::Space,
                BranchKind::EnvironmentBegin => TokenKind::EnvironmentBegin,
                BranchKind::EnvironmentEnd => TokenKind::EnvironmentEnd,
                BranchKind::RowSeparator => TokenKind::RowSeparator,
                BranchKind::ControlWord | BranchKind::ControlSymbol => TokenKind::ControlSequence,
                BranchKind::Number => TokenKind::Number,
                BranchKind::DanglingBackslash => {
                    return Err(LexError::new(
                        LexErrorReason::DanglingBackslash,
                        self.location(start, end),
                    ));
                }
                BranchKind::Char(ch) if is_forbidden(ch) => {
                    return Err(LexError::new(
                        LexErrorReason::UnexpectedCharacter { character: ch },
                        self.location(start, end),
                    ));
                }
                BranchKind::Char(ch) => char_kind(ch),
            };

            let text = match matched.payload {
                Some((a, b)) => slice[a..b].to_owned(),
                None => slice[..matched.mlen].to_owned(),
            };
            return Ok(Token::new(kind, text, Some(self.location(start, end))));
        }
    }

    /// Returns the current byte position in the input string.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.last_index
    }

    fn location(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.input), start, end)
    }
}

/// Lexes the whole of `source` into tokens, ending with a single EOF token.
///
/// # Errors
///
/// Returns a [`LexError`] for a backslash with nothing after it, and for
/// characters that have no meaning in math mode (`#`, `$`, control
/// characters).
///
/// # Examples
///
/// ```rust
/// use mathwords::lexer::tokenize;
/// use mathwords::types::TokenKind;
///
/// let tokens = tokenize(r"x^{2}").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Identifier,
///         TokenKind::Superscript,
///         TokenKind::OpenBrace,
///         TokenKind::Number,
///         TokenKind::CloseBrace,
///         TokenKind::Eof,
///     ]
/// );
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(Arc::from(source));
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Space)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_control_words_and_symbols() {
        let tokens = kinds_and_texts(r"\frac\alpha \{ \, \\");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::ControlSequence, r"\frac".to_owned()),
                (TokenKind::ControlSequence, r"\alpha".to_owned()),
                (TokenKind::ControlSequence, r"\{".to_owned()),
                (TokenKind::ControlSequence, r"\,".to_owned()),
                (TokenKind::RowSeparator, r"\\".to_owned()),
                (TokenKind::Eof, "EOF".to_owned()),
            ]
        );
    }

    #[test]
    fn test_numbers_are_single_operands() {
        let tokens = kinds_and_texts("3.14 + 10000 - 2.");
        assert_eq!(tokens[0], (TokenKind::Number, "3.14".to_owned()));
        assert_eq!(tokens[2], (TokenKind::Number, "10000".to_owned()));
        assert_eq!(tokens[4], (TokenKind::Number, "2".to_owned()));
        assert_eq!(tokens[5], (TokenKind::Symbol, ".".to_owned()));
    }

    #[test]
    fn test_identifiers_are_single_letters() {
        let tokens = kinds_and_texts("pos");
        assert_eq!(tokens.len(), 4);
        assert!(tokens[..3].iter().all(|(k, _)| *k == TokenKind::Identifier));
    }

    #[test]
    fn test_environment_markers() {
        let tokens = kinds_and_texts(r"\begin {pmatrix} a & b \\ c & d \end{pmatrix}");
        assert_eq!(tokens[0], (TokenKind::EnvironmentBegin, "pmatrix".to_owned()));
        assert_eq!(tokens[2].0, TokenKind::Ampersand);
        assert_eq!(tokens[4].0, TokenKind::RowSeparator);
        assert_eq!(tokens[8], (TokenKind::EnvironmentEnd, "pmatrix".to_owned()));
    }

    #[test]
    fn test_malformed_begin_is_plain_command() {
        let tokens = kinds_and_texts(r"\begin x");
        assert_eq!(tokens[0], (TokenKind::ControlSequence, r"\begin".to_owned()));
        let tokens = kinds_and_texts(r"\beginning");
        assert_eq!(tokens[0], (TokenKind::ControlSequence, r"\beginning".to_owned()));
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = kinds_and_texts("a % the rest is ignored\n+ b % trailing");
        let texts: Vec<_> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["a", "+", "b", "EOF"]);
    }

    #[test]
    fn test_escaped_percent_is_a_command() {
        let tokens = kinds_and_texts(r"50\%");
        assert_eq!(tokens[1], (TokenKind::ControlSequence, r"\%".to_owned()));
    }

    #[test]
    fn test_dangling_backslash_is_rejected() {
        let err = tokenize(r"x + \").unwrap_err();
        assert_eq!(err.reason, LexErrorReason::DanglingBackslash);
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_forbidden_characters_are_rejected() {
        let err = tokenize("$x$").unwrap_err();
        assert_eq!(
            err.reason,
            LexErrorReason::UnexpectedCharacter { character: '$' }
        );
        assert_eq!(err.position, 0);
        assert!(tokenize("#1").is_err());
    }

    #[test]
    fn test_locations_track_bytes() {
        let tokens = tokenize("α+β").unwrap();
        let loc = tokens[2].loc.as_ref().unwrap();
        assert_eq!((loc.start, loc.end), (3, 5));
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }
}
