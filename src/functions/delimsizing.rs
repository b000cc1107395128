//! Delimiter pairs
//!
//! Three spellings produce a [`ParseNodeDelimited`]: bare pairs such as
//! `(x)` or `\{1, 2\}`, sized pairs such as `\bigl( x \bigr)` (the sizing
//! command is dropped by the parser), and `\left( x \right)`. Every
//! delimiter is stored by its canonical spelling, so `\lvert`, `\vert` and
//! `|` are the same bar and `\lbrace` is `\{`.
//!
//! Bare parentheses and brackets close each other (`[0, 1)` is a half-open
//! interval); every other bare opener needs its own partner. `\left` and
//! `\right` may pair anything, including the null delimiter `.`.

use phf::phf_map;

use crate::define_function::FunctionContext;
use crate::parser::Parser;
use crate::parser::parse_node::{ParseNode, ParseNodeDelimited};
use crate::symbols::Precedence;
use crate::types::{ParseError, ParseErrorKind, Token, TokenKind};

/// What a delimiter can do in a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterRole {
    /// Opens a pair: `(`, `\{`, `\lfloor`.
    Open,
    /// Closes a pair: `)`, `\}`, `\rfloor`.
    Close,
    /// Either, decided by position: `|`, `\|`.
    Both,
    /// The null delimiter `.` of `\left.` and `\right.`.
    None,
}

/// Registry entry for a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    /// Canonical spelling stored in the tree.
    pub canonical: &'static str,
    /// Position in a pair.
    pub role: DelimiterRole,
    /// Canonical spelling of the matching delimiter.
    pub partner: &'static str,
    /// Spoken form.
    pub speech: &'static str,
}

const fn open(canonical: &'static str, partner: &'static str, speech: &'static str) -> Delimiter {
    Delimiter {
        canonical,
        role: DelimiterRole::Open,
        partner,
        speech,
    }
}

const fn close(canonical: &'static str, partner: &'static str, speech: &'static str) -> Delimiter {
    Delimiter {
        canonical,
        role: DelimiterRole::Close,
        partner,
        speech,
    }
}

const fn bar(canonical: &'static str, speech: &'static str) -> Delimiter {
    Delimiter {
        canonical,
        role: DelimiterRole::Both,
        partner: canonical,
        speech,
    }
}

/// The delimiter table, keyed by every accepted spelling.
pub static DELIMITERS: phf::Map<&'static str, Delimiter> = phf_map! {
    "(" => open("(", ")", "open paren"),
    ")" => close(")", "(", "close paren"),
    "[" => open("[", "]", "open bracket"),
    "]" => close("]", "[", "close bracket"),
    "\\lbrack" => open("[", "]", "open bracket"),
    "\\rbrack" => close("]", "[", "close bracket"),
    "\\{" => open("\\{", "\\}", "open brace"),
    "\\lbrace" => open("\\{", "\\}", "open brace"),
    "\\}" => close("\\}", "\\{", "close brace"),
    "\\rbrace" => close("\\}", "\\{", "close brace"),
    "\\langle" => open("\\langle", "\\rangle", "open angle bracket"),
    "\u{27e8}" => open("\\langle", "\\rangle", "open angle bracket"),
    "<" => open("\\langle", "\\rangle", "open angle bracket"),
    "\\rangle" => close("\\rangle", "\\langle", "close angle bracket"),
    "\u{27e9}" => close("\\rangle", "\\langle", "close angle bracket"),
    ">" => close("\\rangle", "\\langle", "close angle bracket"),
    "\\lfloor" => open("\\lfloor", "\\rfloor", "open floor"),
    "\u{230a}" => open("\\lfloor", "\\rfloor", "open floor"),
    "\\rfloor" => close("\\rfloor", "\\lfloor", "close floor"),
    "\u{230b}" => close("\\rfloor", "\\lfloor", "close floor"),
    "\\lceil" => open("\\lceil", "\\rceil", "open ceiling"),
    "\u{2308}" => open("\\lceil", "\\rceil", "open ceiling"),
    "\\rceil" => close("\\rceil", "\\lceil", "close ceiling"),
    "\u{2309}" => close("\\rceil", "\\lceil", "close ceiling"),
    "|" => bar("|", "vertical bar"),
    "\\vert" => bar("|", "vertical bar"),
    "\\lvert" => bar("|", "vertical bar"),
    "\\rvert" => bar("|", "vertical bar"),
    "\\|" => bar("\\|", "double vertical bar"),
    "\\Vert" => bar("\\|", "double vertical bar"),
    "\\lVert" => bar("\\|", "double vertical bar"),
    "\\rVert" => bar("\\|", "double vertical bar"),
    "\u{2016}" => bar("\\|", "double vertical bar"),
    "." => Delimiter {
        canonical: ".",
        role: DelimiterRole::None,
        partner: ".",
        speech: "",
    },
};

/// Looks up a delimiter by any of its spellings.
#[must_use]
pub fn delimiter(text: &str) -> Option<&'static Delimiter> {
    DELIMITERS.get(text)
}

/// Looks up the delimiter stored under a canonical spelling.
#[must_use]
pub fn canonical(text: &str) -> Option<&'static Delimiter> {
    delimiter(text).filter(|d| d.canonical == text)
}

impl Delimiter {
    /// Whether `self` may open a bare pair.
    #[must_use]
    pub const fn opens(&self) -> bool {
        matches!(self.role, DelimiterRole::Open | DelimiterRole::Both)
    }

    /// Whether `self` may close a bare pair.
    #[must_use]
    pub const fn closes(&self) -> bool {
        matches!(self.role, DelimiterRole::Close | DelimiterRole::Both)
    }

    /// Whether `close` ends a bare pair opened by `self`.
    #[must_use]
    pub fn accepts(&self, close: &Self) -> bool {
        if matches!(self.canonical, "(" | "[") {
            matches!(close.canonical, ")" | "]")
        } else {
            close.canonical == self.partner
        }
    }
}

/// Whether `token` can be read as a delimiter: a bracket or bar token, or a
/// command or glyph found in [`DELIMITERS`].
#[must_use]
pub fn token_delimiter(token: &Token) -> Option<&'static Delimiter> {
    match token.kind {
        TokenKind::Delimiter | TokenKind::ControlSequence | TokenKind::Symbol => {
            delimiter(&token.text)
        }
        _ => None,
    }
}

/// Reads the delimiter required after `\left` or `\right`.
fn expect_delimiter(parser: &mut Parser<'_>) -> Result<&'static Delimiter, ParseError> {
    let token = parser.fetch()?;
    let Some(delim) = token_delimiter(token) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnexpectedToken {
                found: token.describe(),
                expected: "a delimiter",
            },
            token,
        ));
    };
    parser.consume();
    Ok(delim)
}

/// Handles `\left<delim> ... \right<delim>`.
pub(super) fn left_right(context: FunctionContext<'_, '_>) -> Result<ParseNode, ParseError> {
    let parser = context.parser;
    let open = expect_delimiter(parser)?;

    parser.leftright_depth += 1;
    let saved = parser.enter_group();
    let inner = parser.parse_expression(Precedence::Punctuation)?;
    parser.leave_group(saved);

    let right = parser.fetch()?;
    if !right.is(TokenKind::ControlSequence, r"\right") {
        return Err(ParseError::with_token(
            ParseErrorKind::UnbalancedBrace {
                expected: r"\right".to_owned(),
                found: right.describe(),
            },
            right,
        ));
    }
    parser.consume();
    let close = expect_delimiter(parser)?;
    parser.leftright_depth -= 1;

    Ok(ParseNode::Delimited(Box::new(ParseNodeDelimited {
        open: open.canonical.to_owned(),
        close: close.canonical.to_owned(),
        inner: inner.unwrap_or_else(ParseNode::empty),
    })))
}

/// Parses a bare pair whose opening token has just been consumed.
pub fn parse_bare_delimited(
    parser: &mut Parser<'_>,
    open_token: &Token,
) -> Result<ParseNode, ParseError> {
    let Some(open) = token_delimiter(open_token).filter(|d| d.opens()) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnexpectedToken {
                found: open_token.describe(),
                expected: "an opening delimiter",
            },
            open_token,
        ));
    };

    let saved = parser.enter_group();
    if open.role == DelimiterRole::Both {
        parser.bar_depth = saved + 1;
    }
    let inner = parser.parse_expression(Precedence::Punctuation)?;
    parser.leave_group(saved);

    let close_token = parser.fetch()?;
    let Some(close) = token_delimiter(close_token).filter(|d| d.closes() && open.accepts(d)) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnbalancedBrace {
                expected: open.partner.to_owned(),
                found: close_token.describe(),
            },
            close_token,
        ));
    };
    parser.consume();

    Ok(ParseNode::Delimited(Box::new(ParseNodeDelimited {
        open: open.canonical.to_owned(),
        close: close.canonical.to_owned(),
        inner: inner.unwrap_or_else(ParseNode::empty),
    })))
}
