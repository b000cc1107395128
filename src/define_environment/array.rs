//! Body grammar shared by the matrix-like environments
//!
//! A body is a list of rows separated by `\\`, each a list of cells
//! separated by `&`, up to the `\end` that names the same environment.
//! Cells are ordinary expressions; an empty cell is the empty node. As in
//! LaTeX, a `\\` right before `\end` does not start an extra row.

use crate::define_environment::EnvSpec;
use crate::parser::Parser;
use crate::parser::parse_node::{ParseNode, ParseNodeMatrix};
use crate::symbols::Precedence;
use crate::types::{ParseError, ParseErrorKind, Token, TokenKind};

/// Parses an environment body. `begin` is the already consumed `\begin`
/// token.
pub fn parse_array(
    parser: &mut Parser<'_>,
    begin: &Token,
    spec: &EnvSpec,
) -> Result<ParseNode, ParseError> {
    if spec.column_spec {
        skip_column_spec(parser, begin)?;
    }

    let saved = parser.enter_group();
    let mut body: Vec<Vec<ParseNode>> = vec![Vec::new()];

    loop {
        let cell = parser
            .parse_expression(Precedence::Punctuation)?
            .unwrap_or_else(ParseNode::empty);
        if let Some(row) = body.last_mut() {
            row.push(cell);
        }

        let next = parser.fetch()?;
        match next.kind {
            TokenKind::Ampersand => {
                parser.consume();
            }
            TokenKind::RowSeparator => {
                parser.consume();
                body.push(Vec::new());
            }
            TokenKind::EnvironmentEnd if next.text == begin.text => {
                parser.consume();
                break;
            }
            TokenKind::EnvironmentEnd => {
                return Err(ParseError::with_token(
                    ParseErrorKind::UnknownEnvironment {
                        name: begin.text.clone(),
                        closed_by: Some(next.text.clone()),
                    },
                    next,
                ));
            }
            TokenKind::Eof => {
                return Err(ParseError::with_token(
                    ParseErrorKind::UnbalancedBrace {
                        expected: format!(r"\end{{{}}}", begin.text),
                        found: next.describe(),
                    },
                    next,
                ));
            }
            _ => {
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedToken {
                        found: next.describe(),
                        expected: r"'&', '\\' or \end",
                    },
                    next,
                ));
            }
        }
    }
    parser.leave_group(saved);

    // Drop the empty row left by a trailing \\, but keep a lone empty row so
    // that an empty environment still has one.
    if body.len() > 1
        && body
            .last()
            .is_some_and(|row| row.len() == 1 && row[0].is_empty())
    {
        body.pop();
    }
    if body.len() == 1 && body[0].iter().all(ParseNode::is_empty) {
        body.clear();
    }

    Ok(ParseNode::Matrix(ParseNodeMatrix {
        kind: spec.kind,
        rows: body,
    }))
}

/// Skips the `{...}` column specification of `array`.
fn skip_column_spec(parser: &mut Parser<'_>, begin: &Token) -> Result<(), ParseError> {
    let open = parser.fetch()?;
    if open.kind != TokenKind::OpenBrace {
        return Err(ParseError::with_token(
            ParseErrorKind::MissingArgument {
                command: format!(r"\begin{{{}}}", begin.text),
            },
            open,
        ));
    }
    parser.consume();
    let mut depth = 1_usize;
    while depth > 0 {
        let token = parser.consume();
        match token.kind {
            TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseBrace => depth -= 1,
            TokenKind::Eof => {
                return Err(ParseError::with_token(
                    ParseErrorKind::UnbalancedBrace {
                        expected: "}".to_owned(),
                        found: token.describe(),
                    },
                    &token,
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
