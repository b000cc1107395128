//! `\begin{...} ... \end{...}`
//!
//! The lexer folds `\begin{name}` into a single token; this resolves the
//! name against the environment table and hands the body to the array
//! parser.

use crate::define_environment::{self, array::parse_array};
use crate::parser::Parser;
use crate::parser::parse_node::ParseNode;
use crate::types::{ParseError, ParseErrorKind, Token};

/// Parses an environment whose `\begin` token has just been consumed.
pub fn parse_environment(parser: &mut Parser<'_>, begin: &Token) -> Result<ParseNode, ParseError> {
    let Some(spec) = define_environment::lookup(&begin.text) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnknownEnvironment {
                name: begin.text.clone(),
                closed_by: None,
            },
            begin,
        ));
    };
    parse_array(parser, begin, spec)
}
