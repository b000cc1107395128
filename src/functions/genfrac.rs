//! Fractions and binomial coefficients
//!
//! `\frac`, `\dfrac`, `\tfrac` and `\cfrac` differ only in typeset size, so
//! all four build the same node. The infix forms `\over` and `\choose` split
//! the brace group they appear in; the parser calls [`infix`] once it has
//! both halves.

use crate::define_function::{CommandKind, FunctionContext};
use crate::parser::parse_node::{ParseNode, ParseNodeBinomial, ParseNodeFraction};
use crate::types::{ParseError, ParseErrorKind};

fn two_args(
    context: &FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
) -> Result<(ParseNode, ParseNode), ParseError> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(ParseError::with_token(
            ParseErrorKind::MissingArgument {
                command: context.func_name.clone(),
            },
            &context.token,
        )),
    }
}

pub(super) fn fraction(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    let (numerator, denominator) = two_args(&context, args)?;
    Ok(ParseNode::Fraction(Box::new(ParseNodeFraction {
        numerator,
        denominator,
    })))
}

pub(super) fn binomial(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    let (top, bottom) = two_args(&context, args)?;
    Ok(ParseNode::Binomial(Box::new(ParseNodeBinomial { top, bottom })))
}

/// Builds the node for `left \over right` or `left \choose right`.
///
/// Returns `None` when `kind` is not an infix fraction command.
#[must_use]
pub fn infix(kind: CommandKind, left: ParseNode, right: ParseNode) -> Option<ParseNode> {
    match kind {
        CommandKind::InfixFraction => Some(ParseNode::Fraction(Box::new(ParseNodeFraction {
            numerator: left,
            denominator: right,
        }))),
        CommandKind::InfixBinomial => Some(ParseNode::Binomial(Box::new(ParseNodeBinomial {
            top: left,
            bottom: right,
        }))),
        _ => None,
    }
}
