//! Font wrappers and text
//!
//! A font wrapper around a single letter styles that letter (`\mathbb{R}`,
//! `\mathbf{x}`). Around a run of letters it is a name: upright fonts turn
//! the run into a named function (`\mathrm{softmax}(x)`), decorative fonts
//! style each letter in turn.

use super::operatorname::parse_function_tail;
use super::single_arg;
use crate::define_function::FunctionContext;
use crate::parser::Parser;
use crate::parser::parse_node::{
    Font, FunctionName, ParseNode, ParseNodeIdentifier, ParseNodeSequence,
};
use crate::types::ParseError;

pub(super) fn font(
    context: FunctionContext<'_, '_>,
    font: Font,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    match single_arg(&context, args)? {
        ParseNode::Text(run) => from_run(context.parser, font, run.text),
        node => Ok(apply_font(node, font)),
    }
}

pub(super) fn text(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    match single_arg(&context, args)? {
        ParseNode::Text(text) if text.text.is_empty() => Ok(ParseNode::empty()),
        node => Ok(node),
    }
}

fn from_run(parser: &mut Parser<'_>, font: Font, run: String) -> Result<ParseNode, ParseError> {
    let mut chars = run.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && ch.is_alphabetic()
    {
        return Ok(styled(run, font));
    }
    if run.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(ParseNode::number(run));
    }
    if matches!(
        font,
        Font::Roman | Font::Italic | Font::SansSerif | Font::Monospace
    ) {
        return parse_function_tail(parser, FunctionName::TextRun(run), false);
    }
    let items = run
        .chars()
        .map(|ch| {
            if ch.is_ascii_digit() {
                ParseNode::number(ch)
            } else {
                styled(ch.to_string(), font)
            }
        })
        .collect();
    Ok(ParseNode::Sequence(ParseNodeSequence { items }))
}

fn styled(name: String, font: Font) -> ParseNode {
    ParseNode::Identifier(ParseNodeIdentifier {
        name,
        font: Some(font),
    })
}

/// Applies `font` to unstyled letters in `node`; anything else is returned
/// as is.
fn apply_font(node: ParseNode, font: Font) -> ParseNode {
    match node {
        ParseNode::Identifier(ident) if ident.font.is_none() => styled(ident.name, font),
        ParseNode::Sequence(seq) => ParseNode::Sequence(ParseNodeSequence {
            items: seq
                .items
                .into_iter()
                .map(|item| apply_font(item, font))
                .collect(),
        }),
        node => node,
    }
}
