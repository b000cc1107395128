//! Named functions
//!
//! Known functions (`\sin`, `\log`, `\max`, ...) and named runs
//! (`\operatorname{softmax}`, `\mathrm{Attention}`) share one tail: optional
//! scripts on the name, then the arguments. A parenthesised argument list is
//! split on its top-level commas; otherwise a single scripted operand is
//! taken, so `\sin x` and `\log_2 n` read naturally.

use core::iter;

use crate::define_function::{CommandKind, FunctionContext, SubscriptRole};
use crate::parser::Parser;
use crate::parser::parse_node::{
    FunctionName, ParseNode, ParseNodeBinaryOp, ParseNodeFunction, ParseNodeSequence,
};
use crate::symbols::is_function_letter;
use crate::types::{ParseError, ParseErrorKind};

pub(super) fn known_function(context: FunctionContext<'_, '_>) -> Result<ParseNode, ParseError> {
    let name = FunctionName::Known(context.func_name);
    parse_function_tail(context.parser, name, true)
}

pub(super) fn operator_name(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    let text = match args.into_iter().next() {
        Some(ParseNode::Text(text)) if !text.text.trim().is_empty() => text.text,
        _ => {
            return Err(ParseError::with_token(
                ParseErrorKind::MissingArgument {
                    command: context.func_name,
                },
                &context.token,
            ));
        }
    };
    parse_function_tail(context.parser, FunctionName::TextRun(text.trim().to_owned()), true)
}

/// Reads the scripts and arguments that follow a function name.
///
/// With `bare_operand` unset, only a parenthesised argument list is taken:
/// a named run such as `\mathrm{Attention}` followed by a letter is a
/// product, not an application.
pub(crate) fn parse_function_tail(
    parser: &mut Parser<'_>,
    name: FunctionName,
    bare_operand: bool,
) -> Result<ParseNode, ParseError> {
    let (subscript, superscript) = parser.parse_limits()?;

    let args = if parser.next_opens_paren()? {
        match parser.parse_scripted()? {
            Some(ParseNode::Delimited(delimited))
                if delimited.open == "(" && delimited.close == ")" =>
            {
                split_commas(delimited.inner)
            }
            Some(node) => vec![node],
            None => Vec::new(),
        }
    } else if bare_operand && parser.at_operand()? {
        match parser.parse_scripted()? {
            Some(node) if applies_to_parens(&node) && parser.next_opens_paren()? => {
                let mut items = vec![node];
                items.extend(parser.parse_scripted()?);
                vec![ParseNode::Sequence(ParseNodeSequence { items })]
            }
            Some(node) => vec![node],
            None => Vec::new(),
        }
    } else {
        Vec::new()
    };

    Ok(ParseNode::Function(Box::new(ParseNodeFunction {
        name,
        subscript,
        superscript,
        args,
    })))
}

fn applies_to_parens(node: &ParseNode) -> bool {
    matches!(node, ParseNode::Identifier(ident) if is_function_letter(&ident.name))
}

/// Flattens a top-level comma list into its items; an empty node yields no
/// items.
#[must_use]
pub fn split_commas(node: ParseNode) -> Vec<ParseNode> {
    match node {
        ParseNode::BinaryOp(chain) if chain.all_ops(",") => {
            let ParseNodeBinaryOp { first, rest } = *chain;
            iter::once(first)
                .chain(rest.into_iter().map(|(_, item)| item))
                .flat_map(split_commas)
                .collect()
        }
        node if node.is_empty() => Vec::new(),
        node => vec![node],
    }
}

/// Spoken name and subscript reading of a known function command.
#[must_use]
pub fn function_info(command: &str) -> Option<(&'static str, SubscriptRole)> {
    match super::lookup(command)?.kind {
        CommandKind::Function { speech, subscript } => Some((speech, subscript)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::Operator;
    use crate::parse_tree::parse_tree;
    use crate::symbols::{Atom, Precedence};
    use crate::types::Settings;

    fn comma(left: ParseNode, right: ParseNode) -> ParseNode {
        ParseNode::binary(
            Operator {
                text: ",".to_owned(),
                atom: Atom::Punct,
                precedence: Precedence::Punctuation,
            },
            left,
            right,
        )
    }

    #[test]
    fn test_split_commas_flattens_left_nested_lists() {
        let list = comma(
            comma(ParseNode::identifier("Q"), ParseNode::identifier("K")),
            ParseNode::identifier("V"),
        );
        let items = split_commas(list);
        assert_eq!(
            items,
            vec![
                ParseNode::identifier("Q"),
                ParseNode::identifier("K"),
                ParseNode::identifier("V"),
            ]
        );
        assert!(split_commas(ParseNode::empty()).is_empty());
    }

    #[test]
    fn test_split_commas_reads_a_parsed_list() {
        let list = parse_tree("a, b, c", &Settings::default()).unwrap();
        assert_eq!(
            split_commas(list),
            vec![
                ParseNode::identifier("a"),
                ParseNode::identifier("b"),
                ParseNode::identifier("c"),
            ]
        );
    }

    #[test]
    fn test_function_info() {
        assert_eq!(function_info(r"\ln"), Some(("natural log", SubscriptRole::Base)));
        assert_eq!(function_info(r"\max"), Some(("maximum", SubscriptRole::Over)));
        assert_eq!(function_info(r"\frac"), None);
    }
}
