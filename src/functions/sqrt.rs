//! Square roots and n-th roots
//!
//! `\sqrt[n]{x}` takes an optional index before its radicand. An empty
//! index (`\sqrt[]{x}`) is a plain square root.

use super::single_arg;
use crate::define_function::FunctionContext;
use crate::parser::parse_node::{ParseNode, ParseNodeRoot};
use crate::types::ParseError;

pub(super) fn root(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let radicand = single_arg(&context, args)?;
    let degree = opt_args
        .into_iter()
        .next()
        .flatten()
        .filter(|degree| !degree.is_empty());
    Ok(ParseNode::Root(Box::new(ParseNodeRoot { degree, radicand })))
}
