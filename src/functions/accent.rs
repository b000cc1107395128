//! Accents and over/under decorations

use super::single_arg;
use crate::define_function::FunctionContext;
use crate::parser::parse_node::{AccentKind, ParseNode, ParseNodeAccent};
use crate::types::ParseError;

pub(super) fn accent(
    context: FunctionContext<'_, '_>,
    accent: AccentKind,
    args: Vec<ParseNode>,
) -> Result<ParseNode, ParseError> {
    let base = single_arg(&context, args)?;
    Ok(ParseNode::Accent(Box::new(ParseNodeAccent { accent, base })))
}

impl AccentKind {
    /// Spoken name of the decoration.
    #[must_use]
    pub const fn speech(self) -> &'static str {
        match self {
            Self::Hat => "hat",
            Self::Bar => "bar",
            Self::Vector => "vector",
            Self::Dot => "dot",
            Self::DoubleDot => "double dot",
            Self::Tilde => "tilde",
            Self::Overline => "overline",
            Self::Underline => "underline",
        }
    }

    /// Whether the name is read before the base ("vector v") rather than
    /// after it ("x hat").
    #[must_use]
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::Vector)
    }
}
