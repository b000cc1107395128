//! Command descriptors for the command registry
//!
//! Every structural control sequence (`\frac`, `\sum`, `\sin`, `\mathbb`,
//! `\left`, ...) maps to a [`CommandSpec`]: how many arguments it takes, how
//! those arguments are read, and a [`CommandKind`] tag that picks its parse
//! handler. The tags form a closed set, so dispatch in
//! [`crate::functions::call_function`] is an exhaustive `match` with no
//! fallback arm.

use crate::parser::Parser;
use crate::parser::parse_node::{AccentKind, BigOpKind, Font};
use crate::types::Token;

/// Context structure passed to command handlers.
pub struct FunctionContext<'a, 'b> {
    /// Command name, including the backslash.
    pub func_name: String,
    /// Parser instance, positioned just after the command token.
    pub parser: &'a mut Parser<'b>,
    /// The command token itself.
    pub token: Token,
}

/// How a command's arguments are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// An ordinary math argument: a brace group or a single token.
    Math,
    /// Raw text up to the matching brace, spaces kept: `\text{if }`.
    Text,
    /// A brace group of plain letters and digits is taken as a name
    /// (`\mathrm{Attention}`); anything else is read as math.
    Name,
}

/// How the subscript of a named function is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptRole {
    /// `\log_2 n`: "the log base 2 of n"
    Base,
    /// `\max_{x \in S}`: "the maximum over x is an element of S"
    Over,
}

/// Semantic tag of a command; selects the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `\frac`, `\dfrac`, `\tfrac`, `\cfrac`
    Fraction,
    /// `\binom`, `\dbinom`, `\tbinom`
    Binomial,
    /// `\over` inside a brace group
    InfixFraction,
    /// `\choose` inside a brace group
    InfixBinomial,
    /// `\sqrt`
    Root,
    /// Operators with bounds and a body.
    BigOperator(BigOpKind),
    /// Named functions spoken by name.
    Function {
        /// Spoken name.
        speech: &'static str,
        /// Reading of a subscript on the name.
        subscript: SubscriptRole,
    },
    /// `\operatorname{...}`
    OperatorName,
    /// Font wrappers such as `\mathbb`.
    Font(Font),
    /// Text wrappers such as `\text`.
    Text,
    /// Accents such as `\hat`.
    Accent(AccentKind),
    /// `\left`
    Left,
    /// `\right`
    Right,
    /// `\big`, `\Bigl` and the rest of the sizing family. Sizing has no
    /// spoken form; the delimiter after it is read as if bare.
    SizedDelimiter,
    /// Commands accepted and dropped: style switches, `\limits`, `\hline`.
    Ignored,
}

impl CommandKind {
    /// Whether a command of this kind can begin an operand.
    #[must_use]
    pub const fn starts_operand(self) -> bool {
        !matches!(
            self,
            Self::InfixFraction
                | Self::InfixBinomial
                | Self::Right
                | Self::SizedDelimiter
                | Self::Ignored
        )
    }
}

/// Registry entry for a structural command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Semantic tag.
    pub kind: CommandKind,
    /// Number of required arguments.
    pub num_args: usize,
    /// Number of optional `[...]` arguments, read before the required ones.
    pub num_optional_args: usize,
    /// How the required arguments are read.
    pub arg_type: ArgType,
}

impl CommandSpec {
    /// A command that reads its own input, if any.
    #[must_use]
    pub const fn bare(kind: CommandKind) -> Self {
        Self {
            kind,
            num_args: 0,
            num_optional_args: 0,
            arg_type: ArgType::Math,
        }
    }

    /// A command taking `num_args` math arguments.
    #[must_use]
    pub const fn with_args(kind: CommandKind, num_args: usize) -> Self {
        Self {
            kind,
            num_args,
            num_optional_args: 0,
            arg_type: ArgType::Math,
        }
    }

    /// A command taking one argument read as `arg_type`.
    #[must_use]
    pub const fn with_arg_type(kind: CommandKind, arg_type: ArgType) -> Self {
        Self {
            kind,
            num_args: 1,
            num_optional_args: 0,
            arg_type,
        }
    }

    /// A named function.
    #[must_use]
    pub const fn function(speech: &'static str, subscript: SubscriptRole) -> Self {
        Self::bare(CommandKind::Function { speech, subscript })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let frac = CommandSpec::with_args(CommandKind::Fraction, 2);
        assert_eq!(frac.num_args, 2);
        assert_eq!(frac.arg_type, ArgType::Math);
        let text = CommandSpec::with_arg_type(CommandKind::Text, ArgType::Text);
        assert_eq!(text.num_args, 1);
        assert!(!CommandKind::Right.starts_operand());
        assert!(CommandKind::Root.starts_operand());
    }
}
