//! Structural half of the command registry
//!
//! [`COMMANDS`] maps every structural control sequence to its
//! [`CommandSpec`]. The parser looks a command up, reads the declared
//! arguments, and hands everything to [`call_function`], which dispatches on
//! the command's [`CommandKind`] to the handler family below:
//!
//! - **genfrac**: `\frac`, `\binom` and their style variants, plus the infix
//!   `\over` and `\choose`.
//! - **sqrt**: square and n-th roots.
//! - **op**: sums, products, integrals, big set operators and limits, with
//!   their bounds.
//! - **operatorname**: named functions such as `\sin` and `\log`, and
//!   `\operatorname{...}` runs.
//! - **font**: `\mathbb`, `\mathrm` and friends, and the `\text` family.
//! - **accent**: hats, bars, vector arrows.
//! - **delimsizing**: `\left ... \right`, the `\big` family, and bare
//!   delimiter pairs.
//! - **environment**: `\begin{...} ... \end{...}`.
//!
//! Symbol literals (operators, relations, letters) live in
//! [`crate::symbols`]; a name in neither table is an unknown command.

mod accent;
pub mod delimsizing;
pub mod environment;
mod font;
pub mod genfrac;
pub mod op;
pub mod operatorname;
mod sqrt;

use phf::phf_map;

use crate::define_function::{
    ArgType, CommandKind as K, CommandSpec, FunctionContext, SubscriptRole,
};
use crate::parser::Parser;
use crate::parser::parse_node::{AccentKind, BigOpKind, Font, ParseNode};
use crate::types::{ParseError, ParseErrorKind, Token};

use SubscriptRole::{Base, Over};

/// The structural command table.
pub static COMMANDS: phf::Map<&'static str, CommandSpec> = phf_map! {
    // Fractions and binomials
    "\\frac" => CommandSpec::with_args(K::Fraction, 2),
    "\\dfrac" => CommandSpec::with_args(K::Fraction, 2),
    "\\tfrac" => CommandSpec::with_args(K::Fraction, 2),
    "\\cfrac" => CommandSpec::with_args(K::Fraction, 2),
    "\\binom" => CommandSpec::with_args(K::Binomial, 2),
    "\\dbinom" => CommandSpec::with_args(K::Binomial, 2),
    "\\tbinom" => CommandSpec::with_args(K::Binomial, 2),
    "\\over" => CommandSpec::bare(K::InfixFraction),
    "\\choose" => CommandSpec::bare(K::InfixBinomial),

    // Roots
    "\\sqrt" => CommandSpec {
        kind: K::Root,
        num_args: 1,
        num_optional_args: 1,
        arg_type: ArgType::Math,
    },

    // Big operators
    "\\sum" => CommandSpec::bare(K::BigOperator(BigOpKind::Sum)),
    "\u{2211}" => CommandSpec::bare(K::BigOperator(BigOpKind::Sum)),
    "\\prod" => CommandSpec::bare(K::BigOperator(BigOpKind::Product)),
    "\u{220f}" => CommandSpec::bare(K::BigOperator(BigOpKind::Product)),
    "\\coprod" => CommandSpec::bare(K::BigOperator(BigOpKind::Coproduct)),
    "\\int" => CommandSpec::bare(K::BigOperator(BigOpKind::Integral)),
    "\u{222b}" => CommandSpec::bare(K::BigOperator(BigOpKind::Integral)),
    "\\iint" => CommandSpec::bare(K::BigOperator(BigOpKind::DoubleIntegral)),
    "\\iiint" => CommandSpec::bare(K::BigOperator(BigOpKind::TripleIntegral)),
    "\\oint" => CommandSpec::bare(K::BigOperator(BigOpKind::ContourIntegral)),
    "\\bigcup" => CommandSpec::bare(K::BigOperator(BigOpKind::Union)),
    "\\bigcap" => CommandSpec::bare(K::BigOperator(BigOpKind::Intersection)),
    "\\bigoplus" => CommandSpec::bare(K::BigOperator(BigOpKind::DirectSum)),
    "\\bigotimes" => CommandSpec::bare(K::BigOperator(BigOpKind::TensorProduct)),
    "\\bigvee" => CommandSpec::bare(K::BigOperator(BigOpKind::Disjunction)),
    "\\bigwedge" => CommandSpec::bare(K::BigOperator(BigOpKind::Conjunction)),
    "\\lim" => CommandSpec::bare(K::BigOperator(BigOpKind::Limit)),
    "\\limsup" => CommandSpec::bare(K::BigOperator(BigOpKind::LimitSuperior)),
    "\\liminf" => CommandSpec::bare(K::BigOperator(BigOpKind::LimitInferior)),

    // Named functions
    "\\sin" => CommandSpec::function("sine", Base),
    "\\cos" => CommandSpec::function("cosine", Base),
    "\\tan" => CommandSpec::function("tangent", Base),
    "\\cot" => CommandSpec::function("cotangent", Base),
    "\\sec" => CommandSpec::function("secant", Base),
    "\\csc" => CommandSpec::function("cosecant", Base),
    "\\arcsin" => CommandSpec::function("arc sine", Base),
    "\\arccos" => CommandSpec::function("arc cosine", Base),
    "\\arctan" => CommandSpec::function("arc tangent", Base),
    "\\sinh" => CommandSpec::function("hyperbolic sine", Base),
    "\\cosh" => CommandSpec::function("hyperbolic cosine", Base),
    "\\tanh" => CommandSpec::function("hyperbolic tangent", Base),
    "\\log" => CommandSpec::function("log", Base),
    "\\lg" => CommandSpec::function("log base 10", Base),
    "\\ln" => CommandSpec::function("natural log", Base),
    "\\exp" => CommandSpec::function("exponential", Base),
    "\\det" => CommandSpec::function("determinant", Base),
    "\\dim" => CommandSpec::function("dimension", Base),
    "\\ker" => CommandSpec::function("kernel", Base),
    "\\deg" => CommandSpec::function("degree", Base),
    "\\gcd" => CommandSpec::function("greatest common divisor", Base),
    "\\arg" => CommandSpec::function("argument", Base),
    "\\Pr" => CommandSpec::function("probability", Base),
    "\\max" => CommandSpec::function("maximum", Over),
    "\\min" => CommandSpec::function("minimum", Over),
    "\\sup" => CommandSpec::function("supremum", Over),
    "\\inf" => CommandSpec::function("infimum", Over),
    "\\argmax" => CommandSpec::function("arg max", Over),
    "\\argmin" => CommandSpec::function("arg min", Over),
    "\\operatorname" => CommandSpec::with_arg_type(K::OperatorName, ArgType::Text),

    // Fonts and text
    "\\mathrm" => CommandSpec::with_arg_type(K::Font(Font::Roman), ArgType::Name),
    "\\mathit" => CommandSpec::with_arg_type(K::Font(Font::Italic), ArgType::Name),
    "\\mathbf" => CommandSpec::with_arg_type(K::Font(Font::Bold), ArgType::Name),
    "\\boldsymbol" => CommandSpec::with_arg_type(K::Font(Font::Bold), ArgType::Name),
    "\\bm" => CommandSpec::with_arg_type(K::Font(Font::Bold), ArgType::Name),
    "\\mathsf" => CommandSpec::with_arg_type(K::Font(Font::SansSerif), ArgType::Name),
    "\\mathtt" => CommandSpec::with_arg_type(K::Font(Font::Monospace), ArgType::Name),
    "\\mathcal" => CommandSpec::with_arg_type(K::Font(Font::Calligraphic), ArgType::Name),
    "\\mathscr" => CommandSpec::with_arg_type(K::Font(Font::Calligraphic), ArgType::Name),
    "\\mathfrak" => CommandSpec::with_arg_type(K::Font(Font::Fraktur), ArgType::Name),
    "\\mathbb" => CommandSpec::with_arg_type(K::Font(Font::DoubleStruck), ArgType::Name),
    "\\text" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\textrm" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\textit" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\textbf" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\textsf" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\texttt" => CommandSpec::with_arg_type(K::Text, ArgType::Text),
    "\\mbox" => CommandSpec::with_arg_type(K::Text, ArgType::Text),

    // Accents
    "\\hat" => CommandSpec::with_args(K::Accent(AccentKind::Hat), 1),
    "\\widehat" => CommandSpec::with_args(K::Accent(AccentKind::Hat), 1),
    "\\bar" => CommandSpec::with_args(K::Accent(AccentKind::Bar), 1),
    "\\vec" => CommandSpec::with_args(K::Accent(AccentKind::Vector), 1),
    "\\overrightarrow" => CommandSpec::with_args(K::Accent(AccentKind::Vector), 1),
    "\\dot" => CommandSpec::with_args(K::Accent(AccentKind::Dot), 1),
    "\\ddot" => CommandSpec::with_args(K::Accent(AccentKind::DoubleDot), 1),
    "\\tilde" => CommandSpec::with_args(K::Accent(AccentKind::Tilde), 1),
    "\\widetilde" => CommandSpec::with_args(K::Accent(AccentKind::Tilde), 1),
    "\\overline" => CommandSpec::with_args(K::Accent(AccentKind::Overline), 1),
    "\\underline" => CommandSpec::with_args(K::Accent(AccentKind::Underline), 1),

    // Delimiters
    "\\left" => CommandSpec::bare(K::Left),
    "\\right" => CommandSpec::bare(K::Right),
    "\\big" => CommandSpec::bare(K::SizedDelimiter),
    "\\Big" => CommandSpec::bare(K::SizedDelimiter),
    "\\bigg" => CommandSpec::bare(K::SizedDelimiter),
    "\\Bigg" => CommandSpec::bare(K::SizedDelimiter),
    "\\bigl" => CommandSpec::bare(K::SizedDelimiter),
    "\\Bigl" => CommandSpec::bare(K::SizedDelimiter),
    "\\biggl" => CommandSpec::bare(K::SizedDelimiter),
    "\\Biggl" => CommandSpec::bare(K::SizedDelimiter),
    "\\bigr" => CommandSpec::bare(K::SizedDelimiter),
    "\\Bigr" => CommandSpec::bare(K::SizedDelimiter),
    "\\biggr" => CommandSpec::bare(K::SizedDelimiter),
    "\\Biggr" => CommandSpec::bare(K::SizedDelimiter),
    "\\bigm" => CommandSpec::bare(K::SizedDelimiter),
    "\\Bigm" => CommandSpec::bare(K::SizedDelimiter),

    // Accepted and dropped
    "\\displaystyle" => CommandSpec::bare(K::Ignored),
    "\\textstyle" => CommandSpec::bare(K::Ignored),
    "\\scriptstyle" => CommandSpec::bare(K::Ignored),
    "\\scriptscriptstyle" => CommandSpec::bare(K::Ignored),
    "\\limits" => CommandSpec::bare(K::Ignored),
    "\\nolimits" => CommandSpec::bare(K::Ignored),
    "\\hline" => CommandSpec::bare(K::Ignored),
    "\\nonumber" => CommandSpec::bare(K::Ignored),
    "\\notag" => CommandSpec::bare(K::Ignored),
};

/// Looks up a structural command by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.get(name)
}

/// Reads the arguments `spec` declares and runs the handler for the
/// command's kind. `token` is the command itself, already consumed.
pub(crate) fn call_function(
    parser: &mut Parser<'_>,
    token: Token,
    spec: &CommandSpec,
) -> Result<ParseNode, ParseError> {
    let (args, opt_args) = parser.parse_arguments(&token.text, spec)?;
    let context = FunctionContext {
        func_name: token.text.clone(),
        parser,
        token,
    };

    match spec.kind {
        K::Fraction => genfrac::fraction(context, args),
        K::Binomial => genfrac::binomial(context, args),
        K::InfixFraction | K::InfixBinomial => Err(ParseError::with_token(
            ParseErrorKind::UnexpectedToken {
                found: context.func_name,
                expected: "an operand",
            },
            &context.token,
        )),
        K::Root => sqrt::root(context, args, opt_args),
        K::BigOperator(kind) => op::big_operator(context, kind),
        K::Function { .. } => operatorname::known_function(context),
        K::OperatorName => operatorname::operator_name(context, args),
        K::Font(font) => font::font(context, font, args),
        K::Text => font::text(context, args),
        K::Accent(accent) => accent::accent(context, accent, args),
        K::Left => delimsizing::left_right(context),
        K::Right => Err(ParseError::with_token(
            ParseErrorKind::UnexpectedToken {
                found: context.func_name,
                expected: r"a preceding \left",
            },
            &context.token,
        )),
        // Both are consumed by the parser's token fetch and never dispatched
        // in practice; they contribute nothing to the tree.
        K::SizedDelimiter | K::Ignored => Ok(ParseNode::empty()),
    }
}

/// Takes the single argument a one-argument handler was given.
fn single_arg(context: &FunctionContext<'_, '_>, args: Vec<ParseNode>) -> Result<ParseNode, ParseError> {
    args.into_iter().next().ok_or_else(|| {
        ParseError::with_token(
            ParseErrorKind::MissingArgument {
                command: context.func_name.clone(),
            },
            &context.token,
        )
    })
}
