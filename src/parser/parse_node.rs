//! Expression tree produced by the parser and read by the verbalizer
//!
//! Every node owns its children outright: there is no sharing and no cycle,
//! and nothing mutates a tree once the parser has returned it. The variant
//! set is closed; the verbalizer matches on it exhaustively.

use core::iter;

use strum::{AsRefStr, Display, EnumDiscriminants};

use crate::symbols::{Atom, Precedence};

/// A node of the expression tree.
///
/// # See Also
///
/// * [`NodeType`] - The discriminant type for runtime type checking
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant type for runtime type checking of parse nodes")]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "kebab-case"))]
#[strum_discriminants(name(NodeType))]
pub enum ParseNode {
    /// ## Leaves
    /// A numeric literal, kept as written: `3.14`, `10000`
    Number(ParseNodeNumber),
    /// A variable, Greek letter or named constant
    Identifier(ParseNodeIdentifier),
    /// Literal text from `\text{...}`
    Text(ParseNodeText),

    /// ## Operators
    /// Infix arithmetic, relation or punctuation
    BinaryOp(Box<ParseNodeBinaryOp>),
    /// Prefix sign or negation
    UnaryOp(Box<ParseNodeUnaryOp>),
    /// Factorial or primes following an operand
    Postfix(Box<ParseNodePostfix>),

    /// ## Layout constructs
    /// `\frac{a}{b}` and its variants
    Fraction(Box<ParseNodeFraction>),
    /// `\binom{n}{k}`
    Binomial(Box<ParseNodeBinomial>),
    /// Square roots and n-th roots
    Root(Box<ParseNodeRoot>),
    /// Base with a superscript
    Power(Box<ParseNodePower>),
    /// Base with a subscript
    Sub(Box<ParseNodeSub>),
    /// Base with both a subscript and a superscript
    SubSup(Box<ParseNodeSubSup>),
    /// Sum, product, integral, union, limit and friends
    BigOperator(Box<ParseNodeBigOperator>),
    /// Known functions and named text runs applied to arguments
    Function(Box<ParseNodeFunction>),
    /// Content between a pair of delimiters
    Delimited(Box<ParseNodeDelimited>),
    /// Matrix-like environments
    Matrix(ParseNodeMatrix),
    /// Decoration over or under a base: hat, bar, vector arrow
    Accent(Box<ParseNodeAccent>),

    /// ## Grouping
    /// Juxtaposed operands, read as implied multiplication
    Sequence(ParseNodeSequence),
    /// An explicit brace group around a compound expression
    Group(Box<ParseNode>),
}

impl ParseNode {
    /// The node standing for "nothing here", as produced by `{}` or an
    /// empty matrix cell.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Sequence(ParseNodeSequence { items: Vec::new() })
    }

    /// Returns `true` for the empty node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Sequence(seq) if seq.items.is_empty())
    }

    /// Returns the node's discriminant.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        NodeType::from(self)
    }

    /// How tightly the node holds together when it appears as an operand.
    ///
    /// A child whose precedence is lower than its parent operator's must be
    /// announced as a grouped quantity when spoken.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::BinaryOp(chain) => chain.precedence(),
            Self::UnaryOp(_) => Precedence::Unary,
            Self::Sequence(seq) if seq.items.len() > 1 => Precedence::Implicit,
            Self::Power(_) | Self::Sub(_) | Self::SubSup(_) | Self::Postfix(_) => {
                Precedence::Script
            }
            _ => Precedence::Atom,
        }
    }

    /// Returns `true` for a single number, letter or word.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Identifier(_) | Self::Text(_))
    }

    /// Builds a one-link operator chain.
    #[must_use]
    pub fn binary(op: Operator, left: Self, right: Self) -> Self {
        Self::BinaryOp(Box::new(ParseNodeBinaryOp {
            first: left,
            rest: vec![(op, right)],
        }))
    }

    /// Builds an identifier node with no font.
    #[must_use]
    pub fn identifier<S: Into<String>>(name: S) -> Self {
        Self::Identifier(ParseNodeIdentifier {
            name: name.into(),
            font: None,
        })
    }

    /// Builds a number node.
    #[must_use]
    pub fn number<S: Into<String>>(text: S) -> Self {
        Self::Number(ParseNodeNumber { text: text.into() })
    }
}

/// An infix or prefix operator as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// The operator text: `+`, `\le`, `×`.
    pub text: String,
    /// Whether the operator combines, relates or separates.
    pub atom: Atom,
    /// Binding strength.
    pub precedence: Precedence,
}

/// Numeric literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeNumber {
    /// Digits with at most one decimal point.
    pub text: String,
}

/// Letter fonts that change how a letter is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Font {
    /// `\mathrm`, `\textrm`
    Roman,
    /// `\mathit`, `\textit`
    Italic,
    /// `\mathbf`, `\boldsymbol`, `\textbf`
    Bold,
    /// `\mathsf`
    SansSerif,
    /// `\mathtt`
    Monospace,
    /// `\mathcal`
    Calligraphic,
    /// `\mathfrak`
    Fraktur,
    /// `\mathbb`
    DoubleStruck,
}

/// A variable, Greek letter or named constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeIdentifier {
    /// The letter or glyph (`x`, `α`), or the command for constants without
    /// a glyph of their own (`\infty`).
    pub name: String,
    /// Font applied by a wrapper command.
    pub font: Option<Font>,
}

/// Literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeText {
    /// The text with runs of whitespace collapsed.
    pub text: String,
}

/// A run of infix operations at one precedence level.
///
/// `a + b - c` is a single node with two links rather than a left-leaning
/// pair of nodes, so a long sum costs no extra nesting. Every operator in
/// `rest` has the same precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeBinaryOp {
    /// The leftmost operand.
    pub first: ParseNode,
    /// Each further operator with the operand to its right, left to right.
    pub rest: Vec<(Operator, ParseNode)>,
}

impl ParseNodeBinaryOp {
    /// The shared precedence of the chain's operators.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        self.rest
            .first()
            .map_or(Precedence::Atom, |(op, _)| op.precedence)
    }

    /// The left operand, operator and right operand of a one-link chain.
    #[must_use]
    pub fn single(&self) -> Option<(&ParseNode, &Operator, &ParseNode)> {
        match self.rest.as_slice() {
            [(op, right)] => Some((&self.first, op, right)),
            _ => None,
        }
    }

    /// All operands, left to right.
    pub fn operands(&self) -> impl Iterator<Item = &ParseNode> {
        iter::once(&self.first).chain(self.rest.iter().map(|(_, operand)| operand))
    }

    /// Whether every operator is spelled `text`.
    #[must_use]
    pub fn all_ops(&self, text: &str) -> bool {
        self.rest.iter().all(|(op, _)| op.text == text)
    }
}

/// Prefix operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeUnaryOp {
    /// The sign or negation.
    pub op: Operator,
    /// The operand.
    pub operand: ParseNode,
}

/// Marks written after an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    /// `!`
    Factorial,
    /// One or more `'`
    Prime(usize),
}

/// Postfix operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodePostfix {
    /// Which mark follows the operand.
    pub op: PostfixOp,
    /// The operand.
    pub operand: ParseNode,
}

/// Fraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeFraction {
    /// Top.
    pub numerator: ParseNode,
    /// Bottom.
    pub denominator: ParseNode,
}

/// Binomial coefficient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeBinomial {
    /// Top.
    pub top: ParseNode,
    /// Bottom.
    pub bottom: ParseNode,
}

/// Radical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeRoot {
    /// Root index; absent for a square root.
    pub degree: Option<ParseNode>,
    /// The expression under the radical.
    pub radicand: ParseNode,
}

/// Superscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodePower {
    /// The raised-upon operand.
    pub base: ParseNode,
    /// The superscript.
    pub exponent: ParseNode,
}

/// Subscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSub {
    /// The subscripted operand.
    pub base: ParseNode,
    /// The subscript.
    pub subscript: ParseNode,
}

/// Subscript and superscript on the same base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSubSup {
    /// The scripted operand.
    pub base: ParseNode,
    /// The subscript.
    pub subscript: ParseNode,
    /// The superscript.
    pub exponent: ParseNode,
}

/// The operators that take bounds and a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BigOpKind {
    /// `\sum`
    Sum,
    /// `\prod`
    Product,
    /// `\coprod`
    Coproduct,
    /// `\int`
    Integral,
    /// `\iint`
    DoubleIntegral,
    /// `\iiint`
    TripleIntegral,
    /// `\oint`
    ContourIntegral,
    /// `\bigcup`
    Union,
    /// `\bigcap`
    Intersection,
    /// `\bigoplus`
    DirectSum,
    /// `\bigotimes`
    TensorProduct,
    /// `\bigvee`
    Disjunction,
    /// `\bigwedge`
    Conjunction,
    /// `\lim`
    Limit,
    /// `\limsup`
    LimitSuperior,
    /// `\liminf`
    LimitInferior,
}

/// Big operator with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeBigOperator {
    /// Which operator.
    pub kind: BigOpKind,
    /// The subscript bound, e.g. `i=1` or `x \to 0`.
    pub lower: Option<ParseNode>,
    /// The superscript bound.
    pub upper: Option<ParseNode>,
    /// The operand the operator ranges over.
    pub body: ParseNode,
}

/// What a function is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionName {
    /// A registered function command such as `\sin` or `\max`, spoken by
    /// its registered name.
    Known(String),
    /// A named run from `\operatorname{...}` or a multi-letter `\mathrm{...}`,
    /// spoken verbatim.
    TextRun(String),
}

/// Function application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeFunction {
    /// The function's name.
    pub name: FunctionName,
    /// Subscript on the name: a log base or a range like `x \in S`.
    pub subscript: Option<ParseNode>,
    /// Superscript on the name: a power or `-1` for an inverse.
    pub superscript: Option<ParseNode>,
    /// Arguments in order; empty when the name stands alone.
    pub args: Vec<ParseNode>,
}

/// Delimited content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeDelimited {
    /// Canonical opening delimiter: `(`, `[`, `\{`, `|`, `\|`, `\langle`,
    /// `\lfloor`, `\lceil`, or `.` for none.
    pub open: String,
    /// Canonical closing delimiter, `.` for none.
    pub close: String,
    /// The enclosed expression; empty for `()`.
    pub inner: ParseNode,
}

/// The matrix-like environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MatrixKind {
    /// `matrix`
    Plain,
    /// `pmatrix`
    Parenthesized,
    /// `bmatrix`
    Bracketed,
    /// `Bmatrix`
    Braced,
    /// `vmatrix`
    Determinant,
    /// `Vmatrix`
    Norm,
    /// `smallmatrix`
    Small,
    /// `cases`
    Cases,
    /// `array`
    Array,
}

/// Rows and cells of an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMatrix {
    /// Which environment produced the node.
    pub kind: MatrixKind,
    /// Cells, row by row.
    pub rows: Vec<Vec<ParseNode>>,
}

/// Accents and over/under decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum AccentKind {
    /// `\hat`, `\widehat`
    Hat,
    /// `\bar`
    Bar,
    /// `\vec`, `\overrightarrow`
    Vector,
    /// `\dot`
    Dot,
    /// `\ddot`
    DoubleDot,
    /// `\tilde`, `\widetilde`
    Tilde,
    /// `\overline`
    Overline,
    /// `\underline`
    Underline,
}

/// Accented base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeAccent {
    /// The decoration.
    pub accent: AccentKind,
    /// The decorated expression.
    pub base: ParseNode,
}

/// Juxtaposed operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSequence {
    /// The operands, left to right.
    pub items: Vec<ParseNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node() {
        assert!(ParseNode::empty().is_empty());
        assert!(!ParseNode::identifier("x").is_empty());
        assert_eq!(ParseNode::empty().node_type(), NodeType::Sequence);
    }

    #[test]
    fn test_precedence_of_nodes() {
        let plus = Operator {
            text: "+".to_owned(),
            atom: Atom::Bin,
            precedence: Precedence::Additive,
        };
        let sum = ParseNode::binary(plus, ParseNode::identifier("a"), ParseNode::number("1"));
        assert_eq!(sum.precedence(), Precedence::Additive);
        let ParseNode::BinaryOp(chain) = &sum else {
            panic!("expected an operator chain");
        };
        let (left, op, right) = chain.single().unwrap();
        assert_eq!(
            (left, op.text.as_str(), right),
            (&ParseNode::identifier("a"), "+", &ParseNode::number("1"))
        );
        assert!(chain.all_ops("+"));
        assert_eq!(ParseNode::number("2").precedence(), Precedence::Atom);
        let juxtaposed = ParseNode::Sequence(ParseNodeSequence {
            items: vec![ParseNode::number("2"), ParseNode::identifier("x")],
        });
        assert_eq!(juxtaposed.precedence(), Precedence::Implicit);
    }

    #[test]
    fn test_node_type_names() {
        assert_eq!(NodeType::BigOperator.as_ref(), "big-operator");
        assert_eq!(BigOpKind::DoubleIntegral.as_ref(), "double-integral");
    }
}
