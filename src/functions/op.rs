//! Big operators: sums, products, integrals, set operators and limits
//!
//! A big operator reads its bounds from the scripts written directly after
//! it (in either order, `\limits` and `\nolimits` ignored), then its body:
//! the operand run up to the next additive or weaker operator, so that in
//! `\sum_{i=1}^{n} i^2 + 1` the `+ 1` stays outside the sum.

use crate::define_function::FunctionContext;
use crate::parser::parse_node::{BigOpKind, ParseNode, ParseNodeBigOperator};
use crate::symbols::Precedence;
use crate::types::{ParseError, ParseErrorKind};

pub(super) fn big_operator(
    context: FunctionContext<'_, '_>,
    kind: BigOpKind,
) -> Result<ParseNode, ParseError> {
    let FunctionContext {
        func_name,
        parser,
        token,
    } = context;
    let (lower, upper) = parser.parse_limits()?;
    let Some(body) = parser.parse_expression(Precedence::Multiplicative)? else {
        return Err(ParseError::with_token(
            ParseErrorKind::MissingArgument { command: func_name },
            &token,
        ));
    };
    Ok(ParseNode::BigOperator(Box::new(ParseNodeBigOperator {
        kind,
        lower,
        upper,
        body,
    })))
}

impl BigOpKind {
    /// Spoken name of the operator.
    #[must_use]
    pub const fn speech(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Coproduct => "coproduct",
            Self::Integral => "integral",
            Self::DoubleIntegral => "double integral",
            Self::TripleIntegral => "triple integral",
            Self::ContourIntegral => "contour integral",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::DirectSum => "direct sum",
            Self::TensorProduct => "tensor product",
            Self::Disjunction => "disjunction",
            Self::Conjunction => "conjunction",
            Self::Limit => "limit",
            Self::LimitSuperior => "limit superior",
            Self::LimitInferior => "limit inferior",
        }
    }

    /// Limits read their lower bound as "as x approaches a".
    #[must_use]
    pub const fn is_limit(self) -> bool {
        matches!(
            self,
            Self::Limit | Self::LimitSuperior | Self::LimitInferior
        )
    }
}
