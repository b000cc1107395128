use crate::lexer::tokenize;
use crate::mathml::tokenize_mathml;
use crate::parser::{Parser, parse_node::ParseNode};
use crate::types::{InputFormat, MathwordsError, ParseErrorKind, Settings, Token};

/// Tokenizes and parses an expression, returning its expression tree.
///
/// The expression is read as LaTeX or MathML according to
/// [`Settings::input_format`]. Content-free input (blank, or only spacing
/// commands and empty groups) is reported as [`MathwordsError::EmptyInput`]
/// rather than as a parse error.
pub fn parse_tree(expr: &str, settings: &Settings) -> Result<ParseNode, MathwordsError> {
    let tokens = match settings.input_format {
        InputFormat::Latex => tokenize(expr)?,
        InputFormat::MathMl => tokenize_mathml(expr, settings.max_nesting)?,
    };
    parse_tokens(tokens, settings)
}

fn parse_tokens(tokens: Vec<Token>, settings: &Settings) -> Result<ParseNode, MathwordsError> {
    let mut parser = Parser::new(tokens, settings);
    match parser.parse() {
        Ok(tree) => Ok(tree),
        Err(err) if *err.kind == ParseErrorKind::EmptyInput => Err(MathwordsError::EmptyInput),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_formats_build_the_same_tree() {
        let mathml = Settings::builder().input_format(InputFormat::MathMl).build();
        let pairs = [
            (r"\frac{a}{b+1}", "<math><mfrac><mi>a</mi><mrow><mi>b</mi><mo>+</mo><mn>1</mn></mrow></mfrac></math>"),
            (r"x^2 + 1", "<math><msup><mi>x</mi><mn>2</mn></msup><mo>+</mo><mn>1</mn></math>"),
            (r"\sqrt[3]{x}", "<math><mroot><mi>x</mi><mn>3</mn></mroot></math>"),
            (
                r"\sum_{i=1}^{n} i",
                "<math><munderover><mo>&#x2211;</mo><mrow><mi>i</mi><mo>=</mo><mn>1</mn></mrow><mi>n</mi></munderover><mi>i</mi></math>",
            ),
        ];
        for (latex, markup) in pairs {
            assert_eq!(
                parse_tree(markup, &mathml).unwrap(),
                parse_tree(latex, &Settings::default()).unwrap(),
                "{markup}"
            );
        }
    }

    #[test]
    fn test_empty_math_is_empty_input() {
        let mathml = Settings::builder().input_format(InputFormat::MathMl).build();
        assert!(matches!(
            parse_tree("<math><mspace width=\"1em\"/></math>", &mathml),
            Err(MathwordsError::EmptyInput)
        ));
    }
}
