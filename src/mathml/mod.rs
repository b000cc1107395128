//! Presentation MathML front end
//!
//! [`tokenize_mathml`] reads a `<math>` document and re-expresses it as the
//! token stream the LaTeX [`lexer`](crate::lexer) produces for the same
//! notation, so both input languages share one parser and one verbalizer.
//! Every synthesized token points at the MathML element it came from, so a
//! parse error still carries a byte offset into the caller's input.
//!
//! Layout rows (`<mrow>`, `<mstyle>` and similar) are flattened. MathML
//! producers nest them freely, and a brace group around each one would be
//! heard as "the quantity". Only schemata that take arguments (fractions,
//! roots, scripts) open a group.
//!
//! # Examples
//!
//! ```rust
//! use mathwords::mathml::tokenize_mathml;
//! use mathwords::types::TokenKind;
//!
//! let tokens = tokenize_mathml("<math><msup><mi>x</mi><mn>2</mn></msup></math>", 256).unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Identifier,
//!         TokenKind::Superscript,
//!         TokenKind::OpenBrace,
//!         TokenKind::Number,
//!         TokenKind::CloseBrace,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

use alloc::sync::Arc;

use log::trace;
use roxmltree::{Document, Node};

use crate::define_function::CommandKind;
use crate::functions;
use crate::lexer::char_kind;
use crate::types::{MathmlError, SourceLocation, Token, TokenKind};

/// Function application, invisible times, invisible separator and
/// invisible plus.
fn is_invisible(ch: char) -> bool {
    matches!(ch, '\u{2061}'..='\u{2064}')
}

/// Accent commands by the glyph of a `<mover>` over-script.
fn over_accent(glyph: &str) -> Option<&'static str> {
    Some(match glyph {
        "^" | "\u{2c6}" | "\u{302}" => r"\hat",
        "\u{af}" | "\u{203e}" | "\u{2015}" | "\u{305}" => r"\bar",
        "\u{2192}" | "\u{20d7}" => r"\vec",
        "~" | "\u{2dc}" | "\u{303}" => r"\tilde",
        "." | "\u{2d9}" | "\u{307}" => r"\dot",
        ".." | "\u{a8}" | "\u{308}" => r"\ddot",
        _ => return None,
    })
}

fn is_underline(glyph: &str) -> bool {
    matches!(glyph, "_" | "\u{af}" | "\u{203e}" | "\u{2015}" | "\u{332}")
}

/// Font commands by `mathvariant` value.
fn variant_command(variant: &str) -> Option<&'static str> {
    Some(match variant {
        "normal" => r"\mathrm",
        "bold" | "bold-italic" => r"\mathbf",
        "double-struck" => r"\mathbb",
        "script" | "bold-script" => r"\mathcal",
        "fraktur" | "bold-fraktur" => r"\mathfrak",
        "sans-serif" => r"\mathsf",
        "monospace" => r"\mathtt",
        _ => return None,
    })
}

/// Matrix environment for a table between a pair of fences.
fn fenced_matrix(open: &str, close: &str) -> Option<&'static str> {
    Some(match (open, close) {
        ("(", ")") => "pmatrix",
        ("[", "]") => "bmatrix",
        ("{", "}") => "Bmatrix",
        ("|", "|") => "vmatrix",
        ("\u{2016}", "\u{2016}") => "Vmatrix",
        _ => return None,
    })
}

/// `\name` for a multi-letter function or big operator name (`sin`, `lim`).
fn named_operator(text: &str) -> Option<String> {
    if text.chars().count() < 2 {
        return None;
    }
    let command = format!("\\{text}");
    matches!(
        functions::lookup(&command)?.kind,
        CommandKind::Function { .. } | CommandKind::BigOperator(_)
    )
    .then_some(command)
}

fn is_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Flattened text content, trimmed.
fn content(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_owned()
}

/// Text of an `<mo>`, or nothing for any other element.
fn operator_text(node: Node<'_, '_>) -> String {
    if is_named(node, "mo") {
        content(node)
    } else {
        String::new()
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// The element children of a schema with a fixed number of arguments.
fn children<'a, 'input, const N: usize>(
    node: Node<'a, 'input>,
) -> Result<[Node<'a, 'input>; N], MathmlError> {
    let children: Vec<_> = elements(node).collect();
    let found = children.len();
    children.try_into().map_err(|_| MathmlError::WrongArity {
        name: node.tag_name().name().to_owned(),
        expected: N,
        found,
        position: node.range().start,
    })
}

fn is_layout_row(node: Node<'_, '_>) -> bool {
    matches!(node.tag_name().name(), "mrow" | "mstyle" | "mpadded")
}

fn is_token_element(node: Node<'_, '_>) -> bool {
    matches!(node.tag_name().name(), "mi" | "mn" | "mo" | "mtext")
}

/// A zero `linethickness`, the MathML spelling of a binomial.
fn is_binomial(node: Node<'_, '_>) -> bool {
    node.attribute("linethickness").is_some_and(|thickness| {
        thickness
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .parse::<f64>()
            .is_ok_and(|value| value == 0.0)
    })
}

fn prime_count(node: Node<'_, '_>) -> Option<usize> {
    if !matches!(node.tag_name().name(), "mo" | "mi") {
        return None;
    }
    match content(node).as_str() {
        "'" | "\u{2032}" => Some(1),
        "''" | "\u{2033}" => Some(2),
        "\u{2034}" => Some(3),
        _ => None,
    }
}

struct Emitter {
    input: Arc<str>,
    tokens: Vec<Token>,
    depth: usize,
    max_nesting: usize,
}

impl Emitter {
    fn push(&mut self, kind: TokenKind, text: &str, node: Node<'_, '_>) {
        let range = node.range();
        let loc = SourceLocation::new(Arc::clone(&self.input), range.start, range.end);
        self.tokens.push(Token::new(kind, text.to_owned(), Some(loc)));
    }

    fn element(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        if self.depth >= self.max_nesting {
            return Err(MathmlError::TooDeep {
                limit: self.max_nesting,
                position: node.range().start,
            });
        }
        self.depth += 1;
        let result = self.element_inner(node);
        self.depth -= 1;
        result
    }

    fn element_inner(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        match node.tag_name().name() {
            "mi" => self.identifier(node),
            "mn" => {
                let digits = content(node);
                if !digits.is_empty() {
                    self.push(TokenKind::Number, &digits, node);
                }
            }
            "mo" => self.glyphs(&content(node), node),
            "mtext" | "ms" => {
                let text = content(node);
                if !text.is_empty() {
                    self.wrapped(r"\text", TokenKind::Identifier, &text, node);
                }
            }
            "math" | "mrow" | "mstyle" | "mpadded" | "menclose" | "mtd" => self.row(node)?,
            "semantics" | "maction" => {
                if let Some(first) = elements(node).next() {
                    self.element(first)?;
                }
            }
            "mspace" | "mphantom" | "annotation" | "annotation-xml" | "malignmark"
            | "maligngroup" => {}
            "mfrac" => {
                let [numerator, denominator] = children(node)?;
                let command = if is_binomial(node) { r"\binom" } else { r"\frac" };
                self.push(TokenKind::ControlSequence, command, node);
                self.argument(numerator)?;
                self.argument(denominator)?;
            }
            "msqrt" => {
                self.push(TokenKind::ControlSequence, r"\sqrt", node);
                self.push(TokenKind::OpenBrace, "{", node);
                self.row(node)?;
                self.push(TokenKind::CloseBrace, "}", node);
            }
            "mroot" => {
                let [radicand, index] = children(node)?;
                self.push(TokenKind::ControlSequence, r"\sqrt", node);
                self.push(TokenKind::Delimiter, "[", index);
                self.argument(index)?;
                self.push(TokenKind::Delimiter, "]", index);
                self.argument(radicand)?;
            }
            "msup" => {
                let [base, sup] = children(node)?;
                self.base(base)?;
                self.script(TokenKind::Superscript, sup)?;
            }
            "msub" => {
                let [base, sub] = children(node)?;
                self.base(base)?;
                self.script(TokenKind::Subscript, sub)?;
            }
            "msubsup" => {
                let [base, sub, sup] = children(node)?;
                self.base(base)?;
                self.script(TokenKind::Subscript, sub)?;
                self.script(TokenKind::Superscript, sup)?;
            }
            "munder" => {
                let [base, under] = children(node)?;
                self.under_over(node, base, Some(under), None)?;
            }
            "mover" => {
                let [base, over] = children(node)?;
                self.under_over(node, base, None, Some(over))?;
            }
            "munderover" => {
                let [base, under, over] = children(node)?;
                self.under_over(node, base, Some(under), Some(over))?;
            }
            "mfenced" => self.fenced(node)?,
            "mtable" => self.table(node, "matrix")?,
            name => {
                return Err(MathmlError::UnsupportedElement {
                    name: name.to_owned(),
                    position: node.range().start,
                });
            }
        }
        Ok(())
    }

    /// The children of `node` in order, with fenced tables and fenced
    /// zero-thickness fractions read as one construct.
    fn row(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        let children: Vec<_> = elements(node).collect();
        let mut index = 0;
        while index < children.len() {
            match self.fenced_layout(&children[index..])? {
                Some(used) => index += used,
                None => {
                    self.element(children[index])?;
                    index += 1;
                }
            }
        }
        Ok(())
    }

    fn fenced_layout(&mut self, row: &[Node<'_, '_>]) -> Result<Option<usize>, MathmlError> {
        let [open, inner, rest @ ..] = row else {
            return Ok(None);
        };
        let open_text = operator_text(*open);
        if open_text.is_empty() {
            return Ok(None);
        }
        let close_text = rest.first().map(|close| operator_text(*close)).unwrap_or_default();
        match inner.tag_name().name() {
            "mtable" => {
                let (environment, used) = match fenced_matrix(&open_text, &close_text) {
                    Some(environment) => (environment, 3),
                    None if open_text == "{" => ("cases", 2),
                    None => return Ok(None),
                };
                self.table(*inner, environment)?;
                Ok(Some(used))
            }
            "mfrac" if is_binomial(*inner) && open_text == "(" && close_text == ")" => {
                self.element(*inner)?;
                Ok(Some(3))
            }
            _ => Ok(None),
        }
    }

    /// A braced argument.
    fn argument(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        self.push(TokenKind::OpenBrace, "{", node);
        self.element(node)?;
        self.push(TokenKind::CloseBrace, "}", node);
        Ok(())
    }

    /// A script base: bare when it is a single token, so `sin` keeps its
    /// function reading and a closing fence its delimiter reading.
    fn base(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        let mut inner = node;
        while is_layout_row(inner)
            && let Ok([only]) = children::<1>(inner)
        {
            inner = only;
        }
        if is_token_element(inner) {
            self.element(inner)
        } else {
            self.argument(inner)
        }
    }

    fn script(&mut self, kind: TokenKind, node: Node<'_, '_>) -> Result<(), MathmlError> {
        if kind == TokenKind::Superscript
            && let Some(count) = prime_count(node)
        {
            for _ in 0..count {
                self.push(TokenKind::Prime, "'", node);
            }
            return Ok(());
        }
        let marker = if kind == TokenKind::Superscript { "^" } else { "_" };
        self.push(kind, marker, node);
        self.argument(node)
    }

    fn under_over(
        &mut self,
        node: Node<'_, '_>,
        base: Node<'_, '_>,
        under: Option<Node<'_, '_>>,
        over: Option<Node<'_, '_>>,
    ) -> Result<(), MathmlError> {
        let accent = match (under, over) {
            (None, Some(mark)) => over_accent(&operator_text(mark)),
            (Some(mark), None) if is_underline(&operator_text(mark)) => Some(r"\underline"),
            _ => None,
        };
        if let Some(accent) = accent {
            let accent = if accent == r"\bar" && !is_token_element(base) {
                r"\overline"
            } else {
                accent
            };
            self.push(TokenKind::ControlSequence, accent, node);
            return self.argument(base);
        }
        self.base(base)?;
        if let Some(under) = under {
            self.script(TokenKind::Subscript, under)?;
        }
        if let Some(over) = over {
            self.script(TokenKind::Superscript, over)?;
        }
        Ok(())
    }

    fn fenced(&mut self, node: Node<'_, '_>) -> Result<(), MathmlError> {
        let separators: Vec<char> = node
            .attribute("separators")
            .unwrap_or(",")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        self.glyphs(node.attribute("open").unwrap_or("("), node);
        for (index, child) in elements(node).enumerate() {
            if let Some(previous) = index.checked_sub(1)
                && let Some(separator) = separators.get(previous).or(separators.last())
            {
                self.glyphs(separator.encode_utf8(&mut [0; 4]), node);
            }
            self.element(child)?;
        }
        self.glyphs(node.attribute("close").unwrap_or(")"), node);
        Ok(())
    }

    fn table(&mut self, node: Node<'_, '_>, environment: &str) -> Result<(), MathmlError> {
        self.push(TokenKind::EnvironmentBegin, environment, node);
        for (index, row) in elements(node).enumerate() {
            let labeled = match row.tag_name().name() {
                "mtr" => false,
                "mlabeledtr" => true,
                name => {
                    return Err(MathmlError::UnsupportedElement {
                        name: name.to_owned(),
                        position: row.range().start,
                    });
                }
            };
            if index > 0 {
                self.push(TokenKind::RowSeparator, r"\\", row);
            }
            for (column, cell) in elements(row).skip(usize::from(labeled)).enumerate() {
                if column > 0 {
                    self.push(TokenKind::Ampersand, "&", cell);
                }
                self.element(cell)?;
            }
        }
        self.push(TokenKind::EnvironmentEnd, environment, node);
        Ok(())
    }

    fn identifier(&mut self, node: Node<'_, '_>) {
        let text = content(node);
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(ch), None) => {
                match node.attribute("mathvariant").and_then(variant_command) {
                    Some(font) if ch.is_alphabetic() => {
                        self.wrapped(font, TokenKind::Identifier, &text, node);
                    }
                    _ => self.glyphs(&text, node),
                }
            }
            _ => match named_operator(&text) {
                Some(command) => self.push(TokenKind::ControlSequence, &command, node),
                None => self.wrapped(r"\operatorname", TokenKind::Identifier, &text, node),
            },
        }
    }

    /// `command{text}` as one argument token.
    fn wrapped(&mut self, command: &str, kind: TokenKind, text: &str, node: Node<'_, '_>) {
        self.push(TokenKind::ControlSequence, command, node);
        self.push(TokenKind::OpenBrace, "{", node);
        self.push(kind, text, node);
        self.push(TokenKind::CloseBrace, "}", node);
    }

    /// Operator text, one token per glyph unless it names a function.
    fn glyphs(&mut self, text: &str, node: Node<'_, '_>) {
        if let Some(command) = named_operator(text) {
            self.push(TokenKind::ControlSequence, &command, node);
            return;
        }
        if text.chars().count() > 1 && text.chars().all(char::is_alphabetic) {
            self.wrapped(r"\operatorname", TokenKind::Identifier, text, node);
            return;
        }
        for ch in text.chars() {
            if ch.is_whitespace() || is_invisible(ch) {
                continue;
            }
            match ch {
                '{' => self.push(TokenKind::ControlSequence, r"\{", node),
                '}' => self.push(TokenKind::ControlSequence, r"\}", node),
                _ => {
                    let kind = match char_kind(ch) {
                        TokenKind::Superscript
                        | TokenKind::Subscript
                        | TokenKind::Ampersand
                        | TokenKind::OpenBrace
                        | TokenKind::CloseBrace => TokenKind::Symbol,
                        kind => kind,
                    };
                    self.push(kind, ch.encode_utf8(&mut [0; 4]), node);
                }
            }
        }
    }
}

/// Reads a presentation MathML document into parser tokens, ending with a
/// single EOF token.
///
/// # Errors
///
/// Returns a [`MathmlError`] for malformed XML, a document element other
/// than `<math>`, elements with no spoken reading (`<mmultiscripts>`), a
/// schema with the wrong number of children, and nesting deeper than
/// `max_nesting`.
pub fn tokenize_mathml(source: &str, max_nesting: usize) -> Result<Vec<Token>, MathmlError> {
    let document = Document::parse(source)?;
    let root = document.root_element();
    let name = root.tag_name().name();
    if name != "math" {
        return Err(MathmlError::NotMath {
            found: name.to_owned(),
        });
    }

    let mut emitter = Emitter {
        input: Arc::from(source),
        tokens: Vec::new(),
        depth: 0,
        max_nesting,
    };
    emitter.element(root)?;
    trace!("read {} tokens from MathML", emitter.tokens.len());

    let end = source.len();
    let eof = SourceLocation::new(Arc::clone(&emitter.input), end, end);
    emitter
        .tokens
        .push(Token::new(TokenKind::Eof, "EOF".to_owned(), Some(eof)));
    Ok(emitter.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(body: &str) -> Vec<(TokenKind, String)> {
        tokenize_mathml(&format!("<math>{body}</math>"), 256)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn texts(body: &str) -> String {
        kinds_and_texts(body)
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_layout_schemata() {
        assert_eq!(
            texts("<mfrac><mi>a</mi><mrow><mi>b</mi><mo>+</mo><mn>1</mn></mrow></mfrac>"),
            r"\frac { a } { b + 1 }"
        );
        assert_eq!(texts("<msqrt><mi>x</mi><mo>+</mo><mn>1</mn></msqrt>"), r"\sqrt { x + 1 }");
        assert_eq!(texts("<mroot><mi>x</mi><mn>3</mn></mroot>"), r"\sqrt [ { 3 } ] { x }");
        assert_eq!(
            texts("<msubsup><mi>x</mi><mi>i</mi><mn>2</mn></msubsup>"),
            "x _ { i } ^ { 2 }"
        );
        assert_eq!(
            texts("<msup><mrow><mi>x</mi><mo>+</mo><mn>1</mn></mrow><mn>2</mn></msup>"),
            "{ x + 1 } ^ { 2 }"
        );
        assert_eq!(texts("<msup><mi>f</mi><mo>\u{2032}</mo></msup>"), "f '");
    }

    #[test]
    fn test_rows_are_flattened() {
        assert_eq!(
            texts("<mrow><mi>x</mi><mo>=</mo><mrow><mi>a</mi><mo>+</mo><mi>b</mi></mrow></mrow>"),
            "x = a + b"
        );
        assert_eq!(
            texts("<mi>f</mi><mo>&#x2061;</mo><mo>(</mo><mi>x</mi><mo>)</mo>"),
            "f ( x )"
        );
    }

    #[test]
    fn test_names_and_glyphs() {
        assert_eq!(
            texts("<mi>sin</mi><mo>&#x2061;</mo><mi>x</mi>"),
            r"\sin x"
        );
        assert_eq!(texts("<mi>loss</mi>"), r"\operatorname { loss }");
        assert_eq!(texts("<mi mathvariant=\"double-struck\">R</mi>"), r"\mathbb { R }");
        assert_eq!(
            texts("<munderover><mo>&#x2211;</mo><mrow><mi>i</mi><mo>=</mo><mn>1</mn></mrow><mi>n</mi></munderover>"),
            "\u{2211} _ { i = 1 } ^ { n }"
        );
        assert_eq!(
            texts("<munder><mo>lim</mo><mrow><mi>x</mi><mo>&#x2192;</mo><mn>0</mn></mrow></munder>"),
            "\\lim _ { x \u{2192} 0 }"
        );
        assert_eq!(texts("<mo>{</mo><mi>x</mi><mo>}</mo>"), r"\{ x \}");
        assert_eq!(
            kinds_and_texts("<mo>(</mo><mo>^</mo>")
                .into_iter()
                .map(|(kind, _)| kind)
                .collect::<Vec<_>>(),
            [TokenKind::Delimiter, TokenKind::Symbol]
        );
    }

    #[test]
    fn test_accents() {
        assert_eq!(texts("<mover><mi>x</mi><mo>^</mo></mover>"), r"\hat { x }");
        assert_eq!(texts("<mover><mi>v</mi><mo>&#x2192;</mo></mover>"), r"\vec { v }");
        assert_eq!(
            texts("<mover><mrow><mi>a</mi><mi>b</mi></mrow><mo>&#xaf;</mo></mover>"),
            r"\overline { a b }"
        );
        assert_eq!(texts("<munder><mi>x</mi><mo>_</mo></munder>"), r"\underline { x }");
    }

    #[test]
    fn test_tables() {
        let cell = |text: &str| format!("<mtd><mi>{text}</mi></mtd>");
        let table = format!(
            "<mtable><mtr>{}{}</mtr><mtr>{}{}</mtr></mtable>",
            cell("a"),
            cell("b"),
            cell("c"),
            cell("d")
        );
        assert_eq!(texts(&table), r"matrix a & b \\ c & d matrix");
        assert_eq!(
            texts(&format!("<mrow><mo>(</mo>{table}<mo>)</mo></mrow>")),
            r"pmatrix a & b \\ c & d pmatrix"
        );
        assert_eq!(
            texts(&format!("<mrow><mo>{{</mo>{table}</mrow>")),
            r"cases a & b \\ c & d cases"
        );
        let kinds: Vec<_> = kinds_and_texts(&table).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds.first(), Some(&TokenKind::EnvironmentBegin));
        assert_eq!(kinds.last(), Some(&TokenKind::EnvironmentEnd));
    }

    #[test]
    fn test_binomials_and_fences() {
        assert_eq!(
            texts("<mo>(</mo><mfrac linethickness=\"0\"><mi>n</mi><mi>k</mi></mfrac><mo>)</mo>"),
            r"\binom { n } { k }"
        );
        assert_eq!(
            texts("<mfenced><mi>a</mi><mi>b</mi><mi>c</mi></mfenced>"),
            "( a , b , c )"
        );
        assert_eq!(
            texts("<mfenced open=\"[\" close=\"]\" separators=\";\"><mi>a</mi><mi>b</mi></mfenced>"),
            "[ a ; b ]"
        );
    }

    #[test]
    fn test_locations_point_into_the_markup() {
        let source = "<math><mi>x</mi><mo>+</mo><mn>12</mn></math>";
        let tokens = tokenize_mathml(source, 256).unwrap();
        let number = &tokens[2];
        let loc = number.loc.as_ref().unwrap();
        assert_eq!(&source[loc.start..loc.end], "<mn>12</mn>");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_rejected_documents() {
        assert!(matches!(
            tokenize_mathml("<math><mi>x</mi>", 256),
            Err(MathmlError::Xml(_))
        ));
        assert!(matches!(
            tokenize_mathml("<mrow><mi>x</mi></mrow>", 256),
            Err(MathmlError::NotMath { found }) if found == "mrow"
        ));
        let err = tokenize_mathml("<math><mi>x</mi><mmultiscripts/></math>", 256).unwrap_err();
        assert!(matches!(&err, MathmlError::UnsupportedElement { name, .. } if name == "mmultiscripts"));
        assert_eq!(err.position(), Some(16));
        assert!(matches!(
            tokenize_mathml("<math><mfrac><mi>a</mi></mfrac></math>", 256),
            Err(MathmlError::WrongArity { expected: 2, found: 1, .. })
        ));
        let deep = format!("<math>{}<mi>x</mi>{}</math>", "<mrow>".repeat(40), "</mrow>".repeat(40));
        assert!(matches!(
            tokenize_mathml(&deep, 16),
            Err(MathmlError::TooDeep { limit: 16, .. })
        ));
        assert!(tokenize_mathml(&deep, 256).is_ok());
    }
}
