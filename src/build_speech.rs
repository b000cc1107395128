//! Speech building for parse trees
//!
//! Walks a [`ParseNode`] tree top-down and writes English into an
//! [`Utterance`]. Every node kind has one `speak_*` function; the style
//! decides wording, the display flag decides verbosity. Grouping follows
//! precedence: a child that binds more loosely than the position it sits in
//! is announced as "the quantity ...", closed by a pause, so `(a+b)^2` and
//! `a+b^2` never read alike.

use crate::define_function::SubscriptRole;
use crate::functions::delimsizing;
use crate::functions::operatorname::function_info;
use crate::parser::parse_node::{
    Font, FunctionName, MatrixKind, Operator, ParseNode, ParseNodeAccent, ParseNodeBigOperator,
    ParseNodeDelimited, ParseNodeFraction, ParseNodeFunction, ParseNodeIdentifier,
    ParseNodeMatrix, ParseNodePostfix, ParseNodeRoot, ParseNodeUnaryOp, PostfixOp,
};
use crate::style::{BoundsPhrasing, FractionPhrasing, SpeechStyle};
use crate::symbols::{Atom, Precedence, is_function_letter};
use crate::utils::{denominator_word, ordinal_suffix, small_integer};
use crate::utterance::Utterance;

/// Read-only state shared by the whole traversal.
#[derive(Debug, Clone, Copy)]
pub struct SpeechContext<'a> {
    /// Phrasing rules.
    pub style: &'a SpeechStyle,
    /// Display math reads constructs more explicitly.
    pub display_mode: bool,
}

/// Speaks a whole tree.
///
/// The result is never empty: a tree with nothing to say (such as
/// `\left. \right.`) reads as "blank".
#[must_use]
pub fn build_speech(tree: &ParseNode, style: &SpeechStyle, display_mode: bool) -> String {
    let ctx = SpeechContext {
        style,
        display_mode,
    };
    let mut out = Utterance::new();
    speak_group(tree, ctx, &mut out);
    if out.is_empty() {
        out.word("blank");
    }
    out.finish()
}

/// Speaks one node.
pub fn speak_group(node: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    match node {
        ParseNode::Number(number) => out.word(&number.text),
        ParseNode::Identifier(ident) => speak_identifier(ident, ctx, out),
        ParseNode::Text(text) => out.word(&text.text),
        ParseNode::BinaryOp(chain) => speak_chain(&chain.first, &chain.rest, ctx, out),
        ParseNode::UnaryOp(op) => speak_unary(op, ctx, out),
        ParseNode::Postfix(postfix) => speak_postfix(postfix, ctx, out),
        ParseNode::Fraction(frac) => speak_fraction(frac, false, ctx, out),
        ParseNode::Binomial(binom) => {
            speak_operand(&binom.top, Precedence::Script, ctx, out);
            out.word("choose");
            speak_operand(&binom.bottom, Precedence::Script, ctx, out);
        }
        ParseNode::Root(root) => speak_root(root, false, ctx, out),
        ParseNode::Power(power) => {
            speak_operand(&power.base, Precedence::Script, ctx, out);
            speak_exponent(&power.exponent, ctx, out);
        }
        ParseNode::Sub(sub) => {
            speak_operand(&sub.base, Precedence::Script, ctx, out);
            speak_subscript(&sub.subscript, ctx, out);
        }
        ParseNode::SubSup(supsub) => {
            speak_operand(&supsub.base, Precedence::Script, ctx, out);
            speak_subscript(&supsub.subscript, ctx, out);
            speak_exponent(&supsub.exponent, ctx, out);
        }
        ParseNode::BigOperator(op) => speak_big_operator(op, ctx, out),
        ParseNode::Function(func) => speak_function(func, ctx, out),
        ParseNode::Delimited(delimited) => speak_delimited(delimited, ctx, out),
        ParseNode::Matrix(matrix) => speak_matrix(matrix, ctx, out),
        ParseNode::Accent(accent) => speak_accent(accent, ctx, out),
        ParseNode::Sequence(seq) => speak_sequence(&seq.items, ctx, out),
        ParseNode::Group(inner) => speak_operand(inner, Precedence::Script, ctx, out),
    }
}

/// Speaks `node` as an operand in a position that needs at least `min`
/// precedence, grouping it when it binds more loosely.
///
/// Script bases also close open-ended phrases, so `\frac{a}{b}^2` is not
/// heard as "a over b squared".
fn speak_operand(node: &ParseNode, min: Precedence, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if node.precedence() < min {
        speak_quantity(node, ctx, out);
    } else if min >= Precedence::Script && is_open_ended(node, ctx) {
        speak_closed(node, ctx, out);
    } else {
        speak_group(node, ctx, out);
    }
}

/// Whether the node's reading has no audible end, so that whatever is
/// spoken next sounds like part of it: "a over b", a square root of a
/// single letter, the body of a sum.
fn is_open_ended(node: &ParseNode, ctx: SpeechContext<'_>) -> bool {
    match node {
        ParseNode::Fraction(frac) => {
            !(ctx.style.common_fractions
                && common_fraction(&frac.numerator, &frac.denominator).is_some())
                && reads_as_over(frac, ctx)
        }
        ParseNode::Root(root) => is_simple(&root.radicand),
        ParseNode::BigOperator(_) => true,
        _ => false,
    }
}

/// Speaks an open-ended node in a form that ends audibly.
fn speak_closed(node: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    match node {
        ParseNode::Fraction(frac) => speak_fraction(frac, true, ctx, out),
        ParseNode::Root(root) => speak_root(root, true, ctx, out),
        node => speak_quantity(node, ctx, out),
    }
}

fn speak_quantity(node: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    out.word(ctx.style.quantity);
    speak_group(node, ctx, out);
    out.pause();
}

/// A leaf, or a sign or postfix mark on a leaf: short enough to need no
/// closing marker.
fn is_simple(node: &ParseNode) -> bool {
    match node {
        ParseNode::UnaryOp(op) => op.operand.is_leaf(),
        ParseNode::Postfix(postfix) => postfix.operand.is_leaf(),
        node => node.is_leaf(),
    }
}

/// Closes a compound construct with its end marker.
fn end_marker(node: &ParseNode, marker: &str, out: &mut Utterance) {
    if !is_simple(node) {
        out.pause();
        out.word(marker);
        out.pause();
    }
}

fn number_set(letter: &str) -> Option<&'static str> {
    Some(match letter {
        "N" => "the natural numbers",
        "Z" => "the integers",
        "Q" => "the rational numbers",
        "R" => "the real numbers",
        "C" => "the complex numbers",
        _ => return None,
    })
}

fn speak_identifier(ident: &ParseNodeIdentifier, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let name = ident.name.as_str();
    match ident.font {
        Some(Font::DoubleStruck) => {
            if let Some(set) = number_set(name) {
                out.word(set);
                return;
            }
            out.word("double struck");
        }
        Some(Font::Bold) => out.word("bold"),
        Some(Font::Calligraphic) => out.word("script"),
        Some(Font::Fraktur) => out.word("fraktur"),
        Some(Font::Roman | Font::Italic | Font::SansSerif | Font::Monospace) | None => {}
    }
    out.word(identifier_word(name, ctx.style));
}

fn identifier_word<'a>(name: &'a str, style: &SpeechStyle) -> &'a str {
    style
        .symbol_word(name)
        .filter(|word| !word.is_empty())
        .unwrap_or(name)
}

/// Word for an operator: the style's, else the symbol table's, else the
/// delimiter name (`\middle\|`), else the text itself.
fn operator_word<'a>(text: &'a str, style: &SpeechStyle) -> &'a str {
    if text == "|" {
        return "given";
    }
    style
        .symbol_word(text)
        .or_else(|| delimsizing::canonical(text).map(|delim| delim.speech))
        .filter(|word| !word.is_empty())
        .unwrap_or(text)
}

/// Speaks `first` followed by each operator and operand of a chain.
fn speak_chain(
    first: &ParseNode,
    rest: &[(Operator, ParseNode)],
    ctx: SpeechContext<'_>,
    out: &mut Utterance,
) {
    let Some((head, _)) = rest.first() else {
        speak_group(first, ctx, out);
        return;
    };
    let precedence = head.precedence;
    speak_operand(first, precedence, ctx, out);
    for (op, operand) in rest {
        match op.atom {
            Atom::Punct if op.text == ";" => out.stop(),
            Atom::Punct if matches!(op.text.as_str(), "," | ".") => out.pause(),
            Atom::Punct | Atom::Bin | Atom::Rel => out.word(operator_word(&op.text, ctx.style)),
        }
        speak_operand(operand, precedence.tighter(), ctx, out);
    }
}

fn speak_unary(op: &ParseNodeUnaryOp, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let word = match op.op.text.as_str() {
        "-" | "\u{2212}" => ctx.style.negative,
        "+" => "positive",
        text => operator_word(text, ctx.style),
    };
    out.word(word);
    // A leading relation (`> 0`) takes a whole additive operand.
    let min = if op.op.atom == Atom::Rel {
        Precedence::Additive
    } else {
        Precedence::Unary
    };
    speak_operand(&op.operand, min, ctx, out);
}

fn speak_postfix(postfix: &ParseNodePostfix, ctx: SpeechContext<'_>, out: &mut Utterance) {
    speak_operand(&postfix.operand, Precedence::Script, ctx, out);
    match postfix.op {
        PostfixOp::Factorial => out.word("factorial"),
        PostfixOp::Prime(1) => out.word("prime"),
        PostfixOp::Prime(2) => out.word("double prime"),
        PostfixOp::Prime(3) => out.word("triple prime"),
        PostfixOp::Prime(count) => {
            for _ in 0..count {
                out.word("prime");
            }
        }
    }
}

/// "2 thirds" for a small integer over 2..=10.
fn common_fraction(numerator: &ParseNode, denominator: &ParseNode) -> Option<String> {
    let (ParseNode::Number(top), ParseNode::Number(bottom)) = (numerator, denominator) else {
        return None;
    };
    let top = small_integer(&top.text)?;
    let word = denominator_word(small_integer(&bottom.text)?, top != 1)?;
    Some(format!("{top} {word}"))
}

/// Whether a fraction takes the short "a over b" reading.
fn reads_as_over(frac: &ParseNodeFraction, ctx: SpeechContext<'_>) -> bool {
    let simple = is_simple(&frac.numerator) && is_simple(&frac.denominator);
    match ctx.style.fraction {
        FractionPhrasing::Verbose => simple && !ctx.display_mode,
        FractionPhrasing::Bracketed => simple,
    }
}

/// Speaks a fraction; `closed` forces a reading with an audible end.
fn speak_fraction(
    frac: &ParseNodeFraction,
    closed: bool,
    ctx: SpeechContext<'_>,
    out: &mut Utterance,
) {
    let style = ctx.style;
    if style.common_fractions
        && let Some(words) = common_fraction(&frac.numerator, &frac.denominator)
    {
        out.word(&words);
        return;
    }

    if !closed && reads_as_over(frac, ctx) {
        speak_over(frac, ctx, out);
        return;
    }
    match style.fraction {
        FractionPhrasing::Verbose => {
            out.word("the fraction with numerator");
            speak_group(&frac.numerator, ctx, out);
            out.word("and denominator");
            speak_group(&frac.denominator, ctx, out);
            out.pause();
        }
        FractionPhrasing::Bracketed => {
            out.word("fraction");
            out.pause();
            speak_group(&frac.numerator, ctx, out);
            out.word("over");
            speak_group(&frac.denominator, ctx, out);
            out.pause();
            out.word("end fraction");
            out.pause();
        }
    }
}

fn speak_over(frac: &ParseNodeFraction, ctx: SpeechContext<'_>, out: &mut Utterance) {
    speak_group(&frac.numerator, ctx, out);
    out.word("over");
    speak_group(&frac.denominator, ctx, out);
}

/// Speaks a radical; `closed` adds the end marker even after a single
/// letter.
fn speak_root(root: &ParseNodeRoot, closed: bool, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let style = ctx.style;
    let integer_degree = match &root.degree {
        Some(ParseNode::Number(number)) => small_integer(&number.text),
        _ => None,
    };
    match (&root.degree, integer_degree) {
        (None, _) | (_, Some(2)) => out.word("the square root of"),
        (_, Some(3)) => out.word("the cube root of"),
        (_, Some(n)) => out.word(&format!("the {} root of", style.ordinal(n as usize))),
        (Some(ParseNode::Identifier(ident)), None) => {
            out.word(&format!("the {}-th root of", identifier_word(&ident.name, style)));
        }
        (Some(degree), None) => {
            out.word("the root of index");
            speak_group(degree, ctx, out);
            out.pause();
            out.word("of");
        }
    }
    speak_group(&root.radicand, ctx, out);
    if closed && is_simple(&root.radicand) {
        out.pause();
        out.word(style.end_root);
        out.pause();
    } else {
        end_marker(&root.radicand, style.end_root, out);
    }
}

/// Exponents with a name of their own.
fn natural_exponent(exponent: &ParseNode) -> Option<&'static str> {
    match exponent {
        ParseNode::Number(number) => match number.text.as_str() {
            "2" => Some("squared"),
            "3" => Some("cubed"),
            _ => None,
        },
        ParseNode::Identifier(ident) if ident.font.is_none() => match ident.name.as_str() {
            "T" | "\\top" | "\\intercal" => Some("transpose"),
            "\\circ" => Some("degrees"),
            "\\prime" => Some("prime"),
            "*" | "\\ast" | "\\star" => Some("star"),
            "\\dagger" => Some("dagger"),
            _ => None,
        },
        _ => None,
    }
}

fn speak_exponent(exponent: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let style = ctx.style;
    if let Some(word) = natural_exponent(exponent) {
        out.word(word);
        return;
    }
    if style.ordinal_powers {
        let ordinal = match exponent {
            ParseNode::Number(number) => {
                small_integer(&number.text).map(|n| ordinal_suffix(n as usize))
            }
            ParseNode::Identifier(ident)
                if ident.font.is_none() && ident.name.chars().count() == 1 =>
            {
                Some(format!("{}-th", ident.name))
            }
            _ => None,
        };
        if let Some(ordinal) = ordinal {
            out.word(&format!("to the {ordinal} power"));
            return;
        }
    }
    out.word("to the power of");
    speak_group(exponent, ctx, out);
    end_marker(exponent, style.end_exponent, out);
}

fn speak_subscript(subscript: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    out.word("sub");
    speak_group(subscript, ctx, out);
    end_marker(subscript, ctx.style.end_subscript, out);
}

fn speak_big_operator(op: &ParseNodeBigOperator, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if ctx.display_mode {
        out.word("the");
    }
    out.word(op.kind.speech());

    if op.kind.is_limit() {
        if let Some(lower) = &op.lower {
            out.word("as");
            speak_approach(lower, ctx, out);
        }
    } else {
        match (&op.lower, &op.upper) {
            (Some(lower), Some(upper)) => speak_range(lower, upper, ctx, out),
            (Some(lower), None) => {
                out.word("over");
                speak_group(lower, ctx, out);
            }
            (None, Some(upper)) => {
                out.word("to");
                speak_group(upper, ctx, out);
            }
            (None, None) => {}
        }
    }

    out.word("of");
    speak_operand(&op.body, Precedence::Multiplicative, ctx, out);
}

fn speak_range(lower: &ParseNode, upper: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if ctx.style.bounds == BoundsPhrasing::RangingOver
        && let ParseNode::BinaryOp(eq) = lower
        && let Some((variable, op, start)) = eq.single()
        && op.text == "="
    {
        out.word("over");
        speak_group(variable, ctx, out);
        out.word("from");
        speak_group(start, ctx, out);
    } else {
        out.word("from");
        speak_group(lower, ctx, out);
    }
    out.word("to");
    speak_group(upper, ctx, out);
}

/// `x \to 0` under a limit reads "x approaches 0".
fn speak_approach(lower: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if let ParseNode::BinaryOp(arrow) = lower
        && let Some((variable, op, target)) = arrow.single()
        && matches!(
            op.text.as_str(),
            "\\to" | "\\rightarrow" | "\\longrightarrow" | "\u{2192}"
        )
    {
        speak_group(variable, ctx, out);
        out.word("approaches");
        speak_group(target, ctx, out);
    } else {
        speak_group(lower, ctx, out);
    }
}

/// `^{-1}` on a function name.
fn is_inverse(superscript: &ParseNode) -> bool {
    matches!(
        superscript,
        ParseNode::UnaryOp(op)
            if matches!(op.op.text.as_str(), "-" | "\u{2212}")
                && matches!(&op.operand, ParseNode::Number(n) if n.text == "1")
    )
}

/// A named run takes the subscript reading of the command it spells, so
/// `\operatorname{argmax}_x` reads like `\argmax_x`.
fn text_run_role(text: &str) -> SubscriptRole {
    function_info(&format!("\\{text}")).map_or(SubscriptRole::Base, |(_, role)| role)
}

fn speak_function(func: &ParseNodeFunction, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let (name, role, known): (&str, SubscriptRole, bool) = match &func.name {
        FunctionName::Known(command) => match function_info(command) {
            Some((speech, role)) => (speech, role, true),
            None => (command.trim_start_matches('\\'), SubscriptRole::Base, true),
        },
        FunctionName::TextRun(text) => (text, text_run_role(text), false),
    };
    let inverse = func.superscript.as_ref().is_some_and(is_inverse);

    if known && ctx.style.function_article && !func.args.is_empty() {
        out.word("the");
    }
    if inverse {
        out.word("inverse");
    }
    out.word(name);
    if !inverse && let Some(superscript) = &func.superscript {
        speak_exponent(superscript, ctx, out);
    }
    if let Some(subscript) = &func.subscript {
        out.word(match role {
            SubscriptRole::Base => "base",
            SubscriptRole::Over => "over",
        });
        speak_group(subscript, ctx, out);
        if !is_simple(subscript) {
            out.pause();
        }
    }

    if func.args.is_empty() {
        return;
    }
    out.word("of");
    for (index, arg) in func.args.iter().enumerate() {
        if index > 0 {
            out.pause();
        }
        speak_operand(arg, Precedence::Implicit, ctx, out);
    }
}

/// Top-level comma items of a list, borrowed.
fn list_items<'a>(node: &'a ParseNode, items: &mut Vec<&'a ParseNode>) {
    match node {
        ParseNode::BinaryOp(chain) if chain.all_ops(",") => {
            for item in chain.operands() {
                list_items(item, items);
            }
        }
        node if node.is_empty() => {}
        node => items.push(node),
    }
}

fn speak_list(node: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let mut items = Vec::new();
    list_items(node, &mut items);
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.pause();
        }
        speak_operand(item, Precedence::Implicit, ctx, out);
    }
}

fn delimiter_word(text: &str) -> &'static str {
    delimsizing::canonical(text).map_or("", |delim| delim.speech)
}

fn speak_delimited(delimited: &ParseNodeDelimited, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let inner = &delimited.inner;
    let named = match (delimited.open.as_str(), delimited.close.as_str()) {
        ("|", "|") if !inner.is_empty() => Some(("the absolute value of", "end absolute value")),
        ("\\|", "\\|") if !inner.is_empty() => Some(("the norm of", "end norm")),
        ("\\lfloor", "\\rfloor") if !inner.is_empty() => Some(("the floor of", "end floor")),
        ("\\lceil", "\\rceil") if !inner.is_empty() => Some(("the ceiling of", "end ceiling")),
        ("\\{", "\\}") => return speak_set(inner, ctx, out),
        ("(", ")") | ("[", "]")
            if !inner.is_empty()
                && (is_simple(inner) || !(ctx.display_mode || ctx.style.speak_delimiters)) =>
        {
            return speak_operand(inner, Precedence::Script, ctx, out);
        }
        _ => None,
    };

    if let Some((prefix, end)) = named {
        out.word(prefix);
        speak_group(inner, ctx, out);
        end_marker(inner, end, out);
        return;
    }
    out.word(delimiter_word(&delimited.open));
    speak_group(inner, ctx, out);
    out.word(delimiter_word(&delimited.close));
}

fn speak_set(inner: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if inner.is_empty() {
        out.word("the empty set");
        return;
    }
    if let ParseNode::BinaryOp(chain) = inner
        && let [(op, condition), conditions @ ..] = chain.rest.as_slice()
        && matches!(op.text.as_str(), "|" | "\\mid" | ":")
    {
        out.word("the set of all");
        speak_group(&chain.first, ctx, out);
        out.word("such that");
        speak_chain(condition, conditions, ctx, out);
        out.pause();
        return;
    }
    out.word("the set");
    speak_list(inner, ctx, out);
    out.pause();
}

fn speak_cell(cell: &ParseNode, ctx: SpeechContext<'_>, out: &mut Utterance) {
    if cell.is_empty() {
        out.word("blank");
    } else {
        speak_group(cell, ctx, out);
    }
}

fn speak_matrix(matrix: &ParseNodeMatrix, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let style = ctx.style;
    if matrix.rows.is_empty() {
        out.word("the empty matrix");
        return;
    }
    if matrix.kind == MatrixKind::Cases {
        speak_cases(matrix, ctx, out);
        return;
    }

    let rows = matrix.rows.len();
    let columns = matrix.rows.iter().map(Vec::len).max().unwrap_or(0);
    let noun = match matrix.kind {
        MatrixKind::Determinant => "determinant",
        MatrixKind::Array => "array",
        _ => "matrix",
    };
    if matrix.kind == MatrixKind::Norm {
        out.word("the norm of");
    }
    out.word(&format!(
        "the {} by {} {noun}",
        style.count(rows),
        style.count(columns)
    ));
    for (index, row) in matrix.rows.iter().enumerate() {
        out.stop();
        out.word("row");
        out.word(&style.count(index + 1));
        out.pause();
        // Short rows are padded so every row matches the announced shape.
        for column in 0..columns {
            if column > 0 {
                out.pause();
            }
            match row.get(column) {
                Some(cell) => speak_cell(cell, ctx, out),
                None => out.word("blank"),
            }
        }
    }
    if ctx.display_mode {
        out.stop();
        out.word(&format!("end {noun}"));
    }
    out.pause();
}

/// A condition that starts with words ("otherwise", "if n is even") needs
/// no "if" of its own.
fn starts_with_text(node: &ParseNode) -> bool {
    match node {
        ParseNode::Text(_) => true,
        ParseNode::Sequence(seq) => seq.items.first().is_some_and(starts_with_text),
        ParseNode::BinaryOp(chain) => starts_with_text(&chain.first),
        _ => false,
    }
}

fn speak_cases(matrix: &ParseNodeMatrix, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let style = ctx.style;
    out.word(&format!("{} cases", style.count(matrix.rows.len())));
    for (index, row) in matrix.rows.iter().enumerate() {
        out.stop();
        out.word("case");
        out.word(&style.count(index + 1));
        out.pause();
        let mut cells = row.iter();
        if let Some(value) = cells.next() {
            speak_cell(value, ctx, out);
        }
        for condition in cells.filter(|cell| !cell.is_empty()) {
            out.pause();
            if !starts_with_text(condition) {
                out.word("if");
            }
            speak_group(condition, ctx, out);
        }
    }
    if ctx.display_mode {
        out.stop();
        out.word("end cases");
    }
    out.pause();
}

fn speak_accent(accent: &ParseNodeAccent, ctx: SpeechContext<'_>, out: &mut Utterance) {
    let word = accent.accent.speech();
    if accent.accent.is_prefix() {
        out.word(word);
        speak_operand(&accent.base, Precedence::Script, ctx, out);
    } else {
        speak_operand(&accent.base, Precedence::Script, ctx, out);
        out.word(word);
    }
}

/// Letters like `f` or `f'` that read as a function before `( ... )`.
fn applies_as_function(node: &ParseNode) -> bool {
    match node {
        ParseNode::Identifier(ident) => ident.font.is_none() && is_function_letter(&ident.name),
        ParseNode::Postfix(postfix) => {
            matches!(postfix.op, PostfixOp::Prime(_)) && applies_as_function(&postfix.operand)
        }
        ParseNode::Sub(sub) => applies_as_function(&sub.base),
        ParseNode::Power(power) => applies_as_function(&power.base),
        _ => false,
    }
}

fn speak_sequence(items: &[ParseNode], ctx: SpeechContext<'_>, out: &mut Utterance) {
    let mut index = 0;
    while let Some(item) = items.get(index) {
        if index > 0
            && matches!(item, ParseNode::Number(_))
            && matches!(items[index - 1], ParseNode::Number(_))
        {
            out.word("times");
        }
        if applies_as_function(item)
            && let Some(ParseNode::Delimited(args)) = items.get(index + 1)
            && args.open == "("
            && args.close == ")"
            && !args.inner.is_empty()
        {
            speak_group(item, ctx, out);
            out.word("of");
            speak_list(&args.inner, ctx, out);
            index += 2;
            continue;
        }
        if index + 1 < items.len() && is_open_ended(item, ctx) {
            speak_closed(item, ctx, out);
        } else {
            speak_operand(item, Precedence::Implicit, ctx, out);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tree::parse_tree;
    use crate::style::{CLEARSPEAK, SIMPLESPEAK};
    use crate::types::Settings;

    fn speak_with(expr: &str, style: &SpeechStyle, display_mode: bool) -> String {
        let settings = Settings::default();
        let tree = parse_tree(expr, &settings).unwrap();
        build_speech(&tree, style, display_mode)
    }

    fn speak(expr: &str) -> String {
        speak_with(expr, &CLEARSPEAK, false)
    }

    #[test]
    fn test_operators() {
        assert_eq!(speak("a + b - c"), "a plus b minus c");
        assert_eq!(speak("x = 1"), "x equals 1");
        assert_eq!(speak("-x"), "negative x");
        assert_eq!(speak(r"a \cdot b"), "a times b");
        assert_eq!(speak_with(r"a \cdot b", &SIMPLESPEAK, false), "a dot b");
    }

    #[test]
    fn test_grouping_distinguishes_scope() {
        assert_eq!(speak("(a+b)^2"), "the quantity a plus b, squared");
        assert_eq!(speak("a+b^2"), "a plus b squared");
        assert_eq!(speak("a - (b - c)"), "a minus the quantity b minus c");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(speak(r"\frac{1}{2}"), "1 half");
        assert_eq!(speak(r"\frac{2}{3}"), "2 thirds");
        assert_eq!(speak(r"\frac{a}{b}"), "a over b");
        assert_eq!(
            speak(r"\frac{a+1}{b}"),
            "the fraction with numerator a plus 1 and denominator b"
        );
        assert_eq!(speak_with(r"\frac{1}{2}", &SIMPLESPEAK, false), "1 over 2");
        assert_eq!(
            speak_with(r"\frac{a+1}{b}", &SIMPLESPEAK, false),
            "fraction, a plus 1 over b, end fraction"
        );
    }

    #[test]
    fn test_roots_and_powers() {
        assert_eq!(speak(r"\sqrt{x}"), "the square root of x");
        assert_eq!(speak(r"\sqrt[3]{x}"), "the cube root of x");
        assert_eq!(speak(r"\sqrt[4]{x}"), "the fourth root of x");
        assert_eq!(speak(r"\sqrt[n]{x}"), "the n-th root of x");
        assert_eq!(speak(r"\sqrt{x+1}"), "the square root of x plus 1, end root");
        assert_eq!(speak("x^4"), "x to the 4th power");
        assert_eq!(speak("x^n"), "x to the n-th power");
        assert_eq!(speak_with("x^n", &SIMPLESPEAK, false), "x to the power of n");
        assert_eq!(speak("e^{x+1}"), "e to the power of x plus 1, end exponent");
        assert_eq!(speak("A^T"), "A transpose");
    }

    #[test]
    fn test_subscripts() {
        assert_eq!(speak("x_i"), "x sub i");
        assert_eq!(speak("x_i^2"), "x sub i squared");
        assert_eq!(speak("a_{n+1}"), "a sub n plus 1, end subscript");
    }

    #[test]
    fn test_big_operators() {
        assert_eq!(
            speak(r"\sum_{i=1}^{n} i^2"),
            "sum from i equals 1 to n of i squared"
        );
        assert_eq!(
            speak_with(r"\sum_{i=1}^{n} i^2", &CLEARSPEAK, true),
            "the sum from i equals 1 to n of i squared"
        );
        assert_eq!(
            speak_with(r"\sum_{i=1}^{n} i", &SIMPLESPEAK, false),
            "sum over i from 1 to n of i"
        );
        assert_eq!(
            speak(r"\lim_{x \to 0} f(x)"),
            "limit as x approaches 0 of f of x"
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(speak(r"\sin x"), "the sine of x");
        assert_eq!(speak(r"\sin^2 x"), "the sine squared of x");
        assert_eq!(speak(r"\log_2 n"), "the log base 2 of n");
        assert_eq!(speak(r"\sin^{-1} x"), "the inverse sine of x");
        assert_eq!(
            speak(r"\mathrm{Attention}(Q, K, V)"),
            "Attention of Q, K, V"
        );
        assert_eq!(speak_with(r"\sin x", &SIMPLESPEAK, false), "sine of x");
        assert_eq!(speak(r"\max_x L"), "the maximum over x of L");
        assert_eq!(speak(r"\operatorname{argmax}_x L"), "argmax over x of L");
        assert_eq!(speak(r"\operatorname{loss}_i L"), "loss base i of L");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(speak("|x|"), "the absolute value of x");
        assert_eq!(speak(r"\{\}"), "the empty set");
        assert_eq!(speak(r"\{1, 2, 3\}"), "the set 1, 2, 3");
        assert_eq!(
            speak(r"\{x \mid x > 0\}"),
            "the set of all x such that x is greater than 0"
        );
        assert_eq!(
            speak_with("2(a+b)", &SIMPLESPEAK, false),
            "2 open paren a plus b close paren"
        );
        assert_eq!(speak("2(a+b)"), "2 the quantity a plus b");
    }

    #[test]
    fn test_matrix_and_cases() {
        assert_eq!(
            speak(r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}"),
            "the two by two matrix; row one, a, b; row two, c, d"
        );
        assert_eq!(
            speak(r"\begin{cases} x & x \ge 0 \\ -x & \text{otherwise} \end{cases}"),
            "two cases; case one, x, if x is greater than or equal to 0; case two, negative x, otherwise"
        );
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        assert_eq!(
            speak(r"\begin{matrix} a & b \\ c \end{matrix}"),
            "the two by two matrix; row one, a, b; row two, c, blank"
        );
    }

    #[test]
    fn test_open_ended_phrases_close_before_what_follows() {
        assert_eq!(
            speak(r"\frac{a}{b}^2"),
            "the fraction with numerator a and denominator b, squared"
        );
        assert_eq!(
            speak(r"\frac{a}{b}c"),
            "the fraction with numerator a and denominator b, c"
        );
        assert_eq!(speak(r"\sqrt{x}y"), "the square root of x, end root, y");
        assert_eq!(speak(r"\sqrt{x}^2"), "the square root of x, end root, squared");
        assert_eq!(
            speak_with(r"\frac{a}{b}^2", &SIMPLESPEAK, false),
            "fraction, a over b, end fraction, squared"
        );
        // Nothing follows, so the short readings stay.
        assert_eq!(speak(r"c \frac{a}{b}"), "c a over b");
        assert_eq!(speak(r"2\sqrt{x}"), "2 the square root of x");
        assert_eq!(speak(r"\frac{3}{4}^2"), "3 quarters squared");
    }

    #[test]
    fn test_long_chains() {
        let source = format!("{}a", "a+".repeat(10_000));
        let speech = speak(&source);
        assert_eq!(speech.matches(" plus ").count(), 10_000);
        assert!(speech.starts_with("a plus a") && speech.ends_with("plus a"));
        assert_eq!(speak("a < b < c"), "a is less than b is less than c");
    }

    #[test]
    fn test_middle_bar_reads_given() {
        assert_eq!(speak(r"\left( x \middle| y \right)"), "the quantity x given y");
        assert_eq!(
            speak(r"\left| x \middle| y \right|"),
            "the absolute value of x given y, end absolute value"
        );
    }

    #[test]
    fn test_letters_and_fonts() {
        assert_eq!(speak(r"\alpha + \beta"), "alpha plus beta");
        assert_eq!(speak(r"x \in \mathbb{R}"), "x is an element of the real numbers");
        assert_eq!(speak(r"\mathbf{v}"), "bold v");
        assert_eq!(speak(r"\vec{v}"), "vector v");
        assert_eq!(speak(r"\hat{x}"), "x hat");
    }

    #[test]
    fn test_postfix_and_sequences() {
        assert_eq!(speak("n!"), "n factorial");
        assert_eq!(speak("f'(x)"), "f prime of x");
        assert_eq!(speak("2x"), "2 x");
    }

    #[test]
    fn test_null_delimiters_read_blank() {
        assert_eq!(speak(r"\left. \right."), "blank");
    }
}
