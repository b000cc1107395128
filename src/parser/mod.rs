//! Precedence-climbing parser for LaTeX math
//!
//! The parser turns the token stream from [`crate::lexer::tokenize`] into a
//! [`ParseNode`] tree in which every grouping decision is explicit. The
//! grammar, loosest first:
//!
//! ```text
//! expression := unary (infix-op unary)*          climbing on Precedence
//! unary      := prefix-op expression | implicit
//! implicit   := scripted scripted*               juxtaposition
//! scripted   := atom (^arg | _arg | ' | !)*
//! atom       := number | letter | {group} | command | delimited | environment
//! ```
//!
//! Structural commands are resolved through [`crate::functions::COMMANDS`],
//! symbol literals through [`crate::symbols::SYMBOLS`]. A control sequence
//! in neither table is an [`ParseErrorKind::UnknownCommand`] error: the parser
//! never guesses what an author-defined macro means.
//!
//! Spacing commands, style switches and `\limits` are dropped by the token
//! fetch, so no grammar rule ever sees them.

pub mod parse_node;

use crate::define_function::{ArgType, CommandKind, CommandSpec};
use crate::functions::delimsizing::{self, Delimiter, DelimiterRole};
use crate::functions::environment::parse_environment;
use crate::functions::{self, genfrac};
use crate::symbols::{self, Atom, Group, NonAtom, PREFIX_SIGNS, Precedence, Symbol};
use crate::types::{ParseError, ParseErrorKind, Settings, Token, TokenKind};
use crate::unicode::{self, ScriptKind};
use parse_node::{
    Operator, ParseNode, ParseNodeIdentifier, ParseNodePostfix, ParseNodePower, ParseNodeSequence,
    ParseNodeSub, ParseNodeSubSup, ParseNodeText, ParseNodeUnaryOp, PostfixOp,
};

/// Main parser structure.
pub struct Parser<'a> {
    /// Settings of the current conversion.
    pub settings: &'a Settings,
    /// Remaining tokens, in reverse order so that the next token is last.
    tokens: Vec<Token>,
    /// Returned once the stream is exhausted.
    eof: Token,
    /// Current nesting depth, checked against `settings.max_nesting`.
    depth: usize,
    /// Number of bare `|...|` pairs currently open.
    pub(crate) bar_depth: usize,
    /// Number of `\left ... \right` pairs currently open (for `\middle`).
    pub(crate) leftright_depth: usize,
}

/// What the token fetch does with the next raw token.
enum Skip {
    Keep,
    Drop,
    Sized,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`, which should end with the EOF token
    /// produced by the lexer.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>, settings: &'a Settings) -> Self {
        let eof = match tokens.pop() {
            Some(token) if token.kind == TokenKind::Eof => token,
            Some(token) => {
                tokens.push(token);
                Token::new(TokenKind::Eof, "EOF".to_owned(), None)
            }
            None => Token::new(TokenKind::Eof, "EOF".to_owned(), None),
        };
        tokens.reverse();
        Self {
            settings,
            tokens,
            eof,
            depth: 0,
            bar_depth: 0,
            leftright_depth: 0,
        }
    }

    /// Parses the whole token stream into a single tree.
    pub fn parse(&mut self) -> Result<ParseNode, ParseError> {
        let first = self.fetch()?;
        if first.kind == TokenKind::Eof {
            return Err(ParseError::with_token(ParseErrorKind::EmptyInput, first));
        }

        let node = self.parse_infix_group()?;

        let token = self.fetch()?;
        match (token.kind, node) {
            (TokenKind::Eof, Some(node)) if !node.is_empty() => Ok(node),
            // `{}` or `\text{ }` alone says nothing.
            (TokenKind::Eof, _) => Err(ParseError::with_token(ParseErrorKind::EmptyInput, token)),
            (TokenKind::CloseBrace, _) => Err(ParseError::with_token(
                ParseErrorKind::UnbalancedBrace {
                    expected: "end of input".to_owned(),
                    found: token.describe(),
                },
                token,
            )),
            _ => Err(ParseError::with_token(
                ParseErrorKind::UnexpectedToken {
                    found: token.describe(),
                    expected: "an operator or end of input",
                },
                token,
            )),
        }
    }

    /// Returns the next significant token without consuming it.
    ///
    /// Whitespace, spacing commands and ignored commands are discarded on
    /// the way. A sizing command such as `\big` is discarded too, after
    /// checking that a delimiter follows it.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        self.skip_insignificant()?;
        Ok(self.current())
    }

    /// Removes and returns the next raw token. Call after [`Self::fetch`]
    /// to take the token it returned.
    pub fn consume(&mut self) -> Token {
        self.tokens.pop().unwrap_or_else(|| self.eof.clone())
    }

    /// Returns a token to the front of the stream.
    pub fn push_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn current(&self) -> &Token {
        self.tokens.last().unwrap_or(&self.eof)
    }

    fn skip_insignificant(&mut self) -> Result<(), ParseError> {
        loop {
            let skip = match self.tokens.last() {
                None => return Ok(()),
                Some(token) => classify(token),
            };
            match skip {
                Skip::Keep => return Ok(()),
                Skip::Drop => {
                    self.tokens.pop();
                }
                Skip::Sized => {
                    let sized = self.consume();
                    while self.current().kind == TokenKind::Space {
                        self.tokens.pop();
                    }
                    if delimsizing::token_delimiter(self.current()).is_none() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::UnexpectedToken {
                                found: self.current().describe(),
                                expected: "a delimiter after a sizing command",
                            },
                            &sized,
                        ));
                    }
                }
            }
        }
    }

    /// Saves the bar state on entry to a nested group; bars outside the
    /// group cannot be closed from inside it.
    pub(crate) const fn enter_group(&mut self) -> usize {
        let saved = self.bar_depth;
        self.bar_depth = 0;
        saved
    }

    /// Restores the bar state saved by [`Self::enter_group`].
    pub(crate) const fn leave_group(&mut self, saved: usize) {
        self.bar_depth = saved;
    }

    /// Parses an expression whose operators bind at least as tightly as
    /// `min`. Returns `None` when the next token cannot start an operand.
    pub fn parse_expression(&mut self, min: Precedence) -> Result<Option<ParseNode>, ParseError> {
        self.descend()?;
        let result = self.parse_binary(min);
        self.depth -= 1;
        result
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.settings.max_nesting {
            let token = self.fetch()?;
            return Err(ParseError::with_token(
                ParseErrorKind::UnexpectedToken {
                    found: token.describe(),
                    expected: "shallower nesting",
                },
                token,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_binary(&mut self, min: Precedence) -> Result<Option<ParseNode>, ParseError> {
        let Some(mut left) = self.parse_unary()? else {
            return Ok(None);
        };
        // Whether `left` is a chain built by this loop, which later operators
        // of the same precedence extend instead of nesting.
        let mut chained = false;

        while let Some((op, width)) = self.peek_infix()? {
            if op.precedence < min {
                break;
            }
            let op_token = self.consume();
            if width > 1 {
                self.skip_insignificant()?;
                self.consume();
            }
            // Left-associative: the right operand may only contain tighter
            // operators.
            match self.parse_expression(op.precedence.tighter())? {
                Some(right) => {
                    if chained
                        && let ParseNode::BinaryOp(chain) = &mut left
                        && chain.precedence() == op.precedence
                    {
                        chain.rest.push((op, right));
                    } else {
                        left = ParseNode::binary(op, left, right);
                        chained = true;
                    }
                }
                // Trailing punctuation, as in `x = 1.` or `a, b,`.
                None if op.atom == Atom::Punct => break,
                None => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MissingArgument { command: op.text },
                        &op_token,
                    ));
                }
            }
        }
        Ok(Some(left))
    }

    /// Returns the infix operator at the cursor and how many tokens spell
    /// it.
    fn peek_infix(&mut self) -> Result<Option<(Operator, usize)>, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();

        if token.is(TokenKind::ControlSequence, r"\middle") && self.leftright_depth > 0 {
            let delim = self
                .tokens
                .iter()
                .rev()
                .skip(1)
                .find(|t| t.kind != TokenKind::Space)
                .and_then(delimsizing::token_delimiter);
            return Ok(delim.map(|delim| {
                let op = Operator {
                    text: delim.canonical.to_owned(),
                    atom: Atom::Rel,
                    precedence: Precedence::Relation,
                };
                (op, 2)
            }));
        }

        if let Some(delim) = as_delimiter(token) {
            // A bar that neither opens nor closes a pair separates, as in
            // set-builder `\{x | x > 0\}` or conditional `P(A|B)`.
            let is_free_bar = delim.canonical == "|" && self.bar_depth == 0;
            return Ok(is_free_bar.then(|| {
                let op = Operator {
                    text: delim.canonical.to_owned(),
                    atom: Atom::Rel,
                    precedence: Precedence::Punctuation,
                };
                (op, 1)
            }));
        }

        if !matches!(token.kind, TokenKind::Symbol | TokenKind::ControlSequence) {
            return Ok(None);
        }
        Ok(symbols::lookup(&token.text)
            .filter(|symbol| symbol.is_infix())
            .map(|symbol| (operator(&token.text, symbol), 1)))
    }

    fn parse_unary(&mut self) -> Result<Option<ParseNode>, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();
        let prefix = match token.kind {
            TokenKind::Symbol | TokenKind::ControlSequence => {
                symbols::lookup(&token.text).filter(|symbol| {
                    PREFIX_SIGNS.contains(token.text.as_str())
                        || symbol.group == Group::NonAtom(NonAtom::Prefix)
                        || symbol.group == Group::Atom(Atom::Rel)
                })
            }
            _ => None,
        };
        let Some(symbol) = prefix else {
            return self.parse_implicit();
        };

        let op_token = self.consume();
        // A leading relation (`> 0` in a cases condition) takes a whole
        // additive expression; signs and negation bind tightly.
        let operand_precedence = if symbol.group == Group::Atom(Atom::Rel) {
            Precedence::Additive
        } else {
            Precedence::Unary
        };
        let op = Operator {
            text: op_token.text.clone(),
            atom: match symbol.group {
                Group::Atom(atom) => atom,
                Group::NonAtom(_) => Atom::Bin,
            },
            precedence: Precedence::Unary,
        };

        match self.parse_expression(operand_precedence)? {
            Some(operand) => Ok(Some(ParseNode::UnaryOp(Box::new(ParseNodeUnaryOp {
                op,
                operand,
            })))),
            // A lone sign, as in `\mathbb{R}^{+}`.
            None if self.at_group_end()? => Ok(Some(ParseNode::identifier(op_token.text))),
            None => Err(ParseError::with_token(
                ParseErrorKind::MissingArgument {
                    command: op_token.text.clone(),
                },
                &op_token,
            )),
        }
    }

    /// Parses a run of juxtaposed operands: `2x`, `ab`, `f(x)`.
    fn parse_implicit(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let mut items = Vec::new();
        let mut saw_empty = false;
        loop {
            self.skip_insignificant()?;
            let token = self.current();
            if !self.starts_operand(token, !items.is_empty()) {
                break;
            }
            let is_prefix = symbols::lookup(&token.text)
                .is_some_and(|symbol| symbol.group == Group::NonAtom(NonAtom::Prefix));
            let item = if is_prefix {
                self.parse_unary()?
            } else {
                self.parse_scripted()?
            };
            match item {
                Some(node) if node.is_empty() => saw_empty = true,
                Some(node) => items.push(node),
                None => break,
            }
        }
        Ok(match items.len() {
            0 if saw_empty => Some(ParseNode::empty()),
            0 => None,
            1 => items.pop(),
            _ => Some(ParseNode::Sequence(ParseNodeSequence { items })),
        })
    }

    /// Whether `token` can begin an operand. `after_operand` tells a bar
    /// that closes the pair around the preceding operand from one that
    /// opens a new pair.
    fn starts_operand(&self, token: &Token, after_operand: bool) -> bool {
        match token.kind {
            TokenKind::Number | TokenKind::OpenBrace | TokenKind::EnvironmentBegin => true,
            TokenKind::Identifier => unicode::script_text(&token.text).is_none(),
            // `\middle` divides a `\left ... \right` pair as an infix.
            TokenKind::ControlSequence
                if token.text == r"\middle" && self.leftright_depth > 0 =>
            {
                false
            }
            TokenKind::Delimiter | TokenKind::ControlSequence | TokenKind::Symbol => {
                if let Some(spec) = functions::lookup(&token.text)
                    && token.kind != TokenKind::Delimiter
                {
                    return spec.kind.starts_operand();
                }
                if let Some(delim) = as_delimiter(token) {
                    return match delim.role {
                        DelimiterRole::Open => true,
                        DelimiterRole::Close | DelimiterRole::None => false,
                        DelimiterRole::Both if after_operand && self.bar_depth > 0 => false,
                        DelimiterRole::Both => self.has_closing_match(delim.canonical),
                    };
                }
                match symbols::lookup(&token.text) {
                    Some(symbol) => !symbol.is_infix() && !matches!(
                        symbol.group,
                        Group::NonAtom(NonAtom::Postfix | NonAtom::Spacing)
                    ),
                    // Unknown commands start an operand so that parsing
                    // them reports the command by name.
                    None => unicode::script_text(&token.text).is_none(),
                }
            }
            _ => false,
        }
    }

    /// Scans ahead from the bar at the cursor for a bar of the same kind at
    /// the same nesting level.
    fn has_closing_match(&self, canonical: &str) -> bool {
        let mut depth = 0_usize;
        let mut skip_next = false;
        for token in self.tokens.iter().rev().skip(1) {
            if token.kind == TokenKind::Space {
                continue;
            }
            if skip_next {
                skip_next = false;
                continue;
            }
            match token.kind {
                TokenKind::OpenBrace | TokenKind::EnvironmentBegin => depth += 1,
                TokenKind::CloseBrace | TokenKind::EnvironmentEnd => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                TokenKind::Ampersand | TokenKind::RowSeparator if depth == 0 => return false,
                TokenKind::ControlSequence if token.text == r"\left" => {
                    depth += 1;
                    skip_next = true;
                }
                TokenKind::ControlSequence if token.text == r"\right" => {
                    skip_next = true;
                    match depth.checked_sub(1) {
                        Some(d) => depth = d,
                        None => return false,
                    }
                }
                _ => {
                    let Some(delim) = as_delimiter(token) else {
                        continue;
                    };
                    if delim.canonical == canonical && depth == 0 {
                        return true;
                    }
                    match delim.role {
                        DelimiterRole::Open => depth += 1,
                        DelimiterRole::Close => match depth.checked_sub(1) {
                            Some(d) => depth = d,
                            None => return false,
                        },
                        DelimiterRole::Both | DelimiterRole::None => {}
                    }
                }
            }
        }
        false
    }

    /// Whether the cursor is at a token that ends the enclosing group.
    fn at_group_end(&mut self) -> Result<bool, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();
        Ok(match token.kind {
            TokenKind::CloseBrace
            | TokenKind::Eof
            | TokenKind::EnvironmentEnd
            | TokenKind::Ampersand
            | TokenKind::RowSeparator => true,
            TokenKind::ControlSequence if token.text == r"\right" => true,
            _ => as_delimiter(token).is_some_and(|delim| match delim.role {
                DelimiterRole::Close => true,
                DelimiterRole::Both => self.bar_depth > 0,
                DelimiterRole::Open | DelimiterRole::None => false,
            }),
        })
    }

    /// Whether the cursor is at a token that starts an operand.
    pub(crate) fn at_operand(&mut self) -> Result<bool, ParseError> {
        self.skip_insignificant()?;
        Ok(self.starts_operand(self.current(), false))
    }

    /// Whether the cursor is at `(` or `\left(`.
    pub(crate) fn next_opens_paren(&mut self) -> Result<bool, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();
        if token.is(TokenKind::Delimiter, "(") {
            return Ok(true);
        }
        if !token.is(TokenKind::ControlSequence, r"\left") {
            return Ok(false);
        }
        Ok(self
            .tokens
            .iter()
            .rev()
            .skip(1)
            .find(|t| t.kind != TokenKind::Space)
            .is_some_and(|t| t.is(TokenKind::Delimiter, "(")))
    }

    /// Parses one atom with any scripts, primes and factorials attached to
    /// it. Returns `None` when the cursor cannot start an operand.
    pub(crate) fn parse_scripted(&mut self) -> Result<Option<ParseNode>, ParseError> {
        if !self.at_operand()? {
            return Ok(None);
        }
        let base = self.parse_atom()?;
        // Big operators and functions read their own scripts as bounds.
        if matches!(base, ParseNode::BigOperator(_) | ParseNode::Function(_)) {
            return Ok(Some(base));
        }
        self.parse_scripts(base).map(Some)
    }

    fn parse_scripts(&mut self, base: ParseNode) -> Result<ParseNode, ParseError> {
        let mut exponent = None;
        let mut subscript = None;
        let mut primes = 0;

        loop {
            if self.expand_unicode_script()? {
                continue;
            }
            match self.current().kind {
                TokenKind::Superscript | TokenKind::Subscript => {
                    let marker = self.consume();
                    self.read_script(&marker, &mut subscript, &mut exponent)?;
                }
                TokenKind::Prime => {
                    self.consume();
                    primes += 1;
                }
                _ => break,
            }
        }

        let mut node = base;
        if primes > 0 {
            node = ParseNode::Postfix(Box::new(ParseNodePostfix {
                op: PostfixOp::Prime(primes),
                operand: node,
            }));
        }
        node = match (subscript, exponent) {
            (None, None) => node,
            (Some(subscript), None) => ParseNode::Sub(Box::new(ParseNodeSub {
                base: node,
                subscript,
            })),
            (None, Some(exponent)) => ParseNode::Power(Box::new(ParseNodePower {
                base: node,
                exponent,
            })),
            (Some(subscript), Some(exponent)) => ParseNode::SubSup(Box::new(ParseNodeSubSup {
                base: node,
                subscript,
                exponent,
            })),
        };
        while self.fetch()?.is(TokenKind::Symbol, "!") {
            self.consume();
            node = ParseNode::Postfix(Box::new(ParseNodePostfix {
                op: PostfixOp::Factorial,
                operand: node,
            }));
        }
        Ok(node)
    }

    /// Reads the bounds written right after a big operator or function
    /// name, as `(lower, upper)`.
    pub(crate) fn parse_limits(
        &mut self,
    ) -> Result<(Option<ParseNode>, Option<ParseNode>), ParseError> {
        let mut lower = None;
        let mut upper = None;
        loop {
            if self.expand_unicode_script()? {
                continue;
            }
            if !matches!(
                self.current().kind,
                TokenKind::Superscript | TokenKind::Subscript
            ) {
                break;
            }
            let marker = self.consume();
            self.read_script(&marker, &mut lower, &mut upper)?;
        }
        Ok((lower, upper))
    }

    fn read_script(
        &mut self,
        marker: &Token,
        subscript: &mut Option<ParseNode>,
        superscript: &mut Option<ParseNode>,
    ) -> Result<(), ParseError> {
        let (slot, expected) = if marker.kind == TokenKind::Superscript {
            (superscript, "one superscript per base")
        } else {
            (subscript, "one subscript per base")
        };
        if slot.is_some() {
            return Err(ParseError::with_token(
                ParseErrorKind::UnexpectedToken {
                    found: marker.text.clone(),
                    expected,
                },
                marker,
            ));
        }
        *slot = Some(self.parse_script_argument(marker)?);
        Ok(())
    }

    /// Rewrites a run of Unicode script characters at the cursor (`²³`,
    /// `ᵢⱼ`) into `^{...}` or `_{...}`. Returns `true` when it did.
    fn expand_unicode_script(&mut self) -> Result<bool, ParseError> {
        self.skip_insignificant()?;
        let Some(kind) = script_char(self.current()).map(|(kind, _)| kind) else {
            return Ok(false);
        };

        let mut run: Vec<(String, Token)> = Vec::new();
        while let Some((k, plain)) = script_char(self.current())
            && k == kind
        {
            let token = self.consume();
            run.push((plain.to_owned(), token));
        }

        let Some((_, first)) = run.first() else {
            return Ok(false);
        };
        let loc = first.loc.clone();
        let mut synthesized: Vec<Token> = Vec::new();
        for (plain, token) in run {
            let plain_kind = match plain.as_str() {
                "(" | ")" => TokenKind::Delimiter,
                "+" | "-" | "=" => TokenKind::Symbol,
                p if p.bytes().all(|b| b.is_ascii_digit()) => TokenKind::Number,
                _ => TokenKind::Identifier,
            };
            if plain_kind == TokenKind::Number
                && let Some(last) = synthesized.last_mut()
                && last.kind == TokenKind::Number
            {
                last.text.push_str(&plain);
                continue;
            }
            synthesized.push(Token::new(plain_kind, plain, token.loc));
        }

        let marker = match kind {
            ScriptKind::Superscript => Token::new(TokenKind::Superscript, "^".to_owned(), loc.clone()),
            ScriptKind::Subscript => Token::new(TokenKind::Subscript, "_".to_owned(), loc.clone()),
        };
        self.push_token(Token::new(TokenKind::CloseBrace, "}".to_owned(), loc.clone()));
        for token in synthesized.into_iter().rev() {
            self.push_token(token);
        }
        self.push_token(Token::new(TokenKind::OpenBrace, "{".to_owned(), loc));
        self.push_token(marker);
        Ok(true)
    }

    /// Reads the argument of `^` or `_`. Besides the forms any argument
    /// takes, a lone operator is allowed: `x^*`, `x^+`, `90^\circ`.
    fn parse_script_argument(&mut self, marker: &Token) -> Result<ParseNode, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();
        let is_operator = matches!(token.kind, TokenKind::Symbol | TokenKind::ControlSequence)
            && symbols::lookup(&token.text).is_some_and(Symbol::is_infix);
        if is_operator {
            let token = self.consume();
            return Ok(ParseNode::identifier(token.text));
        }
        self.parse_argument(&marker.text)
    }

    /// Reads one argument of `command`: a brace group, the first digit of a
    /// number, or a single atom.
    pub(crate) fn parse_argument(&mut self, command: &str) -> Result<ParseNode, ParseError> {
        self.skip_insignificant()?;
        let token = self.current();
        match token.kind {
            TokenKind::OpenBrace => {
                let open = self.consume();
                let saved = self.enter_group();
                let body = self.parse_infix_group()?;
                self.leave_group(saved);

                let close = self.fetch()?;
                match close.kind {
                    TokenKind::CloseBrace => {}
                    TokenKind::Eof => {
                        return Err(ParseError::with_token(
                            ParseErrorKind::MissingArgument {
                                command: command.to_owned(),
                            },
                            &open,
                        ));
                    }
                    _ => {
                        return Err(ParseError::with_token(
                            ParseErrorKind::UnbalancedBrace {
                                expected: "}".to_owned(),
                                found: close.describe(),
                            },
                            close,
                        ));
                    }
                }
                self.consume();
                match body {
                    Some(body) if !body.is_empty() => Ok(body),
                    _ => Err(ParseError::with_token(
                        ParseErrorKind::MissingArgument {
                            command: command.to_owned(),
                        },
                        &open,
                    )),
                }
            }
            // `\frac12` and `x^23` take a single digit, as in LaTeX.
            TokenKind::Number => {
                let token = self.consume();
                Ok(self.split_first_digit(token))
            }
            _ if self.starts_operand(token, false) => self.parse_atom(),
            _ => Err(ParseError::with_token(
                ParseErrorKind::MissingArgument {
                    command: command.to_owned(),
                },
                token,
            )),
        }
    }

    fn split_first_digit(&mut self, token: Token) -> ParseNode {
        let mut chars = token.text.chars();
        let Some(first) = chars.next() else {
            return ParseNode::number(token.text);
        };
        let rest = chars.as_str();
        if let Some(fraction) = rest.strip_prefix('.') {
            if !fraction.is_empty() {
                let number = Token::new(TokenKind::Number, fraction.to_owned(), token.loc.clone());
                self.push_token(number);
            }
            self.push_token(Token::new(TokenKind::Symbol, ".".to_owned(), token.loc));
        } else if !rest.is_empty() {
            let number = Token::new(TokenKind::Number, rest.to_owned(), token.loc.clone());
            self.push_token(number);
        }
        ParseNode::number(first)
    }

    /// Reads an optional `[...]` argument.
    pub(crate) fn parse_optional_argument(&mut self) -> Result<Option<ParseNode>, ParseError> {
        if !self.fetch()?.is(TokenKind::Delimiter, "[") {
            return Ok(None);
        }
        self.consume();
        let saved = self.enter_group();
        let body = self.parse_expression(Precedence::Punctuation)?;
        self.leave_group(saved);

        let close = self.fetch()?;
        if !close.is(TokenKind::Delimiter, "]") {
            return Err(ParseError::with_token(
                ParseErrorKind::UnbalancedBrace {
                    expected: "]".to_owned(),
                    found: close.describe(),
                },
                close,
            ));
        }
        self.consume();
        Ok(Some(body.unwrap_or_else(ParseNode::empty)))
    }

    /// Reads a text argument: the raw source up to the matching brace, with
    /// runs of whitespace collapsed and escaped characters unescaped.
    pub(crate) fn parse_text_argument(&mut self, command: &str) -> Result<String, ParseError> {
        let open = self.fetch()?;
        match open.kind {
            TokenKind::OpenBrace => {}
            TokenKind::Identifier | TokenKind::Number => return Ok(self.consume().text),
            _ => {
                return Err(ParseError::with_token(
                    ParseErrorKind::MissingArgument {
                        command: command.to_owned(),
                    },
                    open,
                ));
            }
        }
        let open = self.consume();

        let mut text = String::new();
        let mut depth = 0_usize;
        loop {
            let token = self.consume();
            match token.kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => break,
                },
                TokenKind::Eof => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MissingArgument {
                            command: command.to_owned(),
                        },
                        &open,
                    ));
                }
                TokenKind::Space | TokenKind::RowSeparator => text.push(' '),
                TokenKind::ControlSequence => {
                    let is_spacing = symbols::lookup(&token.text)
                        .is_some_and(|s| s.group == Group::NonAtom(NonAtom::Spacing));
                    if is_spacing {
                        text.push(' ');
                    } else {
                        text.push_str(token.text.trim_start_matches('\\'));
                    }
                }
                TokenKind::EnvironmentBegin | TokenKind::EnvironmentEnd => {
                    text.push_str(&token.describe());
                }
                _ => text.push_str(&token.text),
            }
        }
        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Takes a brace group holding only letters and digits (`{Attention}`,
    /// `{R}`) as a plain name. Leaves the stream untouched otherwise.
    pub(crate) fn take_text_run(&mut self) -> Result<Option<String>, ParseError> {
        if self.fetch()?.kind != TokenKind::OpenBrace {
            return Ok(None);
        }
        let mut text = String::new();
        let mut len = None;
        for (i, token) in self.tokens.iter().rev().enumerate().skip(1) {
            match token.kind {
                TokenKind::Identifier if unicode::script_text(&token.text).is_none() => {
                    text.push_str(&token.text);
                }
                TokenKind::Number if !token.text.contains('.') => text.push_str(&token.text),
                TokenKind::CloseBrace if !text.is_empty() => {
                    len = Some(i + 1);
                    break;
                }
                _ => return Ok(None),
            }
        }
        let Some(len) = len else {
            return Ok(None);
        };
        self.tokens.truncate(self.tokens.len() - len);
        Ok(Some(text))
    }

    /// Reads the arguments declared by `spec`, optional ones first.
    pub(crate) fn parse_arguments(
        &mut self,
        name: &str,
        spec: &CommandSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let mut opt_args = Vec::with_capacity(spec.num_optional_args);
        for _ in 0..spec.num_optional_args {
            opt_args.push(self.parse_optional_argument()?);
        }

        let mut args = Vec::with_capacity(spec.num_args);
        for _ in 0..spec.num_args {
            let arg = match spec.arg_type {
                ArgType::Math => self.parse_argument(name)?,
                ArgType::Text => ParseNode::Text(ParseNodeText {
                    text: self.parse_text_argument(name)?,
                }),
                ArgType::Name => match self.take_text_run()? {
                    Some(text) => ParseNode::Text(ParseNodeText { text }),
                    None => self.parse_argument(name)?,
                },
            };
            args.push(arg);
        }
        Ok((args, opt_args))
    }

    /// Parses the body of a brace group or the whole input, splitting it at
    /// an infix `\over` or `\choose`.
    fn parse_infix_group(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let left = self.parse_expression(Precedence::Punctuation)?;

        let token = self.fetch()?;
        let infix_kind = if token.kind == TokenKind::ControlSequence {
            functions::lookup(&token.text)
                .map(|spec| spec.kind)
                .filter(|kind| matches!(kind, CommandKind::InfixFraction | CommandKind::InfixBinomial))
        } else {
            None
        };
        let Some(kind) = infix_kind else {
            return Ok(left);
        };

        let over = self.consume();
        let right = self.parse_expression(Precedence::Punctuation)?;
        let (Some(left), Some(right)) = (left, right) else {
            return Err(ParseError::with_token(
                ParseErrorKind::MissingArgument {
                    command: over.text.clone(),
                },
                &over,
            ));
        };
        Ok(genfrac::infix(kind, left, right))
    }

    fn parse_group(&mut self) -> Result<ParseNode, ParseError> {
        let saved = self.enter_group();
        let body = self.parse_infix_group()?;
        self.leave_group(saved);

        let close = self.fetch()?;
        if close.kind != TokenKind::CloseBrace {
            return Err(ParseError::with_token(
                ParseErrorKind::UnbalancedBrace {
                    expected: "}".to_owned(),
                    found: close.describe(),
                },
                close,
            ));
        }
        self.consume();

        // Braces only matter to the listener around a loose operation, as
        // in `2{a+b}`.
        Ok(match body {
            None => ParseNode::empty(),
            Some(node @ (ParseNode::BinaryOp(_) | ParseNode::UnaryOp(_))) => {
                ParseNode::Group(Box::new(node))
            }
            Some(node) => node,
        })
    }

    /// Parses a single atom: a leaf, a group, a command with its arguments,
    /// a delimited expression or an environment.
    fn parse_atom(&mut self) -> Result<ParseNode, ParseError> {
        self.descend()?;
        let result = self.parse_atom_inner();
        self.depth -= 1;
        result
    }

    fn parse_atom_inner(&mut self) -> Result<ParseNode, ParseError> {
        self.skip_insignificant()?;
        let token = self.consume();
        match token.kind {
            TokenKind::Number => Ok(ParseNode::number(token.text)),
            TokenKind::Identifier => Ok(ParseNode::identifier(token.text)),
            TokenKind::OpenBrace => self.parse_group(),
            TokenKind::EnvironmentBegin => parse_environment(self, &token),
            TokenKind::Delimiter => delimsizing::parse_bare_delimited(self, &token),
            TokenKind::ControlSequence | TokenKind::Symbol => {
                if let Some(spec) = functions::lookup(&token.text) {
                    return functions::call_function(self, token, spec);
                }
                if as_delimiter(&token).is_some_and(Delimiter::opens) {
                    return delimsizing::parse_bare_delimited(self, &token);
                }
                if let Some(symbol) = symbols::lookup(&token.text) {
                    let name = symbol.replace.map_or(token.text, String::from);
                    return Ok(ParseNode::Identifier(ParseNodeIdentifier { name, font: None }));
                }
                if token.kind == TokenKind::ControlSequence {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnknownCommand {
                            name: token.text.clone(),
                        },
                        &token,
                    ));
                }
                Ok(ParseNode::identifier(token.text))
            }
            _ => Err(ParseError::with_token(
                ParseErrorKind::UnexpectedToken {
                    found: token.describe(),
                    expected: "an operand",
                },
                &token,
            )),
        }
    }
}

fn classify(token: &Token) -> Skip {
    match token.kind {
        TokenKind::Space => Skip::Drop,
        TokenKind::ControlSequence | TokenKind::Symbol => {
            if let Some(spec) = functions::lookup(&token.text) {
                return match spec.kind {
                    CommandKind::Ignored => Skip::Drop,
                    CommandKind::SizedDelimiter => Skip::Sized,
                    _ => Skip::Keep,
                };
            }
            match symbols::lookup(&token.text) {
                Some(symbol) if symbol.group == Group::NonAtom(NonAtom::Spacing) => Skip::Drop,
                _ => Skip::Keep,
            }
        }
        _ => Skip::Keep,
    }
}

/// A delimiter in operand position. Characters such as `<` or `.` are
/// delimiters only after `\left` and `\right`; elsewhere they keep their
/// symbol meaning.
fn as_delimiter(token: &Token) -> Option<&'static Delimiter> {
    let delim = delimsizing::token_delimiter(token)?;
    if token.kind == TokenKind::Symbol && symbols::lookup(&token.text).is_some() {
        return None;
    }
    Some(delim)
}

fn script_char(token: &Token) -> Option<(ScriptKind, &'static str)> {
    match token.kind {
        TokenKind::Identifier | TokenKind::Symbol => unicode::script_text(&token.text),
        _ => None,
    }
}

fn operator(text: &str, symbol: &Symbol) -> Operator {
    // Separators split a set-builder condition from its variable and bind
    // looser than the relations inside the condition.
    let precedence = match text {
        r"\mid" | ":" => Precedence::Punctuation,
        _ => symbol.precedence,
    };
    Operator {
        text: text.to_owned(),
        atom: match symbol.group {
            Group::Atom(atom) => atom,
            Group::NonAtom(_) => Atom::Bin,
        },
        precedence,
    }
}
