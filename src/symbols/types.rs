use strum::AsRefStr;

/// Atom types for symbols in mathematical expressions.
///
/// Atoms follow the TeX classification: the class decides whether a symbol
/// joins two operands, relates them or separates list items. The parser turns `Bin`, `Rel` and `Punct` symbols into binary
/// operators and uses [`Precedence`] to nest them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Atom {
    /// Binary operators that combine two operands: `+`, `-`, `\times`.
    Bin,
    /// Relations that compare two operands: `=`, `<`, `\in`, `\to`.
    Rel,
    /// Punctuation separating list items: `,`, `;`.
    Punct,
}

/// Non-atom types: symbols that stand on their own in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NonAtom {
    /// Letters and letter-like symbols, read as variables: `x`, `\alpha`.
    MathOrd,
    /// Named constants and marks, read as words: `\infty`, `\partial`.
    TextOrd,
    /// Prefix operators taking one operand: `\neg`, `\lnot`.
    Prefix,
    /// Postfix marks applying to the preceding operand: `!`.
    Postfix,
    /// Horizontal spacing, which has no spoken form: `\,`, `\quad`, `~`.
    Spacing,
}

/// Group types for symbols, unifying [`Atom`] and [`NonAtom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// A symbol that joins two operands.
    Atom(Atom),
    /// A symbol that stands on its own.
    NonAtom(NonAtom),
}

/// Binding strength of an operator, weakest first.
///
/// The ordering is total: any two operators compare, which is what lets the
/// parser climb precedence deterministically and lets the verbalizer decide
/// when a child must be announced as a grouped quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Precedence {
    /// List separators.
    Punctuation,
    /// Equalities, inequalities, membership, arrows.
    Relation,
    /// `+`, `-`, `\pm`, `\cup`.
    Additive,
    /// `\times`, `\cdot`, `/`, `\cap`.
    Multiplicative,
    /// Prefix `-`, `+`, `\pm`, `\neg`.
    Unary,
    /// Juxtaposition, read as implied multiplication.
    Implicit,
    /// Superscripts and subscripts.
    Script,
    /// Leaves and self-delimiting constructs.
    Atom,
}

impl Precedence {
    /// The next tighter level, used as the minimum precedence of the right
    /// operand of a left-associative operator.
    #[must_use]
    pub const fn tighter(self) -> Self {
        match self {
            Self::Punctuation => Self::Relation,
            Self::Relation => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Unary,
            Self::Unary => Self::Implicit,
            Self::Implicit => Self::Script,
            Self::Script | Self::Atom => Self::Atom,
        }
    }
}

/// Registry entry for a symbol-literal: a command or character with a fixed
/// meaning and spoken form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// How the symbol interacts with its neighbours.
    pub group: Group,
    /// Binding strength when used as an operator. Non-operators use
    /// [`Precedence::Atom`].
    pub precedence: Precedence,
    /// The Unicode glyph a command stands for (`\alpha` is `α`). Identifiers
    /// built from commands store this glyph in the tree.
    pub replace: Option<char>,
    /// Default English words, used unless a speech style overrides them.
    pub speech: &'static str,
}

impl Symbol {
    pub(crate) const fn bin(precedence: Precedence, speech: &'static str) -> Self {
        Self {
            group: Group::Atom(Atom::Bin),
            precedence,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn rel(speech: &'static str) -> Self {
        Self {
            group: Group::Atom(Atom::Rel),
            precedence: Precedence::Relation,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn punct(speech: &'static str) -> Self {
        Self {
            group: Group::Atom(Atom::Punct),
            precedence: Precedence::Punctuation,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn letter(replace: Option<char>, speech: &'static str) -> Self {
        Self {
            group: Group::NonAtom(NonAtom::MathOrd),
            precedence: Precedence::Atom,
            replace,
            speech,
        }
    }

    pub(crate) const fn ord(speech: &'static str) -> Self {
        Self {
            group: Group::NonAtom(NonAtom::TextOrd),
            precedence: Precedence::Atom,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn prefix(speech: &'static str) -> Self {
        Self {
            group: Group::NonAtom(NonAtom::Prefix),
            precedence: Precedence::Unary,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn postfix(speech: &'static str) -> Self {
        Self {
            group: Group::NonAtom(NonAtom::Postfix),
            precedence: Precedence::Script,
            replace: None,
            speech,
        }
    }

    pub(crate) const fn spacing() -> Self {
        Self {
            group: Group::NonAtom(NonAtom::Spacing),
            precedence: Precedence::Atom,
            replace: None,
            speech: "",
        }
    }

    /// Returns `true` for symbols the parser treats as infix operators.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        matches!(self.group, Group::Atom(_))
    }
}
