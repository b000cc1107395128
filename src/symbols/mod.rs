//! Symbol-literal half of the command registry
//!
//! Maps operator characters, relation commands, Greek letters and named
//! constants to their [`Symbol`] descriptor: atom class, operator
//! precedence, the Unicode glyph a command stands for, and the default
//! English words. Both the command (`\alpha`, `\le`) and the glyph
//! (`α`, `≤`) are keys, so pre-rendered Unicode input reads the same as
//! its LaTeX spelling.
//!
//! The table is a compile-time `phf` map: read-only, shared by reference,
//! safe to consult from any number of threads.
//!
//! # Examples
//!
//! ```rust
//! use mathwords::symbols::{Atom, Group, lookup};
//!
//! let le = lookup(r"\le").unwrap();
//! assert_eq!(le.group, Group::Atom(Atom::Rel));
//! assert_eq!(le.speech, "less than or equal to");
//! ```

mod types;
use phf::{phf_map, phf_set};
pub use types::{Atom, Group, NonAtom, Precedence, Symbol};

use Precedence::{Additive, Multiplicative};

/// Operators that may also open an operand as a prefix sign (`-x`, `\pm 1`).
pub static PREFIX_SIGNS: phf::Set<&'static str> = phf_set! {
    "+", "-", "\u{2212}", "\\pm", "\\mp", "\u{b1}", "\u{2213}",
};

/// The symbol table, keyed by command name or literal character.
pub static SYMBOLS: phf::Map<&'static str, Symbol> = phf_map! {
    // Additive operators
    "+" => Symbol::bin(Additive, "plus"),
    "-" => Symbol::bin(Additive, "minus"),
    "\u{2212}" => Symbol::bin(Additive, "minus"),
    "\\pm" => Symbol::bin(Additive, "plus or minus"),
    "\u{b1}" => Symbol::bin(Additive, "plus or minus"),
    "\\mp" => Symbol::bin(Additive, "minus or plus"),
    "\u{2213}" => Symbol::bin(Additive, "minus or plus"),
    "\\cup" => Symbol::bin(Additive, "union"),
    "\u{222a}" => Symbol::bin(Additive, "union"),
    "\\setminus" => Symbol::bin(Additive, "set minus"),
    "\\oplus" => Symbol::bin(Additive, "direct sum"),
    "\\vee" => Symbol::bin(Additive, "or"),
    "\\lor" => Symbol::bin(Additive, "or"),

    // Multiplicative operators
    "\\times" => Symbol::bin(Multiplicative, "times"),
    "\u{d7}" => Symbol::bin(Multiplicative, "times"),
    "\\cdot" => Symbol::bin(Multiplicative, "dot"),
    "\u{22c5}" => Symbol::bin(Multiplicative, "dot"),
    "\u{b7}" => Symbol::bin(Multiplicative, "dot"),
    "*" => Symbol::bin(Multiplicative, "times"),
    "\\ast" => Symbol::bin(Multiplicative, "times"),
    "/" => Symbol::bin(Multiplicative, "slash"),
    "\\div" => Symbol::bin(Multiplicative, "divided by"),
    "\u{f7}" => Symbol::bin(Multiplicative, "divided by"),
    "\\cap" => Symbol::bin(Multiplicative, "intersection"),
    "\u{2229}" => Symbol::bin(Multiplicative, "intersection"),
    "\\circ" => Symbol::bin(Multiplicative, "composed with"),
    "\\otimes" => Symbol::bin(Multiplicative, "tensor product"),
    "\\odot" => Symbol::bin(Multiplicative, "circle dot"),
    "\\wedge" => Symbol::bin(Multiplicative, "and"),
    "\\land" => Symbol::bin(Multiplicative, "and"),

    // Relations
    "=" => Symbol::rel("equals"),
    "<" => Symbol::rel("less than"),
    ">" => Symbol::rel("greater than"),
    "\\lt" => Symbol::rel("less than"),
    "\\gt" => Symbol::rel("greater than"),
    "\\ne" => Symbol::rel("not equals"),
    "\\neq" => Symbol::rel("not equals"),
    "\u{2260}" => Symbol::rel("not equals"),
    "\\le" => Symbol::rel("less than or equal to"),
    "\\leq" => Symbol::rel("less than or equal to"),
    "\u{2264}" => Symbol::rel("less than or equal to"),
    "\\ge" => Symbol::rel("greater than or equal to"),
    "\\geq" => Symbol::rel("greater than or equal to"),
    "\u{2265}" => Symbol::rel("greater than or equal to"),
    "\\ll" => Symbol::rel("much less than"),
    "\\gg" => Symbol::rel("much greater than"),
    "\\approx" => Symbol::rel("approximately equals"),
    "\u{2248}" => Symbol::rel("approximately equals"),
    "\\equiv" => Symbol::rel("is equivalent to"),
    "\\sim" => Symbol::rel("is similar to"),
    "\\simeq" => Symbol::rel("is asymptotically equal to"),
    "\\cong" => Symbol::rel("is congruent to"),
    "\\propto" => Symbol::rel("is proportional to"),
    "\\in" => Symbol::rel("is an element of"),
    "\u{2208}" => Symbol::rel("is an element of"),
    "\\notin" => Symbol::rel("is not an element of"),
    "\\ni" => Symbol::rel("contains"),
    "\\subset" => Symbol::rel("is a subset of"),
    "\\subseteq" => Symbol::rel("is a subset of or equal to"),
    "\\supset" => Symbol::rel("is a superset of"),
    "\\supseteq" => Symbol::rel("is a superset of or equal to"),
    "\\mid" => Symbol::rel("divides"),
    "|" => Symbol::rel("vertical bar"),
    "\\perp" => Symbol::rel("is perpendicular to"),
    "\\parallel" => Symbol::rel("is parallel to"),
    "\\to" => Symbol::rel("to"),
    "\\rightarrow" => Symbol::rel("right arrow"),
    "\u{2192}" => Symbol::rel("right arrow"),
    "\\leftarrow" => Symbol::rel("left arrow"),
    "\\gets" => Symbol::rel("left arrow"),
    "\\mapsto" => Symbol::rel("maps to"),
    "\\Rightarrow" => Symbol::rel("implies"),
    "\\implies" => Symbol::rel("implies"),
    "\\Leftarrow" => Symbol::rel("is implied by"),
    "\\impliedby" => Symbol::rel("is implied by"),
    "\\Leftrightarrow" => Symbol::rel("if and only if"),
    "\\iff" => Symbol::rel("if and only if"),
    "\\leftrightarrow" => Symbol::rel("left right arrow"),
    ":" => Symbol::rel("colon"),
    "\\coloneqq" => Symbol::rel("is defined as"),
    "\\triangleq" => Symbol::rel("is defined as"),

    // Punctuation
    "," => Symbol::punct("comma"),
    ";" => Symbol::punct("semicolon"),
    "." => Symbol::punct("period"),

    // Prefix and postfix marks
    "\\neg" => Symbol::prefix("not"),
    "\\lnot" => Symbol::prefix("not"),
    "!" => Symbol::postfix("factorial"),

    // Named constants and marks
    "\\infty" => Symbol::ord("infinity"),
    "\u{221e}" => Symbol::ord("infinity"),
    "\\partial" => Symbol::ord("partial"),
    "\u{2202}" => Symbol::ord("partial"),
    "\\nabla" => Symbol::ord("nabla"),
    "\\emptyset" => Symbol::ord("the empty set"),
    "\\varnothing" => Symbol::ord("the empty set"),
    "\\forall" => Symbol::ord("for all"),
    "\\exists" => Symbol::ord("there exists"),
    "\\nexists" => Symbol::ord("there does not exist"),
    "\\ldots" => Symbol::ord("dot dot dot"),
    "\\cdots" => Symbol::ord("dot dot dot"),
    "\\dots" => Symbol::ord("dot dot dot"),
    "\\vdots" => Symbol::ord("vertical dots"),
    "\\ddots" => Symbol::ord("diagonal dots"),
    "\u{2026}" => Symbol::ord("dot dot dot"),
    "\\prime" => Symbol::ord("prime"),
    "\\dagger" => Symbol::ord("dagger"),
    "\\star" => Symbol::ord("star"),
    "\\angle" => Symbol::ord("angle"),
    "\\degree" => Symbol::ord("degrees"),
    "\\top" => Symbol::ord("transpose"),
    "\\bot" => Symbol::ord("bottom"),
    "\\hbar" => Symbol::ord("h bar"),
    "\\ell" => Symbol::ord("script l"),
    "\\Re" => Symbol::ord("real part"),
    "\\Im" => Symbol::ord("imaginary part"),
    "\\aleph" => Symbol::ord("aleph"),
    "\\%" => Symbol::ord("percent"),
    "\\&" => Symbol::ord("and"),
    "\\#" => Symbol::ord("number"),
    "\\$" => Symbol::ord("dollars"),
    "\\_" => Symbol::ord("underscore"),
    "?" => Symbol::ord("question mark"),
    "@" => Symbol::ord("at"),
    "\"" => Symbol::ord("quote"),

    // Spacing
    "\\," => Symbol::spacing(),
    "\\:" => Symbol::spacing(),
    "\\;" => Symbol::spacing(),
    "\\!" => Symbol::spacing(),
    "\\>" => Symbol::spacing(),
    "\\ " => Symbol::spacing(),
    "\\quad" => Symbol::spacing(),
    "\\qquad" => Symbol::spacing(),
    "\\thinspace" => Symbol::spacing(),
    "\\medspace" => Symbol::spacing(),
    "\\thickspace" => Symbol::spacing(),
    "\\enspace" => Symbol::spacing(),
    "\\relax" => Symbol::spacing(),
    "~" => Symbol::spacing(),

    // Greek letters, by command
    "\\alpha" => Symbol::letter(Some('\u{3b1}'), "alpha"),
    "\\beta" => Symbol::letter(Some('\u{3b2}'), "beta"),
    "\\gamma" => Symbol::letter(Some('\u{3b3}'), "gamma"),
    "\\delta" => Symbol::letter(Some('\u{3b4}'), "delta"),
    "\\epsilon" => Symbol::letter(Some('\u{3f5}'), "epsilon"),
    "\\varepsilon" => Symbol::letter(Some('\u{3b5}'), "epsilon"),
    "\\zeta" => Symbol::letter(Some('\u{3b6}'), "zeta"),
    "\\eta" => Symbol::letter(Some('\u{3b7}'), "eta"),
    "\\theta" => Symbol::letter(Some('\u{3b8}'), "theta"),
    "\\vartheta" => Symbol::letter(Some('\u{3d1}'), "theta"),
    "\\iota" => Symbol::letter(Some('\u{3b9}'), "iota"),
    "\\kappa" => Symbol::letter(Some('\u{3ba}'), "kappa"),
    "\\lambda" => Symbol::letter(Some('\u{3bb}'), "lambda"),
    "\\mu" => Symbol::letter(Some('\u{3bc}'), "mu"),
    "\\nu" => Symbol::letter(Some('\u{3bd}'), "nu"),
    "\\xi" => Symbol::letter(Some('\u{3be}'), "xi"),
    "\\pi" => Symbol::letter(Some('\u{3c0}'), "pi"),
    "\\varpi" => Symbol::letter(Some('\u{3d6}'), "pi"),
    "\\rho" => Symbol::letter(Some('\u{3c1}'), "rho"),
    "\\varrho" => Symbol::letter(Some('\u{3f1}'), "rho"),
    "\\sigma" => Symbol::letter(Some('\u{3c3}'), "sigma"),
    "\\varsigma" => Symbol::letter(Some('\u{3c2}'), "sigma"),
    "\\tau" => Symbol::letter(Some('\u{3c4}'), "tau"),
    "\\upsilon" => Symbol::letter(Some('\u{3c5}'), "upsilon"),
    "\\phi" => Symbol::letter(Some('\u{3d5}'), "phi"),
    "\\varphi" => Symbol::letter(Some('\u{3c6}'), "phi"),
    "\\chi" => Symbol::letter(Some('\u{3c7}'), "chi"),
    "\\psi" => Symbol::letter(Some('\u{3c8}'), "psi"),
    "\\omega" => Symbol::letter(Some('\u{3c9}'), "omega"),
    "\\Gamma" => Symbol::letter(Some('\u{393}'), "cap gamma"),
    "\\Delta" => Symbol::letter(Some('\u{394}'), "cap delta"),
    "\\Theta" => Symbol::letter(Some('\u{398}'), "cap theta"),
    "\\Lambda" => Symbol::letter(Some('\u{39b}'), "cap lambda"),
    "\\Xi" => Symbol::letter(Some('\u{39e}'), "cap xi"),
    "\\Pi" => Symbol::letter(Some('\u{3a0}'), "cap pi"),
    "\\Sigma" => Symbol::letter(Some('\u{3a3}'), "cap sigma"),
    "\\Upsilon" => Symbol::letter(Some('\u{3a5}'), "cap upsilon"),
    "\\Phi" => Symbol::letter(Some('\u{3a6}'), "cap phi"),
    "\\Psi" => Symbol::letter(Some('\u{3a8}'), "cap psi"),
    "\\Omega" => Symbol::letter(Some('\u{3a9}'), "cap omega"),

    // Greek letters, by glyph
    "\u{3b1}" => Symbol::letter(None, "alpha"),
    "\u{3b2}" => Symbol::letter(None, "beta"),
    "\u{3b3}" => Symbol::letter(None, "gamma"),
    "\u{3b4}" => Symbol::letter(None, "delta"),
    "\u{3f5}" => Symbol::letter(None, "epsilon"),
    "\u{3b5}" => Symbol::letter(None, "epsilon"),
    "\u{3b6}" => Symbol::letter(None, "zeta"),
    "\u{3b7}" => Symbol::letter(None, "eta"),
    "\u{3b8}" => Symbol::letter(None, "theta"),
    "\u{3d1}" => Symbol::letter(None, "theta"),
    "\u{3b9}" => Symbol::letter(None, "iota"),
    "\u{3ba}" => Symbol::letter(None, "kappa"),
    "\u{3bb}" => Symbol::letter(None, "lambda"),
    "\u{3bc}" => Symbol::letter(None, "mu"),
    "\u{3bd}" => Symbol::letter(None, "nu"),
    "\u{3be}" => Symbol::letter(None, "xi"),
    "\u{3c0}" => Symbol::letter(None, "pi"),
    "\u{3d6}" => Symbol::letter(None, "pi"),
    "\u{3c1}" => Symbol::letter(None, "rho"),
    "\u{3f1}" => Symbol::letter(None, "rho"),
    "\u{3c3}" => Symbol::letter(None, "sigma"),
    "\u{3c2}" => Symbol::letter(None, "sigma"),
    "\u{3c4}" => Symbol::letter(None, "tau"),
    "\u{3c5}" => Symbol::letter(None, "upsilon"),
    "\u{3d5}" => Symbol::letter(None, "phi"),
    "\u{3c6}" => Symbol::letter(None, "phi"),
    "\u{3c7}" => Symbol::letter(None, "chi"),
    "\u{3c8}" => Symbol::letter(None, "psi"),
    "\u{3c9}" => Symbol::letter(None, "omega"),
    "\u{393}" => Symbol::letter(None, "cap gamma"),
    "\u{394}" => Symbol::letter(None, "cap delta"),
    "\u{398}" => Symbol::letter(None, "cap theta"),
    "\u{39b}" => Symbol::letter(None, "cap lambda"),
    "\u{39e}" => Symbol::letter(None, "cap xi"),
    "\u{3a0}" => Symbol::letter(None, "cap pi"),
    "\u{3a3}" => Symbol::letter(None, "cap sigma"),
    "\u{3a5}" => Symbol::letter(None, "cap upsilon"),
    "\u{3a6}" => Symbol::letter(None, "cap phi"),
    "\u{3a8}" => Symbol::letter(None, "cap psi"),
    "\u{3a9}" => Symbol::letter(None, "cap omega"),
};

/// Letters conventionally naming functions: `f(x)` reads "f of x" rather
/// than "f times x".
static FUNCTION_LETTERS: phf::Set<&'static str> = phf_set! {
    "f", "g", "h", "p", "q", "u", "v", "F", "G", "H", "L", "N", "P", "Q", "T", "V",
    "\u{3c3}", "\u{3c6}", "\u{3c8}",
};

/// Looks up a symbol by command name (`\le`) or literal character (`≤`).
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Symbol> {
    SYMBOLS.get(name)
}

/// Spoken name of a single-glyph identifier, falling back to the glyph
/// itself for plain letters.
#[must_use]
pub fn letter_speech(glyph: &str) -> &str {
    match lookup(glyph) {
        Some(symbol) if symbol.group == Group::NonAtom(NonAtom::MathOrd) => symbol.speech,
        _ => glyph,
    }
}

/// Returns `true` for letters that read as function names before a
/// parenthesised argument.
#[must_use]
pub fn is_function_letter(name: &str) -> bool {
    FUNCTION_LETTERS.contains(name)
}
