//! Environment table
//!
//! Maps each supported `\begin{name}` to an [`EnvSpec`]: the kind of
//! matrix-like node it builds and whether a column specification follows the
//! `\begin`. All of them share the body grammar in [`array`].

pub mod array;

use phf::phf_map;

use crate::parser::parse_node::MatrixKind;

/// Specification for a matrix-like environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSpec {
    /// The node kind the environment produces.
    pub kind: MatrixKind,
    /// Whether a `{...}` column specification follows `\begin{name}`, as
    /// for `array`. It only affects layout and is skipped.
    pub column_spec: bool,
}

const fn matrix(kind: MatrixKind) -> EnvSpec {
    EnvSpec {
        kind,
        column_spec: false,
    }
}

/// The environment table.
pub static ENVIRONMENTS: phf::Map<&'static str, EnvSpec> = phf_map! {
    "matrix" => matrix(MatrixKind::Plain),
    "pmatrix" => matrix(MatrixKind::Parenthesized),
    "bmatrix" => matrix(MatrixKind::Bracketed),
    "Bmatrix" => matrix(MatrixKind::Braced),
    "vmatrix" => matrix(MatrixKind::Determinant),
    "Vmatrix" => matrix(MatrixKind::Norm),
    "smallmatrix" => matrix(MatrixKind::Small),
    "cases" => matrix(MatrixKind::Cases),
    "array" => EnvSpec {
        kind: MatrixKind::Array,
        column_spec: true,
    },
};

/// Looks up an environment by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static EnvSpec> {
    ENVIRONMENTS.get(name)
}
