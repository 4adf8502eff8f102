use thiserror::Error;

use crate::option::OptionKind;

/// A [`Definition`](crate::Definition) that cannot be compiled.
///
/// These are programmer errors in the schema, reported eagerly by
/// [`Parser::new`](crate::Parser::new) instead of letting one declaration
/// silently shadow another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("option name must not be empty")]
    EmptyName,

    #[error("option name `{0}` is reserved")]
    ReservedName(String),

    #[error("positional index {index} is declared by both `{first}` and `{second}`")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },

    #[error("alias `-{alias}` is declared by both `{first}` and `{second}`")]
    DuplicateAlias {
        alias: char,
        first: String,
        second: String,
    },

    /// More than one `raw`, `args` or `rest` option.
    #[error("at most one {kind} option is allowed, found `{first}` and `{second}`")]
    DuplicateCapture {
        kind: OptionKind,
        first: String,
        second: String,
    },

    #[error("option `{name}` has invalid alias {alias:?}")]
    InvalidAlias { name: String, alias: char },

    /// A named option whose name holds `-` before a lowercase letter. The
    /// long form folds that pair into a capital, so `--{name}` never matches.
    #[error("option `{0}` cannot be reached as a long option; use camel case instead of `-`")]
    UnreachableName(String),
}
