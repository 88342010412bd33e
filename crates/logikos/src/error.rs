//! Error types shared across the crate

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Evaluation reached an atom the valuation does not cover.
    /// An absent atom is never silently treated as false.
    #[error("atom '{0}' has no value in the valuation")]
    AtomNotValued(String),

    #[error("variable '{0}' has no value in the valuation")]
    VariableNotValued(String),

    #[error("unknown function symbol '{0}'")]
    UnknownFunction(String),

    #[error("unknown relation symbol '{0}'")]
    UnknownRelation(String),

    #[error("symbol '{symbol}' expects {expected} arguments, got {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// Clause-form conversion was handed a tree that is not in
    /// negation normal form. This is a caller bug, not an input error.
    #[error("formula is not in negation normal form: {0}")]
    NotInNnf(String),

    #[error("malformed DIMACS input: {0}")]
    Dimacs(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
