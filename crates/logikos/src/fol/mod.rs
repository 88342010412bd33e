//! First-order logic: terms, formulas, signatures, and evaluation
//! against finite structures

pub mod eval;
pub mod formula;
pub mod structure;
pub mod substitution;
pub mod term;

pub use eval::{eval_term, evaluate};
pub use formula::{Formula, FormulaRef, QuantifierKind};
pub use structure::{
    DomainElement, DomainFunction, DomainRelation, Signature, Structure, Valuation,
};
pub use substitution::{substitute, substitute_term, FreshVarGen};
pub use term::{Term, TermRef};
