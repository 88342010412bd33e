//! Propositional logic: formulas, valuations, and transformations

pub mod formula;
pub mod transform;
pub mod valuation;

pub use formula::{BinaryOp, Formula, FormulaRef};
pub use transform::{nnf, nnf_not, simplify, substitute};
pub use valuation::{is_satisfiable, TruthTable, Valuation};
