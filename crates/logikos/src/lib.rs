//! Logikos: a toolkit for classical logic
//!
//! Propositional formulas with a full algebra (evaluation,
//! substitution, simplification, normal forms, Tseitin encoding), a
//! DPLL satisfiability solver consuming DIMACS CNF, and first-order
//! formulas evaluated against finite structures.

pub mod cnf;
pub mod error;
pub mod fol;
pub mod prop;
pub mod sat;

// Re-export the propositional core; the first-order and solver
// literal/clause types stay module-qualified to avoid name clashes.
pub use cnf::{tseitin, AtomIndex, CNFFormula};
pub use error::{Error, Result};
pub use prop::{
    is_satisfiable, nnf, nnf_not, simplify, substitute, BinaryOp, Formula, FormulaRef,
    TruthTable, Valuation,
};
pub use sat::{Cnf, Model, SatResult, Solver};
