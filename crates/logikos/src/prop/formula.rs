//! Propositional formulas as immutable shared trees

use crate::error::Result;
use crate::prop::valuation::Valuation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// A binary connective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Impl,
    Eq,
}

impl BinaryOp {
    /// Connective as it appears in the printable grammar
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Impl => "->",
            BinaryOp::Eq => "<->",
        }
    }
}

/// Shared handle to a formula node. Transformations return new trees
/// that share unchanged subtrees; no node is ever mutated.
pub type FormulaRef = Rc<Formula>;

/// A propositional formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    False,
    True,
    Atom(String),
    Not(FormulaRef),
    Binary(BinaryOp, FormulaRef, FormulaRef),
}

impl Formula {
    pub fn falsum() -> FormulaRef {
        Rc::new(Formula::False)
    }

    pub fn verum() -> FormulaRef {
        Rc::new(Formula::True)
    }

    pub fn atom(name: impl Into<String>) -> FormulaRef {
        Rc::new(Formula::Atom(name.into()))
    }

    pub fn not(subformula: FormulaRef) -> FormulaRef {
        Rc::new(Formula::Not(subformula))
    }

    pub fn binary(op: BinaryOp, left: FormulaRef, right: FormulaRef) -> FormulaRef {
        Rc::new(Formula::Binary(op, left, right))
    }

    pub fn and(left: FormulaRef, right: FormulaRef) -> FormulaRef {
        Self::binary(BinaryOp::And, left, right)
    }

    pub fn or(left: FormulaRef, right: FormulaRef) -> FormulaRef {
        Self::binary(BinaryOp::Or, left, right)
    }

    pub fn implies(left: FormulaRef, right: FormulaRef) -> FormulaRef {
        Self::binary(BinaryOp::Impl, left, right)
    }

    pub fn iff(left: FormulaRef, right: FormulaRef) -> FormulaRef {
        Self::binary(BinaryOp::Eq, left, right)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Formula::False)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Formula::True)
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Atom(_))
    }

    /// A literal is an atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(sub) => sub.is_atom(),
            _ => false,
        }
    }

    /// Number of connectives in the formula. Constants and atoms
    /// count zero, `Not` counts one, each binary connective counts one.
    pub fn complexity(&self) -> usize {
        match self {
            Formula::False | Formula::True | Formula::Atom(_) => 0,
            Formula::Not(sub) => 1 + sub.complexity(),
            Formula::Binary(_, left, right) => 1 + left.complexity() + right.complexity(),
        }
    }

    /// Names of all atoms appearing in the formula, sorted.
    pub fn atoms(&self) -> BTreeSet<String> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    pub fn collect_atoms(&self, atoms: &mut BTreeSet<String>) {
        match self {
            Formula::False | Formula::True => {}
            Formula::Atom(name) => {
                atoms.insert(name.clone());
            }
            Formula::Not(sub) => sub.collect_atoms(atoms),
            Formula::Binary(_, left, right) => {
                left.collect_atoms(atoms);
                right.collect_atoms(atoms);
            }
        }
    }

    /// Evaluate under a valuation. Every atom of the formula must be
    /// covered by the valuation; an absent atom is an error.
    pub fn evaluate(&self, valuation: &Valuation) -> Result<bool> {
        match self {
            Formula::False => Ok(false),
            Formula::True => Ok(true),
            Formula::Atom(name) => valuation.get(name),
            Formula::Not(sub) => Ok(!sub.evaluate(valuation)?),
            Formula::Binary(op, left, right) => {
                let l = left.evaluate(valuation)?;
                let r = right.evaluate(valuation)?;
                Ok(match op {
                    BinaryOp::And => l && r,
                    BinaryOp::Or => l || r,
                    BinaryOp::Impl => !l || r,
                    BinaryOp::Eq => l == r,
                })
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::False => write!(f, "F"),
            Formula::True => write!(f, "T"),
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Not(sub) => write!(f, "~{}", sub),
            Formula::Binary(op, left, right) => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}
