//! DPLL satisfiability solver over integer-indexed CNF
//!
//! Atoms are indexed `1..=num_atoms` as in DIMACS. The solver keeps a
//! trail of assigned literals with decision markers and alternates
//! conflict resolution, unit propagation, and decisions until it
//! produces a total model or exhausts the search space.

mod solver;

pub use solver::Solver;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A propositional variable, indexed from 1 as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable(pub usize);

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable with polarity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) | Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Literal::Positive(_))
    }

    pub fn index(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// Build from a DIMACS integer; zero is the clause terminator,
    /// not a literal.
    pub fn from_dimacs(value: i64) -> Option<Literal> {
        match value {
            0 => None,
            v if v > 0 => Some(Literal::Positive(Variable(v as usize))),
            v => Some(Literal::Negative(Variable(v.unsigned_abs() as usize))),
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(v) => v.0 as i64,
            Literal::Negative(v) => -(v.0 as i64),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A disjunction of literals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", literal)?;
        }
        write!(f, ")")
    }
}

/// Solver input: clauses over atoms `1..=num_atoms`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf {
    pub num_atoms: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_atoms: usize, clauses: Vec<Clause>) -> Self {
        Cnf { num_atoms, clauses }
    }
}

/// A total satisfying assignment over atoms `1..=num_atoms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub(crate) fn new(values: Vec<bool>) -> Self {
        Model { values }
    }

    pub fn num_atoms(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        variable.0.checked_sub(1).and_then(|i| self.values.get(i)).copied()
    }

    /// True iff the literal holds under this assignment.
    pub fn satisfies_literal(&self, literal: &Literal) -> bool {
        self.value(literal.variable()) == Some(literal.is_positive())
    }

    /// True iff every clause has at least one true literal.
    pub fn satisfies(&self, cnf: &Cnf) -> bool {
        cnf.clauses
            .iter()
            .all(|clause| clause.literals().any(|literal| self.satisfies_literal(literal)))
    }

    /// The assignment as DIMACS-style literals, in atom order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| {
            let variable = Variable(i + 1);
            if value {
                Literal::Positive(variable)
            } else {
                Literal::Negative(variable)
            }
        })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, literal) in self.literals().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}
