//! Clause-form representation of propositional formulas
//!
//! A CNF formula is a conjunction of clauses, each clause a
//! disjunction of literals over named atoms. The empty formula is
//! true; a formula containing an empty clause is false.

pub mod conversion;
pub mod dimacs;
pub mod tseitin;

pub use conversion::from_nnf;
pub use tseitin::tseitin;

use crate::sat;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A literal: an atom with polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub name: String,
    pub polarity: bool,
}

impl Literal {
    pub fn positive(name: impl Into<String>) -> Self {
        Literal {
            name: name.into(),
            polarity: true,
        }
    }

    pub fn negative(name: impl Into<String>) -> Self {
        Literal {
            name: name.into(),
            polarity: false,
        }
    }

    pub fn complement(&self) -> Literal {
        Literal {
            name: self.name.clone(),
            polarity: !self.polarity,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.name)
    }
}

/// A clause: a disjunction of literals. Order is irrelevant
/// semantically but preserved for reproducibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for literal in &self.literals {
            write!(f, " {}", literal)?;
        }
        write!(f, " }}")
    }
}

/// A CNF formula: a conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CNFFormula {
    pub clauses: Vec<Clause>,
}

impl CNFFormula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        CNFFormula { clauses }
    }

    /// The empty CNF is true by convention.
    pub fn is_true(&self) -> bool {
        self.clauses.is_empty()
    }

    /// A CNF containing an empty clause is false by convention.
    pub fn is_false(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn atoms(&self) -> BTreeSet<String> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter())
            .map(|literal| literal.name.clone())
            .collect()
    }

    /// Assign dense 1-based integer indices to the atoms in order of
    /// first occurrence, producing solver input plus the name-index
    /// correspondence.
    pub fn index_atoms(&self) -> (sat::Cnf, AtomIndex) {
        let mut index = AtomIndex::default();
        let clauses = self
            .clauses
            .iter()
            .map(|clause| {
                sat::Clause::new(clause.literals.iter().map(|literal| {
                    let variable = index.intern(&literal.name);
                    if literal.polarity {
                        sat::Literal::Positive(variable)
                    } else {
                        sat::Literal::Negative(variable)
                    }
                }))
            })
            .collect();
        let cnf = sat::Cnf {
            num_atoms: index.len(),
            clauses,
        };
        (cnf, index)
    }
}

impl fmt::Display for CNFFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for clause in &self.clauses {
            write!(f, " {}", clause)?;
        }
        write!(f, " }}")
    }
}

/// Bidirectional correspondence between atom names and the 1-based
/// indices used by the solver.
#[derive(Debug, Clone, Default)]
pub struct AtomIndex {
    indices: IndexMap<String, usize>,
}

impl AtomIndex {
    /// Index of `name`, allocating the next index on first sight.
    pub fn intern(&mut self, name: &str) -> sat::Variable {
        if let Some(&index) = self.indices.get(name) {
            return sat::Variable(index);
        }
        let index = self.indices.len() + 1;
        self.indices.insert(name.to_string(), index);
        sat::Variable(index)
    }

    pub fn get(&self, name: &str) -> Option<sat::Variable> {
        self.indices.get(name).map(|&index| sat::Variable(index))
    }

    /// Name behind a solver variable.
    pub fn resolve(&self, variable: sat::Variable) -> Option<&str> {
        variable
            .0
            .checked_sub(1)
            .and_then(|i| self.indices.get_index(i))
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventions_for_empty_forms() {
        assert!(CNFFormula::new(vec![]).is_true());
        assert!(CNFFormula::new(vec![Clause::new(vec![])]).is_false());
        assert!(!CNFFormula::new(vec![Clause::new(vec![Literal::positive("p")])]).is_true());
    }

    #[test]
    fn display_matches_set_notation() {
        let cnf = CNFFormula::new(vec![
            Clause::new(vec![Literal::positive("p"), Literal::negative("q")]),
            Clause::new(vec![Literal::positive("r")]),
        ]);
        assert_eq!(cnf.to_string(), "{ { p ~q } { r } }");
    }

    #[test]
    fn index_atoms_uses_first_occurrence_order() {
        let cnf = CNFFormula::new(vec![
            Clause::new(vec![Literal::positive("q"), Literal::negative("p")]),
            Clause::new(vec![Literal::positive("p"), Literal::positive("q")]),
        ]);
        let (indexed, index) = cnf.index_atoms();

        assert_eq!(indexed.num_atoms, 2);
        assert_eq!(index.get("q"), Some(sat::Variable(1)));
        assert_eq!(index.get("p"), Some(sat::Variable(2)));
        assert_eq!(index.resolve(sat::Variable(1)), Some("q"));
        assert_eq!(index.resolve(sat::Variable(3)), None);

        let first: Vec<i64> = indexed.clauses[0].literals().map(|l| l.to_dimacs()).collect();
        assert_eq!(first, vec![1, -2]);
    }
}
