//! Valuations, truth tables, and brute-force satisfiability

use crate::error::{Error, Result};
use crate::prop::formula::Formula;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A finite mapping from atom names to truth values, ordered by name.
///
/// The name order is what makes [`Valuation::next`] enumerate all
/// 2^n assignments exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    values: BTreeMap<String, bool>,
}

impl Valuation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The all-false valuation over the given atoms, the starting
    /// point of the enumeration.
    pub fn all_false(atoms: &BTreeSet<String>) -> Self {
        Valuation {
            values: atoms.iter().map(|name| (name.clone(), false)).collect(),
        }
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, bool)>) -> Self {
        Valuation {
            values: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Value of an atom; absent atoms are an error, never a default.
    pub fn get(&self, atom: &str) -> Result<bool> {
        self.values
            .get(atom)
            .copied()
            .ok_or_else(|| Error::AtomNotValued(atom.to_string()))
    }

    pub fn set(&mut self, atom: impl Into<String>, value: bool) {
        self.values.insert(atom.into(), value);
    }

    pub fn contains(&self, atom: &str) -> bool {
        self.values.contains_key(atom)
    }

    pub fn atoms(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Advance to the next assignment, treating the valuation as a
    /// binary counter over the sorted atom names: atoms that are true
    /// flip to false from the low end, then the first false atom
    /// flips to true. Returns false once every assignment has been
    /// produced.
    pub fn next(&mut self) -> bool {
        for value in self.values.values_mut() {
            if *value {
                *value = false;
            } else {
                *value = true;
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (atom, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", atom, if *value { "T" } else { "F" })?;
        }
        Ok(())
    }
}

/// The full truth table of a formula over its atoms.
#[derive(Debug, Clone)]
pub struct TruthTable {
    atoms: Vec<String>,
    rows: Vec<(Vec<bool>, bool)>,
}

impl TruthTable {
    pub fn build(formula: &Formula) -> Result<TruthTable> {
        let atom_set = formula.atoms();
        let mut valuation = Valuation::all_false(&atom_set);
        let atoms: Vec<String> = atom_set.into_iter().collect();

        let mut rows = Vec::new();
        loop {
            let row: Vec<bool> = atoms
                .iter()
                .map(|atom| valuation.get(atom))
                .collect::<Result<_>>()?;
            rows.push((row, formula.evaluate(&valuation)?));
            if !valuation.next() {
                break;
            }
        }
        Ok(TruthTable { atoms, rows })
    }

    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    pub fn rows(&self) -> &[(Vec<bool>, bool)] {
        &self.rows
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} |", self.atoms.join(" "))?;
        for (values, result) in &self.rows {
            for value in values {
                write!(f, "{} ", if *value { "T" } else { "F" })?;
            }
            writeln!(f, "| {}", if *result { "T" } else { "F" })?;
        }
        Ok(())
    }
}

/// Brute-force satisfiability: enumerate every valuation over the
/// formula's atoms and return the first satisfying one.
pub fn is_satisfiable(formula: &Formula) -> Result<Option<Valuation>> {
    let mut valuation = Valuation::all_false(&formula.atoms());
    loop {
        if formula.evaluate(&valuation)? {
            return Ok(Some(valuation));
        }
        if !valuation.next() {
            return Ok(None);
        }
    }
}
