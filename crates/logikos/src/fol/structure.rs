//! Signatures and finite L-structures

use crate::error::{Error, Result};
use crate::fol::formula::Formula;
use crate::fol::term::Term;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Declared function and relation symbols with their arities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub functions: IndexMap<String, usize>,
    pub relations: IndexMap<String, usize>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, symbol: impl Into<String>, arity: usize) {
        self.functions.insert(symbol.into(), arity);
    }

    pub fn add_relation(&mut self, symbol: impl Into<String>, arity: usize) {
        self.relations.insert(symbol.into(), arity);
    }

    /// Every function application in the term must use a declared
    /// symbol with matching arity.
    pub fn check_term(&self, term: &Term) -> bool {
        match term {
            Term::Variable(_) => true,
            Term::Function { symbol, args } => {
                self.functions.get(symbol) == Some(&args.len())
                    && args.iter().all(|arg| self.check_term(arg))
            }
        }
    }

    /// Every atom must use a declared relation with matching arity,
    /// and every term under it must check as well.
    pub fn check_formula(&self, formula: &Formula) -> bool {
        match formula {
            Formula::Atom { symbol, args } => {
                self.relations.get(symbol) == Some(&args.len())
                    && args.iter().all(|arg| self.check_term(arg))
            }
            Formula::Not(sub) => self.check_formula(sub),
            Formula::Binary(_, left, right) => {
                self.check_formula(left) && self.check_formula(right)
            }
            Formula::Quantifier(_, _, body) => self.check_formula(body),
        }
    }
}

/// An element of the finite domain.
pub type DomainElement = u32;

/// Interpretation of a function symbol over the domain.
pub type DomainFunction = Box<dyn Fn(&[DomainElement]) -> DomainElement>;

/// Interpretation of a relation symbol over the domain.
pub type DomainRelation = Box<dyn Fn(&[DomainElement]) -> bool>;

/// A first-order valuation: variable names to domain elements.
pub type Valuation = BTreeMap<String, DomainElement>;

/// A finite L-structure: a signature, a domain, and an
/// interpretation for every symbol. The domain is an ordered set so
/// quantifier evaluation is deterministic.
pub struct Structure {
    pub signature: Signature,
    pub domain: BTreeSet<DomainElement>,
    functions: IndexMap<String, DomainFunction>,
    relations: IndexMap<String, DomainRelation>,
}

impl Structure {
    pub fn new(signature: Signature, domain: BTreeSet<DomainElement>) -> Self {
        Structure {
            signature,
            domain,
            functions: IndexMap::new(),
            relations: IndexMap::new(),
        }
    }

    pub fn set_function(
        &mut self,
        symbol: impl Into<String>,
        function: impl Fn(&[DomainElement]) -> DomainElement + 'static,
    ) {
        self.functions.insert(symbol.into(), Box::new(function));
    }

    pub fn set_relation(
        &mut self,
        symbol: impl Into<String>,
        relation: impl Fn(&[DomainElement]) -> bool + 'static,
    ) {
        self.relations.insert(symbol.into(), Box::new(relation));
    }

    pub fn function(&self, symbol: &str) -> Result<&DomainFunction> {
        self.functions
            .get(symbol)
            .ok_or_else(|| Error::UnknownFunction(symbol.to_string()))
    }

    pub fn relation(&self, symbol: &str) -> Result<&DomainRelation> {
        self.relations
            .get(symbol)
            .ok_or_else(|| Error::UnknownRelation(symbol.to_string()))
    }
}

impl std::fmt::Debug for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Structure")
            .field("signature", &self.signature)
            .field("domain", &self.domain)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("relations", &self.relations.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arithmetic_signature() -> Signature {
        let mut signature = Signature::new();
        signature.add_function("0", 0);
        signature.add_function("+", 2);
        signature.add_relation("even", 1);
        signature.add_relation("=", 2);
        signature
    }

    #[test]
    fn term_signature_check() {
        let signature = arithmetic_signature();
        let x = Term::variable("x");
        let zero = Term::constant("0");
        let sum = Term::function("+", vec![x.clone(), zero.clone()]);

        assert!(signature.check_term(&x));
        assert!(signature.check_term(&sum));
        // Wrong arity
        assert!(!signature.check_term(&Term::function("+", vec![zero.clone()])));
        // Undeclared symbol
        assert!(!signature.check_term(&Term::function("-", vec![x, zero])));
    }

    #[test]
    fn formula_signature_check() {
        let signature = arithmetic_signature();
        let x = Term::variable("x");
        let even_x = Formula::atom("even", vec![x.clone()]);

        assert!(signature.check_formula(&even_x));
        assert!(signature.check_formula(&Formula::all("x", Formula::not(even_x.clone()))));
        // Wrong arity on the relation
        assert!(!signature.check_formula(&Formula::atom("even", vec![x.clone(), x.clone()])));
        // Unknown relation
        assert!(!signature.check_formula(&Formula::atom("odd", vec![x.clone()])));
        // Bad term nested under a fine relation
        let bad = Formula::atom("even", vec![Term::function("-", vec![x])]);
        assert!(!signature.check_formula(&bad));
    }
}
