//! First-order formulas

use crate::fol::term::TermRef;
use crate::prop::BinaryOp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Quantifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantifierKind {
    All,
    Exists,
}

/// Shared handle to a formula node.
pub type FormulaRef = Rc<Formula>;

/// A first-order formula over relation applications, the four binary
/// connectives, and quantifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Atom { symbol: String, args: Vec<TermRef> },
    Not(FormulaRef),
    Binary(BinaryOp, FormulaRef, FormulaRef),
    Quantifier(QuantifierKind, String, FormulaRef),
}

impl Formula {
    pub fn atom(symbol: impl Into<String>, args: Vec<TermRef>) -> FormulaRef {
        Rc::new(Formula::Atom {
            symbol: symbol.into(),
            args,
        })
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

    pub fn quantifier(kind: QuantifierKind, var: impl Into<String>, body: FormulaRef) -> FormulaRef {
        Rc::new(Formula::Quantifier(kind, var.into(), body))
    }

    pub fn all(var: impl Into<String>, body: FormulaRef) -> FormulaRef {
        Self::quantifier(QuantifierKind::All, var, body)
    }

    pub fn exists(var: impl Into<String>, body: FormulaRef) -> FormulaRef {
        Self::quantifier(QuantifierKind::Exists, var, body)
    }

    /// Variable names occurring in the formula. With `include_bound`
    /// every occurrence counts; without it only free occurrences do.
    pub fn variables(&self, include_bound: bool) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars, include_bound);
        vars
    }

    /// Accumulating variant of [`Formula::variables`].
    ///
    /// In free-only mode a quantifier removes its own variable from
    /// the set after the body is processed, unless that variable was
    /// already free before entering the quantifier.
    pub fn collect_variables(&self, vars: &mut BTreeSet<String>, include_bound: bool) {
        match self {
            Formula::Atom { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
            Formula::Not(sub) => sub.collect_variables(vars, include_bound),
            Formula::Binary(_, left, right) => {
                left.collect_variables(vars, include_bound);
                right.collect_variables(vars, include_bound);
            }
            Formula::Quantifier(_, var, body) => {
                if include_bound {
                    body.collect_variables(vars, include_bound);
                    vars.insert(var.clone());
                } else {
                    let was_free = vars.contains(var);
                    body.collect_variables(vars, include_bound);
                    if !was_free {
                        vars.remove(var);
                    }
                }
            }
        }
    }

    pub fn free_variables(&self) -> BTreeSet<String> {
        self.variables(false)
    }

    pub fn contains_variable(&self, name: &str, include_bound: bool) -> bool {
        self.variables(include_bound).contains(name)
    }

    /// A sentence: no free variables.
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom { symbol, args } => {
                write!(f, "{}", symbol)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Formula::Not(sub) => write!(f, "~{}", sub),
            Formula::Binary(op, left, right) => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Formula::Quantifier(kind, var, body) => {
                let letter = match kind {
                    QuantifierKind::All => "A",
                    QuantifierKind::Exists => "E",
                };
                write!(f, "{}{} {}", letter, var, body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::term::Term;

    fn p_of(var: &str) -> FormulaRef {
        Formula::atom("P", vec![Term::variable(var)])
    }

    #[test]
    fn display_follows_the_grammar() {
        let x = Term::variable("x");
        let even_x = Formula::atom("even", vec![x]);
        let f = Formula::exists("x", Formula::and(even_x.clone(), Formula::not(even_x)));
        assert_eq!(f.to_string(), "Ex (even(x) & ~even(x))");
    }

    #[test]
    fn free_variables_exclude_bound_occurrences() {
        // Ex Q(x, y): x bound, y free
        let q = Formula::atom("Q", vec![Term::variable("x"), Term::variable("y")]);
        let f = Formula::exists("x", q);
        let free: Vec<_> = f.free_variables().into_iter().collect();
        assert_eq!(free, vec!["y"]);

        let all: Vec<_> = f.variables(true).into_iter().collect();
        assert_eq!(all, vec!["x", "y"]);
    }

    #[test]
    fn free_occurrence_outside_quantifier_survives() {
        // P(x) & Ex Q(x): the x in P(x) is free, the one under E is not.
        let q = Formula::atom("Q", vec![Term::variable("x")]);
        let f = Formula::and(p_of("x"), Formula::exists("x", q));
        let free: Vec<_> = f.free_variables().into_iter().collect();
        assert_eq!(free, vec!["x"]);
    }

    #[test]
    fn closed_formula_detection() {
        let f = Formula::all("x", p_of("x"));
        assert!(f.is_closed());
        assert!(!p_of("x").is_closed());
    }
}
