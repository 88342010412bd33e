//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a term node.
pub type TermRef = Rc<Term>;

/// A term: a variable or a function symbol applied to arguments.
/// Constants are functions of arity zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Function { symbol: String, args: Vec<TermRef> },
}

impl Term {
    pub fn variable(name: impl Into<String>) -> TermRef {
        Rc::new(Term::Variable(name.into()))
    }

    pub fn function(symbol: impl Into<String>, args: Vec<TermRef>) -> TermRef {
        Rc::new(Term::Function {
            symbol: symbol.into(),
            args,
        })
    }

    pub fn constant(symbol: impl Into<String>) -> TermRef {
        Self::function(symbol, vec![])
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Names of all variables occurring in the term.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    pub fn collect_variables(&self, vars: &mut BTreeSet<String>) {
        match self {
            Term::Variable(name) => {
                vars.insert(name.clone());
            }
            Term::Function { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Term::Variable(variable) => variable == name,
            Term::Function { args, .. } => args.iter().any(|arg| arg.contains_variable(name)),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{}", name),
            Term::Function { symbol, args } => {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_terms() {
        let x = Term::variable("x");
        let one = Term::constant("1");
        let plus = Term::function("+", vec![x.clone(), one]);
        assert_eq!(x.to_string(), "x");
        assert_eq!(plus.to_string(), "+(x,1)");
        assert_eq!(Term::constant("0").to_string(), "0");
    }

    #[test]
    fn variable_collection() {
        let term = Term::function(
            "f",
            vec![
                Term::variable("x"),
                Term::function("g", vec![Term::variable("y"), Term::constant("c")]),
            ],
        );
        let vars: Vec<_> = term.variables().into_iter().collect();
        assert_eq!(vars, vec!["x", "y"]);
        assert!(term.contains_variable("y"));
        assert!(!term.contains_variable("c"));
    }
}
