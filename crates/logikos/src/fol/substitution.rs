//! Capture-avoiding substitution of terms for variables

use crate::fol::formula::{Formula, FormulaRef};
use crate::fol::term::{Term, TermRef};
use std::collections::BTreeSet;

/// Generator of fresh variable names `u1, u2, …` skipping a set of
/// taken names. One generator serves one substitution pass.
#[derive(Debug, Clone)]
pub struct FreshVarGen {
    counter: usize,
    taken: BTreeSet<String>,
}

impl FreshVarGen {
    pub fn new(taken: BTreeSet<String>) -> Self {
        FreshVarGen { counter: 0, taken }
    }

    /// Avoid every variable of `formula` (bound or free) and of `term`.
    pub fn avoiding(formula: &Formula, term: &Term) -> Self {
        let mut taken = formula.variables(true);
        term.collect_variables(&mut taken);
        Self::new(taken)
    }

    pub fn next(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("u{}", self.counter);
            if !self.taken.contains(&name) {
                return name;
            }
        }
    }
}

/// Replace every occurrence of the variable in a term.
pub fn substitute_term(term: &TermRef, var: &str, replacement: &TermRef) -> TermRef {
    match term.as_ref() {
        Term::Variable(name) => {
            if name == var {
                replacement.clone()
            } else {
                term.clone()
            }
        }
        Term::Function { symbol, args } => Term::function(
            symbol.clone(),
            args.iter()
                .map(|arg| substitute_term(arg, var, replacement))
                .collect(),
        ),
    }
}

/// Replace free occurrences of `var` by `replacement`.
///
/// A quantifier binding `var` shields its body. A quantifier whose
/// bound variable occurs in `replacement` would capture it, so the
/// bound variable is α-renamed to a fresh name first.
pub fn substitute(formula: &FormulaRef, var: &str, replacement: &TermRef) -> FormulaRef {
    match formula.as_ref() {
        Formula::Atom { symbol, args } => Formula::atom(
            symbol.clone(),
            args.iter()
                .map(|arg| substitute_term(arg, var, replacement))
                .collect(),
        ),
        Formula::Not(sub) => Formula::not(substitute(sub, var, replacement)),
        Formula::Binary(op, left, right) => Formula::binary(
            *op,
            substitute(left, var, replacement),
            substitute(right, var, replacement),
        ),
        Formula::Quantifier(kind, bound, body) => {
            if bound == var {
                return formula.clone();
            }
            if replacement.contains_variable(bound) {
                let mut fresh = FreshVarGen::avoiding(formula, replacement);
                let renamed_var = fresh.next();
                let renamed_body = substitute(body, bound, &Term::variable(renamed_var.clone()));
                Formula::quantifier(
                    *kind,
                    renamed_var,
                    substitute(&renamed_body, var, replacement),
                )
            } else {
                Formula::quantifier(*kind, bound.clone(), substitute(body, var, replacement))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_substitution_recurses_into_functions() {
        let x = Term::variable("x");
        let y = Term::variable("y");
        let f_x = Term::function("f", vec![x.clone(), Term::function("g", vec![x.clone()])]);
        let result = substitute_term(&f_x, "x", &y);
        assert_eq!(result.to_string(), "f(y,g(y))");
    }

    #[test]
    fn quantifier_over_the_substituted_variable_shields_it() {
        // (Ax P(x))[x -> f(y)] = Ax P(x)
        let p_x = Formula::atom("P", vec![Term::variable("x")]);
        let f = Formula::all("x", p_x);
        let replacement = Term::function("f", vec![Term::variable("y")]);
        let result = substitute(&f, "x", &replacement);
        assert_eq!(result, f);
    }

    #[test]
    fn capture_triggers_alpha_renaming() {
        // (Ay P(x, y))[x -> f(y)] must rename the bound y first:
        // Au1 P(f(y), u1)
        let p = Formula::atom("P", vec![Term::variable("x"), Term::variable("y")]);
        let f = Formula::all("y", p);
        let replacement = Term::function("f", vec![Term::variable("y")]);
        let result = substitute(&f, "x", &replacement);
        assert_eq!(result.to_string(), "Au1 P(f(y),u1)");
    }

    #[test]
    fn no_capture_means_no_renaming() {
        // (Az P(x, z))[x -> f(y)] = Az P(f(y), z)
        let p = Formula::atom("P", vec![Term::variable("x"), Term::variable("z")]);
        let f = Formula::all("z", p);
        let replacement = Term::function("f", vec![Term::variable("y")]);
        let result = substitute(&f, "x", &replacement);
        assert_eq!(result.to_string(), "Az P(f(y),z)");
    }

    #[test]
    fn fresh_names_skip_occupied_ones() {
        // The formula already mentions u1, so the renamed variable
        // must move on to u2.
        let p = Formula::atom(
            "P",
            vec![
                Term::variable("x"),
                Term::variable("y"),
                Term::variable("u1"),
            ],
        );
        let f = Formula::all("y", p);
        let replacement = Term::function("f", vec![Term::variable("y")]);
        let result = substitute(&f, "x", &replacement);
        assert_eq!(result.to_string(), "Au2 P(f(y),u2,u1)");
    }

    #[test]
    fn free_occurrences_only() {
        // (P(x) & Ax Q(x))[x -> c]: the free x is replaced, the
        // bound one stays.
        let f = Formula::and(
            Formula::atom("P", vec![Term::variable("x")]),
            Formula::all("x", Formula::atom("Q", vec![Term::variable("x")])),
        );
        let c = Term::constant("c");
        let result = substitute(&f, "x", &c);
        assert_eq!(result.to_string(), "(P(c) & Ax Q(x))");
    }
}
