//! Structure-driven evaluation of terms and formulas

use crate::error::{Error, Result};
use crate::fol::formula::{Formula, QuantifierKind};
use crate::fol::structure::{DomainElement, Structure, Valuation};
use crate::fol::term::Term;
use crate::prop::BinaryOp;

/// Evaluate a term to a domain element. Every variable must be
/// covered by the valuation and every function symbol by the
/// structure.
pub fn eval_term(term: &Term, structure: &Structure, valuation: &Valuation) -> Result<DomainElement> {
    match term {
        Term::Variable(name) => valuation
            .get(name)
            .copied()
            .ok_or_else(|| Error::VariableNotValued(name.clone())),
        Term::Function { symbol, args } => {
            check_arity(symbol, structure.signature.functions.get(symbol), args.len())?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_term(arg, structure, valuation)?);
            }
            let function = structure.function(symbol)?;
            Ok(function(&values))
        }
    }
}

/// Evaluate a formula to a truth value. Quantifiers range over the
/// structure's domain in its (deterministic) order.
pub fn evaluate(formula: &Formula, structure: &Structure, valuation: &Valuation) -> Result<bool> {
    match formula {
        Formula::Atom { symbol, args } => {
            check_arity(symbol, structure.signature.relations.get(symbol), args.len())?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_term(arg, structure, valuation)?);
            }
            let relation = structure.relation(symbol)?;
            Ok(relation(&values))
        }
        Formula::Not(sub) => Ok(!evaluate(sub, structure, valuation)?),
        Formula::Binary(op, left, right) => {
            let l = evaluate(left, structure, valuation)?;
            let r = evaluate(right, structure, valuation)?;
            Ok(match op {
                BinaryOp::And => l && r,
                BinaryOp::Or => l || r,
                BinaryOp::Impl => !l || r,
                BinaryOp::Eq => l == r,
            })
        }
        Formula::Quantifier(kind, var, body) => {
            let mut extended = valuation.clone();
            match kind {
                QuantifierKind::All => {
                    for &element in &structure.domain {
                        extended.insert(var.clone(), element);
                        if !evaluate(body, structure, &extended)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                QuantifierKind::Exists => {
                    for &element in &structure.domain {
                        extended.insert(var.clone(), element);
                        if evaluate(body, structure, &extended)? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
            }
        }
    }
}

fn check_arity(symbol: &str, declared: Option<&usize>, found: usize) -> Result<()> {
    match declared {
        Some(&expected) if expected == found => Ok(()),
        Some(&expected) => Err(Error::ArityMismatch {
            symbol: symbol.to_string(),
            expected,
            found,
        }),
        // Let the interpretation lookup report the unknown symbol.
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::structure::Signature;
    use std::collections::BTreeSet;

    /// Arithmetic modulo 4 over {0, 1, 2, 3}.
    pub(crate) fn mod4_structure() -> Structure {
        let mut signature = Signature::new();
        signature.add_function("0", 0);
        signature.add_function("1", 0);
        signature.add_function("+", 2);
        signature.add_function("*", 2);
        signature.add_relation("even", 1);
        signature.add_relation("=", 2);

        let domain: BTreeSet<u32> = [0, 1, 2, 3].into_iter().collect();
        let mut structure = Structure::new(signature, domain);
        structure.set_function("0", |_| 0);
        structure.set_function("1", |_| 1);
        structure.set_function("+", |args| (args[0] + args[1]) % 4);
        structure.set_function("*", |args| (args[0] * args[1]) % 4);
        structure.set_relation("even", |args| args[0] % 2 == 0);
        structure.set_relation("=", |args| args[0] == args[1]);
        structure
    }

    #[test]
    fn terms_evaluate_through_the_structure() {
        let structure = mod4_structure();
        let mut valuation = Valuation::new();
        valuation.insert("x".to_string(), 3);

        let x = Term::variable("x");
        let one = Term::constant("1");
        let sum = Term::function("+", vec![x, one]);
        assert_eq!(eval_term(&sum, &structure, &valuation).unwrap(), 0);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let structure = mod4_structure();
        let valuation = Valuation::new();
        let x = Term::variable("x");
        assert!(matches!(
            eval_term(&x, &structure, &valuation),
            Err(Error::VariableNotValued(name)) if name == "x"
        ));
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let structure = mod4_structure();
        let valuation = Valuation::new();
        let bad = Term::function("+", vec![Term::constant("0")]);
        assert!(matches!(
            eval_term(&bad, &structure, &valuation),
            Err(Error::ArityMismatch { .. })
        ));
    }

    #[test]
    fn unknown_relation_is_an_error() {
        let structure = mod4_structure();
        let valuation = Valuation::new();
        let f = Formula::atom("odd", vec![Term::constant("1")]);
        assert!(matches!(
            evaluate(&f, &structure, &valuation),
            Err(Error::UnknownRelation(symbol)) if symbol == "odd"
        ));
    }

    #[test]
    fn quantifiers_range_over_the_domain() {
        let structure = mod4_structure();
        let valuation = Valuation::new();
        let x = Term::variable("x");
        let even_x = Formula::atom("even", vec![x]);

        // Ex even(x) holds, Ax even(x) does not.
        assert!(evaluate(&Formula::exists("x", even_x.clone()), &structure, &valuation).unwrap());
        assert!(!evaluate(&Formula::all("x", even_x.clone()), &structure, &valuation).unwrap());

        // Ex (even(x) & ~even(x)) is a contradiction.
        let contradiction =
            Formula::exists("x", Formula::and(even_x.clone(), Formula::not(even_x)));
        assert!(!evaluate(&contradiction, &structure, &valuation).unwrap());
    }

    #[test]
    fn equality_is_just_another_relation() {
        let structure = mod4_structure();
        let valuation = Valuation::new();
        // Ax (x = x)
        let x = Term::variable("x");
        let refl = Formula::all("x", Formula::atom("=", vec![x.clone(), x]));
        assert!(evaluate(&refl, &structure, &valuation).unwrap());
    }

    #[test]
    fn free_variables_come_from_the_outer_valuation() {
        let structure = mod4_structure();
        let mut valuation = Valuation::new();
        valuation.insert("y".to_string(), 2);

        // Ex (x = y) with y = 2
        let f = Formula::exists(
            "x",
            Formula::atom("=", vec![Term::variable("x"), Term::variable("y")]),
        );
        assert!(evaluate(&f, &structure, &valuation).unwrap());
    }
}
