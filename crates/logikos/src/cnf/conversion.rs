//! Distributive CNF over formulas in negation normal form

use crate::cnf::{CNFFormula, Clause, Literal};
use crate::error::{Error, Result};
use crate::prop::{BinaryOp, Formula};

/// Convert an NNF formula to CNF by distributing `Or` over `And`.
///
/// The input must contain only constants, literals, `And`, and `Or`;
/// anything else means the caller skipped [`crate::prop::nnf`] and is
/// reported as an invariant violation.
pub fn from_nnf(formula: &Formula) -> Result<CNFFormula> {
    match formula {
        Formula::True => Ok(CNFFormula::new(vec![])),
        Formula::False => Ok(CNFFormula::new(vec![Clause::new(vec![])])),
        Formula::Atom(name) => Ok(CNFFormula::new(vec![Clause::new(vec![
            Literal::positive(name),
        ])])),
        Formula::Not(sub) => match sub.as_ref() {
            Formula::Atom(name) => Ok(CNFFormula::new(vec![Clause::new(vec![
                Literal::negative(name),
            ])])),
            _ => Err(Error::NotInNnf(formula.to_string())),
        },
        Formula::Binary(BinaryOp::And, left, right) => {
            let mut cnf = from_nnf(left)?;
            cnf.clauses.extend(from_nnf(right)?.clauses);
            Ok(cnf)
        }
        Formula::Binary(BinaryOp::Or, left, right) => {
            Ok(cross(&from_nnf(left)?, &from_nnf(right)?))
        }
        Formula::Binary(_, _, _) => Err(Error::NotInNnf(formula.to_string())),
    }
}

/// Cross-product of two clause lists: every clause of `left` unioned
/// with every clause of `right`.
fn cross(left: &CNFFormula, right: &CNFFormula) -> CNFFormula {
    let mut clauses = Vec::with_capacity(left.clauses.len() * right.clauses.len());
    for lc in &left.clauses {
        for rc in &right.clauses {
            let mut literals = lc.literals.clone();
            literals.extend(rc.literals.iter().cloned());
            clauses.push(Clause::new(literals));
        }
    }
    CNFFormula::new(clauses)
}
