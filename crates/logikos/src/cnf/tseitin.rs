//! Tseitin transformation to equisatisfiable CNF
//!
//! Each connective gets a fresh defining atom; the result grows
//! linearly with the formula instead of exploding under distribution.
//! The output is equisatisfiable with the input, not equivalent.

use crate::cnf::{CNFFormula, Clause, Literal};
use crate::prop::{BinaryOp, Formula};
use std::collections::BTreeSet;

/// Generator of auxiliary atom names `s1, s2, …` that skips names
/// already used by the input formula.
struct FreshAtoms {
    counter: usize,
    taken: BTreeSet<String>,
}

impl FreshAtoms {
    fn new(formula: &Formula) -> Self {
        FreshAtoms {
            counter: 0,
            taken: formula.atoms(),
        }
    }

    fn next(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("s{}", self.counter);
            if !self.taken.contains(&name) {
                return name;
            }
        }
    }
}

/// Encode a formula as an equisatisfiable CNF with one auxiliary atom
/// per subformula, closed by a unit clause asserting the root.
pub fn tseitin(formula: &Formula) -> CNFFormula {
    let mut cnf = CNFFormula::default();
    let mut fresh = FreshAtoms::new(formula);
    let root = encode(formula, &mut fresh, &mut cnf);
    cnf.clauses.push(Clause::new(vec![Literal::positive(root)]));
    cnf
}

/// Emit the defining clauses for one node and return its name.
/// Atoms name themselves; every other node gets a fresh auxiliary.
fn encode(formula: &Formula, fresh: &mut FreshAtoms, cnf: &mut CNFFormula) -> String {
    match formula {
        Formula::False => {
            let s = fresh.next();
            cnf.clauses.push(Clause::new(vec![Literal::negative(&s)]));
            s
        }
        Formula::True => {
            let s = fresh.next();
            cnf.clauses.push(Clause::new(vec![Literal::positive(&s)]));
            s
        }
        Formula::Atom(name) => name.clone(),
        Formula::Not(sub) => {
            let l = encode(sub, fresh, cnf);
            let s = fresh.next();
            cnf.clauses.push(Clause::new(vec![
                Literal::negative(&s),
                Literal::negative(&l),
            ]));
            cnf.clauses.push(Clause::new(vec![
                Literal::positive(&s),
                Literal::positive(&l),
            ]));
            s
        }
        Formula::Binary(op, left, right) => {
            let l = encode(left, fresh, cnf);
            let r = encode(right, fresh, cnf);
            let s = fresh.next();
            let defining = match op {
                // s <-> (l & r)
                BinaryOp::And => vec![
                    vec![Literal::negative(&s), Literal::positive(&l)],
                    vec![Literal::negative(&s), Literal::positive(&r)],
                    vec![
                        Literal::positive(&s),
                        Literal::negative(&l),
                        Literal::negative(&r),
                    ],
                ],
                // s <-> (l | r)
                BinaryOp::Or => vec![
                    vec![Literal::positive(&s), Literal::negative(&l)],
                    vec![Literal::positive(&s), Literal::negative(&r)],
                    vec![
                        Literal::negative(&s),
                        Literal::positive(&l),
                        Literal::positive(&r),
                    ],
                ],
                // s <-> (l -> r)
                BinaryOp::Impl => vec![
                    vec![
                        Literal::negative(&s),
                        Literal::negative(&l),
                        Literal::positive(&r),
                    ],
                    vec![Literal::positive(&s), Literal::positive(&l)],
                    vec![Literal::positive(&s), Literal::negative(&r)],
                ],
                // s <-> (l <-> r)
                BinaryOp::Eq => vec![
                    vec![
                        Literal::negative(&s),
                        Literal::negative(&l),
                        Literal::positive(&r),
                    ],
                    vec![
                        Literal::negative(&s),
                        Literal::positive(&l),
                        Literal::negative(&r),
                    ],
                    vec![
                        Literal::positive(&s),
                        Literal::positive(&l),
                        Literal::positive(&r),
                    ],
                    vec![
                        Literal::positive(&s),
                        Literal::negative(&l),
                        Literal::negative(&r),
                    ],
                ],
            };
            cnf.clauses.extend(defining.into_iter().map(Clause::new));
            s
        }
    }
}
