//! The DPLL search loop over a partial valuation

use crate::sat::{Clause, Cnf, Literal, Model, SatResult, Variable};
use log::trace;
use std::fmt::Write as _;

/// Assignment state of one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assignment {
    True,
    False,
    Undecided,
}

/// One assigned literal on the trail. Decision entries mark the
/// points backtracking returns to.
#[derive(Debug, Clone, Copy)]
struct TrailEntry {
    literal: Literal,
    decision: bool,
}

/// Backtracking SAT solver: decide, propagate units, and on conflict
/// retract to the most recent decision and flip it.
pub struct Solver {
    cnf: Cnf,
    trail: Vec<TrailEntry>,
    assignment: Vec<Assignment>,
}

impl Solver {
    pub fn new(cnf: Cnf) -> Self {
        let assignment = vec![Assignment::Undecided; cnf.num_atoms + 1];
        Solver {
            cnf,
            trail: Vec::new(),
            assignment,
        }
    }

    /// Run the search to completion.
    ///
    /// Conflict resolution takes precedence over unit propagation,
    /// which takes precedence over fresh decisions. The loop ends
    /// when no atom is left to decide (a total model) or when a
    /// conflict occurs with no decision left to flip.
    pub fn solve(&mut self) -> SatResult {
        loop {
            if self.has_conflict() {
                match self.backtrack() {
                    None => return SatResult::Unsatisfiable,
                    // Flip the failed decision; the flipped literal is
                    // not itself a decision, so a later conflict
                    // backtracks past it.
                    Some(decision) => self.push(decision.negated(), false),
                }
            } else if let Some(unit) = self.unit_literal() {
                self.push(unit, false);
            } else if let Some(decision) = self.next_decision() {
                self.push(decision, true);
            } else {
                return SatResult::Satisfiable(self.model());
            }
        }
    }

    /// Value of a literal under the current partial assignment.
    fn value_of(&self, literal: &Literal) -> Assignment {
        match self.assignment[literal.index()] {
            Assignment::Undecided => Assignment::Undecided,
            Assignment::True => {
                if literal.is_positive() {
                    Assignment::True
                } else {
                    Assignment::False
                }
            }
            Assignment::False => {
                if literal.is_positive() {
                    Assignment::False
                } else {
                    Assignment::True
                }
            }
        }
    }

    fn push(&mut self, literal: Literal, decision: bool) {
        trace!(
            "{} {} (trail: {})",
            if decision { "decide" } else { "propagate" },
            literal,
            self.trail_string()
        );
        self.trail.push(TrailEntry { literal, decision });
        self.assignment[literal.index()] = if literal.is_positive() {
            Assignment::True
        } else {
            Assignment::False
        };
    }

    /// Pop the trail back to the most recent decision, erasing
    /// assignments on the way, and return that decision literal.
    /// `None` means the trail held no decision left to flip.
    fn backtrack(&mut self) -> Option<Literal> {
        while let Some(entry) = self.trail.pop() {
            self.assignment[entry.literal.index()] = Assignment::Undecided;
            if entry.decision {
                trace!("backtrack past {}", entry.literal);
                return Some(entry.literal);
            }
        }
        None
    }

    /// A clause conflicts when every literal is assigned false.
    fn clause_conflicts(&self, clause: &Clause) -> bool {
        clause
            .literals()
            .all(|literal| self.value_of(literal) == Assignment::False)
    }

    fn has_conflict(&self) -> bool {
        self.cnf
            .clauses
            .iter()
            .any(|clause| self.clause_conflicts(clause))
    }

    /// First clause, in insertion order, with exactly one unassigned
    /// literal and all others false; that literal is forced.
    fn unit_literal(&self) -> Option<Literal> {
        'clauses: for clause in &self.cnf.clauses {
            let mut unit = None;
            for literal in clause.literals() {
                match self.value_of(literal) {
                    Assignment::True => continue 'clauses,
                    Assignment::False => {}
                    Assignment::Undecided => {
                        if unit.is_some() {
                            continue 'clauses;
                        }
                        unit = Some(*literal);
                    }
                }
            }
            if unit.is_some() {
                return unit;
            }
        }
        None
    }

    /// Smallest unassigned atom, tried positive first.
    fn next_decision(&self) -> Option<Literal> {
        (1..=self.cnf.num_atoms)
            .find(|&atom| self.assignment[atom] == Assignment::Undecided)
            .map(|atom| Literal::Positive(Variable(atom)))
    }

    /// Total assignment; only valid once no atom is undecided.
    fn model(&self) -> Model {
        Model::new(
            (1..=self.cnf.num_atoms)
                .map(|atom| self.assignment[atom] == Assignment::True)
                .collect(),
        )
    }

    /// Trail rendered with a `|` before each decision.
    fn trail_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.trail {
            if entry.decision {
                out.push_str("| ");
            }
            let _ = write!(out, "{} ", entry.literal);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(literals: &[i64]) -> Clause {
        Clause::new(
            literals
                .iter()
                .map(|&value| Literal::from_dimacs(value).expect("nonzero literal")),
        )
    }

    fn solve(num_atoms: usize, clauses: &[&[i64]]) -> SatResult {
        let cnf = Cnf::new(num_atoms, clauses.iter().map(|c| clause(c)).collect());
        Solver::new(cnf).solve()
    }

    #[test]
    fn empty_cnf_is_satisfiable() {
        assert!(solve(0, &[]).is_sat());
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        assert_eq!(solve(0, &[&[]]), SatResult::Unsatisfiable);
    }

    #[test]
    fn propagation_alone_solves_chains() {
        let result = solve(2, &[&[1, 2], &[-1]]);
        let model = result.model().expect("satisfiable");
        assert_eq!(model.value(Variable(1)), Some(false));
        assert_eq!(model.value(Variable(2)), Some(true));
    }

    #[test]
    fn propagation_finds_unsatisfiable_core() {
        assert_eq!(solve(2, &[&[1, 2], &[-1], &[-2]]), SatResult::Unsatisfiable);
    }

    #[test]
    fn decisions_prefer_smallest_atom_positive() {
        let result = solve(2, &[&[1, 2]]);
        let model = result.model().expect("satisfiable");
        assert_eq!(model.value(Variable(1)), Some(true));
        assert_eq!(model.value(Variable(2)), Some(true));
    }

    #[test]
    fn conflict_flips_the_failed_decision() {
        // Deciding 1=T forces 2=T (first clause) and conflicts with
        // the last clause, so the solver must flip to 1=F.
        let result = solve(3, &[&[-1, 2], &[-1, 3], &[-2, -3]]);
        let model = result.model().expect("satisfiable");
        assert_eq!(model.value(Variable(1)), Some(false));
    }

    #[test]
    fn backtracking_explores_both_polarities() {
        let clauses: &[&[i64]] = &[&[1, 2, 3], &[-1, -2, 3], &[-2, -3], &[-1, -3]];
        let result = solve(3, clauses);
        let model = result.model().expect("satisfiable");

        let cnf = Cnf::new(3, clauses.iter().map(|c| clause(c)).collect());
        assert!(model.satisfies(&cnf));
    }

    #[test]
    fn full_contradiction_over_two_atoms() {
        assert_eq!(
            solve(2, &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]),
            SatResult::Unsatisfiable
        );
    }

    #[test]
    fn model_is_total() {
        // Atom 3 appears in no clause but still gets a value.
        let result = solve(3, &[&[1], &[2]]);
        let model = result.model().expect("satisfiable");
        assert_eq!(model.num_atoms(), 3);
        assert!(model.value(Variable(3)).is_some());
    }
}
