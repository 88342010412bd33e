//! Formula transformations: substitution, simplification, and
//! negation normal form

use crate::prop::formula::{BinaryOp, Formula, FormulaRef};

/// Replace every subtree structurally equal to `what` by `with`.
///
/// The outermost match wins and the replacement is not re-applied
/// inside the substituted subtree.
pub fn substitute(formula: &FormulaRef, what: &FormulaRef, with: &FormulaRef) -> FormulaRef {
    if formula == what {
        return with.clone();
    }
    match formula.as_ref() {
        Formula::False | Formula::True | Formula::Atom(_) => formula.clone(),
        Formula::Not(sub) => Formula::not(substitute(sub, what, with)),
        Formula::Binary(op, left, right) => Formula::binary(
            *op,
            substitute(left, what, with),
            substitute(right, what, with),
        ),
    }
}

/// Remove constant subformulas bottom-up.
///
/// The result contains `T`/`F` only if the whole formula reduced to a
/// constant. No simplification beyond constant laws is attempted.
pub fn simplify(formula: &FormulaRef) -> FormulaRef {
    match formula.as_ref() {
        Formula::False | Formula::True | Formula::Atom(_) => formula.clone(),
        Formula::Not(sub) => {
            let s = simplify(sub);
            if s.is_true() {
                Formula::falsum()
            } else if s.is_false() {
                Formula::verum()
            } else {
                Formula::not(s)
            }
        }
        Formula::Binary(op, left, right) => {
            let l = simplify(left);
            let r = simplify(right);
            simplify_binary(*op, l, r)
        }
    }
}

fn simplify_binary(op: BinaryOp, l: FormulaRef, r: FormulaRef) -> FormulaRef {
    match op {
        BinaryOp::And => {
            if l.is_false() || r.is_false() {
                Formula::falsum()
            } else if l.is_true() {
                r
            } else if r.is_true() {
                l
            } else {
                Formula::and(l, r)
            }
        }
        BinaryOp::Or => {
            if l.is_true() || r.is_true() {
                Formula::verum()
            } else if l.is_false() {
                r
            } else if r.is_false() {
                l
            } else {
                Formula::or(l, r)
            }
        }
        BinaryOp::Impl => {
            if l.is_false() || r.is_true() {
                Formula::verum()
            } else if l.is_true() {
                r
            } else if r.is_false() {
                Formula::not(l)
            } else {
                Formula::implies(l, r)
            }
        }
        BinaryOp::Eq => {
            if l.is_true() {
                r
            } else if r.is_true() {
                l
            } else if l.is_false() && r.is_false() {
                Formula::verum()
            } else if l.is_false() {
                Formula::not(r)
            } else if r.is_false() {
                Formula::not(l)
            } else {
                Formula::iff(l, r)
            }
        }
    }
}

/// Negation normal form: only `And`, `Or`, literals, and constants
/// survive. Mutually recursive with [`nnf_not`], which computes the
/// normal form of the negation.
pub fn nnf(formula: &FormulaRef) -> FormulaRef {
    match formula.as_ref() {
        Formula::False | Formula::True | Formula::Atom(_) => formula.clone(),
        Formula::Not(sub) => nnf_not(sub),
        Formula::Binary(BinaryOp::And, left, right) => Formula::and(nnf(left), nnf(right)),
        Formula::Binary(BinaryOp::Or, left, right) => Formula::or(nnf(left), nnf(right)),
        Formula::Binary(BinaryOp::Impl, left, right) => Formula::or(nnf_not(left), nnf(right)),
        Formula::Binary(BinaryOp::Eq, left, right) => Formula::and(
            Formula::or(nnf_not(left), nnf(right)),
            Formula::or(nnf(left), nnf_not(right)),
        ),
    }
}

/// Negation normal form of `~formula`.
pub fn nnf_not(formula: &FormulaRef) -> FormulaRef {
    match formula.as_ref() {
        Formula::False => Formula::verum(),
        Formula::True => Formula::falsum(),
        Formula::Atom(_) => Formula::not(formula.clone()),
        Formula::Not(sub) => nnf(sub),
        Formula::Binary(BinaryOp::And, left, right) => {
            Formula::or(nnf_not(left), nnf_not(right))
        }
        Formula::Binary(BinaryOp::Or, left, right) => {
            Formula::and(nnf_not(left), nnf_not(right))
        }
        Formula::Binary(BinaryOp::Impl, left, right) => Formula::and(nnf(left), nnf_not(right)),
        Formula::Binary(BinaryOp::Eq, left, right) => Formula::or(
            Formula::and(nnf(left), nnf_not(right)),
            Formula::and(nnf_not(left), nnf(right)),
        ),
    }
}
