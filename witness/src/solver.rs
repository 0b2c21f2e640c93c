//! The solve procedure.
//!
//! Two phases over the constraint list, no loops back: every constraint in
//! the computational prefix computes at most one unknown wire and is then
//! re-checked, and every constraint in the assertion suffix is only
//! checked. The constraint order was fixed by the builder; a constraint
//! whose unknown cannot be determined yet relies on a later constraint to
//! pin it.

use ark_ff::{BigInteger, One, PrimeField, Zero};
use rustc_hash::FxHashMap;

use constraints::{Constraint, ConstraintSystem, SolveMethod, Term, ONE_WIRE};

use crate::error::SolveError;
use crate::logs;

/// Name→value map for the system's declared secret and public inputs.
pub type Assignment<F> = FxHashMap<String, F>;

// ============================================================================
// Entry points
// ============================================================================

/// Solve the system against `assignment`, filling the caller's buffers.
///
/// `a`, `b`, `c` receive each constraint's evaluated L, R, O values and
/// must be sized to the constraint count; `wire_values` must be sized to
/// the wire count. On success every wire value is filled in and every
/// constraint satisfies `a[i] * b[i] == c[i]`.
pub fn solve<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    assignment: &Assignment<F>,
    a: &mut [F],
    b: &mut [F],
    c: &mut [F],
    wire_values: &mut [F],
) -> Result<(), SolveError> {
    let n = cs.nb_constraints();
    if a.len() != n || b.len() != n || c.len() != n || wire_values.len() != cs.nb_wires {
        return Err(SolveError::InvalidInputSize);
    }

    // which wires hold a value yet
    let mut instantiated = vec![false; cs.nb_wires];

    instantiate_inputs(
        cs.secret_offset(),
        &cs.secret_names,
        assignment,
        wire_values,
        &mut instantiated,
    )?;
    instantiate_inputs(
        cs.public_offset(),
        &cs.public_names,
        assignment,
        wire_values,
        &mut instantiated,
    )?;

    // logs resolve against final wire values, on the success path and on
    // the unsatisfied-assertion path alike
    let result = run_constraints(cs, a, b, c, wire_values, &mut instantiated);
    logs::emit_logs(cs, wire_values, &instantiated);
    result
}

/// Convenience wrapper around [`solve`] that allocates the working buffers
/// itself and discards them.
pub fn is_solved<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    assignment: &Assignment<F>,
) -> Result<(), SolveError> {
    let n = cs.nb_constraints();
    let mut a = vec![F::zero(); n];
    let mut b = vec![F::zero(); n];
    let mut c = vec![F::zero(); n];
    let mut wire_values = vec![F::zero(); cs.nb_wires];
    solve(cs, assignment, &mut a, &mut b, &mut c, &mut wire_values)
}

// ============================================================================
// Input phase
// ============================================================================

/// Write each named input's value at its partition offset. The reserved
/// constant-one wire is assigned directly, without a map lookup.
fn instantiate_inputs<F: PrimeField>(
    offset: usize,
    names: &[String],
    assignment: &Assignment<F>,
    wire_values: &mut [F],
    instantiated: &mut [bool],
) -> Result<(), SolveError> {
    for (i, name) in names.iter().enumerate() {
        if name == ONE_WIRE {
            wire_values[offset + i] = F::one();
            instantiated[offset + i] = true;
        } else {
            match assignment.get(name) {
                Some(value) => {
                    wire_values[offset + i] = *value;
                    instantiated[offset + i] = true;
                }
                None => return Err(SolveError::InputNotSet(name.clone())),
            }
        }
    }
    Ok(())
}

// ============================================================================
// Constraint phases
// ============================================================================

fn run_constraints<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    a: &mut [F],
    b: &mut [F],
    c: &mut [F],
    wire_values: &mut [F],
    instantiated: &mut [bool],
) -> Result<(), SolveError> {
    // computational prefix: solve, then re-check. A mismatch here means
    // the builder's topological order was wrong, not that the witness is
    // bad, so it is not a recoverable error.
    for i in 0..cs.nb_computational {
        let constraint = &cs.constraints[i];
        solve_constraint(cs, constraint, wire_values, instantiated);

        let (va, vb, vc) = evaluate(cs, constraint, wire_values);
        a[i] = va;
        b[i] = vb;
        c[i] = vc;
        if va * vb != vc {
            panic!("error solving constraint {i}: {va} * {vb} != {vc}");
        }
    }

    // assertion suffix: every wire is known by now; only check
    for i in cs.nb_computational..cs.nb_constraints() {
        let (va, vb, vc) = evaluate(cs, &cs.constraints[i], wire_values);
        a[i] = va;
        b[i] = vb;
        c[i] = vc;
        if va * vb != vc {
            let debug = cs
                .debug_info
                .get(i - cs.nb_computational)
                .map(|entry| logs::resolve_entry(entry, wire_values, instantiated));
            return Err(SolveError::UnsatisfiedConstraint { constraint: i, debug });
        }
    }

    Ok(())
}

/// Evaluate all three sides of a constraint. Called once every referenced
/// wire holds a value.
fn evaluate<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    constraint: &Constraint,
    wire_values: &[F],
) -> (F, F, F) {
    (
        cs.eval(&constraint.l, wire_values),
        cs.eval(&constraint.r, wire_values),
        cs.eval(&constraint.o, wire_values),
    )
}

fn solve_constraint<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    constraint: &Constraint,
    wire_values: &mut [F],
    instantiated: &mut [bool],
) {
    match constraint.method {
        SolveMethod::SingleOutput => solve_single_output(cs, constraint, wire_values, instantiated),
        SolveMethod::BinaryDec => solve_binary_dec(cs, constraint, wire_values, instantiated),
    }
}

// ============================================================================
// Single-unknown strategy
// ============================================================================

#[derive(Clone, Copy)]
enum Side {
    L,
    R,
    O,
}

/// Fold one side's instantiated terms into `acc`, recording an
/// uninstantiated wire as the constraint's unknown. Two unknowns across
/// the three sides means the system is malformed.
fn scan_side<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    terms: &[Term],
    side: Side,
    wire_values: &[F],
    instantiated: &[bool],
    acc: &mut F,
    unknown: &mut Option<(Side, Term)>,
) {
    for term in terms {
        let wire = term.wire.index();
        if instantiated[wire] {
            cs.accumulate(acc, term, &wire_values[wire]);
        } else {
            if unknown.is_some() {
                panic!("found more than one uninstantiated wire in a single-unknown constraint");
            }
            *unknown = Some((side, *term));
        }
    }
}

fn solve_single_output<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    constraint: &Constraint,
    wire_values: &mut [F],
    instantiated: &mut [bool],
) {
    let mut a = F::zero();
    let mut b = F::zero();
    let mut c = F::zero();
    let mut unknown: Option<(Side, Term)> = None;

    scan_side(cs, &constraint.l.terms, Side::L, wire_values, instantiated, &mut a, &mut unknown);
    scan_side(cs, &constraint.r.terms, Side::R, wire_values, instantiated, &mut b, &mut unknown);
    scan_side(cs, &constraint.o.terms, Side::O, wire_values, instantiated, &mut c, &mut unknown);

    // no unknown left: an earlier constraint already set this wire
    let Some((side, term)) = unknown else {
        return;
    };
    let wire = term.wire.index();

    match side {
        Side::L => {
            // value = c/b − a, scaled by the unknown term's coefficient.
            // b == 0 under-determines the wire; it stays uninstantiated
            // for a later constraint to pin.
            if !b.is_zero() {
                let mut value = c / b;
                value -= a;
                cs.scale(&mut value, &term);
                wire_values[wire] = value;
                instantiated[wire] = true;
            }
        }
        Side::R => {
            if !a.is_zero() {
                let mut value = c / a;
                value -= b;
                cs.scale(&mut value, &term);
                wire_values[wire] = value;
                instantiated[wire] = true;
            }
        }
        Side::O => {
            let mut value = a * b;
            value -= c;
            cs.scale(&mut value, &term);
            wire_values[wire] = value;
            instantiated[wire] = true;
        }
    }
}

// ============================================================================
// Binary-decomposition strategy
// ============================================================================

fn solve_binary_dec<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    constraint: &Constraint,
    wire_values: &mut [F],
    instantiated: &mut [bool],
) {
    // the decomposition reads the canonical (non-Montgomery) integer
    let mut n = F::zero();
    for term in &constraint.o.terms {
        cs.accumulate(&mut n, term, &wire_values[term.wire.index()]);
    }
    let n = n.into_bigint();

    let nb_bits = constraint.l.terms.len();
    let mut bits = vec![false; nb_bits];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = n.get_bit(i);
    }

    // L's terms are not sorted by bit position; each power-of-two
    // coefficient names its own bit
    for term in &constraint.l.terms {
        let coeff = cs.coeff_value(term.coeff).into_bigint();
        let position = (coeff.num_bits() - 1) as usize;
        let wire = term.wire.index();
        wire_values[wire] = if bits[position] { F::one() } else { F::zero() };
        instantiated[wire] = true;
    }
}

// ============================================================================
// Tests
// ============================================================================
