/// R1CS Constraint System for ZK circuits.
///
/// An R1CS (Rank-1 Constraint System) represents computation as a set of
/// constraints of the form `L·w * R·w = O·w`, where L, R, O are linear
/// combinations over a flat wire vector.
///
/// Wire layout:
///   [0, n_int)                  = intermediate wires
///   [n_int, n_int + n_secret)   = secret inputs
///   [n_int + n_secret, n_wires) = public inputs (includes the constant-one
///                                 wire, named [`ONE_WIRE`])

use ark_ff::{Field, One, PrimeField, Zero};

use crate::term::{Coeff, LinearCombination, Term};

/// Reserved name of the constant-one public wire.
///
/// `$` cannot occur in names produced by the declaration visitor, so the
/// reserved name can never collide with a user variable.
pub const ONE_WIRE: &str = "$one";

// ============================================================================
// SolveMethod
// ============================================================================

/// How the solver computes the unknown wire(s) of a computational constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolveMethod {
    /// Exactly one wire across L, R, O is uninstantiated; isolate it
    /// algebraically.
    #[default]
    SingleOutput,
    /// The wires referenced by L are the bits of O's evaluated value; each
    /// term's power-of-two coefficient identifies its bit position.
    BinaryDec,
}

// ============================================================================
// Constraint
// ============================================================================

/// A single rank-one constraint `L·w * R·w = O·w`, tagged with the solving
/// strategy the builder chose for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraint {
    pub l: LinearCombination,
    pub r: LinearCombination,
    pub o: LinearCombination,
    pub method: SolveMethod,
}

// ============================================================================
// LogEntry
// ============================================================================

/// A format string plus the wires whose resolved values fill its `{}`
/// placeholders, in order.
///
/// Used both for circuit logs (emitted after solving) and for debug info
/// attached to assertion constraints (resolved at failure time).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    pub format: String,
    pub to_resolve: Vec<usize>,
}

// ============================================================================
// ConstraintSystem
// ============================================================================

/// A compiled R1CS.
///
/// Produced once by the circuit builder (or reconstructed by the codec) and
/// logically immutable afterwards: solving mutates only caller-owned
/// buffers, so one system may be shared across concurrent solve calls.
///
/// The constraint list is split into a computational prefix of length
/// `nb_computational` (each solved for one unknown wire) and an assertion
/// suffix (only checked). `debug_info[i]` belongs to assertion constraint
/// `nb_computational + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem<F: PrimeField> {
    /// Total number of wires.
    pub nb_wires: usize,
    /// Number of public wires, the constant-one wire included.
    pub nb_public_wires: usize,
    /// Number of secret-input wires.
    pub nb_secret_wires: usize,
    /// Secret wire names; the i-th entry names wire `secret_offset() + i`.
    pub secret_names: Vec<String>,
    /// Public wire names; the i-th entry names wire `public_offset() + i`.
    pub public_names: Vec<String>,
    /// Circuit log entries, resolved and emitted once solving completes.
    pub logs: Vec<LogEntry>,
    /// Per-assertion diagnostics, resolved when an assertion fails.
    pub debug_info: Vec<LogEntry>,
    /// Length of the computational prefix of `constraints`.
    pub nb_computational: usize,
    pub constraints: Vec<Constraint>,
    /// Shared table backing `Coeff::Table` indices.
    pub coefficients: Vec<F>,
}

impl<F: PrimeField> ConstraintSystem<F> {
    /// An empty system with the given wire partition and no constraints.
    pub fn new(nb_wires: usize, nb_public_wires: usize, nb_secret_wires: usize) -> Self {
        Self {
            nb_wires,
            nb_public_wires,
            nb_secret_wires,
            secret_names: Vec::new(),
            public_names: Vec::new(),
            logs: Vec::new(),
            debug_info: Vec::new(),
            nb_computational: 0,
            constraints: Vec::new(),
            coefficients: Vec::new(),
        }
    }

    // --- Wire partition ---

    /// Index of the first secret-input wire.
    #[inline]
    pub fn secret_offset(&self) -> usize {
        self.nb_wires - self.nb_public_wires - self.nb_secret_wires
    }

    /// Index of the first public-input wire.
    #[inline]
    pub fn public_offset(&self) -> usize {
        self.nb_wires - self.nb_public_wires
    }

    pub fn nb_constraints(&self) -> usize {
        self.constraints.len()
    }

    // --- Coefficient table ---

    /// Intern a coefficient value.
    ///
    /// The four common constants never touch the table; anything else is
    /// deduplicated against existing entries so equal values share an index.
    pub fn coeff(&mut self, value: F) -> Coeff {
        if value.is_zero() {
            Coeff::Zero
        } else if value.is_one() {
            Coeff::One
        } else if value == -F::one() {
            Coeff::MinusOne
        } else if value == F::one().double() {
            Coeff::Two
        } else {
            match self.coefficients.iter().position(|c| *c == value) {
                Some(i) => Coeff::Table(i as u32),
                None => {
                    self.coefficients.push(value);
                    Coeff::Table((self.coefficients.len() - 1) as u32)
                }
            }
        }
    }

    /// The field value a coefficient stands for.
    pub fn coeff_value(&self, coeff: Coeff) -> F {
        match coeff {
            Coeff::Zero => F::zero(),
            Coeff::One => F::one(),
            Coeff::MinusOne => -F::one(),
            Coeff::Two => F::one().double(),
            Coeff::Table(i) => self.coefficients[i as usize],
        }
    }

    // --- Term evaluation ---

    /// `acc += coeff(term) × value`.
    ///
    /// The common constants take a fast path with no field multiplication;
    /// table coefficients multiply through the shared table.
    pub fn accumulate(&self, acc: &mut F, term: &Term, value: &F) {
        match term.coeff {
            Coeff::Zero => {}
            Coeff::One => *acc += value,
            Coeff::MinusOne => *acc -= value,
            Coeff::Two => {
                let mut buf = *value;
                buf.double_in_place();
                *acc += buf;
            }
            Coeff::Table(i) => *acc += self.coefficients[i as usize] * *value,
        }
    }

    /// `value *= coeff(term)`, with the same fast-path structure as
    /// [`accumulate`](Self::accumulate).
    pub fn scale(&self, value: &mut F, term: &Term) {
        match term.coeff {
            Coeff::Zero => *value = F::zero(),
            Coeff::One => {}
            Coeff::MinusOne => {
                value.neg_in_place();
            }
            Coeff::Two => {
                value.double_in_place();
            }
            Coeff::Table(i) => *value *= self.coefficients[i as usize],
        }
    }

    /// Evaluate a linear combination against a wire-value vector.
    pub fn eval(&self, lc: &LinearCombination, wire_values: &[F]) -> F {
        let mut acc = F::zero();
        for term in &lc.terms {
            self.accumulate(&mut acc, term, &wire_values[term.wire.index()]);
        }
        acc
    }
}

// ============================================================================
// Tests
// ============================================================================
