/// Terms and linear combinations.
///
/// A `Term` is one coefficient-scaled wire reference; a `LinearCombination`
/// is an ordered sequence of terms evaluated as Σ(coeff_i × wire_i). Three
/// linear combinations (L, R, O) make up one rank-one constraint.

// ============================================================================
// Wire (reference into the value vector)
// ============================================================================

/// A reference to a wire: an index into the flat wire-value vector.
///
/// The vector is partitioned as `[intermediate | secret | public]`; the
/// public range contains the reserved constant-one wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wire(pub usize);

impl Wire {
    /// Raw index for vector access and serialization.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// Coeff
// ============================================================================

/// A term's coefficient.
///
/// The four common constants are encoded inline so the solver's hot path
/// never touches the coefficient table; everything else is an index into
/// [`crate::ConstraintSystem::coefficients`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coeff {
    Zero,
    One,
    MinusOne,
    Two,
    /// Index into the shared coefficient table.
    Table(u32),
}

// ============================================================================
// Term
// ============================================================================

/// One `coefficient × wire` entry inside a linear combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub wire: Wire,
    pub coeff: Coeff,
}

impl Term {
    pub fn new(wire: Wire, coeff: Coeff) -> Self {
        Self { wire, coeff }
    }
}

// ============================================================================
// LinearCombination
// ============================================================================

/// An ordered sequence of terms.
///
/// Order is insertion order. Duplicate wire references across terms are
/// legal and simply accumulate during evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearCombination {
    pub terms: Vec<Term>,
}

impl LinearCombination {
    pub fn zero() -> Self {
        Self { terms: vec![] }
    }

    /// Create an LC holding a single `1 × wire` term.
    pub fn from_wire(wire: Wire) -> Self {
        Self {
            terms: vec![Term::new(wire, Coeff::One)],
        }
    }

    /// Append a `coeff × wire` term.
    pub fn push(&mut self, wire: Wire, coeff: Coeff) {
        self.terms.push(Term::new(wire, coeff));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<Term>> for LinearCombination {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}
