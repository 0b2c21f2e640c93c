//! Witness solver for Solvent R1CS systems.
//!
//! Given a [`constraints::ConstraintSystem`] and a name→value assignment for
//! its declared inputs, [`solve`] fills the complete wire-value vector:
//! inputs are instantiated first, each computational constraint then
//! computes its one unknown wire (by algebraic isolation or binary
//! decomposition), and the assertion suffix is checked. The only
//! recoverable failures are the errors in [`SolveError`]; an inconsistency
//! inside the system itself (a malformed constraint, a wrong topological
//! order) is a builder bug and panics.

mod error;
mod logs;
mod solver;

pub use error::SolveError;
pub use solver::{is_solved, solve, Assignment};
