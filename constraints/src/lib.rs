//! R1CS data model for Solvent.
//!
//! A compiled circuit is a [`ConstraintSystem`]: a partitioned wire space,
//! an ordered list of rank-one constraints `L·w * R·w = O·w`, a shared
//! coefficient table, and the log/debug metadata attached by the builder.
//! The `witness` crate consumes this model to compute assignments; the
//! [`codec`] module persists it losslessly.

pub mod codec;
pub mod r1cs;
pub mod term;

pub use codec::CodecError;
pub use r1cs::{Constraint, ConstraintSystem, LogEntry, SolveMethod, ONE_WIRE};
pub use term::{Coeff, LinearCombination, Term, Wire};
