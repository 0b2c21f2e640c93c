use std::fmt;

/// Errors returned by [`crate::solve`].
///
/// These are the recoverable, caller-facing failures. Inconsistencies in
/// the constraint system itself (two unknown wires in a single-unknown
/// constraint, a computational constraint that does not hold after
/// solving, a log referencing an uninstantiated wire) indicate a broken
/// upstream builder and panic instead.
#[derive(Debug)]
pub enum SolveError {
    /// The caller's a/b/c buffers or wire-value vector do not match the
    /// system's declared constraint and wire counts.
    InvalidInputSize,
    /// A declared input has no value in the assignment map.
    InputNotSet(String),
    /// An assertion constraint evaluated to `L×R ≠ O`.
    UnsatisfiedConstraint {
        /// Index of the failing constraint.
        constraint: usize,
        /// Resolved debug diagnostic, when the builder attached one.
        debug: Option<String>,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidInputSize => {
                write!(
                    f,
                    "invalid input size: len(a, b, c) must equal the constraint count and \
                     len(wire_values) the wire count"
                )
            }
            SolveError::InputNotSet(name) => {
                write!(f, "input `{name}` is not set")
            }
            SolveError::UnsatisfiedConstraint { constraint, debug } => {
                if let Some(d) = debug {
                    write!(f, "constraint {constraint} is not satisfied: {d}")
                } else {
                    write!(f, "constraint {constraint} is not satisfied")
                }
            }
        }
    }
}

impl std::error::Error for SolveError {}
