//! Log and debug-info resolution.
//!
//! Entries are resolved against final wire values: each wire index in
//! `to_resolve` substitutes its value's decimal form into the next `{}`
//! placeholder of the format string.

use ark_ff::PrimeField;
use constraints::{ConstraintSystem, LogEntry};

/// Resolve one entry into its final string.
///
/// Panics if a referenced wire is uninstantiated: entries are only
/// resolved once every wire they mention is guaranteed to be set, so an
/// unset wire here means the builder recorded a bad wire list.
pub(crate) fn resolve_entry<F: PrimeField>(
    entry: &LogEntry,
    wire_values: &[F],
    instantiated: &[bool],
) -> String {
    let mut out = String::with_capacity(entry.format.len());
    let mut rest = entry.format.as_str();
    for &wire in &entry.to_resolve {
        if !instantiated[wire] {
            panic!("log entry references wire {wire} before it was instantiated");
        }
        match rest.split_once("{}") {
            Some((head, tail)) => {
                out.push_str(head);
                out.push_str(&wire_values[wire].to_string());
                rest = tail;
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Resolve and emit every accumulated log entry, in declared order.
pub(crate) fn emit_logs<F: PrimeField>(
    cs: &ConstraintSystem<F>,
    wire_values: &[F],
    instantiated: &[bool],
) {
    for entry in &cs.logs {
        let msg = resolve_entry(entry, wire_values, instantiated);
        tracing::info!(target: "witness", "{msg}");
    }
}
