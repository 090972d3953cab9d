//! Trace invariant checker.
//!
//! - [`check_trace`]: fallible structural check of a recorded trace against
//!   the input it was generated from
//! - [`is_sorted`], [`same_multiset`]: the two value-level predicates it uses
//! - [`first_divergence`]: where two recordings of the same input part ways
//!
//! The checker never trusts the producer: every property a renderer relies on
//! (first step = raw input, last step = sorted permutation, stable length,
//! in-range metadata, no repeated step) is re-derived from the trace itself.

use crate::{Step, Value};
use anyhow::{bail, ensure, Result};
use std::cmp::Ordering;

/// `true` if `values` is in non-decreasing order.
#[must_use]
pub fn is_sorted(values: &[Value]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Multiset equality under `f64::total_cmp`.
#[must_use]
pub fn same_multiset(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);
    a.iter()
        .zip(&b)
        .all(|(x, y)| x.total_cmp(y) == Ordering::Equal)
}

/// Index of the first step where `a` and `b` differ (bit-exact), or the
/// shorter length if one is a prefix of the other. `None` if identical.
#[must_use]
pub fn first_divergence(a: &[Step], b: &[Step]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| !x.is_identical(y))
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// Validate `trace` as a recording of sorting `input`.
///
/// # Errors
/// Returns an error naming the first offending step and the violated property.
pub fn check_trace(input: &[Value], trace: &[Step]) -> Result<()> {
    let n = input.len();

    let Some(first) = trace.first() else {
        bail!("trace is empty (expected at least the initial step)");
    };
    ensure!(
        first.values.as_slice() == input && !first.has_metadata(),
        "step 0 must be the raw input without metadata"
    );

    for (k, step) in trace.iter().enumerate() {
        check_step_shape(k, step, n)?;
    }

    for (k, pair) in trace.windows(2).enumerate() {
        ensure!(
            !pair[0].is_identical(&pair[1]),
            "step {} repeats step {} (no-op step)",
            k + 1,
            k
        );
    }

    if n < 2 {
        ensure!(
            trace.len() == 1,
            "input of length {n} must yield exactly one step, got {}",
            trace.len()
        );
        return Ok(());
    }

    let last_idx = trace.len() - 1;
    let last = &trace[last_idx];
    ensure!(
        !last.has_metadata(),
        "final step {last_idx} carries pivot/comparison metadata"
    );
    ensure!(
        is_sorted(&last.values),
        "final step {last_idx} is not sorted: {last}"
    );
    ensure!(
        same_multiset(&last.values, input),
        "final step {last_idx} is not a permutation of the input"
    );

    tracing::debug!(steps = trace.len(), n, "trace passed invariant checks");
    Ok(())
}

fn check_step_shape(k: usize, step: &Step, n: usize) -> Result<()> {
    ensure!(
        step.values.len() == n,
        "step {k}: length {} != input length {n}",
        step.values.len()
    );
    if let Some(p) = step.pivot_index {
        ensure!(p < n, "step {k}: pivot index {p} out of range (len {n})");
    }
    if let Some(c) = &step.comparing_indices {
        ensure!(
            c.len() <= 2,
            "step {k}: {} comparing indices (at most 2 allowed)",
            c.len()
        );
        for &i in c {
            ensure!(i < n, "step {k}: comparing index {i} out of range (len {n})");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_trace() -> (Vec<Value>, Vec<Step>) {
        let input = vec![2.0, 1.0];
        let trace = vec![
            Step::plain(&input),
            Step::pivot(&input, 1),
            Step::comparing(&input, 1, 0),
            Step::pivot(&[1.0, 2.0], 0),
            Step::plain(&[1.0, 2.0]),
        ];
        (input, trace)
    }

    #[test]
    fn accepts_well_formed_trace() {
        let (input, trace) = good_trace();
        check_trace(&input, &trace).unwrap();
    }

    #[test]
    fn rejects_empty_trace() {
        let err = check_trace(&[1.0], &[]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_repeated_step() {
        let (input, mut trace) = good_trace();
        trace.insert(2, trace[1].clone());
        let err = check_trace(&input, &trace).unwrap_err();
        assert!(err.to_string().contains("no-op"), "{err}");
    }

    #[test]
    fn rejects_final_metadata() {
        let (input, mut trace) = good_trace();
        trace.pop();
        let err = check_trace(&input, &trace).unwrap_err();
        assert!(err.to_string().contains("metadata"), "{err}");
    }

    #[test]
    fn rejects_out_of_range_pivot() {
        let (input, mut trace) = good_trace();
        trace[1].pivot_index = Some(7);
        assert!(check_trace(&input, &trace).is_err());
    }

    #[test]
    fn rejects_non_permutation() {
        let (input, mut trace) = good_trace();
        let last = trace.len() - 1;
        trace[last] = Step::plain(&[1.0, 3.0]);
        let err = check_trace(&input, &trace).unwrap_err();
        assert!(err.to_string().contains("permutation"), "{err}");
    }

    #[test]
    fn degenerate_inputs_need_single_step() {
        check_trace(&[], &[Step::plain(&[])]).unwrap();
        check_trace(&[4.0], &[Step::plain(&[4.0])]).unwrap();
        assert!(check_trace(&[4.0], &[Step::plain(&[4.0]), Step::pivot(&[4.0], 0)]).is_err());
    }

    #[test]
    fn divergence_points() {
        let (_, trace) = good_trace();
        assert_eq!(first_divergence(&trace, &trace), None);
        assert_eq!(first_divergence(&trace, &trace[..3]), Some(3));
        let mut other = trace.clone();
        other[2].comparing_indices = None;
        assert_eq!(first_divergence(&trace, &other), Some(2));
    }

    #[test]
    fn multiset_helper() {
        assert!(same_multiset(&[1.0, 2.0, 2.0], &[2.0, 1.0, 2.0]));
        assert!(!same_multiset(&[1.0, 2.0, 2.0], &[1.0, 1.0, 2.0]));
        assert!(!same_multiset(&[1.0], &[1.0, 1.0]));
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[1.0, 1.0, 3.0]));
        assert!(!is_sorted(&[2.0, 1.0]));
    }
}
