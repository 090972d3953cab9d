// crates/sortscope-trace/src/quicksort.rs

//! Lomuto quicksort with step recording.
//!
//! The sort runs on a private copy of the input and snapshots the working
//! buffer at four events:
//!
//! 1. **pivot chosen** — `{pivot: hi}` before a partition pass,
//! 2. **comparison** — `{pivot: hi, comparing: [j, hi]}` before the decision,
//! 3. **swap** — same metadata as (2), after `values[i] <-> values[j]`,
//! 4. **partition complete** — `{pivot: p}` once the pivot sits at its final
//!    index `p`.
//!
//! The pivot is always the last element of the sub-range and the left
//! sub-range is processed completely before the right one. Both choices are
//! part of the observable trace and must not change.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use anyhow::{bail, Result};
use sortscope_core::{Step, Trace, TraceStats, Value};

/// Half-open sub-range `[lo, hi)` awaiting a partition pass.
#[derive(Clone, Copy, Debug)]
struct Span {
    lo: usize,
    hi: usize,
    /// Nesting level of this pass (root = 1).
    depth: u32,
}

/// Output accumulator threaded through every partition pass.
///
/// Each emission takes a fresh copy of the working buffer; a step that would
/// be identical to its predecessor is dropped.
#[derive(Debug)]
struct Recorder {
    steps: Trace,
    stats: TraceStats,
}

impl Recorder {
    fn new(input: &[Value]) -> Self {
        Self {
            steps: vec![Step::plain(input)],
            stats: TraceStats::default(),
        }
    }

    // Only the closing plain step of a sub-two input can repeat its
    // predecessor: a Lomuto swap always trades a value above the pivot for
    // one at or below it, so post-swap snapshots never match pre-swap ones.
    fn emit(&mut self, step: Step) {
        if self.steps.last().is_some_and(|prev| prev.is_identical(&step)) {
            return;
        }
        self.steps.push(step);
    }

    fn finish(mut self, values: &[Value]) -> (Trace, TraceStats) {
        self.emit(Step::plain(values));
        (self.steps, self.stats)
    }
}

/// Record the full quicksort trace of `input`.
///
/// Step 0 is `input` itself and the last step is the sorted array; neither
/// carries metadata. Inputs shorter than two elements yield a single step.
#[must_use]
pub fn generate_trace(input: &[Value]) -> Trace {
    generate_trace_with_stats(input).0
}

/// Like [`generate_trace`], also returning the event counts.
#[must_use]
pub fn generate_trace_with_stats(input: &[Value]) -> (Trace, TraceStats) {
    let mut values = input.to_vec();
    let mut rec = Recorder::new(input);

    // Explicit DFS stack: right pushed before left so the left sub-range
    // (and everything below it) is drained first.
    let mut stack = vec![Span {
        lo: 0,
        hi: values.len(),
        depth: 1,
    }];
    while let Some(span) = stack.pop() {
        if span.hi - span.lo < 2 {
            continue;
        }
        rec.stats.max_depth = rec.stats.max_depth.max(span.depth);
        let p = partition(&mut values, span, &mut rec);

        stack.push(Span {
            lo: p + 1,
            hi: span.hi,
            depth: span.depth + 1,
        });
        stack.push(Span {
            lo: span.lo,
            hi: p,
            depth: span.depth + 1,
        });
    }

    let (trace, stats) = rec.finish(&values);
    tracing::debug!(n = input.len(), steps = trace.len(), %stats, "recorded quicksort trace");
    (trace, stats)
}

/// Checked entry point: rejects NaN and infinities before recording.
///
/// # Errors
/// Returns an error naming the first non-finite element.
pub fn try_generate_trace(input: &[Value]) -> Result<Trace> {
    ensure_finite(input)?;
    Ok(generate_trace(input))
}

/// Reject NaN and infinities, naming the first offender.
///
/// # Errors
/// Returns an error if any element is not finite.
pub fn ensure_finite(input: &[Value]) -> Result<()> {
    if let Some((i, v)) = input.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        bail!("input[{i}] = {v} is not a finite number");
    }
    Ok(())
}

/// One Lomuto pass over `span`; returns the pivot's final index.
fn partition(values: &mut [Value], span: Span, rec: &mut Recorder) -> usize {
    let pivot = span.hi - 1;
    let pivot_value = values[pivot];
    rec.stats.partitions += 1;
    rec.emit(Step::pivot(values, pivot));

    // `store` is the slot right after the last element known to be <= pivot.
    let mut store = span.lo;
    for j in span.lo..pivot {
        rec.stats.comparisons += 1;
        rec.emit(Step::comparing(values, pivot, j));
        if values[j] <= pivot_value {
            if store != j {
                values.swap(store, j);
                rec.stats.swaps += 1;
                rec.emit(Step::comparing(values, pivot, j));
            }
            store += 1;
        }
    }

    if store != pivot {
        values.swap(store, pivot);
        rec.stats.swaps += 1;
    }
    rec.emit(Step::pivot(values, store));
    store
}
