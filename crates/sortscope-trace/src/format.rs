// crates/sortscope-trace/src/format.rs

//! Versioned trace envelope used by the CLI and by renderers that want the
//! input and event counts next to the steps.

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

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use sortscope_core::{check_trace, Step, Trace, TraceStats, Value};

use crate::quicksort::{ensure_finite, generate_trace_with_stats};

/// Current envelope version.
pub const TRACE_FILE_VERSION: u16 = 1;

/// Identifier of the only partition scheme the generator implements.
pub const ALGORITHM: &str = "quicksort/lomuto-last-pivot/left-first";

/// Trace envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraceFile {
    /// Format/version tag for forward-compat.
    pub version: u16,
    /// Partition scheme that produced `steps`.
    pub algorithm: String,
    /// The unsorted input (equal to `steps[0].values`).
    pub input: Vec<Value>,
    /// Step sequence.
    pub steps: Trace,
    /// Event counts, when recorded alongside the steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<TraceStats>,
    /// Optional metadata (input source, seed, …).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl TraceFile {
    /// Record `input` and wrap the result.
    #[must_use]
    pub fn record(input: &[Value]) -> Self {
        let (steps, stats) = generate_trace_with_stats(input);
        Self {
            version: TRACE_FILE_VERSION,
            algorithm: ALGORITHM.to_owned(),
            input: input.to_vec(),
            steps,
            stats: Some(stats),
            meta: None,
        }
    }

    /// Like [`TraceFile::record`], rejecting non-finite input first.
    ///
    /// # Errors
    /// Fails if any element is NaN or infinite.
    pub fn try_record(input: &[Value]) -> Result<Self> {
        ensure_finite(input)?;
        Ok(Self::record(input))
    }

    /// Attach free-form metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Number of steps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the envelope holds no steps.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last step, i.e. the sorted array.
    #[must_use]
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Check the version tag and the trace invariants against `input`.
    ///
    /// # Errors
    /// Fails on an unknown version or any invariant violation.
    pub fn check(&self) -> Result<()> {
        ensure!(
            self.version == TRACE_FILE_VERSION,
            "unsupported trace file version {} (expected {TRACE_FILE_VERSION})",
            self.version
        );
        check_trace(&self.input, &self.steps)
    }
}

/// Either an envelope or a bare step list, as found on disk.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AnyTrace {
    /// A [`TraceFile`].
    Envelope(TraceFile),
    /// A bare `[Step, …]` array.
    Bare(Trace),
}

impl AnyTrace {
    /// The step sequence.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Envelope(tf) => &tf.steps,
            Self::Bare(steps) => steps,
        }
    }

    /// The input the trace claims to sort: the envelope's `input`, or step 0
    /// of a bare trace.
    #[must_use]
    pub fn input(&self) -> Option<&[Value]> {
        match self {
            Self::Envelope(tf) => Some(&tf.input),
            Self::Bare(steps) => steps.first().map(|s| s.values.as_slice()),
        }
    }

    /// Recorded stats, if any.
    #[must_use]
    pub fn stats(&self) -> Option<TraceStats> {
        match self {
            Self::Envelope(tf) => tf.stats,
            Self::Bare(_) => None,
        }
    }

    /// Drop the envelope, keeping only the steps.
    #[must_use]
    pub fn into_steps(self) -> Trace {
        match self {
            Self::Envelope(tf) => tf.steps,
            Self::Bare(steps) => steps,
        }
    }
}
