//! Canonical step/trace types shared across the sortscope workspace.
//!
//! These live in `sortscope-core` and are re-exported at the crate root so
//! other crates can import via `sortscope_core::Step`, `sortscope_core::Trace`.
//!
//! Serialized field names follow the renderer's record shape
//! (`values`, `pivotIndex`, `comparingIndices`); absent metadata is omitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of the sorted sequence.
pub type Value = f64;

/// Ordered sequence of snapshots, first = raw input, last = sorted.
pub type Trace = Vec<Step>;

/// Immutable snapshot of the working array plus algorithm metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Full array state at emission time.
    pub values: Vec<Value>,
    /// Live index of the active pivot, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_index: Option<usize>,
    /// Indices currently compared against the pivot (0, 1 or 2 entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparing_indices: Option<Vec<usize>>,
}

impl Step {
    /// Snapshot without metadata (initial/final state).
    #[inline]
    #[must_use]
    pub fn plain(values: &[Value]) -> Self {
        Self {
            values: values.to_vec(),
            pivot_index: None,
            comparing_indices: None,
        }
    }

    /// Snapshot with the pivot marked and no comparison in progress.
    #[inline]
    #[must_use]
    pub fn pivot(values: &[Value], pivot: usize) -> Self {
        Self {
            values: values.to_vec(),
            pivot_index: Some(pivot),
            comparing_indices: None,
        }
    }

    /// Snapshot of `j` being compared against the pivot at `pivot`.
    #[inline]
    #[must_use]
    pub fn comparing(values: &[Value], pivot: usize, j: usize) -> Self {
        Self {
            values: values.to_vec(),
            pivot_index: Some(pivot),
            comparing_indices: Some(vec![j, pivot]),
        }
    }

    /// Number of elements in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` when neither a pivot nor a comparison is attached.
    #[inline]
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.pivot_index.is_some() || self.comparing_indices.is_some()
    }

    /// Bit-exact equality of values and metadata.
    ///
    /// Unlike `==`, a NaN compares identical to itself, so a repeated snapshot
    /// is recognized even for degenerate input.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.pivot_index == other.pivot_index
            && self.comparing_indices == other.comparing_indices
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    /// Whether index `i` is one of the compared positions.
    #[must_use]
    pub fn is_comparing(&self, i: usize) -> bool {
        self.comparing_indices
            .as_deref()
            .is_some_and(|c| c.contains(&i))
    }
}

impl fmt::Display for Step {
    /// One line per step: `[5 3 (8) <1>]` marks the pivot with `<>` and
    /// compared positions with `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if self.pivot_index == Some(i) {
                write!(f, "<{v}>")?;
            } else if self.is_comparing(i) {
                write!(f, "({v})")?;
            } else {
                write!(f, "{v}")?;
            }
        }
        f.write_str("]")
    }
}

/// Counts of the algorithm events observed while recording a trace.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceStats {
    /// Partition passes (one per sub-range of length ≥ 2).
    pub partitions: u64,
    /// Element-vs-pivot comparisons.
    pub comparisons: u64,
    /// Index-distinct swaps, including pivot placement.
    pub swaps: u64,
    /// Deepest nesting of partition passes (root = 1).
    pub max_depth: u32,
}

impl fmt::Display for TraceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "partitions={} comparisons={} swaps={} max_depth={}",
            self.partitions, self.comparisons, self.swaps, self.max_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_renderer_field_names() {
        let s = Step::comparing(&[3.0, 1.0, 2.0], 2, 0);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "values": [3.0, 1.0, 2.0],
                "pivotIndex": 2,
                "comparingIndices": [0, 2]
            })
        );
    }

    #[test]
    fn omits_absent_metadata() {
        let json = serde_json::to_string(&Step::plain(&[1.0])).unwrap();
        assert_eq!(json, r#"{"values":[1.0]}"#);
        let back: Step = serde_json::from_str(r#"{"values":[1]}"#).unwrap();
        assert_eq!(back, Step::plain(&[1.0]));
        assert!(!back.has_metadata());
    }

    #[test]
    fn identical_treats_nan_as_itself() {
        let a = Step::plain(&[f64::NAN, 1.0]);
        assert_ne!(a, a.clone());
        assert!(a.is_identical(&a.clone()));
        assert!(!a.is_identical(&Step::pivot(&[f64::NAN, 1.0], 0)));
    }

    #[test]
    fn display_marks_pivot_and_comparisons() {
        let s = Step::comparing(&[5.0, 3.0, 8.0, 1.0], 3, 1);
        assert_eq!(s.to_string(), "[5 (3) 8 <1>]");
        assert_eq!(Step::plain(&[]).to_string(), "[]");
    }
}
