//! sortscope-core — step/trace types, invariant checks, and I/O.
//!
//! This crate defines the **stable boundary** between the trace generator and
//! whatever consumes its output (a renderer, the CLI, tests):
//! - canonical data types (`Step`, `Trace`, `TraceStats`),
//! - the trace invariant checker ([`check_trace`]), and
//! - JSON/CBOR I/O (with `.jsonl/.ndjson` streaming helpers).
//!
//! ```rust
//! use sortscope_core::{check_trace, Step};
//!
//! let input = [2.0, 1.0];
//! let trace = vec![
//!     Step::plain(&input),
//!     Step::pivot(&input, 1),
//!     Step::comparing(&input, 1, 0),
//!     Step::pivot(&[1.0, 2.0], 0),
//!     Step::plain(&[1.0, 2.0]),
//! ];
//! check_trace(&input, &trace)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Trace invariant checker (first/last step, no-ops, metadata ranges).
pub mod check;
/// JSON/CBOR helpers and auto-detecting read/write APIs.
pub mod io;
/// Streaming JSONL/NDJSON helpers for long traces.
pub mod io_jsonl;
/// Canonical core data types shared across the workspace.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use check::*;
pub use io::*;
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use sortscope_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        check::{check_trace, first_divergence, is_sorted, same_multiset},
        types::*,
    };
}
