//! Quicksort trace generation + a versioned trace envelope.
//!
//! This crate provides the building blocks that turn a numeric input into a
//! renderer-ready trace:
//!
//! - `quicksort`: the step recorder (Lomuto, last-element pivot, left-first).
//! - `generator`: seeded random input arrays.
//! - `format`: a minimal, versioned trace envelope (`TraceFile`).
//! - `io`: JSON/CBOR read/write helpers for `TraceFile`.
//!
//! We intentionally avoid broad re-exports so callers use stable paths like
//! `sortscope_trace::quicksort::generate_trace`.

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

/// Versioned trace envelope.
pub mod format;
/// Seeded random input arrays.
pub mod generator;
/// JSON/CBOR I/O helpers for `TraceFile`.
pub mod io;
/// Lomuto quicksort step recorder.
pub mod quicksort;
