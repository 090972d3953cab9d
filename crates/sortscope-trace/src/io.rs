//! I/O helpers for the `TraceFile` envelope (format-level).
//!
//! Supports JSON/CBOR and extension-based auto-detection. Bare step lists are
//! handled by `sortscope_core::io`; [`read_any_trace_auto`] accepts both.

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

use crate::format::{AnyTrace, TraceFile};
use anyhow::{anyhow, Result};
use sortscope_core::io::{ext_lower, read_cbor, read_json, write_cbor, write_json};
use std::path::Path;

/* ---------------- JSON ---------------- */

/// Read a `TraceFile` from **JSON**.
pub fn read_trace_file_json<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    read_json(path, "trace file")
}

/// Write a `TraceFile` to **JSON** (pretty).
pub fn write_trace_file_json<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    write_json(path, v, "trace file")
}

/* ---------------- CBOR ---------------- */

/// Read a `TraceFile` from **CBOR**.
pub fn read_trace_file_cbor<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    read_cbor(path, "trace file")
}

/// Write a `TraceFile` to **CBOR**.
pub fn write_trace_file_cbor<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    write_cbor(path, v, "trace file")
}

/* --------------- Auto-detect by extension --------------- */

/// Auto-detect **read** by extension (`.json` / `.cbor`, case-insensitive).
pub fn read_trace_file_auto<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_trace_file_json(path),
        Some("cbor") => read_trace_file_cbor(path),
        Some(other) => Err(anyhow!(
            "unsupported trace file extension: {} (supported: .json, .cbor)",
            other
        )),
        None => Err(anyhow!("path has no extension (expected .json or .cbor)")),
    }
}

/// Auto-detect **write** (defaults to JSON if unknown/missing).
pub fn write_trace_file_auto<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("cbor") => write_trace_file_cbor(path, v),
        _ => write_trace_file_json(path, v),
    }
}

/// Read whatever trace shape lives at `path`: an envelope or a bare step list
/// (`.json` / `.cbor`), or a step-per-line file (`.jsonl` / `.ndjson`).
pub fn read_any_trace_auto<P: AsRef<Path>>(path: P) -> Result<AnyTrace> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_json(path, "trace"),
        Some("cbor") => read_cbor(path, "trace"),
        Some("jsonl" | "ndjson") => Ok(AnyTrace::Bare(sortscope_core::read_trace_auto(path)?)),
        Some(other) => Err(anyhow!(
            "unsupported trace extension: {} (supported: .json, .cbor, .jsonl, .ndjson)",
            other
        )),
        None => Err(anyhow!(
            "path has no extension (expected .json, .cbor, .jsonl, or .ndjson)"
        )),
    }
}
