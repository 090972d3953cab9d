//! Serialization helpers for traces and input arrays.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes.
//!
//! Extras:
//! - In-memory CBOR helpers: [`to_cbor`] / [`from_cbor`]
//! - Streaming helper: [`stream_steps_auto`] returning a boxed iterator so
//!   callers can uniformly consume JSONL/NDJSON (true streaming) or JSON/CBOR
//!   (load-then-iterate) without caring about concrete iterator types.

use crate::{Step, Trace, Value};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Ensure the parent directory for a file exists (no-op if none).
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(path)))?;
        }
    }
    Ok(())
}

/// ------------------------------
/// Generic JSON / CBOR files
/// ------------------------------

/// Read any `T` from a **JSON** file.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P, what: &str) -> Result<T> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let rdr = BufReader::new(f);
    serde_json::from_reader(rdr).with_context(|| format!("deserialize JSON {what}"))
}

/// Write any `T` to a **JSON** file (pretty).
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, v: &T, what: &str) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, v).with_context(|| format!("serialize JSON {what}"))?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/// Read any `T` from a **CBOR** file.
pub fn read_cbor<T: DeserializeOwned, P: AsRef<Path>>(path: P, what: &str) -> Result<T> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let mut rdr = BufReader::new(f);
    ciborium::de::from_reader(&mut rdr).with_context(|| format!("deserialize CBOR {what}"))
}

/// Write any `T` to a **CBOR** file.
pub fn write_cbor<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, v: &T, what: &str) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| format!("serialize CBOR {what}"))?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

/// ------------------------------
/// Trace I/O
/// ------------------------------

/// Read a [`Trace`] from **JSON**.
pub fn read_trace_json<P: AsRef<Path>>(path: P) -> Result<Trace> {
    read_json(path, "trace")
}

/// Write a [`Trace`] to **JSON** (pretty).
pub fn write_trace_json<P: AsRef<Path>>(path: P, v: &[Step]) -> Result<()> {
    write_json(path, v, "trace")
}

/// Read a [`Trace`] from **CBOR**.
pub fn read_trace_cbor<P: AsRef<Path>>(path: P) -> Result<Trace> {
    read_cbor(path, "trace")
}

/// Write a [`Trace`] to **CBOR**.
pub fn write_trace_cbor<P: AsRef<Path>>(path: P, v: &[Step]) -> Result<()> {
    write_cbor(path, v, "trace")
}

/// Auto-detect read by extension `.json` / `.cbor` / `.jsonl` / `.ndjson`
/// (case-insensitive). Line-delimited files are collected eagerly.
pub fn read_trace_auto<P: AsRef<Path>>(path: P) -> Result<Trace> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_trace_json(path),
        Some("cbor") => read_trace_cbor(path),
        Some("jsonl" | "ndjson") => crate::io_jsonl::stream_steps_jsonl(path)?.collect(),
        Some(other) => Err(anyhow!(
            "unsupported trace extension: {} (supported: .json, .cbor, .jsonl, .ndjson)",
            other
        )),
        None => Err(anyhow!(
            "path has no extension (expected .json, .cbor, .jsonl, or .ndjson)"
        )),
    }
}

/// Auto-detect write (defaults to **JSON** if unknown or missing).
pub fn write_trace_auto<P: AsRef<Path>>(path: P, v: &[Step]) -> Result<()> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("cbor") => write_trace_cbor(path, v),
        Some("jsonl" | "ndjson") => crate::io_jsonl::write_jsonl(path, v),
        _ => write_trace_json(path, v),
    }
}

/// ------------------------------
/// Streaming helper (boxed iterator)
/// ------------------------------

/// Return a boxed iterator over the steps stored at `path`.
///
/// - **`.jsonl` / `.ndjson`**: true streaming via [`crate::io_jsonl::stream_steps_jsonl`].
/// - **`.json` / `.cbor`**: load the vector, then iterate (compat fallback).
pub fn stream_steps_auto<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn Iterator<Item = Result<Step>> + Send>> {
    // Own the path so the iterator type doesn't capture `P`.
    let pb = path.as_ref().to_owned();

    match ext_lower(&pb).as_deref() {
        Some("jsonl" | "ndjson") => {
            let it = crate::io_jsonl::stream_steps_jsonl(pb)?;
            Ok(Box::new(it))
        }
        Some("json") => {
            let v = read_trace_json(&pb)?;
            Ok(Box::new(v.into_iter().map(Ok)))
        }
        Some("cbor") => {
            let v = read_trace_cbor(&pb)?;
            Ok(Box::new(v.into_iter().map(Ok)))
        }
        Some(other) => Err(anyhow!(
            "unsupported trace extension: {} (supported: .json, .cbor, .jsonl, .ndjson)",
            other
        )),
        None => Err(anyhow!(
            "path has no extension (expected .json, .cbor, .jsonl, or .ndjson)"
        )),
    }
}

/// ------------------------------
/// Input arrays
/// ------------------------------

/// Read an input array (a JSON array of numbers).
pub fn read_values_json<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    read_json(path, "input array")
}

/// Write an input array as a compact JSON array of numbers.
pub fn write_values_json<P: AsRef<Path>>(path: P, values: &[Value]) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, values).with_context(|| "serialize JSON input array")?;
    w.write_all(b"\n").context("write newline")?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/// ------------------------------
/// In-memory CBOR helpers
/// ------------------------------

/// Serialize any `T: Serialize` to **CBOR bytes** using `ciborium`.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf).with_context(|| "serialize CBOR (to_cbor)")?;
    Ok(buf)
}

/// Deserialize any `T: DeserializeOwned` from **CBOR bytes** using `ciborium`.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut cur = Cursor::new(bytes);
    let v = ciborium::de::from_reader(&mut cur).with_context(|| "deserialize CBOR (from_cbor)")?;
    Ok(v)
}

/// Return the lowercase extension (without dot) if present.
#[must_use]
pub fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Human-friendly path display for error messages.
fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
