//! JSON Lines (NDJSON) helpers for streaming `Step` I/O.
//!
//! A renderer replays a trace strictly in order, one step at a time, so a
//! line-per-step file lets it start without materializing the whole trace.
//!
//! - **Reader**: returns an iterator that *owns* its underlying reader,
//!   yielding `Result<Step>` so callers can surface per-line errors.
//! - **Writer**: uses `serde_json::to_writer` to avoid intermediate allocations.
//!
//! # Formats
//! We treat both `.jsonl` and `.ndjson` as equivalent line-delimited JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::Step;

/// Owning JSONL iterator over `Step`.
///
/// Holds the file and buffered reader internally to avoid lifetime pitfalls
/// of returning a borrowed `Lines<'_>` iterator.
pub struct JsonlStepIter {
    rdr: BufReader<File>,
    buf: String,
    line_no: usize,
}

impl JsonlStepIter {
    fn new(file: File) -> Self {
        Self {
            rdr: BufReader::new(file),
            buf: String::with_capacity(1 << 10),
            line_no: 0,
        }
    }
}

impl Iterator for JsonlStepIter {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                // Trim a single trailing '\n' or '\r\n'
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                if self.buf.is_empty() {
                    return Some(Err(anyhow::anyhow!(
                        "parse jsonl line {}: empty line",
                        self.line_no
                    )));
                }
                let parsed: Result<Step> = serde_json::from_str(&self.buf)
                    .with_context(|| format!("parse jsonl line {}", self.line_no));
                Some(parsed)
            }
            Err(e) => Some(Err(e).with_context(|| format!("read line {}", self.line_no + 1))),
        }
    }
}

/// Stream read: one JSON object per line → yields `Step` items.
///
/// # Errors
/// Opening the file may fail. Individual iteration items may be `Err` if a
/// particular line is malformed.
pub fn stream_steps_jsonl<P: AsRef<Path>>(path: P) -> Result<JsonlStepIter> {
    let f = File::open(path.as_ref())
        .with_context(|| format!("open {}", path.as_ref().display()))?;
    Ok(JsonlStepIter::new(f))
}

/// Generic JSONL writer (one serialized item per line).
pub fn write_jsonl<P: AsRef<Path>, T: Serialize>(path: P, items: &[T]) -> Result<()> {
    crate::io::ensure_parent_dir(path.as_ref())?;
    let f = File::create(path.as_ref())
        .with_context(|| format!("create {}", path.as_ref().display()))?;
    let mut w = BufWriter::new(f);
    for it in items {
        serde_json::to_writer(&mut w, it).context("serialize jsonl item")?;
        w.write_all(b"\n").context("write newline")?;
    }
    w.flush().context("flush writer")?;
    Ok(())
}
