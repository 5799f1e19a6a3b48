//! Telemetry: JSONL event records for the benchmark/soak/parity-report
//! modes (§6 "Persisted state"), plus a minimal P6 PPM snapshot writer.
//!
//! Writers take any `impl std::io::Write` so tests exercise them against
//! an in-memory buffer instead of the filesystem.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::render_path::PassId;

/// One frame's worth of counters, serialized as a single JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameMetrics {
    pub frame_count: u64,
    pub cpu_frame_micros: f64,
    pub slowest_cpu_pass: Option<String>,
    pub slowest_gpu_pass: Option<String>,
    pub graph_rebuild_count: u64,
    pub barrier_fallback_count: u64,
    pub pass_fallback_count: u64,
}

/// Accumulates the counters [`FrameMetrics`] reports, across the whole
/// run rather than per frame.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCounters {
    pub graph_rebuild_count: u64,
    pub barrier_fallback_count: u64,
    pub pass_fallback_count: u64,
}

impl TelemetryCounters {
    pub fn record_rebuild(&mut self) {
        self.graph_rebuild_count += 1;
    }

    pub fn record_frame(&mut self, barrier_fallbacks: u64, pass_fallbacks: u64) {
        self.barrier_fallback_count += barrier_fallbacks;
        self.pass_fallback_count += pass_fallbacks;
    }
}

/// Appends one JSONL record (`serde_json::to_writer` plus a trailing
/// newline) to `writer`.
pub fn write_jsonl_record<W: Write>(writer: &mut W, metrics: &FrameMetrics) -> crate::errors::Result<()> {
    serde_json::to_writer(&mut *writer, metrics)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Writes an 8-bit RGB image as a binary P6 PPM.
pub fn write_ppm<W: Write>(writer: &mut W, width: u32, height: u32, rgb: &[u8]) -> io::Result<()> {
    assert_eq!(rgb.len(), (width as usize) * (height as usize) * 3, "rgb buffer size mismatch");
    write!(writer, "P6\n{width} {height}\n255\n")?;
    writer.write_all(rgb)
}

#[must_use]
pub fn pass_id_label(pass_id: PassId) -> String {
    pass_id.stable_id().to_string()
}
