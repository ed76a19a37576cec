//! # Run Report
//!
//! A JSON summary of one encode or decode run, written with `--report`.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::processing::PixelGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub image_path: String,
    pub output_path: String,
    pub width: u32,
    pub height: u32,
    pub capacity_bits: usize,
    pub capacity_bytes: usize,
    pub payload_bytes: usize,
    /// Bits written (encode) or read (decode), end marker excluded
    pub bits: usize,
    /// Decode only: whether the end-of-data marker was found
    pub complete: Option<bool>,
    pub elapsed_ms: u64,
    pub finished_at: String,
}

/// Collects report fields while a run is in progress.
#[derive(Debug)]
pub struct ReportBuilder {
    mode: Mode,
    image_path: String,
    output_path: String,
    start_time: Instant,
}

impl ReportBuilder {
    pub fn start(mode: Mode, image_path: &Path, output_path: &Path) -> Self {
        Self {
            mode,
            image_path: image_path.display().to_string(),
            output_path: output_path.display().to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn finish(
        self,
        grid: &PixelGrid,
        payload_bytes: usize,
        bits: usize,
        complete: Option<bool>,
    ) -> RunReport {
        let capacity = grid.capacity();

        RunReport {
            mode: self.mode,
            image_path: self.image_path,
            output_path: self.output_path,
            width: grid.width(),
            height: grid.height(),
            capacity_bits: capacity.bits,
            capacity_bytes: capacity.bytes(),
            payload_bytes,
            bits,
            complete,
            elapsed_ms: self.start_time.elapsed().as_millis() as u64,
            finished_at: chrono::Local::now().to_rfc3339(),
        }
    }
}

impl RunReport {
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;

        Ok(())
    }
}
