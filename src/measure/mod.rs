//! Random-read latency sampling: the producer of the viewer's CSV.
//!
//! Pipeline:
//! ```text
//!   block device (O_DIRECT)
//!        │  uniformly random block offsets
//!        ▼
//!   timed 1-block reads ──► distance,time_s rows, streamed to the writer
//! ```
//!
//! Only built on Linux: raw device access relies on O_DIRECT and the
//! BLKGETSIZE64 ioctl.

pub mod device;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::model::SeekSample;
use self::device::{AlignedBuf, Device, DeviceError};

// ---------------------------------------------------------------------------
// Configuration and summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MeasureConfig {
    /// Block device (or regular file) to sample.
    pub device: PathBuf,
    /// Number of timed reads.
    pub samples: usize,
    /// Bytes per read; must be a positive multiple of 512.
    pub block_size: usize,
    /// Fixed RNG seed for reproducible offset sequences.
    pub seed: Option<u64>,
    /// Use O_DIRECT to bypass the page cache.
    pub direct: bool,
}

/// Totals reported after a run, mirroring the average printed by classic
/// seek-time benchmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSummary {
    pub samples: usize,
    pub total_time_s: f64,
}

impl MeasureSummary {
    pub fn mean_time_s(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total_time_s / self.samples as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Sampling loop
// ---------------------------------------------------------------------------

/// Run the measurement pass, streaming `distance,time_s` CSV rows to `out`.
///
/// Rows are flushed as they are measured so the output can be watched (or
/// piped) while a long run is still in progress.
pub fn run<W: Write>(config: &MeasureConfig, out: W) -> Result<MeasureSummary> {
    let device = Device::open(&config.device, config.direct)?;
    let mut buf = AlignedBuf::new(config.block_size)?;

    let block_size = config.block_size as u64;
    let num_blocks = device.size() / block_size;
    if num_blocks == 0 {
        return Err(DeviceError::TooSmall {
            path: config.device.clone(),
            block_size: config.block_size,
        }
        .into());
    }

    log::info!(
        "{}: {} bytes ({} blocks of {})",
        config.device.display(),
        device.size(),
        num_blocks,
        config.block_size
    );
    log::info!("starting {} random read operations", config.samples);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = csv::Writer::from_writer(out);
    let mut last_offset: i64 = 0;
    let mut total_time_s = 0.0;
    let progress_every = (config.samples / 10).max(1);

    for i in 0..config.samples {
        let offset = rng.gen_range(0..num_blocks) * block_size;
        let distance = seek_distance(offset, last_offset);

        let elapsed = device.timed_read_at(offset, &mut buf)?;
        let time_s = elapsed.as_secs_f64();

        writer.serialize(SeekSample { distance, time_s })?;
        writer.flush()?;

        last_offset = offset as i64;
        total_time_s += time_s;

        if (i + 1) % progress_every == 0 {
            log::info!("progress: {}/{}", i + 1, config.samples);
        }
    }

    let summary = MeasureSummary {
        samples: config.samples,
        total_time_s,
    };
    log::info!(
        "completed {} measurements, average access time {:.6} s",
        summary.samples,
        summary.mean_time_s()
    );
    Ok(summary)
}

/// Signed head travel from the previous read offset.
fn seek_distance(offset: u64, last_offset: i64) -> i64 {
    offset as i64 - last_offset
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::loader;

    const FILE_LEN: usize = 64 * 1024;

    fn target_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![0u8; FILE_LEN]).expect("fill");
        file
    }

    fn config(file: &NamedTempFile, samples: usize) -> MeasureConfig {
        MeasureConfig {
            device: file.path().to_path_buf(),
            samples,
            block_size: 512,
            seed: Some(42),
            direct: false,
        }
    }

    #[test]
    fn distance_is_signed_travel() {
        assert_eq!(seek_distance(4096, 0), 4096);
        assert_eq!(seek_distance(0, 4096), -4096);
        assert_eq!(seek_distance(8192, 8192), 0);
    }

    #[test]
    fn emits_one_row_per_sample_and_loads_back() {
        let file = target_file();
        let mut out = Vec::new();
        let summary = run(&config(&file, 16), &mut out).expect("run");

        assert_eq!(summary.samples, 16);
        assert!(summary.total_time_s >= 0.0);

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("distance,time_s\n"));

        // The output must round-trip through the viewer's own loader.
        let mut path = NamedTempFile::new().expect("temp file");
        path.write_all(text.as_bytes()).expect("write");
        let ds = loader::load_file(path.path()).expect("load");
        assert_eq!(ds.len(), 16);
        for sample in &ds.samples {
            assert!(sample.distance.unsigned_abs() < FILE_LEN as u64);
            assert!(sample.time_s >= 0.0);
        }
    }

    #[test]
    fn fixed_seed_gives_reproducible_offsets() {
        let file = target_file();
        let mut first = Vec::new();
        let mut second = Vec::new();
        run(&config(&file, 8), &mut first).expect("run");
        run(&config(&file, 8), &mut second).expect("run");

        let distances = |bytes: &[u8]| -> Vec<i64> {
            csv::Reader::from_reader(bytes)
                .deserialize::<crate::data::model::SeekSample>()
                .map(|r| r.expect("row").distance)
                .collect()
        };
        assert_eq!(distances(&first), distances(&second));
    }

    #[test]
    fn zero_samples_writes_nothing() {
        let file = target_file();
        let mut out = Vec::new();
        let summary = run(&config(&file, 0), &mut out).expect("run");
        assert!(out.is_empty());
        assert_eq!(summary.mean_time_s(), 0.0);
    }

    #[test]
    fn target_smaller_than_a_block_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&[0u8; 256]).expect("fill");
        let err = run(&config(&file, 4), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("smaller than one"), "got: {err:#}");
    }
}
