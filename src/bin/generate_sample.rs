use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Synthetic drive geometry: a 500 GB disk at 7200 rpm.
const DEVICE_SIZE: u64 = 500 * 1024 * 1024 * 1024;
const BLOCK_SIZE: u64 = 4096;
const NUM_SAMPLES: usize = 1000;

const COMMAND_OVERHEAD_S: f64 = 0.0004;
const FULL_STROKE_SEEK_S: f64 = 0.012;
const ROTATION_PERIOD_S: f64 = 60.0 / 7200.0;

/// Seek time grows roughly with the square root of the stroke length.
fn seek_time(distance: u64) -> f64 {
    FULL_STROKE_SEEK_S * (distance as f64 / DEVICE_SIZE as f64).sqrt()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let num_blocks = DEVICE_SIZE / BLOCK_SIZE;

    let output_path = "sample_seeks.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("create output file");
    writer
        .write_record(["distance", "time_s"])
        .expect("write header");

    let mut last_offset: i64 = 0;
    for _ in 0..NUM_SAMPLES {
        let offset = (rng.gen_range(0..num_blocks) * BLOCK_SIZE) as i64;
        let distance = offset - last_offset;

        // Rotational delay is uniform over one revolution.
        let rotation = rng.gen_range(0.0..ROTATION_PERIOD_S);
        let time_s = COMMAND_OVERHEAD_S + seek_time(distance.unsigned_abs()) + rotation;

        writer
            .write_record([distance.to_string(), format!("{time_s:.6}")])
            .expect("write row");
        last_offset = offset;
    }
    writer.flush().expect("flush output");

    println!("Wrote {NUM_SAMPLES} synthetic seek samples to {output_path}");
}
