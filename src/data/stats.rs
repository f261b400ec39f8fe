use super::model::{SeekDataset, SeekDirection};

// ---------------------------------------------------------------------------
// Summary statistics for the side panel
// ---------------------------------------------------------------------------

/// Aggregate view of a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekSummary {
    pub count: usize,
    pub forward: usize,
    pub backward: usize,
    pub mean_time_s: f64,
    pub median_time_s: f64,
    pub max_time_s: f64,
    /// Largest absolute head travel observed.
    pub max_distance: i64,
}

/// Compute summary statistics, or `None` for an empty dataset.
pub fn summarize(dataset: &SeekDataset) -> Option<SeekSummary> {
    if dataset.is_empty() {
        return None;
    }

    let count = dataset.len();
    let forward = dataset
        .samples
        .iter()
        .filter(|s| s.direction() == SeekDirection::Forward)
        .count();

    let total: f64 = dataset.samples.iter().map(|s| s.time_s).sum();
    let max_time_s = dataset
        .samples
        .iter()
        .map(|s| s.time_s)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_distance = dataset
        .samples
        .iter()
        .map(|s| s.distance.saturating_abs())
        .max()
        .unwrap_or(0);

    let mut times: Vec<f64> = dataset.samples.iter().map(|s| s.time_s).collect();
    times.sort_by(f64::total_cmp);
    let median_time_s = if count % 2 == 1 {
        times[count / 2]
    } else {
        (times[count / 2 - 1] + times[count / 2]) / 2.0
    };

    Some(SeekSummary {
        count,
        forward,
        backward: count - forward,
        mean_time_s: total / count as f64,
        median_time_s,
        max_time_s,
        max_distance,
    })
}

/// Render a duration in seconds with a human-scaled unit ("4.21 ms").
pub fn format_seconds(secs: f64) -> String {
    if secs >= 1.0 {
        format!("{secs:.2} s")
    } else if secs >= 1e-3 {
        format!("{:.2} ms", secs * 1e3)
    } else {
        format!("{:.1} µs", secs * 1e6)
    }
}

/// Render a byte count with a binary unit ("427.3 GiB").
pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes.saturating_abs() as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
