use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SeekSample – one row of the measurement CSV
// ---------------------------------------------------------------------------

/// A single observed seek (one row of the measurement output).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekSample {
    /// Signed byte delta from the previous read offset.
    /// Negative means the head moved backwards.
    pub distance: i64,
    /// Wall-clock duration of the read, in seconds.
    pub time_s: f64,
}

impl SeekSample {
    /// Classify the seek by the sign of its distance.
    pub fn direction(&self) -> SeekDirection {
        if self.distance < 0 {
            SeekDirection::Backward
        } else {
            SeekDirection::Forward
        }
    }
}

// ---------------------------------------------------------------------------
// SeekDirection – the only categorical facet of the dataset
// ---------------------------------------------------------------------------

/// Direction of head travel. A zero-distance re-read counts as forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekDirection {
    Forward,
    Backward,
}

impl SeekDirection {
    pub const ALL: [SeekDirection; 2] = [SeekDirection::Forward, SeekDirection::Backward];

    pub fn label(self) -> &'static str {
        match self {
            SeekDirection::Forward => "forward",
            SeekDirection::Backward => "backward",
        }
    }
}

impl fmt::Display for SeekDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SeekDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Loaded once, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct SeekDataset {
    /// All samples in file order.
    pub samples: Vec<SeekSample>,
}

impl SeekDataset {
    pub fn from_samples(samples: Vec<SeekSample>) -> Self {
        SeekDataset { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
