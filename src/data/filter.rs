use super::model::{SeekDataset, SeekDirection};

// ---------------------------------------------------------------------------
// Filter predicate: which seek directions are visible
// ---------------------------------------------------------------------------

/// Visibility of the two seek directions.  Both enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionFilter {
    pub forward: bool,
    pub backward: bool,
}

impl Default for DirectionFilter {
    fn default() -> Self {
        DirectionFilter {
            forward: true,
            backward: true,
        }
    }
}

impl DirectionFilter {
    pub fn allows(&self, direction: SeekDirection) -> bool {
        match direction {
            SeekDirection::Forward => self.forward,
            SeekDirection::Backward => self.backward,
        }
    }

    pub fn toggle(&mut self, direction: SeekDirection) {
        match direction {
            SeekDirection::Forward => self.forward = !self.forward,
            SeekDirection::Backward => self.backward = !self.backward,
        }
    }
}

/// Return indices of samples whose direction is enabled.
pub fn filtered_indices(dataset: &SeekDataset, filter: &DirectionFilter) -> Vec<usize> {
    dataset
        .samples
        .iter()
        .enumerate()
        .filter(|(_, sample)| filter.allows(sample.direction()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::SeekSample;

    fn dataset() -> SeekDataset {
        SeekDataset::from_samples(vec![
            SeekSample {
                distance: 4096,
                time_s: 0.004,
            },
            SeekSample {
                distance: -4096,
                time_s: 0.009,
            },
            SeekSample {
                distance: 0,
                time_s: 0.0002,
            },
            SeekSample {
                distance: -1,
                time_s: 0.012,
            },
        ])
    }

    #[test]
    fn default_filter_shows_everything() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &DirectionFilter::default());
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn backward_only() {
        let ds = dataset();
        let filter = DirectionFilter {
            forward: false,
            backward: true,
        };
        assert_eq!(filtered_indices(&ds, &filter), vec![1, 3]);
    }

    #[test]
    fn nothing_enabled_hides_everything() {
        let ds = dataset();
        let filter = DirectionFilter {
            forward: false,
            backward: false,
        };
        assert!(filtered_indices(&ds, &filter).is_empty());
    }

    #[test]
    fn toggle_flips_one_direction() {
        let mut filter = DirectionFilter::default();
        filter.toggle(SeekDirection::Backward);
        assert!(filter.forward);
        assert!(!filter.backward);
    }
}
