use crate::color::DirectionColors;
use crate::data::filter::{DirectionFilter, filtered_indices};
use crate::data::model::{SeekDataset, SeekDirection};
use crate::data::stats::{self, SeekSummary};

pub const DEFAULT_MARKER_RADIUS: f32 = 2.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<SeekDataset>,

    /// Which seek directions are visible.
    pub filter: DirectionFilter,

    /// Indices of samples passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregate statistics for the side panel (None while empty).
    pub summary: Option<SeekSummary>,

    /// Series colours, shared by plot and filter swatches.
    pub colors: DirectionColors,

    /// Plot |distance| instead of the signed value.
    pub fold_distance: bool,

    /// Scatter point radius in pixels.
    pub marker_radius: f32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: DirectionFilter::default(),
            visible_indices: Vec::new(),
            summary: None,
            colors: DirectionColors::default(),
            fold_distance: false,
            marker_radius: DEFAULT_MARKER_RADIUS,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, resetting filters and summary.
    pub fn set_dataset(&mut self, dataset: SeekDataset) {
        self.filter = DirectionFilter::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.summary = stats::summarize(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filter);
        }
    }

    /// Flip one direction's visibility and refilter.
    pub fn toggle_direction(&mut self, direction: SeekDirection) {
        self.filter.toggle(direction);
        self.refilter();
    }
}
