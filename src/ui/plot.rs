use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::SeekDirection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Seek scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the seek scatter plot in the central panel.
pub fn seek_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a measurement file to view seeks  (File → Open…)");
            });
            return;
        }
    };

    ui.heading("Seek distance vs. access time on HDD");

    // One series per direction so each gets its own legend entry and colour.
    let mut series: Vec<(SeekDirection, Vec<[f64; 2]>)> = SeekDirection::ALL
        .iter()
        .map(|&d| (d, Vec::new()))
        .collect();

    for &idx in &state.visible_indices {
        let sample = &dataset.samples[idx];
        let x = if state.fold_distance {
            sample.distance.unsigned_abs() as f64
        } else {
            sample.distance as f64
        };
        if let Some((_, points)) = series
            .iter_mut()
            .find(|(d, _)| *d == sample.direction())
        {
            points.push([x, sample.time_s]);
        }
    }

    let x_label = if state.fold_distance {
        "Seek distance (bytes, absolute)"
    } else {
        "Seek distance (bytes)"
    };

    Plot::new("seek_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Access time (s)")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (direction, points) in series {
                if points.is_empty() {
                    continue;
                }
                let points: PlotPoints = points.into();
                let marks = Points::new(points)
                    .name(format!("{direction} seek"))
                    .color(state.colors.color_for(direction))
                    .shape(MarkerShape::Circle)
                    .radius(state.marker_radius);
                plot_ui.points(marks);
            }
        });
}
