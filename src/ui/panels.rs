use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::loader;
use crate::data::model::SeekDirection;
use crate::data::stats::{format_bytes, format_seconds};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – display controls and summary
// ---------------------------------------------------------------------------

/// Render the left display panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Direction filter, swatches match the plot series ----
    ui.strong("Seek direction");
    for direction in SeekDirection::ALL {
        let swatch = state.colors.color_for(direction);
        let mut checked = state.filter.allows(direction);
        let text = RichText::new(format!("{direction} seeks")).color(swatch);
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_direction(direction);
        }
    }
    ui.separator();

    // ---- Marker size ----
    ui.strong("Marker size");
    ui.add(Slider::new(&mut state.marker_radius, 0.5..=6.0).text("px"));
    ui.separator();

    // ---- Summary statistics ----
    ui.strong("Summary");
    match &state.summary {
        Some(summary) => {
            egui::Grid::new("summary_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("samples");
                    ui.label(summary.count.to_string());
                    ui.end_row();

                    ui.label("forward");
                    ui.label(summary.forward.to_string());
                    ui.end_row();

                    ui.label("backward");
                    ui.label(summary.backward.to_string());
                    ui.end_row();

                    ui.label("mean access");
                    ui.label(format_seconds(summary.mean_time_s));
                    ui.end_row();

                    ui.label("median access");
                    ui.label(format_seconds(summary.median_time_s));
                    ui.end_row();

                    ui.label("max access");
                    ui.label(format_seconds(summary.max_time_s));
                    ui.end_row();

                    ui.label("max travel");
                    ui.label(format_bytes(summary.max_distance));
                    ui.end_row();
                });
        }
        None => {
            ui.label("Empty dataset (header only).");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} samples loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.fold_distance, "Absolute distance")
            .clicked()
        {
            state.fold_distance = !state.fold_distance;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open seek measurements")
        .add_filter("Seek data", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        // Measurement dumps are often extensionless ("sda").
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} seek samples from {}",
                    dataset.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
