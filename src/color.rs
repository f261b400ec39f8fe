use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SeekDirection;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: seek direction → Color32
// ---------------------------------------------------------------------------

/// Fixed colours for the two seek directions, used for both the plot series
/// and the filter-checkbox swatches.
#[derive(Debug, Clone)]
pub struct DirectionColors {
    forward: Color32,
    backward: Color32,
}

impl Default for DirectionColors {
    fn default() -> Self {
        let palette = generate_palette(SeekDirection::ALL.len());
        DirectionColors {
            forward: palette[0],
            backward: palette[1],
        }
    }
}

impl DirectionColors {
    /// Look up the colour for a direction.
    pub fn color_for(&self, direction: SeekDirection) -> Color32 {
        match direction {
            SeekDirection::Forward => self.forward,
            SeekDirection::Backward => self.backward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_hues() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn directions_get_distinct_colors() {
        let colors = DirectionColors::default();
        assert_ne!(
            colors.color_for(SeekDirection::Forward),
            colors.color_for(SeekDirection::Backward)
        );
    }
}
