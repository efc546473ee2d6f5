use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Measure;

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
            // Start in the blues so the first series reads neutral.
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Color mapping: measure → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per measure, shared by every chart so a series keeps its
/// identity across views.
#[derive(Debug, Clone)]
pub struct MeasureColors {
    mapping: BTreeMap<Measure, Color32>,
}

impl MeasureColors {
    pub fn new() -> Self {
        let mapping = Measure::ALL
            .iter()
            .zip(generate_palette(Measure::ALL.len()))
            .map(|(&m, c)| (m, c))
            .collect();
        MeasureColors { mapping }
    }

    /// Look up the colour for a measure.
    pub fn color_for(&self, measure: Measure) -> Color32 {
        self.mapping.get(&measure).copied().unwrap_or(Color32::GRAY)
    }
}

impl Default for MeasureColors {
    fn default() -> Self {
        Self::new()
    }
}
