use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous green → yellow → red scale
// ---------------------------------------------------------------------------

/// Maps values in `[min, max]` onto a continuous severity gradient, the hue
/// sweeping from 120° (green) through 60° (yellow) down to 0° (red).
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        ColorScale { min, max }
    }

    /// Normalized position of `value` on the scale, clamped to `[0, 1]`.
    /// A zero-width domain maps everything to the midpoint.
    fn position(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Look up the colour for a value.
    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value) as f32;
        let hue = 120.0 * (1.0 - t);
        let hsl = Hsl::new(hue, 0.85, 0.45);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}
