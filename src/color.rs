use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Colour of the raw series.
pub const RAW_COLOR: Color32 = Color32::LIGHT_BLUE;

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
            // Start away from the light blue of the raw series.
            let hue = 20.0 + (i as f32 / n as f32) * 300.0;
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

/// Colour of overlay `index` out of `count`.
pub fn overlay_color(index: usize, count: usize) -> Color32 {
    generate_palette(count)
        .get(index)
        .copied()
        .unwrap_or(Color32::GRAY)
}
