//! Deterministic channel color palettes.
//!
//! Checked channels are colored by sampling the hue wheel evenly at a fixed
//! saturation and value, so a selection of `n` channels always maps to the
//! same `n` colors. The palette is regenerated wholesale whenever the checked
//! set changes; colors are paired with checked indices by position, never by
//! channel index.

/// Saturation/value used when sampling the hue wheel.
///
/// The defaults give vivid but not fully saturated colors that stay readable
/// as text tints on both light and dark backgrounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteStyle {
    pub saturation: f32,
    pub value: f32,
}

impl Default for PaletteStyle {
    fn default() -> Self {
        Self {
            saturation: 0.75,
            value: 0.92,
        }
    }
}

/// Convert an HSV triple (all components in `[0, 1]`) to RGB in `[0, 1]`.
///
/// Standard sector transform. `h` wraps, so `1.0` is the same hue as `0.0`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [v, v, v];
    }
    let h6 = (h - h.floor()) * 6.0;
    let sector = h6.floor() as u32 % 6;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Generate `n` evenly-hue-spaced colors with the default [`PaletteStyle`].
pub fn generate_palette(n: usize) -> Vec<[u8; 3]> {
    generate_palette_with(n, PaletteStyle::default())
}

/// Generate `n` evenly-hue-spaced colors as 8-bit RGB triples.
///
/// Hue for slot `i` is `i / n`, so the colors span the full wheel with the
/// last one adjacent to (but distinct from) the first. Components are scaled
/// by 255 and truncated toward zero. `n == 0` yields an empty palette.
pub fn generate_palette_with(n: usize, style: PaletteStyle) -> Vec<[u8; 3]> {
    (0..n)
        .map(|i| {
            let hue = i as f32 / n as f32;
            let [r, g, b] = hsv_to_rgb(hue, style.saturation, style.value);
            [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
        })
        .collect()
}
