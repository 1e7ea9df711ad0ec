use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Named colours → Color32
// ---------------------------------------------------------------------------

/// Colour used when a configured name is not a known SVG/CSS colour.
pub const FALLBACK_COLOR: Color32 = Color32::GRAY;

/// Resolve an SVG/CSS colour keyword such as `"orange"` (case-insensitive).
pub fn parse_named(name: &str) -> Option<Color32> {
    let rgb = palette::named::from_str(&name.trim().to_ascii_lowercase())?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Like [`parse_named`], logging and substituting [`FALLBACK_COLOR`] for
/// unknown names.
pub fn named_color(name: &str) -> Color32 {
    parse_named(name).unwrap_or_else(|| {
        log::warn!("Unknown colour '{name}', using gray");
        FALLBACK_COLOR
    })
}
