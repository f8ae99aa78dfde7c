//! Font metrics and word wrapping using `ttf-parser`.
//!
//! Certificates render with the PDF builtin Helvetica family, so no font
//! bytes are embedded. Measurement uses real glyph advances when a TTF has
//! been loaded (e.g. a metrics-compatible Liberation Sans) and a
//! proportional-width heuristic otherwise; both are good enough to wrap and
//! align single-column certificate text.

use std::collections::HashMap;

/// Regular / bold / italic variant selector within the single family.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct FaceStyle {
    pub bold: bool,
    pub italic: bool,
}

/// A loaded font face kept as raw bytes for ttf-parser's zero-copy API.
#[derive(Clone)]
struct FaceData {
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Measures text for layout; one instance per render.
#[derive(Default)]
pub struct FontManager {
    faces: HashMap<FaceStyle, FaceData>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF/OTF variant to get exact advance widths for that style.
    pub fn load_face(&mut self, style: FaceStyle, bytes: Vec<u8>) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("Failed to parse font: {e}"))?;
        let units_per_em = face.units_per_em() as f32;
        self.faces.insert(style, FaceData { bytes, units_per_em });
        Ok(())
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_text_width(&self, text: &str, font_size: f32, style: FaceStyle) -> f32 {
        if let Some(data) = self.faces.get(&style) {
            if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
                let scale = font_size / data.units_per_em;
                return text
                    .chars()
                    .map(|ch| match face.glyph_index(ch) {
                        Some(gid) => {
                            face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale
                        }
                        None => font_size * 0.5,
                    })
                    .sum();
            }
        }
        // Heuristic: average char width ~ 0.5 x font_size for proportional
        // faces, bold ~10 % wider.
        let avg = if style.bold { 0.55 } else { 0.5 };
        text.chars().count() as f32 * font_size * avg
    }

    /// Line height in points.
    pub fn line_height(&self, font_size: f32, factor: f32) -> f32 {
        font_size * factor
    }
}

/// Word-wrap `text` to fit `max_width` points. Existing newlines are
/// honoured as hard breaks; a word wider than the line goes on its own line
/// rather than being split.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    style: FaceStyle,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in &words {
            let candidate = if current.is_empty() {
                (*word).to_string()
            } else {
                format!("{current} {word}")
            };
            if fonts.measure_text_width(&candidate, font_size, style) > max_width
                && !current.is_empty()
            {
                lines.push(current);
                current = (*word).to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width() {
        let fonts = FontManager::new();
        let w = fonts.measure_text_width("Hello", 16.0, FaceStyle::default());
        // 5 chars x 16 x 0.5 = 40
        assert!((w - 40.0).abs() < 0.1);
    }

    #[test]
    fn bold_measures_wider() {
        let fonts = FontManager::new();
        let regular = fonts.measure_text_width("Certificate", 11.0, FaceStyle::default());
        let bold = fonts.measure_text_width(
            "Certificate",
            11.0,
            FaceStyle { bold: true, italic: false },
        );
        assert!(bold > regular);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let mut fonts = FontManager::new();
        let err = fonts.load_face(FaceStyle::default(), vec![0u8; 16]);
        assert!(err.is_err());
    }

    #[test]
    fn wrap_splits_long_text() {
        let fonts = FontManager::new();
        let lines = wrap_text(
            "Hello world foo bar",
            16.0,
            FaceStyle::default(),
            60.0,
            &fonts,
        );
        assert!(lines.len() >= 2, "Expected wrapping, got {lines:?}");
    }

    #[test]
    fn wrap_honours_hard_breaks() {
        let fonts = FontManager::new();
        let lines = wrap_text(
            "123 Medical Street\nCity, State - 123456",
            10.0,
            FaceStyle::default(),
            400.0,
            &fonts,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "123 Medical Street");
    }
}
