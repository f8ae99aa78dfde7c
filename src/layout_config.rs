//! Layout config – the intermediate representation between layout/pagination
//! and PDF rendering. This is the "frozen" structure that encodes exactly
//! what goes on each page.

use serde::{Deserialize, Serialize};

/// A complete paginated document ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageLayout>,
}

/// One page of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub boxes: Vec<LayoutBox>,
}

/// A positioned rectangle holding either text lines or a horizontal rule.
/// Coordinates are relative to the page top-left, in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleStyle>,
}

/// Pre-wrapped, pre-aligned text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub line_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// X offset within the layout box (carries the alignment).
    pub x_offset: f32,
    /// Y offset from the top of the box.
    pub y_offset: f32,
}

/// A full-width horizontal rule, drawn at the box's vertical centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleStyle {
    pub thickness: f32,
}

impl DocumentLayout {
    /// Create an empty A4 layout.
    pub fn a4(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            // A4: 210mm x 297mm = 595.28 x 841.89 points
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            pages: Vec::new(),
        }
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// All text lines in page order; used by tests and the CLI summary.
    pub fn all_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            for lbox in &page.boxes {
                if let Some(text) = &lbox.text {
                    for line in &text.lines {
                        out.push_str(&line.text);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

impl LayoutBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: None,
            rule: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let mut layout = DocumentLayout::a4("test");
        let mut lbox = LayoutBox::new(40.0, 40.0, 515.0, 15.0);
        lbox.text = Some(TextContent {
            lines: vec![TextLine {
                text: "MEDICAL CERTIFICATE".to_string(),
                x_offset: 120.0,
                y_offset: 0.0,
            }],
            font_size: 16.0,
            bold: true,
            italic: false,
            line_height: 22.4,
        });
        layout.pages.push(PageLayout {
            page_index: 0,
            boxes: vec![lbox],
        });

        let json = layout.to_json();
        let back = DocumentLayout::from_json(&json).unwrap();
        assert_eq!(back.pages.len(), 1);
        assert!(back.all_text().contains("MEDICAL CERTIFICATE"));
    }
}
