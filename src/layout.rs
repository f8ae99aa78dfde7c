//! Layout engine – flows recipe sections into positioned boxes in document
//! coordinates (origin at the top of the content area, before pagination).
//!
//! Certificates are a single column, so layout is a cursor walk: each
//! section wraps its text, computes per-line alignment offsets, and advances
//! the cursor. Free text is cleaned here: `\n` is kept as a hard break, all
//! other control characters are stripped (the render stage handles glyph
//! coverage separately).

use crate::fonts::{wrap_text, FaceStyle, FontManager};
use crate::layout_config::{RuleStyle, TextContent, TextLine};
use crate::model::{OrganizationProfile, PractitionerProfile};
use crate::recipe::{HAlign, ParaStyle, Recipe, Section};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// A positioned box in document coordinates (before page splitting).
#[derive(Debug, Clone)]
pub struct FlowBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: Option<TextContent>,
    pub rule: Option<RuleStyle>,
    /// Pagination must not break between this box and the next one.
    pub keep_with_next: bool,
}

/// The flowed document: body boxes in document coordinates plus footer
/// boxes positioned relative to the footer block's own top.
#[derive(Debug, Clone)]
pub struct DocumentFlow {
    pub body: Vec<FlowBox>,
    pub footer: Vec<FlowBox>,
}

/// Flow a recipe into boxes. `content_width` is the page width minus both
/// margins.
pub fn flow_certificate(
    organization: &OrganizationProfile,
    practitioner: &PractitionerProfile,
    recipe: &Recipe,
    content_width: f32,
    fonts: &FontManager,
) -> DocumentFlow {
    let mut flow = Flow::new(content_width, fonts);

    for section in &recipe.sections {
        match section {
            Section::Header => flow.header(organization),
            Section::Title { text, size } => flow.title(text, *size),
            Section::Paragraph { template, style } => {
                let text = template.render(&recipe.fields);
                flow.paragraph(&text, *style);
            }
            Section::Spacer(pt) => flow.cursor += pt,
            Section::Signature { align, trailer } => {
                flow.signature(practitioner, *align, *trailer)
            }
            Section::Footer { lines } => flow.footer(lines),
        }
    }

    DocumentFlow {
        body: flow.body,
        footer: flow.footer_boxes,
    }
}

struct Flow<'a> {
    content_width: f32,
    fonts: &'a FontManager,
    cursor: f32,
    body: Vec<FlowBox>,
    footer_boxes: Vec<FlowBox>,
}

impl<'a> Flow<'a> {
    fn new(content_width: f32, fonts: &'a FontManager) -> Self {
        Self {
            content_width,
            fonts,
            cursor: 0.0,
            body: Vec::new(),
            footer_boxes: Vec::new(),
        }
    }

    fn header(&mut self, org: &OrganizationProfile) {
        self.paragraph(
            org.name.trim(),
            ParaStyle {
                size: 20.0,
                bold: true,
                italic: false,
                align: HAlign::Center,
                indent: 0.0,
                space_after: 3.0,
            },
        );
        let contact = centered(10.0);
        self.paragraph(&org.address, contact.spaced(1.0));
        self.paragraph(
            &format!("Phone: {} | Email: {}", org.phone.trim(), org.email.trim()),
            contact.spaced(1.0),
        );
        if let Some(reg) = non_blank(org.registration_no.as_deref()) {
            self.paragraph(&format!("Registration No: {reg}"), contact.spaced(1.0));
        }
        self.cursor += 6.0;
        self.rule(0.7);
        self.cursor += 12.0;
    }

    fn title(&mut self, text: &str, size: f32) {
        self.paragraph(
            text,
            ParaStyle {
                size,
                bold: true,
                italic: false,
                align: HAlign::Center,
                indent: 0.0,
                space_after: 4.0,
            },
        );
    }

    /// Wrap, align, and emit one paragraph. Empty text (e.g. a template made
    /// only of absent conditionals) emits nothing, not even spacing.
    fn paragraph(&mut self, text: &str, style: ParaStyle) {
        let text = clean_text(text);
        if text.trim().is_empty() {
            return;
        }

        let face = FaceStyle {
            bold: style.bold,
            italic: style.italic,
        };
        let wrap_width = (self.content_width - style.indent).max(1.0);
        let wrapped = wrap_text(&text, style.size, face, wrap_width, self.fonts);
        let line_height = self.fonts.line_height(style.size, LINE_HEIGHT_FACTOR);

        let lines: Vec<TextLine> = wrapped
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let line_width = self.fonts.measure_text_width(line, style.size, face);
                let x_offset = match style.align {
                    HAlign::Left => style.indent,
                    HAlign::Center => ((self.content_width - line_width) / 2.0).max(0.0),
                    HAlign::Right => (self.content_width - line_width).max(0.0),
                };
                TextLine {
                    text: line.clone(),
                    x_offset,
                    y_offset: i as f32 * line_height,
                }
            })
            .collect();

        let height = lines.len() as f32 * line_height;
        self.body.push(FlowBox {
            x: 0.0,
            y: self.cursor,
            width: self.content_width,
            height,
            text: Some(TextContent {
                lines,
                font_size: style.size,
                bold: style.bold,
                italic: style.italic,
                line_height,
            }),
            rule: None,
            keep_with_next: false,
        });
        self.cursor += height + style.space_after;
    }

    fn rule(&mut self, thickness: f32) {
        let height = 2.0;
        self.body.push(FlowBox {
            x: 0.0,
            y: self.cursor,
            width: self.content_width,
            height,
            text: None,
            rule: Some(RuleStyle { thickness }),
            keep_with_next: false,
        });
        self.cursor += height;
    }

    /// The practitioner block. Marked keep-with-next so pagination never
    /// splits it across a page boundary.
    fn signature(
        &mut self,
        practitioner: &PractitionerProfile,
        align: HAlign,
        trailer: Option<&'static str>,
    ) {
        let start = self.body.len();

        let name_style = ParaStyle {
            size: 11.0,
            bold: true,
            italic: false,
            align,
            indent: 0.0,
            space_after: 2.0,
        };
        let detail_style = ParaStyle {
            size: 10.0,
            bold: false,
            ..name_style
        };

        self.paragraph(&format!("Dr. {}", practitioner.name.trim()), name_style);
        self.paragraph(practitioner.qualification.trim(), detail_style);
        if let Some(reg) = non_blank(practitioner.registration_no.as_deref()) {
            self.paragraph(&format!("Reg. No: {reg}"), detail_style);
        }
        if let Some(specialty) = non_blank(practitioner.specialty.as_deref()) {
            self.paragraph(specialty, detail_style);
        }
        if let Some(trailer) = trailer {
            self.paragraph(trailer, detail_style);
        }

        let end = self.body.len();
        for lbox in &mut self.body[start..end.saturating_sub(1)] {
            lbox.keep_with_next = true;
        }
    }

    fn footer(&mut self, lines: &[&str]) {
        let style = FaceStyle {
            bold: false,
            italic: true,
        };
        let size = 8.0;
        let line_height = self.fonts.line_height(size, LINE_HEIGHT_FACTOR);
        let mut y = 0.0;
        for line in lines {
            let line_width = self.fonts.measure_text_width(line, size, style);
            let x_offset = ((self.content_width - line_width) / 2.0).max(0.0);
            self.footer_boxes.push(FlowBox {
                x: 0.0,
                y,
                width: self.content_width,
                height: line_height,
                text: Some(TextContent {
                    lines: vec![TextLine {
                        text: (*line).to_string(),
                        x_offset,
                        y_offset: 0.0,
                    }],
                    font_size: size,
                    bold: false,
                    italic: true,
                    line_height,
                }),
                rule: None,
                keep_with_next: false,
            });
            y += line_height + 1.0;
        }
    }
}

fn centered(size: f32) -> ParaStyle {
    ParaStyle {
        size,
        bold: false,
        italic: false,
        align: HAlign::Center,
        indent: 0.0,
        space_after: 4.0,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Keep `\n` as a hard break, turn tabs into spaces, drop every other
/// control character.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::build_recipe;
    use crate::samples;
    use chrono::TimeZone;

    fn flow(request: &crate::model::CertificateRequest) -> DocumentFlow {
        let generated_at = chrono::Local
            .with_ymd_and_hms(2024, 6, 10, 9, 0, 0)
            .unwrap();
        let recipe = build_recipe(&samples::sample_practitioner(), request, generated_at);
        let fonts = FontManager::new();
        flow_certificate(
            &samples::sample_organization(),
            &samples::sample_practitioner(),
            &recipe,
            515.28,
            &fonts,
        )
    }

    #[test]
    fn boxes_flow_downward_without_overlap() {
        for request in samples::all_sample_requests() {
            let flow = flow(&request);
            let mut last_bottom = 0.0f32;
            for lbox in &flow.body {
                assert!(lbox.y + 0.01 >= last_bottom, "box at y={} overlaps", lbox.y);
                last_bottom = lbox.y + lbox.height;
            }
        }
    }

    #[test]
    fn header_produces_rule_and_centered_name() {
        let flow = flow(&samples::sample_general_medical());
        assert!(flow.body.iter().any(|b| b.rule.is_some()));
        let name_box = flow.body.first().expect("header name box");
        let text = name_box.text.as_ref().unwrap();
        assert!(text.bold);
        assert!((text.font_size - 20.0).abs() < f32::EPSILON);
        assert!(text.lines[0].x_offset > 0.0, "name should be centred");
    }

    #[test]
    fn signature_block_is_kept_together() {
        let flow = flow(&samples::sample_general_medical());
        assert!(flow.body.iter().any(|b| b.keep_with_next));
    }

    #[test]
    fn footer_lines_are_italic_and_centered() {
        let flow = flow(&samples::sample_driving_fitness());
        assert_eq!(flow.footer.len(), 2, "Form 1A has a two-line footer");
        for lbox in &flow.footer {
            let text = lbox.text.as_ref().unwrap();
            assert!(text.italic);
            assert!((text.font_size - 8.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn control_characters_are_stripped() {
        assert_eq!(clean_text("Viral\u{0007} Fever\r"), "Viral Fever");
        assert_eq!(clean_text("line one\nline two"), "line one\nline two");
    }
}
