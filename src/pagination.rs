//! Pagination – splits flowed boxes into A4 pages.
//!
//! Handles:
//! - page boundaries with the footer area reserved on every page
//! - keep-with-next chains (the signature block never splits)
//! - the disclaimer footer pinned to the bottom of each page

use crate::layout::{DocumentFlow, FlowBox};
use crate::layout_config::{DocumentLayout, LayoutBox, PageLayout};

/// Default page margin in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

/// Gap between the last body line allowed on a page and the footer block.
const FOOTER_GAP_PT: f32 = 12.0;

/// Convert a document flow into a paginated [`DocumentLayout`].
pub fn paginate(
    flow: &DocumentFlow,
    title: &str,
    page_width: f32,
    page_height: f32,
    page_margin: f32,
) -> DocumentLayout {
    let mut layout = DocumentLayout {
        title: title.to_string(),
        page_width_pt: page_width,
        page_height_pt: page_height,
        pages: Vec::new(),
    };

    let footer_height = flow
        .footer
        .iter()
        .map(|b| b.y + b.height)
        .fold(0.0f32, f32::max);
    let footer_top = page_height - page_margin - footer_height;
    let content_height = footer_top - page_margin - FOOTER_GAP_PT;

    let mut current = PageLayout {
        page_index: 0,
        boxes: Vec::new(),
    };
    // Document-space y at which the current page begins; `box.y - start`
    // gives the y-on-page for any box.
    let mut page_start = 0.0f32;

    for chunk in keep_chunks(&flow.body) {
        let chunk_top = chunk[0].y;
        let chunk_bottom = chunk.last().map(|b| b.y + b.height).unwrap_or(chunk_top);

        if chunk_bottom - page_start > content_height && !current.boxes.is_empty() {
            layout.pages.push(current);
            current = PageLayout {
                page_index: layout.pages.len(),
                boxes: Vec::new(),
            };
            page_start = chunk_top;
        }

        for fbox in chunk {
            current
                .boxes
                .push(to_layout_box(fbox, page_margin, fbox.y - page_start));
        }
    }

    if !current.boxes.is_empty() || layout.pages.is_empty() {
        layout.pages.push(current);
    }

    // Pin the footer to the bottom of every page.
    for page in &mut layout.pages {
        for fbox in &flow.footer {
            page.boxes
                .push(to_layout_box(fbox, page_margin, footer_top - page_margin + fbox.y));
        }
    }

    layout
}

/// Group boxes into runs that must land on the same page: a box flagged
/// `keep_with_next` is glued to its successor.
fn keep_chunks(boxes: &[FlowBox]) -> Vec<&[FlowBox]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, fbox) in boxes.iter().enumerate() {
        if !fbox.keep_with_next {
            chunks.push(&boxes[start..=i]);
            start = i + 1;
        }
    }
    if start < boxes.len() {
        chunks.push(&boxes[start..]);
    }
    chunks
}

fn to_layout_box(fbox: &FlowBox, page_margin: f32, y_on_page: f32) -> LayoutBox {
    let mut lbox = LayoutBox::new(
        page_margin + fbox.x,
        page_margin + y_on_page.max(0.0),
        fbox.width,
        fbox.height,
    );
    lbox.text = fbox.text.clone();
    lbox.rule = fbox.rule.clone();
    lbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_config::{RuleStyle, TextContent, TextLine};

    fn text_box(y: f32, height: f32, label: &str, keep: bool) -> FlowBox {
        FlowBox {
            x: 0.0,
            y,
            width: 515.0,
            height,
            text: Some(TextContent {
                lines: vec![TextLine {
                    text: label.to_string(),
                    x_offset: 0.0,
                    y_offset: 0.0,
                }],
                font_size: 11.0,
                bold: false,
                italic: false,
                line_height: 15.4,
            }),
            rule: None,
            keep_with_next: keep,
        }
    }

    fn footer_box() -> FlowBox {
        FlowBox {
            x: 0.0,
            y: 0.0,
            width: 515.0,
            height: 11.2,
            text: Some(TextContent {
                lines: vec![TextLine {
                    text: "disclaimer".to_string(),
                    x_offset: 100.0,
                    y_offset: 0.0,
                }],
                font_size: 8.0,
                bold: false,
                italic: true,
                line_height: 11.2,
            }),
            rule: None,
            keep_with_next: false,
        }
    }

    #[test]
    fn short_flow_is_one_page() {
        let flow = DocumentFlow {
            body: vec![text_box(0.0, 20.0, "a", false), text_box(30.0, 20.0, "b", false)],
            footer: vec![footer_box()],
        };
        let layout = paginate(&flow, "t", 595.28, 841.89, PAGE_MARGIN_PT);
        assert_eq!(layout.pages.len(), 1);
        // body boxes + pinned footer
        assert_eq!(layout.pages[0].boxes.len(), 3);
    }

    #[test]
    fn overflow_starts_a_new_page_with_footer_on_both() {
        let mut body = Vec::new();
        let mut y = 0.0;
        for i in 0..60 {
            body.push(text_box(y, 20.0, &format!("p{i}"), false));
            y += 28.0;
        }
        let flow = DocumentFlow {
            body,
            footer: vec![footer_box()],
        };
        let layout = paginate(&flow, "t", 595.28, 841.89, PAGE_MARGIN_PT);
        assert!(layout.pages.len() > 1, "expected overflow onto a second page");
        for page in &layout.pages {
            assert!(
                page.boxes
                    .iter()
                    .any(|b| b.text.as_ref().is_some_and(|t| t.italic)),
                "every page carries the pinned footer"
            );
        }
    }

    #[test]
    fn keep_chain_moves_as_one_unit() {
        // Fill most of a page, then a three-box chain that cannot fit.
        let mut body = vec![text_box(0.0, 680.0, "big", false)];
        body.push(text_box(690.0, 20.0, "sig-name", true));
        body.push(text_box(712.0, 20.0, "sig-qual", true));
        body.push(text_box(734.0, 20.0, "sig-reg", false));
        let flow = DocumentFlow {
            body,
            footer: vec![footer_box()],
        };
        let layout = paginate(&flow, "t", 595.28, 841.89, PAGE_MARGIN_PT);
        assert_eq!(layout.pages.len(), 2);
        // All three signature boxes are on page 2.
        let texts: Vec<_> = layout.pages[1]
            .boxes
            .iter()
            .filter_map(|b| b.text.as_ref())
            .flat_map(|t| t.lines.iter().map(|l| l.text.clone()))
            .collect();
        assert!(texts.iter().filter(|t| t.starts_with("sig-")).count() == 3);
    }

    #[test]
    fn rule_boxes_survive_pagination() {
        let flow = DocumentFlow {
            body: vec![FlowBox {
                x: 0.0,
                y: 0.0,
                width: 515.0,
                height: 2.0,
                text: None,
                rule: Some(RuleStyle { thickness: 0.7 }),
                keep_with_next: false,
            }],
            footer: Vec::new(),
        };
        let layout = paginate(&flow, "t", 595.28, 841.89, PAGE_MARGIN_PT);
        assert!(layout.pages[0].boxes[0].rule.is_some());
    }
}
