use super::types::{Highlight, HighlightGroup, PixelBox};

/// Unit-square rectangle relative to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale a pixel box by the page size and clamp it inside `[0,1]²`.
///
/// x and y are clamped first; width and height are then clamped against the
/// clamped origin, so `x + width <= 1` and `y + height <= 1` always hold.
pub fn normalize_box(bbox: &PixelBox, page_width: f64, page_height: f64) -> UnitRect {
    let x = clamp(bbox.min_x / page_width, 1.0);
    let y = clamp(bbox.min_y / page_height, 1.0);
    let width = clamp(bbox.width() / page_width, 1.0 - x);
    let height = clamp(bbox.height() / page_height, 1.0 - y);

    UnitRect {
        x,
        y,
        width,
        height,
    }
}

/// NaN reads as 0.
fn clamp(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Build the output highlight for one group.
pub fn to_highlight(group: &HighlightGroup, page_width: f64, page_height: f64) -> Highlight {
    let rect = normalize_box(&group.bbox, page_width, page_height);
    Highlight {
        id: group.id(),
        text: group.text(),
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    }
}

/// Normalize every group, preserving order. Never drops a group.
pub fn normalize_groups(
    groups: &[HighlightGroup],
    page_width: f64,
    page_height: f64,
) -> Vec<Highlight> {
    groups
        .iter()
        .map(|g| to_highlight(g, page_width, page_height))
        .collect()
}
