use serde::{Deserialize, Serialize};

use crate::pipeline::fields::FieldCategory;
use crate::pipeline::ocr::OcrWord;

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PixelBox {
    /// Union box over every corner of every word.
    ///
    /// Words without a usable polygon contribute their (defaulted) top-left
    /// point so a group is never without geometry.
    pub fn union_of<'a, I>(words: I) -> Option<PixelBox>
    where
        I: IntoIterator<Item = &'a OcrWord>,
    {
        let mut bbox: Option<PixelBox> = None;
        for word in words {
            let mut saw_corner = false;
            for (x, y) in word.corners() {
                saw_corner = true;
                bbox = Some(extend(bbox, x, y));
            }
            if !saw_corner {
                let (x, y) = word.top_left();
                bbox = Some(extend(bbox, x, y));
            }
        }
        bbox
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn extend(bbox: Option<PixelBox>, x: f64, y: f64) -> PixelBox {
    match bbox {
        None => PixelBox {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        },
        Some(b) => PixelBox {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        },
    }
}

/// Order of words inside one group's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberOrder {
    /// As listed by the extraction model.
    #[default]
    ResponseOrder,
    /// By the matched word's top-left corner: y, then x.
    ReadingOrder,
}

/// One semantic value: the words of a `(category, group_id)` pair and
/// their pixel union box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightGroup {
    pub category: FieldCategory,
    pub group_id: i64,
    pub words: Vec<String>,
    pub bbox: PixelBox,
}

impl HighlightGroup {
    /// `h-<categoryKey>-g-<groupId>`; stable across runs.
    pub fn id(&self) -> String {
        format!("h-{}-g-{}", self.category.key(), self.group_id)
    }

    /// `<Label>: <words joined by a space>`.
    pub fn text(&self) -> String {
        format!("{}: {}", self.category.label(), self.words.join(" "))
    }
}

/// A labeled rectangle in unit-square page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
