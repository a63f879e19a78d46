use serde::{Deserialize, Serialize};

use super::OcrError;

/// Word-level OCR result for a whole document, as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResult {
    pub pages: Vec<OcrPage>,
}

/// One OCR page: pixel dimensions plus words in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

/// A recognized token and its bounding quadrilateral.
///
/// `polygon` holds 4 corner (x, y) pairs in pixel space, starting at the
/// top-left corner and going clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub content: String,
    #[serde(default)]
    pub polygon: Vec<f64>,
}

/// Accepted wire shapes: a multi-page `{pages: [...]}` result or the
/// single-page `{page: {width, height}, words: [...]}` form.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOcrResult {
    Paged {
        pages: Vec<OcrPage>,
    },
    Single {
        page: RawPageSize,
        #[serde(default)]
        words: Vec<OcrWord>,
    },
}

#[derive(Deserialize)]
struct RawPageSize {
    width: f64,
    height: f64,
}

impl OcrResult {
    pub fn new(pages: Vec<OcrPage>) -> Self {
        Self { pages }
    }

    /// Parse a provider JSON payload.
    pub fn from_json(json: &str) -> Result<Self, OcrError> {
        let raw: RawOcrResult =
            serde_json::from_str(json).map_err(|e| OcrError::JsonParsing(e.to_string()))?;

        let pages = match raw {
            RawOcrResult::Paged { pages } => pages,
            RawOcrResult::Single { page, words } => vec![OcrPage {
                width: page.width,
                height: page.height,
                words,
            }],
        };

        Ok(Self { pages })
    }

    /// The only page the pipeline looks at. Later pages are ignored.
    pub fn first_page(&self) -> Result<&OcrPage, OcrError> {
        let page = self.pages.first().ok_or(OcrError::NoPages)?;
        page.validate()?;
        Ok(page)
    }
}

impl OcrPage {
    pub fn new(width: f64, height: f64, words: Vec<OcrWord>) -> Self {
        Self {
            width,
            height,
            words,
        }
    }

    /// Page dimensions must be positive and finite; they are the divisors
    /// of every normalized coordinate.
    pub fn validate(&self) -> Result<(), OcrError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(OcrError::InvalidPage {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl OcrWord {
    pub fn new(content: &str, polygon: [f64; 8]) -> Self {
        Self {
            content: content.to_string(),
            polygon: polygon.to_vec(),
        }
    }

    /// Top-left corner. Missing coordinates read as 0.
    pub fn top_left(&self) -> (f64, f64) {
        (
            self.polygon.first().copied().unwrap_or(0.0),
            self.polygon.get(1).copied().unwrap_or(0.0),
        )
    }

    /// Complete (x, y) corner pairs of the quadrilateral.
    pub fn corners(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.polygon.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paged_shape() {
        let json = r#"{
            "pages": [
                {"width": 200, "height": 400, "words": [
                    {"content": "DOE", "polygon": [10,20,60,20,60,40,10,40]}
                ]},
                {"width": 100, "height": 100, "words": []}
            ]
        }"#;
        let result = OcrResult::from_json(json).unwrap();
        assert_eq!(result.pages.len(), 2);

        let page = result.first_page().unwrap();
        assert_eq!(page.width, 200.0);
        assert_eq!(page.words[0].content, "DOE");
        assert_eq!(page.words[0].top_left(), (10.0, 20.0));
    }

    #[test]
    fn parses_single_page_shape() {
        let json = r#"{
            "page": {"width": 850, "height": 1100},
            "words": [{"content": "SMITH", "polygon": [1,2,3,2,3,4,1,4]}]
        }"#;
        let result = OcrResult::from_json(json).unwrap();
        let page = result.first_page().unwrap();
        assert_eq!(page.height, 1100.0);
        assert_eq!(page.words.len(), 1);
    }

    #[test]
    fn empty_pages_is_an_error() {
        let result = OcrResult::from_json(r#"{"pages": []}"#).unwrap();
        assert!(matches!(result.first_page(), Err(OcrError::NoPages)));
    }

    #[test]
    fn zero_width_page_rejected() {
        let result = OcrResult::new(vec![OcrPage::new(0.0, 100.0, vec![])]);
        assert!(matches!(
            result.first_page(),
            Err(OcrError::InvalidPage { .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = OcrResult::from_json("{not json").unwrap_err();
        assert!(matches!(err, OcrError::JsonParsing(_)));
    }

    #[test]
    fn missing_polygon_defaults_top_left_to_origin() {
        let word = OcrWord {
            content: "X".into(),
            polygon: vec![],
        };
        assert_eq!(word.top_left(), (0.0, 0.0));
        assert_eq!(word.corners().count(), 0);
    }

    #[test]
    fn corners_pairs_up_polygon() {
        let word = OcrWord::new("A", [1.0, 2.0, 3.0, 2.0, 3.0, 5.0, 1.0, 5.0]);
        let corners: Vec<_> = word.corners().collect();
        assert_eq!(corners, vec![(1.0, 2.0), (3.0, 2.0), (3.0, 5.0), (1.0, 5.0)]);
    }

    #[test]
    fn odd_trailing_coordinate_is_ignored() {
        let word = OcrWord {
            content: "A".into(),
            polygon: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(word.corners().count(), 1);
    }
}
