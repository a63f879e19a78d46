use crate::pipeline::ocr::OcrWord;

/// Render words as `content:x, y` lines (top-left corner), one per word,
/// in the order given. No filtering or deduplication.
pub fn serialize_lines(words: &[OcrWord]) -> String {
    words
        .iter()
        .map(serialize_word)
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_word(word: &OcrWord) -> String {
    let (x, y) = word.top_left();
    format!("{}:{}, {}", word.content, x + 0.0, y + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(content: &str, x: f64, y: f64) -> OcrWord {
        OcrWord::new(content, [x, y, x + 10.0, y, x + 10.0, y + 5.0, x, y + 5.0])
    }

    #[test]
    fn one_line_per_word_in_order() {
        let words = vec![word("JOHN", 10.0, 20.0), word("DOE", 70.0, 20.0)];
        assert_eq!(serialize_lines(&words), "JOHN:10, 20\nDOE:70, 20");
    }

    #[test]
    fn fractional_coordinates_keep_precision() {
        let words = vec![word("1901", 12.5, 300.25)];
        assert_eq!(serialize_lines(&words), "1901:12.5, 300.25");
    }

    #[test]
    fn duplicates_are_kept() {
        let words = vec![word("A", 1.0, 1.0), word("A", 1.0, 1.0)];
        assert_eq!(serialize_lines(&words).lines().count(), 2);
    }

    #[test]
    fn empty_word_list_is_empty_text() {
        assert_eq!(serialize_lines(&[]), "");
    }

    #[test]
    fn serialization_is_stable() {
        let words = vec![word("B", 5.0, 1.0), word("A", 1.0, 5.0)];
        assert_eq!(serialize_lines(&words), serialize_lines(&words));
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        let words = vec![word("DOE", -0.0, 20.0)];
        assert_eq!(serialize_lines(&words), "DOE:0, 20");
    }

    #[test]
    fn missing_polygon_serializes_origin() {
        let words = vec![OcrWord {
            content: "X".into(),
            polygon: vec![],
        }];
        assert_eq!(serialize_lines(&words), "X:0, 0");
    }
}
