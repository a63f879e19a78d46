use std::collections::HashMap;

use crate::pipeline::fields::FieldMention;
use crate::pipeline::ocr::OcrWord;

/// Join key for a top-left corner: `"x,y"`.
///
/// Negative zero renders as `0` so that `-0` and `0` share a key.
pub fn coordinate_key(x: f64, y: f64) -> String {
    format!("{},{}", x + 0.0, y + 0.0)
}

/// A mention paired with the OCR word it points at.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMention<'a> {
    pub mention: &'a FieldMention,
    pub word: &'a OcrWord,
}

/// Maps model mentions back to OCR words by exact top-left coordinate.
///
/// Two words with the same top-left corner collide; the later one wins.
pub struct CoordinateResolver<'a> {
    words: &'a [OcrWord],
    by_key: HashMap<String, &'a OcrWord>,
    tolerance_px: Option<f64>,
}

impl<'a> CoordinateResolver<'a> {
    pub fn new(words: &'a [OcrWord]) -> Self {
        let mut by_key = HashMap::with_capacity(words.len());
        for word in words {
            let (x, y) = word.top_left();
            by_key.insert(coordinate_key(x, y), word);
        }
        Self {
            words,
            by_key,
            tolerance_px: None,
        }
    }

    /// Enable the nearest-word fallback for coordinates that miss the exact
    /// key by at most `px` pixels. Only words whose content equals the
    /// mention's word are candidates.
    pub fn with_tolerance(mut self, px: Option<f64>) -> Self {
        self.tolerance_px = px.filter(|p| p.is_finite() && *p >= 0.0);
        self
    }

    pub fn resolve(&self, mention: &'a FieldMention) -> Option<ResolvedMention<'a>> {
        let [x, y] = mention.coordinate;
        let word = self
            .by_key
            .get(&coordinate_key(x, y))
            .copied()
            .or_else(|| self.nearest_same_content(mention))?;

        if word.content != mention.word {
            tracing::debug!(
                mention = %mention.word,
                ocr = %word.content,
                "Mention text differs from matched OCR word; keeping OCR geometry"
            );
        }

        Some(ResolvedMention { mention, word })
    }

    /// Resolve in order, dropping mentions that match no word.
    pub fn resolve_all(&self, mentions: &'a [FieldMention]) -> Vec<ResolvedMention<'a>> {
        mentions
            .iter()
            .filter_map(|m| {
                let resolved = self.resolve(m);
                if resolved.is_none() {
                    tracing::debug!(
                        word = %m.word,
                        x = m.coordinate[0],
                        y = m.coordinate[1],
                        "Dropping mention with no matching OCR word"
                    );
                }
                resolved
            })
            .collect()
    }

    fn nearest_same_content(&self, mention: &FieldMention) -> Option<&'a OcrWord> {
        let tolerance = self.tolerance_px?;
        let [mx, my] = mention.coordinate;

        let words: &'a [OcrWord] = self.words;
        let mut best: Option<(f64, &'a OcrWord)> = None;
        for word in words.iter().filter(|w| w.content == mention.word) {
            let (x, y) = word.top_left();
            let distance = ((x - mx).powi(2) + (y - my).powi(2)).sqrt();
            if distance > tolerance {
                continue;
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, word));
            }
        }
        best.map(|(_, word)| word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(content: &str, x: f64, y: f64) -> OcrWord {
        OcrWord::new(content, [x, y, x + 40.0, y, x + 40.0, y + 20.0, x, y + 20.0])
    }

    fn mention(word: &str, x: f64, y: f64) -> FieldMention {
        FieldMention {
            word: word.into(),
            coordinate: [x, y],
            group_id: 1,
        }
    }

    #[test]
    fn key_format() {
        assert_eq!(coordinate_key(10.0, 20.0), "10,20");
        assert_eq!(coordinate_key(10.5, 0.25), "10.5,0.25");
    }

    #[test]
    fn negative_zero_shares_the_zero_key() {
        assert_eq!(coordinate_key(-0.0, 20.0), coordinate_key(0.0, 20.0));

        let words = vec![word("DOE", 0.0, 20.0)];
        let resolver = CoordinateResolver::new(&words);
        let m = mention("DOE", -0.0, 20.0);
        assert_eq!(resolver.resolve(&m).unwrap().word.content, "DOE");
    }

    #[test]
    fn exact_coordinate_resolves() {
        let words = vec![word("JOHN", 10.0, 20.0), word("DOE", 70.0, 20.0)];
        let resolver = CoordinateResolver::new(&words);
        let m = mention("DOE", 70.0, 20.0);
        let resolved = resolver.resolve(&m).unwrap();
        assert_eq!(resolved.word.content, "DOE");
    }

    #[test]
    fn unknown_coordinate_is_dropped() {
        let words = vec![word("JOHN", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words);
        let mentions = vec![mention("JOHN", 10.0, 20.0), mention("GHOST", 11.0, 20.0)];
        let resolved = resolver.resolve_all(&mentions);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].mention.word, "JOHN");
    }

    #[test]
    fn duplicate_top_left_last_write_wins() {
        let words = vec![word("FIRST", 5.0, 5.0), word("SECOND", 5.0, 5.0)];
        let resolver = CoordinateResolver::new(&words);
        let m = mention("FIRST", 5.0, 5.0);
        assert_eq!(resolver.resolve(&m).unwrap().word.content, "SECOND");
    }

    #[test]
    fn mismatched_text_is_accepted() {
        let words = vec![word("D0E", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words);
        let m = mention("DOE", 10.0, 20.0);
        assert_eq!(resolver.resolve(&m).unwrap().word.content, "D0E");
    }

    #[test]
    fn no_tolerance_means_exact_only() {
        let words = vec![word("DOE", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words);
        let m = mention("DOE", 10.5, 20.0);
        assert!(resolver.resolve(&m).is_none());
    }

    #[test]
    fn tolerance_picks_nearest_same_content_word() {
        let words = vec![
            word("DOE", 10.0, 20.0),
            word("DOE", 12.0, 20.0),
            word("SMITH", 11.0, 20.0),
        ];
        let resolver = CoordinateResolver::new(&words).with_tolerance(Some(3.0));
        let m = mention("DOE", 11.6, 20.0);
        let resolved = resolver.resolve(&m).unwrap();
        assert_eq!(resolved.word.top_left(), (12.0, 20.0));
    }

    #[test]
    fn tolerance_requires_equal_content() {
        let words = vec![word("SMITH", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words).with_tolerance(Some(5.0));
        let m = mention("DOE", 11.0, 20.0);
        assert!(resolver.resolve(&m).is_none());
    }

    #[test]
    fn tolerance_is_a_hard_bound() {
        let words = vec![word("DOE", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words).with_tolerance(Some(1.0));
        let m = mention("DOE", 13.0, 24.0);
        assert!(resolver.resolve(&m).is_none());
    }

    #[test]
    fn negative_tolerance_is_ignored() {
        let words = vec![word("DOE", 10.0, 20.0)];
        let resolver = CoordinateResolver::new(&words).with_tolerance(Some(-4.0));
        let m = mention("DOE", 11.0, 20.0);
        assert!(resolver.resolve(&m).is_none());
    }
}
