use std::path::Path;

use super::types::OcrResult;
use super::OcrError;

/// OCR provider abstraction (allows swapping the external engine and mocking).
pub trait OcrProvider {
    fn analyze(&self, image_bytes: &[u8]) -> Result<OcrResult, OcrError>;
}

/// Read a provider JSON payload from disk.
pub fn load_ocr_result(path: &Path) -> Result<OcrResult, OcrError> {
    if !path.exists() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    let result = OcrResult::from_json(&json)?;

    tracing::debug!(
        path = %path.display(),
        pages = result.pages.len(),
        "Loaded OCR result"
    );

    Ok(result)
}

/// Provider that replays an OCR result computed ahead of time.
/// The image bytes are not inspected.
pub struct PrecomputedOcr {
    result: OcrResult,
}

impl PrecomputedOcr {
    pub fn new(result: OcrResult) -> Self {
        Self { result }
    }
}

impl OcrProvider for PrecomputedOcr {
    fn analyze(&self, _image_bytes: &[u8]) -> Result<OcrResult, OcrError> {
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{"page": {"width": 200, "height": 400},
        "words": [{"content": "DOE", "polygon": [10,20,60,20,60,40,10,40]}]}"#;

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let result = load_ocr_result(file.path()).unwrap();
        assert_eq!(result.first_page().unwrap().words[0].content, "DOE");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_ocr_result(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, OcrError::NotFound(_)));
    }

    #[test]
    fn precomputed_provider_replays_result() {
        let provider = PrecomputedOcr::new(OcrResult::from_json(SAMPLE).unwrap());
        let result = provider.analyze(b"ignored").unwrap();
        assert_eq!(result.pages.len(), 1);
    }

    #[test]
    fn provider_is_object_safe() {
        fn _assert(_: &dyn OcrProvider) {}
    }
}
