//! Pipeline diagnostic dump — writes intermediate artifacts to disk.
//!
//! Disabled unless `VITALMARK_DUMP_DIR` is set. Each run writes:
//! ```text
//! {dump_dir}/{run_id}/
//!   00-page-info.json
//!   01-serialized-lines.txt
//!   02-prompt.txt
//!   03-raw-response.txt
//!   04-fields.json
//!   05-highlights.json
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

pub const ENV_DUMP_DIR: &str = "VITALMARK_DUMP_DIR";

/// Page metadata written at the start of a dumped run.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub run_id: Uuid,
    pub width: f64,
    pub height: f64,
    pub word_count: usize,
    pub model: String,
    pub dumped_at: String,
}

impl PageInfo {
    pub fn new(run_id: Uuid, width: f64, height: f64, word_count: usize, model: &str) -> Self {
        Self {
            run_id,
            width,
            height,
            word_count,
            model: model.to_string(),
            dumped_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn resolve_base_dir() -> Option<PathBuf> {
    std::env::var(ENV_DUMP_DIR)
        .ok()
        .filter(|d| !d.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns the dump directory for a run, or `None` if diagnostics are disabled.
///
/// Returns `None` (with a warning) if directory creation fails.
pub fn dump_dir_for(run_id: &Uuid) -> Option<PathBuf> {
    dump_dir_in(&resolve_base_dir()?, run_id)
}

/// Create `{base}/{run_id}/`.
pub fn dump_dir_in(base: &Path, run_id: &Uuid) -> Option<PathBuf> {
    let dir = base.join(run_id.to_string());

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(
            path = %dir.display(),
            error = %e,
            "Diagnostic dump: failed to create directory"
        );
        return None;
    }

    Some(dir)
}

/// Write a JSON artifact (pretty-printed). Never panics.
pub fn dump_json<T: Serialize>(dir: &Path, filename: &str, value: &T) {
    let path = dir.join(filename);
    match serde_json::to_string_pretty(value) {
        Ok(json) => write_logged(&path, json.as_bytes()),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to serialize JSON"
        ),
    }
}

/// Write a text artifact (prompt, raw LLM response). Never panics.
pub fn dump_text(dir: &Path, filename: &str, text: &str) {
    write_logged(&dir.join(filename), text.as_bytes());
}

fn write_logged(path: &Path, data: &[u8]) {
    match std::fs::write(path, data) {
        Ok(()) => tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Diagnostic dump: written"
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to write"
        ),
    }
}
