use serde::{Deserialize, Serialize};

use crate::pipeline::highlight::MemberOrder;

/// Local Ollama endpoint used when nothing else is configured.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Structured-output capable model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Extraction request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variables read by `PipelineConfig::from_env`.
pub const ENV_OLLAMA_URL: &str = "VITALMARK_OLLAMA_URL";
pub const ENV_MODEL: &str = "VITALMARK_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "VITALMARK_TIMEOUT_SECS";
pub const ENV_COORD_TOLERANCE: &str = "VITALMARK_COORD_TOLERANCE";

/// True for debug builds.
pub fn is_dev() -> bool {
    cfg!(debug_assertions)
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if is_dev() {
        "vitalmark_lib=debug,vitalmark=debug,info"
    } else {
        "vitalmark_lib=info,vitalmark=info,warn"
    }
}

/// Settings for one highlight pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Ollama base URL (localhost only).
    pub ollama_url: String,
    /// Model used for field extraction.
    pub model: String,
    /// HTTP timeout for the extraction call.
    pub timeout_secs: u64,
    /// Pixel tolerance for the nearest-word fallback. `None` = exact match only.
    pub coordinate_tolerance_px: Option<f64>,
    /// Order of words inside a highlight label.
    pub member_order: MemberOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            coordinate_tolerance_px: None,
            member_order: MemberOrder::ResponseOrder,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `VITALMARK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup.
    /// Unparseable numeric values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_OLLAMA_URL).filter(|v| !v.trim().is_empty()) {
            config.ollama_url = url.trim().to_string();
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!(
                    var = ENV_TIMEOUT_SECS,
                    value = %raw,
                    "Ignoring invalid timeout"
                ),
            }
        }
        if let Some(raw) = lookup(ENV_COORD_TOLERANCE) {
            match raw.trim().parse::<f64>() {
                Ok(px) if px.is_finite() && px >= 0.0 => {
                    config.coordinate_tolerance_px = Some(px)
                }
                _ => tracing::warn!(
                    var = ENV_COORD_TOLERANCE,
                    value = %raw,
                    "Ignoring invalid coordinate tolerance"
                ),
            }
        }

        config
    }
}
