pub mod ocr; // Page Accessor
pub mod fields; // Line Serializer + Field Extraction Client
pub mod highlight; // Resolver, grouping, normalization
pub mod orchestrator;
pub mod diagnostic; // Per-run artifact dump (VITALMARK_DUMP_DIR)

pub use orchestrator::{HighlightPipeline, PipelineOutcome};
