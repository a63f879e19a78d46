//! Highlight pipeline orchestrator.
//!
//! serialize → extract → resolve → group → normalize, for the first page of
//! a document. The extraction client is injected so the pipeline runs
//! against a mock in tests and against Ollama in production.

use serde::Serialize;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::pipeline::diagnostic;
use crate::pipeline::fields::{
    serialize_lines, FieldExtractionClient, FieldsOutcome, NoFieldsReason, StructuredLlmClient,
};
use crate::pipeline::highlight::{
    build_groups, normalize_groups, CoordinateResolver, Highlight, MemberOrder,
};
use crate::pipeline::ocr::{OcrError, OcrPage, OcrResult};

/// Tagged pipeline result: highlights, or why extraction produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Highlights { highlights: Vec<Highlight> },
    NoFields { reason: NoFieldsReason },
}

impl PipelineOutcome {
    /// Collapse to the plain list; `NoFields` reads as empty.
    pub fn into_highlights(self) -> Vec<Highlight> {
        match self {
            PipelineOutcome::Highlights { highlights } => highlights,
            PipelineOutcome::NoFields { .. } => Vec::new(),
        }
    }
}

pub struct HighlightPipeline {
    extractor: FieldExtractionClient,
    coordinate_tolerance_px: Option<f64>,
    member_order: MemberOrder,
}

impl HighlightPipeline {
    /// Exact coordinate matching, response-order labels.
    pub fn new(extractor: FieldExtractionClient) -> Self {
        Self {
            extractor,
            coordinate_tolerance_px: None,
            member_order: MemberOrder::ResponseOrder,
        }
    }

    pub fn from_config(
        llm: Box<dyn StructuredLlmClient + Send + Sync>,
        config: &PipelineConfig,
    ) -> Self {
        Self::new(FieldExtractionClient::new(llm, &config.model))
            .with_tolerance(config.coordinate_tolerance_px)
            .with_member_order(config.member_order)
    }

    pub fn with_tolerance(mut self, px: Option<f64>) -> Self {
        self.coordinate_tolerance_px = px;
        self
    }

    pub fn with_member_order(mut self, order: MemberOrder) -> Self {
        self.member_order = order;
        self
    }

    /// Highlights for one page; empty when extraction yields nothing.
    pub fn run(&self, page: &OcrPage) -> Vec<Highlight> {
        self.run_detailed(page).into_highlights()
    }

    /// Highlights for the first page of a document.
    pub fn run_document(&self, document: &OcrResult) -> Result<Vec<Highlight>, OcrError> {
        Ok(self.run(document.first_page()?))
    }

    /// Same as `run`, but says why nothing was found.
    pub fn run_detailed(&self, page: &OcrPage) -> PipelineOutcome {
        let run_id = Uuid::new_v4();
        let _span = tracing::info_span!(
            "highlight_pipeline",
            run_id = %run_id,
            words = page.words.len(),
        )
        .entered();

        let dump_dir = diagnostic::dump_dir_for(&run_id);
        if let Some(ref dir) = dump_dir {
            diagnostic::dump_json(
                dir,
                "00-page-info.json",
                &diagnostic::PageInfo::new(
                    run_id,
                    page.width,
                    page.height,
                    page.words.len(),
                    self.extractor.model_name(),
                ),
            );
        }

        let serialized = serialize_lines(&page.words);
        let trace = self.extractor.extract_traced(&serialized);

        if let Some(ref dir) = dump_dir {
            diagnostic::dump_text(dir, "01-serialized-lines.txt", &serialized);
            diagnostic::dump_text(dir, "02-prompt.txt", &trace.prompt);
            if let Some(ref raw) = trace.raw_response {
                diagnostic::dump_text(dir, "03-raw-response.txt", raw);
            }
        }

        let fields = match trace.outcome {
            FieldsOutcome::Found(fields) => fields,
            FieldsOutcome::NoFields(reason) => {
                tracing::info!(reason = ?reason, "No fields extracted; returning no highlights");
                return PipelineOutcome::NoFields { reason };
            }
        };

        if let Some(ref dir) = dump_dir {
            diagnostic::dump_json(dir, "04-fields.json", &fields);
        }

        let resolver =
            CoordinateResolver::new(&page.words).with_tolerance(self.coordinate_tolerance_px);
        let groups = build_groups(&fields, &resolver, self.member_order);
        let highlights = normalize_groups(&groups, page.width, page.height);

        tracing::info!(
            mentions = fields.total_mentions(),
            highlights = highlights.len(),
            "Highlight pipeline complete"
        );

        if let Some(ref dir) = dump_dir {
            diagnostic::dump_json(dir, "05-highlights.json", &highlights);
        }

        PipelineOutcome::Highlights { highlights }
    }
}
