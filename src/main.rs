use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use vitalmark_lib::config::PipelineConfig;
use vitalmark_lib::pipeline::fields::{MockLlmClient, OllamaClient, StructuredLlmClient};
use vitalmark_lib::pipeline::highlight::MemberOrder;
use vitalmark_lib::pipeline::ocr::load_ocr_result;
use vitalmark_lib::HighlightPipeline;

#[derive(Parser, Debug)]
#[command(
    name = "vitalmark",
    version,
    about = "Locate record fields in an OCR result and print page highlights as JSON"
)]
struct Cli {
    /// OCR result JSON for the scanned record.
    #[arg(long)]
    ocr: PathBuf,

    /// Extraction model (overrides VITALMARK_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Ollama base URL, localhost only (overrides VITALMARK_OLLAMA_URL).
    #[arg(long)]
    ollama_url: Option<String>,

    /// Request timeout in seconds (overrides VITALMARK_TIMEOUT_SECS).
    #[arg(long)]
    timeout: Option<u64>,

    /// Pixel tolerance for near-miss coordinates (overrides VITALMARK_COORD_TOLERANCE).
    #[arg(long)]
    tolerance: Option<f64>,

    /// Order label words top-to-bottom, left-to-right.
    #[arg(long, default_value_t = false)]
    reading_order: bool,

    /// Replay a saved model response instead of calling Ollama.
    #[arg(long)]
    response: Option<PathBuf>,

    /// Print the tagged outcome (with the no-fields reason) instead of the bare list.
    #[arg(long, default_value_t = false)]
    detailed: bool,
}

fn main() {
    vitalmark_lib::init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = apply_overrides(PipelineConfig::from_env(), &cli);

    let document = load_ocr_result(&cli.ocr)
        .with_context(|| format!("loading OCR result from {}", cli.ocr.display()))?;
    let page = document.first_page().context("reading first OCR page")?;

    let llm: Box<dyn StructuredLlmClient + Send + Sync> = match &cli.response {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading saved response {}", path.display()))?;
            Box::new(MockLlmClient::new(&raw))
        }
        None => {
            let client = OllamaClient::new(&config.ollama_url, config.timeout_secs)
                .context("configuring Ollama client")?;
            match client.is_model_available(&config.model) {
                Ok(true) => {}
                Ok(false) => tracing::warn!(model = %config.model, "Model not installed in Ollama"),
                Err(e) => tracing::warn!(error = %e, "Could not list Ollama models"),
            }
            Box::new(client)
        }
    };

    let pipeline = HighlightPipeline::from_config(llm, &config);
    let outcome = pipeline.run_detailed(page);

    let json = if cli.detailed {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome.into_highlights())?
    };
    println!("{json}");

    Ok(())
}

fn apply_overrides(mut config: PipelineConfig, cli: &Cli) -> PipelineConfig {
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(url) = &cli.ollama_url {
        config.ollama_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.tolerance.is_some() {
        config.coordinate_tolerance_px = cli.tolerance;
    }
    if cli.reading_order {
        config.member_order = MemberOrder::ReadingOrder;
    }
    config
}
