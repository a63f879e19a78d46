pub mod types;
pub mod serializer;
pub mod schema;
pub mod prompt;
pub mod parser;
pub mod ollama;
pub mod ollama_types;
pub mod client;

pub use types::*;
pub use serializer::*;
pub use schema::*;
pub use prompt::*;
pub use parser::*;
pub use ollama::*;
pub use ollama_types::*;
pub use client::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldsError {
    #[error("Ollama is not running at {0}")]
    OllamaConnection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    OllamaError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Extraction model returned no text")]
    EmptyResponse,

    #[error("Extraction response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Extraction response does not match the field schema: {0}")]
    SchemaMismatch(String),
}
