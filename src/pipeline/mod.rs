pub mod chunker; // Line-bounded chunking for completion requests
pub mod normalize; // State and total canonicalization
pub mod schema; // Schema gate for completion output
pub mod completion; // Completion capability (OpenAI-compatible chat endpoint)
pub mod order_source; // Upstream order listing over HTTP
pub mod prompt;
pub mod intent; // Stage 1: user query -> Intent
pub mod fetch; // Stage 2: order source -> raw text
pub mod extraction; // Stage 3: raw text -> candidate orders
pub mod filter; // Stage 4: candidates + intent -> final orders
pub mod orchestrator;

pub use chunker::*;
pub use completion::*;
pub use normalize::*;
pub use order_source::*;
pub use orchestrator::*;
pub use schema::*;

use thiserror::Error;

/// Failures of the completion capability.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion endpoint unreachable at {0}")]
    Connection(String),

    #[error("Completion request timed out")]
    Timeout,

    #[error("Completion endpoint returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed completion envelope: {0}")]
    ResponseParsing(String),

    #[error("Completion returned no choices")]
    EmptyChoices,
}

/// Failures of the upstream order source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid order endpoint: {0}")]
    InvalidUrl(String),

    #[error("Order source unreachable at {0}")]
    Connection(String),

    #[error("Order request timed out after {0}s")]
    Timeout(u64),

    #[error("Order source returned error (status {status})")]
    Status { status: u16 },

    #[error("Failed to read order response body: {0}")]
    Body(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Why a stage could not use a completion result.
#[derive(Error, Debug)]
pub enum StageFailure {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("schema gate rejected output: {0}")]
    Rejected(#[from] Rejection),
}
