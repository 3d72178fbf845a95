use super::chunker::LineChunker;
use super::completion::CompletionClient;
use super::prompt::build_extraction_prompt;
use super::schema::{gated_completion, OrdersEnvelope};
use crate::models::CandidateOrder;

/// What the extraction stage produced, plus per-chunk bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOutcome {
    /// Candidates in first-seen order, not deduplicated.
    pub orders: Vec<CandidateOrder>,
    pub chunks_total: usize,
    pub chunks_rejected: usize,
    /// Whitespace-only chunks never sent to the completion capability.
    pub chunks_blank: usize,
}

/// Stage 3: turn the raw order listing into candidate orders.
///
/// Each chunk gets exactly one completion call, in order. A chunk whose call
/// fails or whose output is rejected contributes nothing; the remaining
/// chunks are still processed.
pub fn extract_orders(
    llm: &dyn CompletionClient,
    raw_text: &str,
    chunker: &LineChunker,
) -> ExtractionOutcome {
    tracing::info!("Extracting structured orders");

    let chunks = chunker.chunk(raw_text);
    let initial = ExtractionOutcome {
        chunks_total: chunks.len(),
        ..ExtractionOutcome::default()
    };

    let outcome = chunks
        .iter()
        .enumerate()
        .fold(initial, |mut outcome, (chunk_index, chunk)| {
            if chunk.trim().is_empty() {
                outcome.chunks_blank += 1;
                return outcome;
            }

            let prompt = build_extraction_prompt(chunk);
            match gated_completion::<OrdersEnvelope>(llm, &prompt) {
                Ok(envelope) => {
                    tracing::debug!(
                        chunk_index,
                        orders = envelope.orders.len(),
                        "Chunk extracted"
                    );
                    outcome.orders.extend(envelope.orders);
                }
                Err(e) => {
                    tracing::warn!(chunk_index, error = %e, "Order extraction failed for chunk");
                    outcome.chunks_rejected += 1;
                }
            }
            outcome
        });

    tracing::info!(
        chunks = outcome.chunks_total,
        rejected = outcome.chunks_rejected,
        candidates = outcome.orders.len(),
        "Extraction complete"
    );

    outcome
}
