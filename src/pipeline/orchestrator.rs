//! Order pipeline orchestrator.
//!
//! Drives the fixed linear sequence:
//! parse intent → fetch orders → extract candidates → filter.
//!
//! Uses trait-based DI for both external collaborators (`CompletionClient`,
//! `OrderSource`) so the orchestrator stays testable with fakes. It holds no
//! business logic: every stage returns its output by value and the
//! orchestrator binds each field of the state exactly once.

use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

use super::chunker::LineChunker;
use super::completion::{CompletionClient, OpenAiCompatClient};
use super::extraction::extract_orders;
use super::fetch::fetch_orders;
use super::filter::{filter_orders, DropCounts};
use super::intent::parse_intent;
use super::order_source::{HttpOrderSource, OrderSource};
use super::{CompletionError, FetchError};
use crate::config::{CompletionSettings, OrderSourceSettings};
use crate::models::{CandidateOrder, FinalOrder, Intent};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The record threaded through one run. Read-only once built.
#[derive(Debug, Clone)]
pub struct PipelineState {
    user_query: String,
    intent: Intent,
    raw_text: String,
    candidate_orders: Vec<CandidateOrder>,
    final_orders: Vec<FinalOrder>,
}

impl PipelineState {
    pub fn user_query(&self) -> &str {
        &self.user_query
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn candidate_orders(&self) -> &[CandidateOrder] {
        &self.candidate_orders
    }

    pub fn final_orders(&self) -> &[FinalOrder] {
        &self.final_orders
    }

    pub fn into_final_orders(self) -> Vec<FinalOrder> {
        self.final_orders
    }
}

/// The four stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    ParseIntent,
    FetchOrders,
    ExtractOrders,
    FilterOrders,
}

impl PipelineStage {
    pub const SEQUENCE: [PipelineStage; 4] = [
        PipelineStage::ParseIntent,
        PipelineStage::FetchOrders,
        PipelineStage::ExtractOrders,
        PipelineStage::FilterOrders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::ParseIntent => "parse_intent",
            PipelineStage::FetchOrders => "fetch_orders",
            PipelineStage::ExtractOrders => "extract_orders",
            PipelineStage::FilterOrders => "filter_orders",
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: PipelineStage,
    pub elapsed_ms: u64,
}

/// Run summary for logging: timings and how many records each stage handled.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub stages: Vec<StageTiming>,
    pub chunks_total: usize,
    pub chunks_rejected: usize,
    pub candidates_extracted: usize,
    pub orders_kept: usize,
    pub dropped: DropCounts,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct OrderPipeline {
    completion: Box<dyn CompletionClient + Send + Sync>,
    orders: Box<dyn OrderSource + Send + Sync>,
    chunker: LineChunker,
}

impl OrderPipeline {
    pub fn new(
        completion: Box<dyn CompletionClient + Send + Sync>,
        orders: Box<dyn OrderSource + Send + Sync>,
    ) -> Self {
        Self {
            completion,
            orders,
            chunker: LineChunker::default(),
        }
    }

    /// Override the extraction chunk budget.
    pub fn with_chunker(mut self, chunker: LineChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Run the pipeline for one query. Always completes.
    pub fn run(&self, user_query: &str) -> PipelineState {
        self.run_with_report(user_query).0
    }

    pub fn run_with_report(&self, user_query: &str) -> (PipelineState, PipelineReport) {
        let run_id = Uuid::new_v4();
        let _span = tracing::info_span!("order_pipeline", run_id = %run_id).entered();
        let mut stages = Vec::with_capacity(PipelineStage::SEQUENCE.len());

        let intent = timed(PipelineStage::ParseIntent, &mut stages, || {
            parse_intent(self.completion.as_ref(), user_query)
        });

        let raw_text = timed(PipelineStage::FetchOrders, &mut stages, || {
            fetch_orders(self.orders.as_ref())
        });

        let extraction = timed(PipelineStage::ExtractOrders, &mut stages, || {
            extract_orders(self.completion.as_ref(), &raw_text, &self.chunker)
        });

        let filtered = timed(PipelineStage::FilterOrders, &mut stages, || {
            filter_orders(&intent, &extraction.orders)
        });

        let report = PipelineReport {
            run_id,
            stages,
            chunks_total: extraction.chunks_total,
            chunks_rejected: extraction.chunks_rejected,
            candidates_extracted: extraction.orders.len(),
            orders_kept: filtered.orders.len(),
            dropped: filtered.dropped,
        };

        let state = PipelineState {
            user_query: user_query.to_string(),
            intent,
            raw_text,
            candidate_orders: extraction.orders,
            final_orders: filtered.orders,
        };

        tracing::info!(
            orders = state.final_orders.len(),
            candidates = report.candidates_extracted,
            "Pipeline complete"
        );

        (state, report)
    }
}

fn timed<T>(stage: PipelineStage, stages: &mut Vec<StageTiming>, run: impl FnOnce() -> T) -> T {
    let _span = tracing::info_span!("stage", stage = stage.as_str()).entered();
    let started = Instant::now();
    let output = run();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::debug!(stage = stage.as_str(), elapsed_ms, "Stage finished");
    stages.push(StageTiming { stage, elapsed_ms });
    output
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Completion client setup failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Order source setup failed: {0}")]
    OrderSource(#[from] FetchError),
}

/// Build an `OrderPipeline` with production collaborators.
///
/// - Completion: `OpenAiCompatClient` (OpenRouter-compatible endpoint)
/// - Orders: `HttpOrderSource` with a bounded timeout
pub fn build_pipeline(
    completion: &CompletionSettings,
    orders: &OrderSourceSettings,
) -> Result<OrderPipeline, BuildError> {
    let llm = OpenAiCompatClient::new(completion)?;
    tracing::info!(model = %llm.model(), "Order pipeline using completion model");

    let source = HttpOrderSource::new(orders)?;
    tracing::info!(url = %source.url(), timeout_secs = orders.timeout.as_secs(), "Order source configured");

    Ok(OrderPipeline::new(Box::new(llm), Box::new(source)))
}
