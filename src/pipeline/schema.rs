// Schema gate: the only place untrusted completion text becomes typed data.
// Every stage that calls the completion capability goes through
// `gated_completion`, which never panics and never lets malformed output past.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::completion::CompletionClient;
use super::StageFailure;
use crate::models::{CandidateOrder, Intent};

/// Why completion output was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("completion returned an empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    NotStructured(String),

    #[error("response does not match the {shape} shape: {reason}")]
    ShapeMismatch { shape: &'static str, reason: String },
}

/// A declared shape that completion output must conform to.
pub trait Shape: DeserializeOwned {
    /// Shape name used in rejection reasons.
    const NAME: &'static str;

    /// Semantic checks that the type system cannot express.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Shape for Intent {
    const NAME: &'static str = "intent";

    fn check(&self) -> Result<(), String> {
        match self.min_total {
            Some(bound) if !bound.is_finite() => Err(format!("min_total {bound} is not finite")),
            _ => Ok(()),
        }
    }
}

/// Wrapper the extraction prompt asks for: `{"orders": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersEnvelope {
    pub orders: Vec<CandidateOrder>,
}

impl Shape for OrdersEnvelope {
    const NAME: &'static str = "orders-list";
}

/// Validate raw completion text against shape `S`.
pub fn validate<S: Shape>(raw: &str) -> Result<S, Rejection> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(Rejection::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Rejection::NotStructured(e.to_string()))?;

    if !value.is_object() {
        return Err(Rejection::ShapeMismatch {
            shape: S::NAME,
            reason: format!("expected a JSON object, found {}", json_kind(&value)),
        });
    }

    let parsed: S = serde_json::from_value(value).map_err(|e| Rejection::ShapeMismatch {
        shape: S::NAME,
        reason: e.to_string(),
    })?;

    parsed.check().map_err(|reason| Rejection::ShapeMismatch {
        shape: S::NAME,
        reason,
    })?;

    Ok(parsed)
}

/// Invoke the completion capability once and validate its output as `S`.
pub fn gated_completion<S: Shape>(
    llm: &dyn CompletionClient,
    prompt: &str,
) -> Result<S, StageFailure> {
    let response = llm.complete(prompt)?;
    Ok(validate::<S>(&response)?)
}

/// Strip one Markdown code fence wrapping the whole response, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };

    // Drop the info string ("json") on the opening line.
    match inner.find('\n') {
        Some(pos) if inner[..pos].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            inner[pos + 1..].trim()
        }
        _ => inner.trim(),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
