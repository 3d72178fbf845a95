use super::completion::CompletionClient;
use super::prompt::build_intent_prompt;
use super::schema::gated_completion;
use crate::models::Intent;

/// Stage 1: extract filtering intent from the user's query.
///
/// One completion call. Any failure (transport or schema) degrades to an
/// empty intent so filtering becomes a pass-through.
pub fn parse_intent(llm: &dyn CompletionClient, user_query: &str) -> Intent {
    tracing::info!("Parsing user intent");

    let prompt = build_intent_prompt(user_query);
    match gated_completion::<Intent>(llm, &prompt) {
        Ok(intent) => {
            tracing::debug!(
                state = ?intent.state,
                min_total = ?intent.min_total,
                "Intent parsed"
            );
            intent
        }
        Err(e) => {
            tracing::warn!(error = %e, "Intent parsing failed, using empty intent");
            Intent::empty()
        }
    }
}
