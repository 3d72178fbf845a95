use super::order_source::OrderSource;

/// Stage 2: fetch the raw order listing.
///
/// Reads nothing from the pipeline state. Any failure is logged and becomes
/// an empty string, so the run still completes with an empty result.
pub fn fetch_orders(source: &dyn OrderSource) -> String {
    tracing::info!("Fetching orders from order source");

    match source.fetch_orders() {
        Ok(body) => {
            tracing::debug!(bytes = body.len(), "Order listing fetched");
            body
        }
        Err(e) => {
            tracing::error!(error = %e, "Order source request failed");
            String::new()
        }
    }
}
