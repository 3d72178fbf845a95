use serde::Serialize;

use super::normalize::{normalize_state, normalize_total, round_cents};
use crate::models::{CandidateOrder, FinalOrder, Intent};

/// Why a candidate did not make it into the final list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingOrderId,
    UnparseableTotal,
    StateMismatch,
    AtOrBelowThreshold,
}

/// Count of candidates dropped per reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub missing_order_id: usize,
    pub unparseable_total: usize,
    pub state_mismatch: usize,
    pub at_or_below_threshold: usize,
}

impl DropCounts {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingOrderId => self.missing_order_id += 1,
            DropReason::UnparseableTotal => self.unparseable_total += 1,
            DropReason::StateMismatch => self.state_mismatch += 1,
            DropReason::AtOrBelowThreshold => self.at_or_below_threshold += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_order_id + self.unparseable_total + self.state_mismatch + self.at_or_below_threshold
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub orders: Vec<FinalOrder>,
    pub dropped: DropCounts,
}

/// Stage 4: apply intent predicates and normalize the survivors.
///
/// Surviving orders keep their relative order. The total threshold is
/// exclusive: an order whose total equals `min_total` is dropped.
pub fn filter_orders(intent: &Intent, candidates: &[CandidateOrder]) -> FilterOutcome {
    tracing::info!(candidates = candidates.len(), "Filtering orders deterministically");

    let wanted_state = normalize_state(intent.state.as_deref());
    let mut outcome = FilterOutcome::default();

    for candidate in candidates {
        match screen(candidate, wanted_state.as_deref(), intent.min_total) {
            Ok(order) => outcome.orders.push(order),
            Err(reason) => {
                tracing::debug!(order_id = ?candidate.order_id, ?reason, "Candidate dropped");
                outcome.dropped.record(reason);
            }
        }
    }

    tracing::info!(
        kept = outcome.orders.len(),
        dropped = outcome.dropped.total(),
        "Filtering complete"
    );

    outcome
}

fn screen(
    candidate: &CandidateOrder,
    wanted_state: Option<&str>,
    min_total: Option<f64>,
) -> Result<FinalOrder, DropReason> {
    let order_id = candidate
        .order_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or(DropReason::MissingOrderId)?;

    let total = normalize_total(candidate.total.as_ref()).ok_or(DropReason::UnparseableTotal)?;
    let state = normalize_state(candidate.state.as_deref());

    if let Some(wanted) = wanted_state {
        if state.as_deref() != Some(wanted) {
            return Err(DropReason::StateMismatch);
        }
    }

    if let Some(bound) = min_total {
        if total <= bound {
            return Err(DropReason::AtOrBelowThreshold);
        }
    }

    Ok(FinalOrder {
        order_id: order_id.to_string(),
        buyer: candidate.buyer.clone(),
        state,
        total: round_cents(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTotal;

    fn candidate(id: Option<&str>, state: Option<&str>, total: Option<RawTotal>) -> CandidateOrder {
        CandidateOrder {
            order_id: id.map(String::from),
            buyer: Some("Ada Lovelace".into()),
            state: state.map(String::from),
            total,
        }
    }

    fn intent(state: Option<&str>, min_total: Option<f64>) -> Intent {
        Intent {
            state: state.map(String::from),
            min_total,
        }
    }

    #[test]
    fn ohio_over_hundred_example() {
        let candidates = vec![
            candidate(Some("1"), Some("ohio"), Some("150.00".into())),
            candidate(Some("2"), Some("CA"), Some("500".into())),
            candidate(Some("3"), None, Some("200".into())),
        ];
        let outcome = filter_orders(&intent(Some("OH"), Some(100.0)), &candidates);

        assert_eq!(
            outcome.orders,
            vec![FinalOrder {
                order_id: "1".into(),
                buyer: Some("Ada Lovelace".into()),
                state: Some("OH".into()),
                total: 150.0,
            }]
        );
        assert_eq!(outcome.dropped.state_mismatch, 2);
    }

    #[test]
    fn stateless_candidate_survives_without_state_intent() {
        let candidates = vec![candidate(Some("3"), None, Some("200".into()))];
        let outcome = filter_orders(&intent(None, Some(100.0)), &candidates);
        assert_eq!(outcome.orders.len(), 1);
        assert!(outcome.orders[0].state.is_none());
    }

    #[test]
    fn threshold_is_exclusive() {
        let candidates = vec![
            candidate(Some("at"), Some("OH"), Some(RawTotal::Number(100.0))),
            candidate(Some("above"), Some("OH"), Some("100.01".into())),
            candidate(Some("below"), Some("OH"), Some("99.99".into())),
        ];
        let outcome = filter_orders(&intent(None, Some(100.0)), &candidates);

        let ids: Vec<_> = outcome.orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["above"]);
        assert_eq!(outcome.orders[0].total, 100.01);
        assert_eq!(outcome.dropped.at_or_below_threshold, 2);
    }

    #[test]
    fn zero_threshold_still_filters() {
        let candidates = vec![
            candidate(Some("free"), None, Some(RawTotal::Number(0.0))),
            candidate(Some("paid"), None, Some(RawTotal::Number(0.5))),
        ];
        let outcome = filter_orders(&intent(None, Some(0.0)), &candidates);
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].order_id, "paid");
    }

    #[test]
    fn missing_or_empty_order_id_always_dropped() {
        let candidates = vec![
            candidate(None, Some("OH"), Some("150".into())),
            candidate(Some(""), Some("OH"), Some("150".into())),
            candidate(Some("   "), Some("OH"), Some("150".into())),
        ];
        let outcome = filter_orders(&Intent::empty(), &candidates);
        assert!(outcome.orders.is_empty());
        assert_eq!(outcome.dropped.missing_order_id, 3);
    }

    #[test]
    fn unparseable_or_missing_total_dropped() {
        let candidates = vec![
            candidate(Some("1"), Some("OH"), Some("call for price".into())),
            candidate(Some("2"), Some("OH"), None),
        ];
        let outcome = filter_orders(&Intent::empty(), &candidates);
        assert!(outcome.orders.is_empty());
        assert_eq!(outcome.dropped.unparseable_total, 2);
    }

    #[test]
    fn empty_intent_passes_everything_normalized() {
        let candidates = vec![
            candidate(Some("1"), Some("new york"), Some("$1,234.567".into())),
            candidate(Some("2"), Some("tx"), Some(RawTotal::Number(42.0))),
        ];
        let outcome = filter_orders(&Intent::empty(), &candidates);

        assert_eq!(outcome.orders.len(), 2);
        assert_eq!(outcome.orders[0].state.as_deref(), Some("NY"));
        assert_eq!(outcome.orders[0].total, 1234.57);
        assert_eq!(outcome.orders[1].state.as_deref(), Some("TX"));
        assert_eq!(outcome.orders[1].total, 42.0);
        assert_eq!(outcome.dropped, DropCounts::default());
    }

    #[test]
    fn intent_state_is_normalized_before_comparing() {
        let candidates = vec![
            candidate(Some("1"), Some("OH"), Some("10".into())),
            candidate(Some("2"), Some("California"), Some("10".into())),
        ];
        let outcome = filter_orders(&intent(Some("ohio"), None), &candidates);
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].order_id, "1");
    }

    #[test]
    fn blank_intent_state_does_not_filter() {
        let candidates = vec![candidate(Some("1"), Some("CA"), Some("10".into()))];
        let outcome = filter_orders(&intent(Some(" "), None), &candidates);
        assert_eq!(outcome.orders.len(), 1);
    }

    #[test]
    fn buyer_passes_through_unchanged() {
        let mut raw = candidate(Some("1"), None, Some("10".into()));
        raw.buyer = Some("  acme CORP ".into());
        let outcome = filter_orders(&Intent::empty(), &[raw]);
        assert_eq!(outcome.orders[0].buyer.as_deref(), Some("  acme CORP "));
    }

    #[test]
    fn huge_total_survives_as_finite_number() {
        let candidates = vec![candidate(Some("big"), Some("OH"), Some("1e307".into()))];
        let outcome = filter_orders(&Intent::empty(), &candidates);

        assert_eq!(outcome.orders.len(), 1);
        assert!(outcome.orders[0].total.is_finite());

        let json = serde_json::to_value(crate::models::OrdersDocument {
            orders: &outcome.orders,
        })
        .unwrap();
        assert_eq!(json["orders"][0]["total"], serde_json::json!(1e307));
    }

    #[test]
    fn preserves_relative_order() {
        let candidates: Vec<_> = (0..10)
            .map(|i| {
                let total = if i % 2 == 0 { "500" } else { "5" };
                candidate(Some(i.to_string().as_str()), Some("OH"), Some(total.into()))
            })
            .collect();
        let outcome = filter_orders(&intent(Some("OH"), Some(100.0)), &candidates);
        let ids: Vec<_> = outcome.orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "2", "4", "6", "8"]);
    }
}
