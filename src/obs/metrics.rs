// self
use crate::obs::{FlowKind, FlowOutcome};

/// Bumps the `oilfox_client_flow_total` counter, labeled by flow and outcome.
#[cfg(feature = "metrics")]
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	metrics::counter!(
		"oilfox_client_flow_total",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
}

/// Flow outcomes are dropped without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	let _ = (kind, outcome);
}
