// self
use crate::obs::{FlowKind, FlowOutcome};

/// Increments `oauth2_google_flow_total{flow, outcome}` (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"oauth2_google_flow_total",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Increments `oauth2_google_rejection_total{flow, reason}` with an [`Error::label`]
/// (when enabled).
///
/// [`Error::label`]: crate::error::Error::label
pub fn record_rejection_reason(kind: FlowKind, reason: &'static str) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"oauth2_google_rejection_total",
		"flow" => kind.as_str(),
		"reason" => reason
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, reason);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_infallible() {
		record_flow_outcome(FlowKind::Callback, FlowOutcome::Failure);
		record_rejection_reason(FlowKind::Callback, "csrf_mismatch");
	}
}
