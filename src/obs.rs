//! Optional observability helpers for the flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_google.flow` with the `flow` and
//!   `stage` fields, plus a `warn` event whenever a flow is rejected.
//! - Enable `metrics` to increment the `oauth2_google_flow_total` counter for every
//!   attempt/success/rejection, labeled by `flow` + `outcome`, and the
//!   `oauth2_google_rejection_total` counter labeled by `flow` + `reason`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Flow kinds observed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Consent redirect construction.
	Authorize,
	/// Callback handling (state check + code exchange + profile fetch).
	Callback,
	/// Profile lookup from a known access token.
	UserInfo,
	/// Refresh token grant.
	Refresh,
	/// Token revocation.
	Revoke,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::UserInfo => "userinfo",
			FlowKind::Refresh => "refresh",
			FlowKind::Revoke => "revoke",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an engine operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Rejection collapsed into an absent result (or a configuration failure).
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the outcome of a finished operation and logs the rejection reason, if any.
pub fn record_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(err) => {
			record_rejection(kind, err);
			record_rejection_reason(kind, err.label());
			record_flow_outcome(kind, FlowOutcome::Failure);
		},
	}
}
