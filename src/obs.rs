//! Optional observability helpers for registry operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `crpt_api.operation` with the `operation`
//!   and `stage` (call site) fields, plus `debug` events for permit waits and token renewals.
//! - Enable `metrics` to increment the `crpt_api_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, record permit waits in the
//!   `crpt_api_permit_wait_seconds` histogram, and publish the cached token's expiry in the
//!   `crpt_api_token_expiry_timestamp_seconds` gauge.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, rate_limit::RateBudget};

/// Registry operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// `GET` of the authentication challenge.
	AuthChallenge,
	/// `POST` of the signed challenge in exchange for a token.
	TokenExchange,
	/// Full challenge/sign/exchange renewal sequence.
	TokenRenewal,
	/// Document submission.
	DocumentRegistration,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::AuthChallenge => "auth_challenge",
			Operation::TokenExchange => "token_exchange",
			Operation::TokenRenewal => "token_renewal",
			Operation::DocumentRegistration => "document_registration",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the attempt, runs `fut`, then records success or failure based on its result.
pub(crate) async fn observe<T, F>(operation: Operation, stage: &'static str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	record_operation_outcome(operation, OperationOutcome::Attempt);

	let result = OperationSpan::new(operation, stage).instrument(fut).await;

	match &result {
		Ok(_) => record_operation_outcome(operation, OperationOutcome::Success),
		Err(_e) => {
			#[cfg(feature = "tracing")]
			::tracing::debug!(operation = operation.as_str(), error = %_e, "Registry operation failed.");

			record_operation_outcome(operation, OperationOutcome::Failure)
		},
	}

	result
}

/// Reports a caller about to wait `wait` for a permit of `budget`.
pub(crate) fn record_permit_wait(budget: RateBudget, wait: StdDuration) {
	permit_wait_event(budget, wait);
	record_permit_wait_seconds(wait);
}

/// Reports a renewed token cached until `expires_at`.
pub(crate) fn record_token_renewal(expires_at: OffsetDateTime, lifetime: Duration) {
	token_renewed_event(expires_at, lifetime);
	record_token_expiry(expires_at);
}
