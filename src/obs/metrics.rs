// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	obs::{Operation, OperationOutcome},
};

/// Counter incremented once per operation attempt, success, and failure.
pub const OPERATION_TOTAL: &str = "crpt_api_operation_total";
/// Histogram of the time callers spent suspended waiting for a rate-limit permit.
pub const PERMIT_WAIT_SECONDS: &str = "crpt_api_permit_wait_seconds";
/// Gauge holding the Unix timestamp at which the cached token expires.
pub const TOKEN_EXPIRY_TIMESTAMP: &str = "crpt_api_token_expiry_timestamp_seconds";

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(operation: Operation, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			OPERATION_TOTAL,
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a non-zero permit wait (when enabled).
pub fn record_permit_wait_seconds(wait: StdDuration) {
	#[cfg(feature = "metrics")]
	metrics::histogram!(PERMIT_WAIT_SECONDS).record(wait.as_secs_f64());

	#[cfg(not(feature = "metrics"))]
	let _ = wait;
}

/// Publishes the expiry of a freshly renewed token (when enabled).
pub fn record_token_expiry(expires_at: OffsetDateTime) {
	#[cfg(feature = "metrics")]
	metrics::gauge!(TOKEN_EXPIRY_TIMESTAMP).set(expires_at.unix_timestamp() as f64);

	#[cfg(not(feature = "metrics"))]
	let _ = expires_at;
}
