// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, obs::Operation, rate_limit::RateBudget};

/// Instrumented future when tracing is enabled, the bare future otherwise.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Instrumented future when tracing is enabled, the bare future otherwise.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one registry operation, tagged with the operation and its call site.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a `crpt_api.operation` span for `operation` entered from `stage`.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("crpt_api.operation", operation = operation.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Runs `fut` inside the span without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event before a caller suspends for its permit.
pub fn permit_wait_event(budget: RateBudget, wait: StdDuration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		permits = budget.permits(),
		window_ms = budget.window().whole_milliseconds() as u64,
		wait_ms = wait.as_millis() as u64,
		"Waiting for a rate-limit permit."
	);

	#[cfg(not(feature = "tracing"))]
	let _ = (budget, wait);
}

/// Emits a `debug` event once a renewed token has been cached.
pub fn token_renewed_event(expires_at: OffsetDateTime, lifetime: Duration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		%expires_at,
		lifetime_s = lifetime.whole_seconds(),
		"Renewed registry token."
	);

	#[cfg(not(feature = "tracing"))]
	let _ = (expires_at, lifetime);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_the_output_through() {
		let span = OperationSpan::new(Operation::TokenRenewal, "instrument_passes_the_output_through");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn events_accept_limiter_and_renewal_values() {
		let budget = RateBudget::per_second(2).expect("Budget fixture should be valid.");

		permit_wait_event(budget, StdDuration::from_millis(500));
		token_renewed_event(OffsetDateTime::now_utc(), Duration::hours(10));
	}
}
