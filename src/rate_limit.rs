//! Token-bucket admission control shared by every outbound registry call.
//!
//! A [`RateLimiter`] converts a [`RateBudget`] (N requests per window) into a steady emission
//! interval. Permits accrue continuously while the limiter is idle, capped at one window's
//! worth, and each [`RateLimiter::acquire`] call claims exactly one permit. The bookkeeping
//! lives behind a single mutex that is only held while the next admission instant is computed,
//! never while a caller sleeps, so concurrent callers are serialized onto distinct permit slots.

// std
use std::time::{Duration as StdDuration, Instant};
// self
use crate::{_prelude::*, error::ConfigError, obs};

/// Longest window a [`RateBudget`] accepts.
pub const MAX_WINDOW: Duration = Duration::days(366);

/// Immutable request budget: at most `permits` requests per `window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateBudget {
	permits: u64,
	window: Duration,
}
impl RateBudget {
	/// Creates a budget after validating that both the permit count and the window are positive
	/// and that the window does not exceed [`MAX_WINDOW`].
	pub fn new(permits: i64, window: Duration) -> Result<Self, ConfigError> {
		let checked = u64::try_from(permits)
			.ok()
			.filter(|value| *value > 0)
			.ok_or(ConfigError::NonPositiveRateLimit { permits })?;

		if !window.is_positive() {
			return Err(ConfigError::NonPositiveWindow);
		}
		if window > MAX_WINDOW {
			return Err(ConfigError::WindowTooLong { max: MAX_WINDOW });
		}

		Ok(Self { permits: checked, window })
	}

	/// Shorthand for `permits` requests per second.
	pub fn per_second(permits: i64) -> Result<Self, ConfigError> {
		Self::new(permits, Duration::SECOND)
	}

	/// Shorthand for `permits` requests per minute.
	pub fn per_minute(permits: i64) -> Result<Self, ConfigError> {
		Self::new(permits, Duration::MINUTE)
	}

	/// Number of permits granted per window.
	pub fn permits(&self) -> u64 {
		self.permits
	}

	/// Length of the budget window.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Steady emission rate in permits per second.
	pub fn permits_per_second(&self) -> f64 {
		self.permits as f64 / self.window.as_seconds_f64()
	}

	fn stable_interval(&self) -> StdDuration {
		StdDuration::from_secs_f64(self.window.as_seconds_f64() / self.permits as f64)
	}
}

#[derive(Debug)]
struct BucketState {
	stored_permits: f64,
	next_free: Instant,
}
impl BucketState {
	fn resync(&mut self, now: Instant, interval: StdDuration, max_stored: f64) {
		if now <= self.next_free {
			return;
		}

		let accrued = if interval.is_zero() {
			max_stored
		} else {
			(now - self.next_free).as_secs_f64() / interval.as_secs_f64()
		};

		self.stored_permits = (self.stored_permits + accrued).min(max_stored);
		self.next_free = now;
	}

	fn debit(&mut self, interval: StdDuration) {
		let from_storage = self.stored_permits.min(1.);
		let fresh = 1. - from_storage;

		self.stored_permits -= from_storage;
		self.next_free += interval.mul_f64(fresh);
	}
}

/// Thread-safe smooth token bucket shared by the authenticator and the registrar.
///
/// Over any stretch of continuous demand the limiter admits at most `permits` requests per
/// `window`. After an idle period the stored permits (at most one window's worth) are granted
/// at once, and the next caller is admitted immediately as well while its cost is charged to
/// the caller after it. A limiter idle for a full window therefore admits up to `permits + 1`
/// requests back to back before settling into the steady interval.
#[derive(Debug)]
pub struct RateLimiter {
	budget: RateBudget,
	interval: StdDuration,
	max_stored: f64,
	state: Mutex<BucketState>,
}
impl RateLimiter {
	/// Creates a limiter for the provided budget, starting with no stored permits.
	pub fn new(budget: RateBudget) -> Self {
		Self::starting_at(budget, Instant::now())
	}

	fn starting_at(budget: RateBudget, start: Instant) -> Self {
		Self {
			budget,
			interval: budget.stable_interval(),
			max_stored: budget.permits() as f64,
			state: Mutex::new(BucketState { stored_permits: 0., next_free: start }),
		}
	}

	/// Budget the limiter was configured with.
	pub fn budget(&self) -> RateBudget {
		self.budget
	}

	/// Suspends the caller until its permit is due, then returns.
	///
	/// There is no timeout: the wait is exactly as long as the budget requires. Waiting uses
	/// the Tokio timer, so a call that has to wait must run inside a Tokio runtime with the time
	/// driver enabled; a call whose permit is already due returns without touching the timer.
	pub async fn acquire(&self) {
		let wait = self.reserve_at(Instant::now());

		if wait.is_zero() {
			return;
		}

		obs::record_permit_wait(self.budget, wait);

		tokio::time::sleep(wait).await;
	}

	/// Claims a permit only if one is available right now.
	pub fn try_acquire(&self) -> bool {
		let now = Instant::now();
		let mut state = self.state.lock();

		state.resync(now, self.interval, self.max_stored);

		if state.next_free > now {
			return false;
		}

		state.debit(self.interval);

		true
	}

	/// Claims the next permit slot as observed at `now` and returns how long the caller must
	/// wait before using it.
	pub fn reserve_at(&self, now: Instant) -> StdDuration {
		let mut state = self.state.lock();

		state.resync(now, self.interval, self.max_stored);

		let moment = state.next_free;

		state.debit(self.interval);

		moment.saturating_duration_since(now)
	}
}
