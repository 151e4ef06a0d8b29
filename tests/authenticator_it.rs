mod common;

// std
use std::{
	sync::{Arc, atomic::Ordering},
	time::Duration as StdDuration,
};
// crates.io
use time::{Duration, OffsetDateTime};
// self
use common::FakeRegistry;
use crpt_api::{
	auth::Authenticator,
	error::{Error, RequestError},
	ext::Signer,
};

fn authenticator(registry: &Arc<FakeRegistry>, lifetime: Duration) -> Authenticator<FakeRegistry> {
	let signer: Arc<dyn Signer> = Arc::new(common::echo_signer);

	Authenticator::new(
		common::context(registry, common::budget(100, Duration::SECOND)),
		signer,
		lifetime,
	)
}

#[tokio::test]
async fn fresh_token_is_reused_without_network_calls() {
	let registry = FakeRegistry::new();
	let auth = authenticator(&registry, Duration::HOUR);
	let first = auth.get_token().await.expect("First renewal should succeed.");
	let second = auth.get_token().await.expect("Cached token should be served.");

	assert_eq!(first.expose(), "T1");
	assert_eq!(first, second);
	assert_eq!(registry.challenge_calls(), 1);
	assert_eq!(registry.exchange_calls(), 1);
	assert_eq!(auth.metrics().attempts(), 1);
	assert_eq!(auth.metrics().cache_hits(), 1);
}

#[tokio::test]
async fn renewal_posts_encoded_signature_for_the_challenge() {
	let registry = FakeRegistry::new();
	let auth = authenticator(&registry, Duration::HOUR);

	auth.get_token().await.expect("Renewal should succeed.");

	let requests = registry.recorded();

	assert_eq!(requests.len(), 2);
	assert_eq!(requests[0].url.as_str(), "https://ismp.crpt.ru/api/v3/auth/cert/key");
	assert!(requests[0].body.is_none());
	assert_eq!(requests[1].url.as_str(), "https://ismp.crpt.ru/api/v3/auth/cert/");

	let body: serde_json::Value = serde_json::from_slice(
		requests[1].body.as_deref().expect("Token exchange should carry a body."),
	)
	.expect("Token exchange body should be JSON.");

	// base64("signed:d1")
	assert_eq!(body, serde_json::json!({ "uuid": "u1", "data": "c2lnbmVkOmQx" }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_a_single_renewal() {
	const CALLERS: usize = 16;

	let registry = FakeRegistry::with_latency(StdDuration::from_millis(50));
	let auth = Arc::new(authenticator(&registry, Duration::HOUR));
	let handles = (0..CALLERS)
		.map(|_| {
			let auth = auth.clone();

			tokio::spawn(async move { auth.get_token().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let token = handle
			.await
			.expect("Renewal task should not panic.")
			.expect("Every caller should receive a token.");

		assert_eq!(token.expose(), "T1");
	}

	assert_eq!(registry.challenge_calls(), 1);
	assert_eq!(registry.exchange_calls(), 1);
	assert_eq!(auth.metrics().attempts(), 1);
	assert_eq!(auth.metrics().cache_hits(), CALLERS as u64 - 1);
}

#[tokio::test]
async fn expiry_is_measured_from_renewal_start() {
	let latency = StdDuration::from_millis(300);
	let registry = FakeRegistry::with_latency(latency);
	let auth = authenticator(&registry, Duration::HOUR);
	let before = OffsetDateTime::now_utc();

	auth.get_token().await.expect("Delayed renewal should succeed.");

	let after = OffsetDateTime::now_utc();
	let expiry = auth.cached_expiry();

	// Two delayed round trips happen between the renewal start and its completion.
	assert!(after - before >= Duration::milliseconds(600));
	assert!(expiry >= before + Duration::HOUR);
	assert!(
		expiry <= after + Duration::HOUR - Duration::milliseconds(550),
		"Expiry should not include the renewal latency: {expiry} vs {after}."
	);
}

#[tokio::test]
async fn expired_token_triggers_a_new_renewal() {
	let registry = FakeRegistry::new();
	let auth = authenticator(&registry, Duration::milliseconds(100));
	let first = auth.get_token().await.expect("First renewal should succeed.");

	tokio::time::sleep(StdDuration::from_millis(150)).await;

	let second = auth.get_token().await.expect("Second renewal should succeed.");

	assert_eq!(first.expose(), "T1");
	assert_eq!(second.expose(), "T2");
	assert_eq!(registry.challenge_calls(), 2);
}

#[tokio::test]
async fn challenge_failure_keeps_the_cache_and_recovers() {
	let registry = FakeRegistry::new();
	let auth = authenticator(&registry, Duration::milliseconds(100));

	auth.get_token().await.expect("Initial renewal should succeed.");

	let expiry = auth.cached_expiry();

	tokio::time::sleep(StdDuration::from_millis(150)).await;
	registry.fail_challenge.store(true, Ordering::SeqCst);

	let err = auth.get_token().await.expect_err("Challenge outage should fail the renewal.");

	assert!(matches!(err, Error::AuthChallenge { source: RequestError::Transport(_) }));
	assert_eq!(auth.cached_expiry(), expiry);
	assert_eq!(auth.metrics().failures(), 1);

	registry.fail_challenge.store(false, Ordering::SeqCst);

	let token = auth.get_token().await.expect("Renewal should succeed once the outage ends.");

	assert_eq!(token.expose(), "T2");
	assert!(auth.cached_expiry() > expiry);
}

#[tokio::test]
async fn rejected_exchange_reports_the_status() {
	let registry = FakeRegistry::new();
	let auth = authenticator(&registry, Duration::HOUR);

	registry.reject_exchange.store(true, Ordering::SeqCst);

	let err = auth.get_token().await.expect_err("Rejected exchange should fail the renewal.");

	assert!(matches!(err, Error::TokenExchange { source: RequestError::Status { status: 401, .. } }));
	assert_eq!(err.status(), Some(401));
	assert!(auth.cached_expiry() < OffsetDateTime::now_utc());
	assert_eq!(auth.metrics().successes(), 0);
}
