//! Scripted in-memory registry shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	io::{Error as IoError, ErrorKind},
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use parking_lot::Mutex;
use time::Duration;
// self
use crpt_api::{
	client::RegistryContext,
	endpoints::RegistryEndpoints,
	http::{HttpFuture, HttpRequest, HttpResponse, RegistryHttpClient},
	rate_limit::{RateBudget, RateLimiter},
};

/// Fake registry answering the challenge, token, and create-document endpoints.
///
/// Every response carries a per-endpoint sequence number, so challenge `n` is `u{n}`/`d{n}`,
/// token `n` is `T{n}`, and document `n` is `DOC-{n}`.
#[derive(Default)]
pub struct FakeRegistry {
	pub requests: Mutex<Vec<HttpRequest>>,
	pub challenges: AtomicUsize,
	pub exchanges: AtomicUsize,
	pub documents: AtomicUsize,
	pub fail_challenge: AtomicBool,
	pub reject_exchange: AtomicBool,
	pub latency: Mutex<StdDuration>,
}
impl FakeRegistry {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn with_latency(latency: StdDuration) -> Arc<Self> {
		let registry = Self::default();

		*registry.latency.lock() = latency;

		Arc::new(registry)
	}

	pub fn challenge_calls(&self) -> usize {
		self.challenges.load(Ordering::SeqCst)
	}

	pub fn exchange_calls(&self) -> usize {
		self.exchanges.load(Ordering::SeqCst)
	}

	pub fn document_calls(&self) -> usize {
		self.documents.load(Ordering::SeqCst)
	}

	pub fn recorded(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}

	fn respond(&self, request: &HttpRequest) -> Result<HttpResponse, IoError> {
		let path = request.url.path();

		if path.ends_with("/auth/cert/key") {
			let n = self.challenges.fetch_add(1, Ordering::SeqCst) + 1;

			if self.fail_challenge.load(Ordering::SeqCst) {
				return Err(IoError::new(ErrorKind::ConnectionRefused, "challenge unavailable"));
			}

			return Ok(HttpResponse::new(200, format!(r#"{{"uuid":"u{n}","data":"d{n}"}}"#)));
		}
		if path.ends_with("/auth/cert/") {
			let n = self.exchanges.fetch_add(1, Ordering::SeqCst) + 1;

			if self.reject_exchange.load(Ordering::SeqCst) {
				return Ok(HttpResponse::new(401, r#"{"error_message":"bad signature"}"#));
			}

			return Ok(HttpResponse::new(200, format!(r#"{{"token":"T{n}"}}"#)));
		}
		if path.ends_with("/lk/documents/create") {
			let n = self.documents.fetch_add(1, Ordering::SeqCst) + 1;

			return Ok(HttpResponse::new(200, format!(r#"{{"value":"DOC-{n}"}}"#)));
		}

		Ok(HttpResponse::new(404, "not found"))
	}
}
impl RegistryHttpClient for FakeRegistry {
	type TransportError = IoError;

	fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let latency = *self.latency.lock();

			self.requests.lock().push(request.clone());

			let response = self.respond(&request);

			if !latency.is_zero() {
				tokio::time::sleep(latency).await;
			}

			response
		})
	}
}

pub fn budget(permits: i64, window: Duration) -> RateBudget {
	RateBudget::new(permits, window).expect("Budget fixture should be valid.")
}

pub fn context(registry: &Arc<FakeRegistry>, budget: RateBudget) -> RegistryContext<FakeRegistry> {
	let endpoints = RegistryEndpoints::production().expect("Production endpoints should parse.");

	RegistryContext::new(registry.clone(), Arc::new(RateLimiter::new(budget)), Arc::new(endpoints))
}

pub fn echo_signer(data: &str) -> String {
	format!("signed:{data}")
}
