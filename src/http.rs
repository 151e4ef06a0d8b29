//! Transport primitives for registry round trips.
//!
//! The module exposes [`RegistryHttpClient`] alongside the minimal [`HttpRequest`] and
//! [`HttpResponse`] values the client exchanges with it, so downstream crates can plug in
//! their own HTTP stack (or a test double) without touching the authentication and
//! registration logic. `exchange_json` is the single place where a request is gated by the
//! [`RateLimiter`], dispatched, status-checked, and decoded.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{RequestError, TransportError},
	rate_limit::RateLimiter,
};

/// Content type sent with every JSON request body.
pub const APPLICATION_JSON: &str = "application/json;charset=UTF-8";
/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";
/// Header describing the request body.
pub const CONTENT_TYPE: &str = "Content-Type";

const BODY_PREVIEW_LIMIT: usize = 256;

/// Boxed future returned by [`RegistryHttpClient::send`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of performing registry round trips.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared by the authenticator and the
/// registrar behind an [`Arc`], and the futures they return must be `Send` so callers can
/// drive the client from a multi-threaded runtime. Swapping the transport does not remove the
/// Tokio requirement of [`RateLimiter::acquire`].
pub trait RegistryHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Dispatches `request` and resolves once the full response body is available.
	fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// HTTP verbs used by the registry API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl HttpMethod {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request handed to a [`RegistryHttpClient`].
#[derive(Clone)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Fully resolved request URL (including query).
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(&'static str, String)>,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Creates a body-less `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: HttpMethod::Get, url, headers: Vec::new(), body: None }
	}

	/// Creates a `POST` request carrying a UTF-8 JSON body.
	pub fn post_json(url: Url, body: Vec<u8>) -> Self {
		Self {
			method: HttpMethod::Post,
			url,
			headers: vec![(CONTENT_TYPE, APPLICATION_JSON.into())],
			body: Some(body),
		}
	}

	/// Attaches `token` as an `Authorization: Bearer` credential.
	pub fn with_bearer(mut self, token: &TokenSecret) -> Self {
		self.headers.push((AUTHORIZATION, format!("Bearer {}", token.expose())));

		self
	}

	/// Returns the first value stored for `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}
impl Debug for HttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(key, value)| {
				if key.eq_ignore_ascii_case(AUTHORIZATION) {
					(*key, "<redacted>")
				} else {
					(*key, value.as_str())
				}
			})
			.collect::<Vec<_>>();

		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Response produced by a [`RegistryHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response with the provided status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	fn body_preview(&self) -> String {
		let text = String::from_utf8_lossy(&self.body);

		match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
			Some((cut, _)) => format!("{}...", &text[..cut]),
			None => text.into_owned(),
		}
	}
}

/// Waits for a rate-limit permit, sends `request`, and decodes a JSON success body into `T`.
pub(crate) async fn exchange_json<C, T>(
	http_client: &C,
	limiter: &RateLimiter,
	request: HttpRequest,
) -> Result<T, RequestError>
where
	C: ?Sized + RegistryHttpClient,
	T: DeserializeOwned,
{
	limiter.acquire().await;

	let response = http_client.send(request).await.map_err(TransportError::network)?;

	if !response.is_success() {
		let body = response.body_preview();

		return Err(RequestError::Status { status: response.status, body });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| RequestError::Parse { source, status: response.status })?;

	deserializer
		.end()
		.map_err(|source| RequestError::TrailingData { source, status: response.status })?;

	Ok(value)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl RegistryHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = self.0.request(method, request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}
