//! Client facade wiring the rate limiter, authenticator, and registrar together.

pub mod config;

pub use config::*;

// self
use crate::{
	_prelude::*,
	auth::{Authenticator, TokenSecret},
	document::{
		DocumentData, DocumentRegistrar, DocumentSubmission, DocumentType, RegistrationResult,
	},
	endpoints::EndpointProvider,
	error::RequestError,
	ext::{Base64TextEncoder, Signer, TextEncoder},
	http::RegistryHttpClient,
	rate_limit::RateLimiter,
};
#[cfg(feature = "reqwest")] use crate::{http::ReqwestHttpClient, rate_limit::RateBudget};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestRegistryClient = RegistryClient<ReqwestHttpClient>;

/// Collaborators shared by every component that talks to the registry.
///
/// All fields are immutable after construction except the limiter's internal bookkeeping, so
/// one context can be cloned into the authenticator and the registrar and both draw from the
/// same request budget.
pub struct RegistryContext<C>
where
	C: ?Sized + RegistryHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Request budget shared by renewal and registration calls.
	pub limiter: Arc<RateLimiter>,
	/// URL source for the three registry endpoints.
	pub endpoints: Arc<dyn EndpointProvider>,
	/// Encoding applied to signatures and document payloads.
	pub encoder: Arc<dyn TextEncoder>,
}
impl<C> RegistryContext<C>
where
	C: ?Sized + RegistryHttpClient,
{
	/// Creates a context that encodes with [`Base64TextEncoder`].
	pub fn new(
		http_client: impl Into<Arc<C>>,
		limiter: Arc<RateLimiter>,
		endpoints: Arc<dyn EndpointProvider>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			limiter,
			endpoints,
			encoder: Arc::new(Base64TextEncoder),
		}
	}

	/// Replaces the text encoder.
	pub fn with_encoder(mut self, encoder: Arc<dyn TextEncoder>) -> Self {
		self.encoder = encoder;

		self
	}
}
impl<C> Clone for RegistryContext<C>
where
	C: ?Sized + RegistryHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			limiter: self.limiter.clone(),
			endpoints: self.endpoints.clone(),
			encoder: self.encoder.clone(),
		}
	}
}

/// Thread-safe registry client.
///
/// Share one instance (by reference or behind an [`Arc`]) across every task that talks to the
/// registry: the rate budget and the token cache are per instance. Calls must run inside a
/// Tokio runtime with the time driver enabled, since permit waits use the Tokio timer.
pub struct RegistryClient<C>
where
	C: ?Sized + RegistryHttpClient,
{
	context: RegistryContext<C>,
	authenticator: Authenticator<C>,
	registrar: DocumentRegistrar<C>,
	product_group: Option<String>,
	document_type: DocumentType,
}
impl<C> RegistryClient<C>
where
	C: ?Sized + RegistryHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		signer: impl 'static + Signer,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let context = RegistryContext::new(
			http_client,
			Arc::new(RateLimiter::new(config.rate_budget)),
			Arc::new(config.endpoints),
		);

		Self::with_context(context, Arc::new(signer), config.token_lifetime)
			.with_document_defaults(config.product_group, config.document_type)
	}

	/// Creates a client from pre-assembled collaborators (custom endpoint provider or encoder).
	pub fn with_context(
		context: RegistryContext<C>,
		signer: Arc<dyn Signer>,
		token_lifetime: Duration,
	) -> Self {
		Self {
			authenticator: Authenticator::new(context.clone(), signer, token_lifetime),
			registrar: DocumentRegistrar::new(context.clone()),
			context,
			product_group: None,
			document_type: DocumentType::default(),
		}
	}

	/// Sets the product group and document type used by [`RegistryClient::create_document`].
	pub fn with_document_defaults(
		mut self,
		product_group: Option<String>,
		document_type: DocumentType,
	) -> Self {
		self.product_group = product_group;
		self.document_type = document_type;

		self
	}

	/// Caching authenticator backing this client.
	pub fn authenticator(&self) -> &Authenticator<C> {
		&self.authenticator
	}

	/// Rate limiter shared by every request this client issues.
	pub fn limiter(&self) -> &RateLimiter {
		&self.context.limiter
	}

	/// Returns a fresh registry token, renewing it when the cached one has expired.
	pub async fn token(&self) -> Result<TokenSecret> {
		self.authenticator.get_token().await
	}

	/// Registers an already-serialized, signed document and returns its registry identifier.
	pub async fn register_document(
		&self,
		submission: &DocumentSubmission,
	) -> Result<RegistrationResult> {
		let token = self.authenticator.get_token().await?;

		self.registrar.register(submission, &token).await
	}

	/// Serializes `document`, then registers it with the configured product group and
	/// document type.
	///
	/// `signature` is the detached signature over the document's JSON form.
	pub async fn create_document(
		&self,
		document: &DocumentData,
		signature: impl Into<String>,
	) -> Result<RegistrationResult> {
		let payload = serde_json::to_string(document)
			.map_err(|e| Error::DocumentRegistration { source: RequestError::Encode(e) })?;
		let mut submission =
			DocumentSubmission::new(payload, signature).with_document_type(self.document_type);

		submission.product_group = self.product_group.clone();

		self.register_document(&submission).await
	}
}
#[cfg(feature = "reqwest")]
impl RegistryClient<ReqwestHttpClient> {
	/// Creates a client allowing `permits` requests per `window` against the production
	/// registry.
	///
	/// Fails with [`Error::Config`] when `permits` or `window` is not positive; no client is
	/// created in that case.
	pub fn new(permits: i64, window: Duration, signer: impl 'static + Signer) -> Result<Self> {
		let config = ClientConfig::builder(RateBudget::new(permits, window)?).build()?;

		Ok(Self::with_config(config, signer))
	}

	/// Creates a client from a validated configuration using the default reqwest transport.
	pub fn with_config(config: ClientConfig, signer: impl 'static + Signer) -> Self {
		Self::with_http_client(config, signer, ReqwestHttpClient::default())
	}
}
impl<C> Debug for RegistryClient<C>
where
	C: ?Sized + RegistryHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegistryClient")
			.field("budget", &self.context.limiter.budget())
			.field("authenticator", &self.authenticator)
			.field("product_group", &self.product_group)
			.field("document_type", &self.document_type)
			.finish()
	}
}
