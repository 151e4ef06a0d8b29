//! Caching authenticator with a single-flight renewal guard.
//!
//! [`Authenticator::get_token`] serves the cached token while it is fresh and otherwise runs
//! the registry's three-step renewal: fetch a challenge, sign it, and exchange the signed
//! answer for a token. Renewals run under one async mutex; callers that queued behind an
//! in-flight renewal re-check the cache once they get the guard and reuse its result instead
//! of renewing again. The new expiry is measured from the instant the renewal *started*, so
//! the network latency of the renewal itself never extends the token's believed validity.

// self
use crate::{
	_prelude::*,
	auth::{
		AuthChallenge, CachedToken, RenewalMetrics, SignedChallenge, TokenSecret,
		challenge::TokenResponse,
	},
	client::RegistryContext,
	error::RequestError,
	ext::Signer,
	http::{self, HttpRequest, RegistryHttpClient},
	obs::{self, Operation},
};

/// Token lifetime assumed when none is configured.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::hours(10);

/// Hands out registry tokens, renewing them at most once at a time.
pub struct Authenticator<C>
where
	C: ?Sized + RegistryHttpClient,
{
	context: RegistryContext<C>,
	signer: Arc<dyn Signer>,
	token_lifetime: Duration,
	cached: RwLock<CachedToken>,
	renewal_guard: AsyncMutex<()>,
	metrics: RenewalMetrics,
}
impl<C> Authenticator<C>
where
	C: ?Sized + RegistryHttpClient,
{
	/// Creates an authenticator with an empty cache.
	///
	/// A non-positive `token_lifetime` makes every call renew.
	pub fn new(
		context: RegistryContext<C>,
		signer: Arc<dyn Signer>,
		token_lifetime: Duration,
	) -> Self {
		Self {
			context,
			signer,
			token_lifetime,
			cached: RwLock::new(CachedToken::expired()),
			renewal_guard: AsyncMutex::new(()),
			metrics: RenewalMetrics::default(),
		}
	}

	/// Lifetime assigned to every renewed token.
	pub fn token_lifetime(&self) -> Duration {
		self.token_lifetime
	}

	/// Counters describing cache hits and renewals so far.
	pub fn metrics(&self) -> &RenewalMetrics {
		&self.metrics
	}

	/// Expiry of the currently cached token.
	pub fn cached_expiry(&self) -> OffsetDateTime {
		self.cached.read().expires_at()
	}

	/// Returns a token that is fresh at the time of the call, renewing it when necessary.
	///
	/// Renewal failures leave the previous cache contents untouched, so the next call starts
	/// a clean renewal.
	pub async fn get_token(&self) -> Result<TokenSecret> {
		let fresh = self.cached.read().fresh_at(OffsetDateTime::now_utc());

		if let Some(token) = fresh {
			self.metrics.record_cache_hit();

			return Ok(token);
		}

		let _singleflight = self.renewal_guard.lock().await;
		let started_at = OffsetDateTime::now_utc();
		let joined = self.cached.read().fresh_at(started_at);

		if let Some(token) = joined {
			self.metrics.record_cache_hit();

			return Ok(token);
		}

		self.metrics.record_attempt();

		let token = obs::observe(Operation::TokenRenewal, "get_token", self.renew())
			.await
			.inspect_err(|_| self.metrics.record_failure())?;
		let expires_at = started_at.checked_add(self.token_lifetime).unwrap_or(started_at);

		*self.cached.write() = CachedToken::issued(token.clone(), expires_at);

		obs::record_token_renewal(expires_at, self.token_lifetime);

		self.metrics.record_success();

		Ok(token)
	}

	async fn renew(&self) -> Result<TokenSecret> {
		let challenge = self.fetch_challenge().await?;
		let signed =
			SignedChallenge::answer(challenge, self.signer.as_ref(), self.context.encoder.as_ref());

		self.exchange_token(signed).await
	}

	async fn fetch_challenge(&self) -> Result<AuthChallenge> {
		obs::observe(Operation::AuthChallenge, "fetch_challenge", async {
			let request = HttpRequest::get(self.context.endpoints.auth_challenge_url());

			http::exchange_json(self.context.http_client.as_ref(), &self.context.limiter, request)
				.await
				.map_err(|source| Error::AuthChallenge { source })
		})
		.await
	}

	async fn exchange_token(&self, signed: SignedChallenge) -> Result<TokenSecret> {
		obs::observe(Operation::TokenExchange, "exchange_token", async {
			let body = serde_json::to_vec(&signed)
				.map_err(|e| Error::TokenExchange { source: RequestError::Encode(e) })?;
			let request = HttpRequest::post_json(self.context.endpoints.token_url(), body);
			let response: TokenResponse = http::exchange_json(
				self.context.http_client.as_ref(),
				&self.context.limiter,
				request,
			)
			.await
			.map_err(|source| Error::TokenExchange { source })?;

			Ok(TokenSecret::new(response.token))
		})
		.await
	}
}
impl<C> Debug for Authenticator<C>
where
	C: ?Sized + RegistryHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("token_lifetime", &self.token_lifetime)
			.field("cached_expiry", &self.cached_expiry())
			.field("metrics", &self.metrics)
			.finish()
	}
}
