//! Registry endpoint configuration.
//!
//! [`EndpointProvider`] is the seam the authenticator and registrar resolve URLs through;
//! [`RegistryEndpoints`] is the validated production implementation, assembled with
//! [`RegistryEndpointsBuilder`] so individual endpoints (or the whole host) can be pointed
//! elsewhere, e.g. at a sandbox or a local mock server.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production URL of the authentication challenge endpoint.
pub const AUTH_CHALLENGE_URL: &str = "https://ismp.crpt.ru/api/v3/auth/cert/key";
/// Production URL of the token exchange endpoint.
pub const TOKEN_URL: &str = "https://ismp.crpt.ru/api/v3/auth/cert/";
/// Production URL of the document creation endpoint.
pub const CREATE_DOCUMENT_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

const AUTH_CHALLENGE_PATH: &str = "/api/v3/auth/cert/key";
const TOKEN_PATH: &str = "/api/v3/auth/cert/";
const CREATE_DOCUMENT_PATH: &str = "/api/v3/lk/documents/create";
const PRODUCT_GROUP_PARAM: &str = "pg";

/// Supplies the URLs the client talks to.
pub trait EndpointProvider
where
	Self: Send + Sync,
{
	/// URL answering `GET` with an authentication challenge.
	fn auth_challenge_url(&self) -> Url;

	/// URL accepting a signed challenge and returning a token.
	fn token_url(&self) -> Url;

	/// URL accepting document submissions, scoped to `product_group` when provided.
	fn create_document_url(&self, product_group: Option<&str>) -> Url;
}

/// Immutable, validated endpoint set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEndpoints {
	/// Authentication challenge endpoint.
	pub auth_challenge: Url,
	/// Token exchange endpoint.
	pub token: Url,
	/// Document creation endpoint (without the product-group query).
	pub create_document: Url,
}
impl RegistryEndpoints {
	/// Creates a new builder seeded with the production endpoints.
	pub fn builder() -> RegistryEndpointsBuilder {
		RegistryEndpointsBuilder::default()
	}

	/// Production endpoint set.
	pub fn production() -> Result<Self, ConfigError> {
		Self::builder().build()
	}
}
impl EndpointProvider for RegistryEndpoints {
	fn auth_challenge_url(&self) -> Url {
		self.auth_challenge.clone()
	}

	fn token_url(&self) -> Url {
		self.token.clone()
	}

	fn create_document_url(&self, product_group: Option<&str>) -> Url {
		let mut url = self.create_document.clone();

		if let Some(group) = product_group {
			url.query_pairs_mut().append_pair(PRODUCT_GROUP_PARAM, group);
		}

		url
	}
}

/// Builder for [`RegistryEndpoints`] values.
#[derive(Debug, Default)]
pub struct RegistryEndpointsBuilder {
	/// Host every endpoint without an explicit override is resolved against.
	pub base_url: Option<Url>,
	/// Explicit authentication challenge endpoint.
	pub auth_challenge: Option<Url>,
	/// Explicit token exchange endpoint.
	pub token: Option<Url>,
	/// Explicit document creation endpoint.
	pub create_document: Option<Url>,
}
impl RegistryEndpointsBuilder {
	/// Resolves the standard API paths against `url` instead of the production host.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the authentication challenge endpoint.
	pub fn auth_challenge(mut self, url: Url) -> Self {
		self.auth_challenge = Some(url);

		self
	}

	/// Overrides the token exchange endpoint.
	pub fn token(mut self, url: Url) -> Self {
		self.token = Some(url);

		self
	}

	/// Overrides the document creation endpoint.
	pub fn create_document(mut self, url: Url) -> Self {
		self.create_document = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting endpoint set.
	pub fn build(self) -> Result<RegistryEndpoints, ConfigError> {
		let base = self.base_url.as_ref();
		let auth_challenge = resolve(
			"auth_challenge",
			self.auth_challenge,
			base,
			AUTH_CHALLENGE_PATH,
			AUTH_CHALLENGE_URL,
		)?;
		let token = resolve("token", self.token, base, TOKEN_PATH, TOKEN_URL)?;
		let create_document = resolve(
			"create_document",
			self.create_document,
			base,
			CREATE_DOCUMENT_PATH,
			CREATE_DOCUMENT_URL,
		)?;

		Ok(RegistryEndpoints { auth_challenge, token, create_document })
	}
}

fn resolve(
	name: &'static str,
	explicit: Option<Url>,
	base: Option<&Url>,
	path: &str,
	production: &str,
) -> Result<Url, ConfigError> {
	let url = match (explicit, base) {
		(Some(url), _) => Ok(url),
		(None, Some(base)) => base.join(path),
		(None, None) => Url::parse(production),
	}
	.map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })?;

	validate_endpoint(name, &url)?;

	Ok(url)
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse endpoint fixture.")
	}

	#[test]
	fn production_endpoints_match_registry_defaults() {
		let endpoints = RegistryEndpoints::production().expect("Production endpoints should parse.");

		assert_eq!(endpoints.auth_challenge_url().as_str(), AUTH_CHALLENGE_URL);
		assert_eq!(endpoints.token_url().as_str(), TOKEN_URL);
		assert_eq!(endpoints.create_document_url(None).as_str(), CREATE_DOCUMENT_URL);
		assert_eq!(
			endpoints.create_document_url(Some("milk")).as_str(),
			"https://ismp.crpt.ru/api/v3/lk/documents/create?pg=milk"
		);
	}

	#[test]
	fn base_url_rehomes_standard_paths() {
		let endpoints = RegistryEndpoints::builder()
			.base_url(url("http://127.0.0.1:5000"))
			.token(url("https://auth.example.com/token"))
			.build()
			.expect("Rehomed endpoints should build.");

		assert_eq!(endpoints.auth_challenge.as_str(), "http://127.0.0.1:5000/api/v3/auth/cert/key");
		assert_eq!(endpoints.token.as_str(), "https://auth.example.com/token");
		assert_eq!(
			endpoints.create_document.as_str(),
			"http://127.0.0.1:5000/api/v3/lk/documents/create"
		);
	}

	#[test]
	fn builder_rejects_unsupported_schemes() {
		let err = RegistryEndpoints::builder()
			.create_document(url("ftp://registry.example.com/create"))
			.build()
			.expect_err("Builder should reject non-HTTP endpoints.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { endpoint: "create_document", .. }));
	}

	#[test]
	fn product_group_is_query_encoded() {
		let endpoints = RegistryEndpoints::production().expect("Production endpoints should parse.");

		assert_eq!(
			endpoints.create_document_url(Some("light industry")).query(),
			Some("pg=light+industry")
		);
	}
}
