//! Construction-time configuration for [`RegistryClient`](crate::client::RegistryClient).

// self
use crate::{
	_prelude::*,
	auth::DEFAULT_TOKEN_LIFETIME,
	document::DocumentType,
	endpoints::RegistryEndpoints,
	error::ConfigError,
	rate_limit::RateBudget,
};

/// Immutable, validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Request budget shared by every outbound call.
	pub rate_budget: RateBudget,
	/// Lifetime assigned to each renewed token.
	pub token_lifetime: Duration,
	/// Registry endpoints.
	pub endpoints: RegistryEndpoints,
	/// Product group attached to documents created through the convenience API.
	pub product_group: Option<String>,
	/// Document type used by the convenience API.
	pub document_type: DocumentType,
}
impl ClientConfig {
	/// Creates a new builder for the provided budget.
	pub fn builder(rate_budget: RateBudget) -> ClientConfigBuilder {
		ClientConfigBuilder::new(rate_budget)
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Request budget shared by every outbound call.
	pub rate_budget: RateBudget,
	/// Lifetime assigned to each renewed token (defaults to ten hours).
	pub token_lifetime: Duration,
	/// Endpoint set; production endpoints when unset.
	pub endpoints: Option<RegistryEndpoints>,
	/// Product group for the convenience API.
	pub product_group: Option<String>,
	/// Document type for the convenience API.
	pub document_type: DocumentType,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided budget and defaults for everything else.
	pub fn new(rate_budget: RateBudget) -> Self {
		Self {
			rate_budget,
			token_lifetime: DEFAULT_TOKEN_LIFETIME,
			endpoints: None,
			product_group: None,
			document_type: DocumentType::default(),
		}
	}

	/// Overrides the token lifetime.
	pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
		self.token_lifetime = lifetime;

		self
	}

	/// Overrides the endpoint set.
	pub fn endpoints(mut self, endpoints: RegistryEndpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Sets the product group used by the convenience API.
	///
	/// Unset by default, in which case documents are submitted without a `pg` query parameter
	/// or body field. Accounts registered for a single product group (e.g. `milk`) must set it
	/// explicitly.
	pub fn product_group(mut self, group: impl Into<String>) -> Self {
		self.product_group = Some(group.into());

		self
	}

	/// Overrides the document type used by the convenience API.
	pub fn document_type(mut self, document_type: DocumentType) -> Self {
		self.document_type = document_type;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if !self.token_lifetime.is_positive() {
			return Err(ConfigError::NonPositiveTokenLifetime);
		}

		let endpoints = match self.endpoints {
			Some(endpoints) => endpoints,
			None => RegistryEndpoints::production()?,
		};

		Ok(ClientConfig {
			rate_budget: self.rate_budget,
			token_lifetime: self.token_lifetime,
			endpoints,
			product_group: self.product_group,
			document_type: self.document_type,
		})
	}
}
