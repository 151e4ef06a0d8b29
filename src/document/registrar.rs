//! Document registration against the create-document endpoint.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::RegistryContext,
	document::{DocumentFormat, DocumentSubmission, RegistrationRequest, RegistrationResult},
	error::RequestError,
	http::{self, HttpRequest, RegistryHttpClient},
	obs::{self, Operation},
};

/// Submits signed documents and extracts the identifier the registry assigns.
///
/// The registrar never keeps the token it is handed; each call borrows it for exactly one
/// request.
pub struct DocumentRegistrar<C>
where
	C: ?Sized + RegistryHttpClient,
{
	context: RegistryContext<C>,
}
impl<C> DocumentRegistrar<C>
where
	C: ?Sized + RegistryHttpClient,
{
	/// Creates a registrar sharing the provided transport, limiter, endpoints, and encoder.
	pub fn new(context: RegistryContext<C>) -> Self {
		Self { context }
	}

	/// Registers `submission`, authenticating with `token`.
	///
	/// Every failure (encoding, transport, status, or parsing) surfaces as
	/// [`Error::DocumentRegistration`]; nothing is retried.
	pub async fn register(
		&self,
		submission: &DocumentSubmission,
		token: &TokenSecret,
	) -> Result<RegistrationResult> {
		obs::observe(Operation::DocumentRegistration, "register", async {
			let request = self
				.build_request(submission, token)
				.map_err(|source| Error::DocumentRegistration { source })?;

			http::exchange_json(self.context.http_client.as_ref(), &self.context.limiter, request)
				.await
				.map_err(|source| Error::DocumentRegistration { source })
		})
		.await
	}

	/// Assembles the HTTP request for `submission` without sending it.
	pub fn build_request(
		&self,
		submission: &DocumentSubmission,
		token: &TokenSecret,
	) -> Result<HttpRequest, RequestError> {
		let encoder = self.context.encoder.as_ref();
		let product_group = submission.product_group.as_deref();
		let body = RegistrationRequest {
			document_format: DocumentFormat::Manual,
			product_document: encoder.encode(&submission.payload),
			product_group,
			signature: encoder.encode(&submission.signature),
			document_type: submission.document_type,
		};
		let body = serde_json::to_vec(&body).map_err(RequestError::Encode)?;
		let url = self.context.endpoints.create_document_url(product_group);

		Ok(HttpRequest::post_json(url, body).with_bearer(token))
	}
}
impl<C> Debug for DocumentRegistrar<C>
where
	C: ?Sized + RegistryHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DocumentRegistrar").finish_non_exhaustive()
	}
}
