//! Client-level error types shared by the limiter, authenticator, and registrar.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every variant wraps the failure that caused it; nothing is retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised before any object is created.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Fetching the authentication challenge failed.
	#[error("Failed to fetch the authentication challenge.")]
	AuthChallenge {
		/// Underlying request failure.
		#[source]
		source: RequestError,
	},
	/// Exchanging the signed challenge for a token failed.
	#[error("Failed to exchange the signed challenge for a token.")]
	TokenExchange {
		/// Underlying request failure.
		#[source]
		source: RequestError,
	},
	/// Submitting the document for registration failed.
	#[error("Failed to register the document.")]
	DocumentRegistration {
		/// Underlying request failure.
		#[source]
		source: RequestError,
	},
}
impl Error {
	/// Returns the HTTP status attached to the failure, if the registry answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Config(_) => None,
			Self::AuthChallenge { source }
			| Self::TokenExchange { source }
			| Self::DocumentRegistration { source } => source.status(),
		}
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Rate budget permit count must be positive.
	#[error("Rate limit must allow a positive number of requests, got {permits}.")]
	NonPositiveRateLimit {
		/// Rejected permit count.
		permits: i64,
	},
	/// Rate budget window must be positive.
	#[error("Rate limit window must be positive.")]
	NonPositiveWindow,
	/// Token lifetime must be positive.
	#[error("Token lifetime must be positive.")]
	NonPositiveTokenLifetime,
	/// Rate budget window exceeds what the limiter can schedule.
	#[error("Rate limit window must not exceed {max}.")]
	WindowTooLong {
		/// Longest accepted window.
		max: Duration,
	},
	/// Endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Failure of a single registry round trip.
#[derive(Debug, ThisError)]
pub enum RequestError {
	/// The transport never produced a response.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The registry answered with a non-success status.
	#[error("Registry responded with HTTP {status}: {body}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Truncated response body for diagnostics.
		body: String,
	},
	/// The response body could not be parsed.
	#[error("Registry returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// A JSON value was followed by unexpected trailing data.
	#[error("Registry response has trailing data after the JSON value.")]
	TrailingData {
		/// Parser failure raised at the trailing data.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
	/// The request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Encode(#[source] serde_json::Error),
}
impl RequestError {
	/// Returns the HTTP status code when the registry produced a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. }
			| Self::Parse { status, .. }
			| Self::TrailingData { status, .. } => Some(*status),
			Self::Transport(_) | Self::Encode(_) => None,
		}
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the registry.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_errors_expose_their_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
		let err = Error::AuthChallenge { source: TransportError::network(io).into() };

		assert!(err.to_string().contains("authentication challenge"));
		assert_eq!(err.status(), None);

		let source = StdError::source(&err)
			.expect("Client errors should expose the underlying request failure.");

		assert!(source.to_string().contains("Network error"));
	}

	#[test]
	fn status_failures_report_their_code() {
		let err = Error::DocumentRegistration {
			source: RequestError::Status { status: 403, body: "forbidden".into() },
		};

		assert_eq!(err.status(), Some(403));
		assert!(
			StdError::source(&err)
				.expect("Status failures should be attached as the source.")
				.to_string()
				.contains("HTTP 403")
		);
	}
}
