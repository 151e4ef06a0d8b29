//! Token secret wrapper and the authenticator's cached token slot.

// crates.io
use time::Date;
// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Token value paired with the instant after which it must no longer be handed out.
///
/// The pair is always replaced as a whole, so readers never observe a new token with an old
/// expiry or the reverse.
#[derive(Clone, Debug)]
pub struct CachedToken {
	token: Option<TokenSecret>,
	expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Empty slot whose expiry lies in the far past, forcing the first caller to renew.
	pub fn expired() -> Self {
		Self { token: None, expires_at: Date::MIN.midnight().assume_utc() }
	}

	/// Slot holding a freshly issued token.
	pub fn issued(token: TokenSecret, expires_at: OffsetDateTime) -> Self {
		Self { token: Some(token), expires_at }
	}

	/// Instant at which the cached token stops being served.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// Returns `true` when a token is cached and `instant` is strictly before its expiry.
	pub fn is_fresh_at(&self, instant: OffsetDateTime) -> bool {
		self.token.is_some() && instant < self.expires_at
	}

	/// Returns a copy of the token if it is still fresh at `instant`.
	pub fn fresh_at(&self, instant: OffsetDateTime) -> Option<TokenSecret> {
		if self.is_fresh_at(instant) { self.token.clone() } else { None }
	}
}
impl Default for CachedToken {
	fn default() -> Self {
		Self::expired()
	}
}
