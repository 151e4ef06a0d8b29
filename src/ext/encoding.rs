//! Reversible text encodings applied to signatures and document payloads.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// Errors raised when decoding text that was not produced by the matching encoder.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Input is not valid Base64.
	#[error("Input is not valid Base64.")]
	Base64(#[from] base64::DecodeError),
	/// Decoded bytes are not valid UTF-8.
	#[error("Decoded bytes are not valid UTF-8.")]
	Utf8(#[from] std::string::FromUtf8Error),
	/// Input is not in the encoder's alphabet; raised by custom encoders.
	#[error("Encoded input is malformed at byte {position}.")]
	Malformed {
		/// Byte offset of the first offending character.
		position: usize,
	},
}

/// Reversible textual transport encoding.
///
/// Implementations must satisfy `decode(&encode(s)) == Ok(s)` for every string `s`.
pub trait TextEncoder
where
	Self: Send + Sync,
{
	/// Encodes `data` for transport.
	fn encode(&self, data: &str) -> String;

	/// Reverses [`TextEncoder::encode`].
	fn decode(&self, encoded: &str) -> Result<String, DecodeError>;
}

/// Standard-alphabet, padded Base64 over the UTF-8 bytes of the input.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64TextEncoder;
impl TextEncoder for Base64TextEncoder {
	fn encode(&self, data: &str) -> String {
		STANDARD.encode(data.as_bytes())
	}

	fn decode(&self, encoded: &str) -> Result<String, DecodeError> {
		let bytes = STANDARD.decode(encoded.as_bytes())?;

		Ok(String::from_utf8(bytes)?)
	}
}
