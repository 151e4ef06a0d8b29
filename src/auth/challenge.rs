//! Wire payloads exchanged during token renewal.

// self
use crate::{
	_prelude::*,
	ext::{Signer, TextEncoder},
};

/// Challenge issued by the registry; consumed once per renewal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthChallenge {
	/// Opaque challenge identifier echoed back during the exchange.
	#[serde(rename = "uuid")]
	pub challenge_id: String,
	/// Random data the caller must sign.
	#[serde(rename = "data")]
	pub challenge_data: String,
}

/// Challenge answer submitted to the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedChallenge {
	/// Identifier copied from the originating [`AuthChallenge`].
	#[serde(rename = "uuid")]
	pub challenge_id: String,
	/// Encoded signature over the challenge data.
	#[serde(rename = "data")]
	pub signed_data: String,
}
impl SignedChallenge {
	/// Signs the challenge data and encodes the signature for transport.
	pub fn answer(challenge: AuthChallenge, signer: &dyn Signer, encoder: &dyn TextEncoder) -> Self {
		let signature = signer.sign(&challenge.challenge_data);

		Self { challenge_id: challenge.challenge_id, signed_data: encoder.encode(&signature) }
	}
}

/// Token endpoint response body.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
	pub(crate) token: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::ext::Base64TextEncoder;

	#[test]
	fn challenge_uses_registry_field_names() {
		let challenge: AuthChallenge = serde_json::from_str(r#"{"uuid":"u1","data":"d1","extra":1}"#)
			.expect("Challenge payload should deserialize.");

		assert_eq!(challenge.challenge_id, "u1");
		assert_eq!(challenge.challenge_data, "d1");
	}

	#[test]
	fn answer_signs_data_and_encodes_signature() {
		let challenge = AuthChallenge { challenge_id: "u1".into(), challenge_data: "d1".into() };
		let signer = |data: &str| format!("SIG({data})");
		let signed = SignedChallenge::answer(challenge, &signer, &Base64TextEncoder);

		assert_eq!(signed.challenge_id, "u1");
		assert_eq!(
			Base64TextEncoder.decode(&signed.signed_data).expect("Signature should decode."),
			"SIG(d1)"
		);
		assert_eq!(
			serde_json::to_value(&signed).expect("Signed challenge should serialize."),
			serde_json::json!({ "uuid": "u1", "data": signed.signed_data }),
		);
	}
}
