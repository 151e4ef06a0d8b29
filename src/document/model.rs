//! Record shape of the "introduce goods into circulation" document.
//!
//! Optional attributes are omitted from the serialized payload when absent. Dates serialize as
//! `YYYY-MM-DD`.

// crates.io
use time::Date;
// self
use crate::_prelude::*;

/// Document body registered with [`DocumentType::LpIntroduceGoods`](super::DocumentType).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
	/// Participant description block.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub description: Option<Description>,
	/// Caller-side document identifier.
	pub doc_id: String,
	/// Caller-side document status.
	pub doc_status: String,
	/// Document type label.
	pub doc_type: String,
	/// Whether the goods were imported.
	#[serde(rename = "importRequest", skip_serializing_if = "Option::is_none", default)]
	pub import_request: Option<bool>,
	/// Taxpayer number of the participant submitting the document.
	pub participant_inn: String,
	/// Taxpayer number of the producer.
	pub producer_inn: String,
	/// Production date.
	pub production_date: Date,
	/// Production type label.
	pub production_type: String,
	/// Products covered by the document.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub products: Option<Vec<Product>>,
	/// Registration date.
	pub reg_date: Date,
	/// Registration number.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub reg_number: Option<String>,
}

/// Single product entry in a [`DocumentData`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Conformity document kind.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub certificate_document: Option<String>,
	/// Conformity document date.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub certificate_document_date: Option<Date>,
	/// Conformity document number.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub certificate_document_number: Option<String>,
	/// Taxpayer number of the owner.
	pub owner_inn: String,
	/// Taxpayer number of the producer.
	pub producer_inn: String,
	/// Production date.
	pub production_date: Date,
	/// Commodity code.
	pub tnved_code: String,
	/// Unit identification code.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub uit_code: Option<String>,
	/// Package identification code.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub uitu_code: Option<String>,
}

/// Participant description block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
	/// Taxpayer number of the participant.
	#[serde(rename = "participantInn")]
	pub participant_inn: String,
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::date;
	// self
	use super::*;

	#[test]
	fn document_serializes_with_registry_field_names() {
		let document = DocumentData {
			description: Some(Description { participant_inn: "7700000000".into() }),
			doc_id: "doc-1".into(),
			doc_status: "NEW".into(),
			doc_type: "LP_INTRODUCE_GOODS".into(),
			import_request: Some(false),
			participant_inn: "7700000000".into(),
			producer_inn: "7700000001".into(),
			production_date: date!(2024 - 03 - 01),
			production_type: "OWN_PRODUCTION".into(),
			products: Some(vec![Product {
				certificate_document: None,
				certificate_document_date: Some(date!(2024 - 02 - 15)),
				certificate_document_number: None,
				owner_inn: "7700000000".into(),
				producer_inn: "7700000001".into(),
				production_date: date!(2024 - 03 - 01),
				tnved_code: "0401".into(),
				uit_code: Some("010460".into()),
				uitu_code: None,
			}]),
			reg_date: date!(2024 - 03 - 02),
			reg_number: None,
		};
		let value = serde_json::to_value(&document).expect("Document should serialize.");

		assert_eq!(value["description"]["participantInn"], "7700000000");
		assert_eq!(value["importRequest"], false);
		assert_eq!(value["production_date"], "2024-03-01");
		assert_eq!(value["products"][0]["certificate_document_date"], "2024-02-15");
		assert!(value.get("reg_number").is_none());
		assert!(value["products"][0].get("uitu_code").is_none());

		let round_trip: DocumentData =
			serde_json::from_value(value).expect("Serialized document should deserialize.");

		assert_eq!(round_trip, document);
	}
}
