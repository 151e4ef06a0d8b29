//! Document submission types and the registrar that sends them.
//!
//! A [`DocumentSubmission`] carries an already-serialized payload plus its detached signature;
//! [`DocumentRegistrar`] encodes both, wraps them in a [`RegistrationRequest`], and returns the
//! identifier the registry assigned.

pub mod model;
pub mod registrar;

pub use model::*;
pub use registrar::*;

// self
use crate::_prelude::*;

/// Document types accepted by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
	/// Aggregation of units into a package.
	AggregationDocument,
	/// Disaggregation of a package.
	DisaggregationDocument,
	/// Re-aggregation of a package.
	ReaggregationDocument,
	/// Introduction into circulation of goods produced in the country.
	#[default]
	LpIntroduceGoods,
	/// Shipment of goods.
	LpShipGoods,
	/// Acceptance of goods.
	LpAcceptGoods,
	/// Re-marking.
	LkRemark,
	/// Retail receipt.
	LkReceipt,
	/// Import of goods.
	LpGoodsImport,
	/// Cancellation of a shipment.
	LpCancelShipment,
	/// Write-off of unapplied identification codes.
	LkKmCancellation,
	/// Write-off of applied identification codes.
	LkAppliedKmCancellation,
	/// Introduction into circulation under a commission contract.
	LkContractCommissioning,
	/// Introduction into circulation by an individual.
	LkIndiCommissioning,
	/// Shipment with withdrawal from circulation.
	LpShipReceipt,
	/// Description of remaining stock.
	OstDescription,
	/// Cross-border shipment.
	Crossborder,
	/// Introduction of remaining stock into circulation.
	LpIntroduceOst,
	/// Return into circulation.
	LpReturn,
	/// Cross-border shipment of goods.
	LpShipGoodsCrossborder,
	/// Cancellation of a cross-border shipment.
	LpCancelShipmentCrossborder,
}
impl DocumentType {
	/// Returns the registry's wire name for the type.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AggregationDocument => "AGGREGATION_DOCUMENT",
			Self::DisaggregationDocument => "DISAGGREGATION_DOCUMENT",
			Self::ReaggregationDocument => "REAGGREGATION_DOCUMENT",
			Self::LpIntroduceGoods => "LP_INTRODUCE_GOODS",
			Self::LpShipGoods => "LP_SHIP_GOODS",
			Self::LpAcceptGoods => "LP_ACCEPT_GOODS",
			Self::LkRemark => "LK_REMARK",
			Self::LkReceipt => "LK_RECEIPT",
			Self::LpGoodsImport => "LP_GOODS_IMPORT",
			Self::LpCancelShipment => "LP_CANCEL_SHIPMENT",
			Self::LkKmCancellation => "LK_KM_CANCELLATION",
			Self::LkAppliedKmCancellation => "LK_APPLIED_KM_CANCELLATION",
			Self::LkContractCommissioning => "LK_CONTRACT_COMMISSIONING",
			Self::LkIndiCommissioning => "LK_INDI_COMMISSIONING",
			Self::LpShipReceipt => "LP_SHIP_RECEIPT",
			Self::OstDescription => "OST_DESCRIPTION",
			Self::Crossborder => "CROSSBORDER",
			Self::LpIntroduceOst => "LP_INTRODUCE_OST",
			Self::LpReturn => "LP_RETURN",
			Self::LpShipGoodsCrossborder => "LP_SHIP_GOODS_CROSSBORDER",
			Self::LpCancelShipmentCrossborder => "LP_CANCEL_SHIPMENT_CROSSBORDER",
		}
	}
}
impl Display for DocumentType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Format marker sent alongside every document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentFormat {
	/// JSON document body assembled by the caller.
	#[default]
	Manual,
}

/// Caller-facing description of one document to register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSubmission {
	/// Canonical JSON text of the document.
	pub payload: String,
	/// Detached signature over `payload`.
	pub signature: String,
	/// Optional product group the document belongs to.
	pub product_group: Option<String>,
	/// Registry document type.
	pub document_type: DocumentType,
}
impl DocumentSubmission {
	/// Creates a submission of the default document type without a product group.
	pub fn new(payload: impl Into<String>, signature: impl Into<String>) -> Self {
		Self {
			payload: payload.into(),
			signature: signature.into(),
			product_group: None,
			document_type: DocumentType::default(),
		}
	}

	/// Scopes the submission to a product group.
	pub fn with_product_group(mut self, group: impl Into<String>) -> Self {
		self.product_group = Some(group.into());

		self
	}

	/// Overrides the document type.
	pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
		self.document_type = document_type;

		self
	}
}

/// Request body posted to the document creation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest<'a> {
	/// Format marker.
	pub document_format: DocumentFormat,
	/// Encoded document payload.
	pub product_document: String,
	/// Product group; omitted from the body when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_group: Option<&'a str>,
	/// Encoded signature.
	pub signature: String,
	/// Document type.
	#[serde(rename = "type")]
	pub document_type: DocumentType,
}

/// Identifier the registry assigned to a registered document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationResult {
	/// Registry document identifier.
	#[serde(rename = "value")]
	pub registry_id: String,
}
impl RegistrationResult {
	/// Consumes the result and returns the identifier.
	pub fn into_registry_id(self) -> String {
		self.registry_id
	}
}
impl AsRef<str> for RegistrationResult {
	fn as_ref(&self) -> &str {
		&self.registry_id
	}
}
impl Display for RegistrationResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.registry_id)
	}
}
