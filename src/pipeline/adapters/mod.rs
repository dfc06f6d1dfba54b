//! Schema adapters: one per (document type × schema variant).
//!
//! Three upstream extraction generations produced three payload shapes for
//! the same document types: nested typed JSON, flat JSON reports, and free
//! text. Adapters are registered per document type in fixed order (nested,
//! flat, text) and the **first matching adapter wins**. Adapters are pure:
//! payload in, partial contribution out; a payload no adapter claims
//! contributes nothing and is logged.

pub mod flat_json;
pub mod nested_json;
pub mod text;

use crate::models::DocumentType;

use super::types::{DocumentContribution, Payload, RawDocument};

/// One schema variant's extraction logic for one document type.
pub trait SchemaAdapter: Send + Sync {
    /// Which document type this adapter handles.
    fn document_type(&self) -> DocumentType;

    /// Variant name for logging.
    fn variant(&self) -> &'static str;

    /// Whether the payload has the shape this adapter expects.
    fn matches(&self, payload: &Payload) -> bool;

    /// Extract a partial contribution. Fields not found are left absent.
    fn extract(&self, payload: &Payload) -> DocumentContribution;
}

/// All adapters for one document type, most specific first. Free text is
/// registered last because it accepts any text payload.
pub fn adapters_for(document_type: DocumentType) -> Vec<Box<dyn SchemaAdapter>> {
    match document_type {
        DocumentType::MedicalRecords => vec![
            Box::new(nested_json::NestedMedicalRecords),
            Box::new(flat_json::FlatMedicalRecords),
            Box::new(text::TextMedicalRecords),
        ],
        DocumentType::PoliceReport => vec![
            Box::new(nested_json::NestedPoliceReport),
            Box::new(text::TextPoliceReport),
        ],
        DocumentType::InsurancePolicy => vec![
            Box::new(nested_json::NestedInsurancePolicy),
            Box::new(text::TextInsurancePolicy),
        ],
        DocumentType::MedicalBills => vec![
            Box::new(nested_json::NestedMedicalBills),
            Box::new(text::TextMedicalBills),
        ],
    }
}

/// Run the first matching adapter over one document.
pub fn extract(document: &RawDocument) -> Option<DocumentContribution> {
    for adapter in adapters_for(document.document_type) {
        if adapter.matches(&document.payload) {
            tracing::debug!(
                source = %document.source,
                variant = adapter.variant(),
                "Schema adapter matched"
            );
            return Some(adapter.extract(&document.payload));
        }
    }
    tracing::warn!(
        source = %document.source,
        document_type = document.document_type.as_str(),
        "No schema adapter matched payload shape; document contributes nothing"
    );
    None
}
