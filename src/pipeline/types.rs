//! Core types for the case aggregation pipeline.
//!
//! These types model the full lifecycle:
//! RawDocument → DocumentContribution → NormalizedCase → CaseSummary.
//! Contributions are partial: an adapter records only the fields it actually
//! found, so a later document can never be erased by an earlier document's
//! silence.

use crate::models::{
    Accident, BillLineItem, Defendant, DocumentCounts, DocumentType, Injuries, InsuranceCoverage,
    Lien, MedicalBills, Plaintiff, PolicyClassification, ThresholdCategory,
};

// ═══════════════════════════════════════════
// Raw input
// ═══════════════════════════════════════════

/// Raw per-document payload as produced by the upstream IDP pipeline.
/// The schema variant is inferred from the shape, never declared.
#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }
}

/// One extracted document fragment. Ephemeral: consumed once by the first
/// matching schema adapter.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub document_type: DocumentType,
    /// File name, used to identify the document in warnings.
    pub source: String,
    pub payload: Payload,
}

// ═══════════════════════════════════════════
// Partial contributions (output of adapters)
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct PlaintiffPatch {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub medical_record_number: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DefendantPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub vehicle: Option<String>,
    pub insurance: Option<String>,
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccidentPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub report_number: Option<String>,
    pub description: Option<String>,
    pub weather: Option<String>,
    pub road_conditions: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InjuriesPatch {
    pub diagnoses: Vec<String>,
    pub icd_codes: Vec<String>,
    pub body_parts: Vec<String>,
    pub treatment_plan: Vec<String>,
    pub work_restrictions: Option<String>,
    pub prognosis: Option<String>,
    pub imaging_findings: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BillsPatch {
    pub provider: Option<String>,
    /// Per-document monetary totals; the normalizer sums them across documents.
    pub charges: f64,
    pub paid: f64,
    pub owed: f64,
    pub adjustments: f64,
    pub liens: Vec<Lien>,
    pub cpt_codes: Vec<String>,
    pub line_items: Vec<BillLineItem>,
}

/// One insurance policy as seen by a single document, before role assignment.
#[derive(Debug, Clone, Default)]
pub struct PolicyPatch {
    pub carrier: Option<String>,
    pub policy_number: Option<String>,
    pub claim_number: Option<String>,
    /// Named insured as written; matched against the plaintiff for role
    /// assignment.
    pub named_insured: Option<String>,
    pub classification: Option<PolicyClassification>,
    pub bi_limits: Option<String>,
    pub pip_limits: Option<String>,
    pub sum_limits: Option<String>,
    pub bi_per_person: f64,
    pub pip_amount: f64,
    pub sum_amount: f64,
    pub um_amount: f64,
}

/// Fault signals read directly from police report documents.
#[derive(Debug, Clone, Default)]
pub struct FaultPatch {
    pub fault_determination: Option<String>,
    pub at_fault_party: Option<String>,
    pub contributing_factors: Vec<String>,
    pub witness_count: usize,
    pub diagram_present: bool,
    pub photos_taken: bool,
    /// Set by text adapters that saw camera mentions outside the narrative.
    pub camera_evidence: bool,
}

/// The typed, partial output of one adapter run over one document.
#[derive(Debug, Clone)]
pub struct DocumentContribution {
    pub document_type: DocumentType,
    pub plaintiff: PlaintiffPatch,
    pub defendant: DefendantPatch,
    pub accident: AccidentPatch,
    pub injuries: InjuriesPatch,
    pub bills: BillsPatch,
    pub policy: Option<PolicyPatch>,
    pub fault: FaultPatch,
    /// Statutory threshold indicators asserted by the document itself.
    pub threshold_flags: Vec<ThresholdCategory>,
    pub threshold_evidence: Vec<String>,
}

impl DocumentContribution {
    pub fn new(document_type: DocumentType) -> Self {
        DocumentContribution {
            document_type,
            plaintiff: PlaintiffPatch::default(),
            defendant: DefendantPatch::default(),
            accident: AccidentPatch::default(),
            injuries: InjuriesPatch::default(),
            bills: BillsPatch::default(),
            policy: None,
            fault: FaultPatch::default(),
            threshold_flags: Vec::new(),
            threshold_evidence: Vec::new(),
        }
    }
}

// ═══════════════════════════════════════════
// Normalized case (output of the fold)
// ═══════════════════════════════════════════

/// Fault facts carried from normalization into derived analysis.
/// Not part of the output contract; LiabilityAnalysis is derived from it.
#[derive(Debug, Clone, Default)]
pub struct FaultFacts {
    pub fault_determination: String,
    pub at_fault_party: String,
    pub contributing_factors: Vec<String>,
    pub witness_count: usize,
    pub diagram_present: bool,
    pub photos_taken: bool,
    pub camera_evidence: bool,
}

/// All six canonical sections plus the analysis inputs that do not appear in
/// the output contract directly.
#[derive(Debug, Clone, Default)]
pub struct NormalizedCase {
    pub document_counts: DocumentCounts,
    pub plaintiff: Plaintiff,
    pub defendant: Defendant,
    pub accident: Accident,
    pub injuries: Injuries,
    pub medical_bills: MedicalBills,
    pub insurance_coverage: InsuranceCoverage,
    pub fault: FaultFacts,
    pub threshold_flags: Vec<ThresholdCategory>,
    pub threshold_evidence: Vec<String>,
}
