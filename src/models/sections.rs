//! Canonical case sections produced by normalization.
//!
//! Every field defaults to an empty string / zero / empty list; a rendered
//! summary never contains nulls for section fields. Code lists (ICD-10, CPT)
//! and body parts are sets semantically; the normalizer deduplicates them
//! while preserving first-seen order for deterministic output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plaintiff {
    pub name: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub medical_record_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defendant {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Display string, e.g. "2019 Ford F-150".
    pub vehicle: String,
    /// Display string, e.g. "Progressive Insurance Policy #PC-2024-45678".
    pub insurance: String,
    /// Cited violations in load order; duplicates preserved.
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accident {
    pub date: String,
    pub time: String,
    pub location: String,
    pub report_number: String,
    /// Narrative, truncated to 500 characters at extraction.
    pub description: String,
    pub weather: String,
    pub road_conditions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Injuries {
    pub diagnoses: Vec<String>,
    pub icd_codes: Vec<String>,
    pub body_parts: Vec<String>,
    pub treatment_plan: Vec<String>,
    pub work_restrictions: String,
    pub prognosis: String,
    pub imaging_findings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lien {
    pub provider: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillLineItem {
    pub date: String,
    pub cpt: String,
    pub description: String,
    pub charge: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalBills {
    pub providers: Vec<String>,
    /// Monetary totals are additive across bill documents, never overwritten.
    pub total_charges: f64,
    pub total_paid: f64,
    pub total_owed: f64,
    pub total_adjustments: f64,
    pub liens: Vec<Lien>,
    pub cpt_codes: Vec<String>,
    pub line_items: Vec<BillLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyInfo {
    pub carrier: String,
    pub policy_number: String,
    pub claim_number: String,
    /// Display string, e.g. "$100,000/$300,000".
    pub bi_limits: String,
    pub pip_limits: String,
    pub sum_limits: String,
    /// Per-person bodily injury limit; 0.0 means unknown.
    pub bi_per_person: f64,
    pub pip_amount: f64,
    pub sum_amount: f64,
    pub um_amount: f64,
}

impl PolicyInfo {
    pub fn is_empty(&self) -> bool {
        self.carrier.is_empty() && self.policy_number.is_empty() && self.bi_per_person == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceCoverage {
    pub plaintiff_policy: PolicyInfo,
    pub defendant_policy: PolicyInfo,
    /// Policies whose owner could not be determined from the named insured or
    /// a personal/commercial marker. Never silently assigned to a party.
    pub unassigned_policies: Vec<PolicyInfo>,
    pub pip_available: f64,
    pub sum_available: f64,
    pub um_available: f64,
    pub total_available_coverage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_to_empty_values() {
        let injuries = Injuries::default();
        assert!(injuries.diagnoses.is_empty());
        assert_eq!(injuries.work_restrictions, "");

        let bills = MedicalBills::default();
        assert_eq!(bills.total_charges, 0.0);
        assert!(bills.liens.is_empty());

        let coverage = InsuranceCoverage::default();
        assert!(coverage.plaintiff_policy.is_empty());
        assert_eq!(coverage.total_available_coverage, 0.0);
    }

    #[test]
    fn sections_serialize_without_nulls() {
        let json = serde_json::to_value(Accident::default()).unwrap();
        for (_, value) in json.as_object().unwrap() {
            assert!(!value.is_null());
        }
    }
}
