//! The assembled case summary: the system's sole output contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::{LiabilityAnalysis, SeriousInjuryAnalysis, SpecialDamages};
use super::demand::DemandCalculation;
use super::enums::DocumentType;
use super::sections::{Accident, Defendant, Injuries, InsuranceCoverage, MedicalBills, Plaintiff};

/// Per-type count of documents that contributed to the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCounts {
    pub medical_records: usize,
    pub police_reports: usize,
    pub insurance_policies: usize,
    pub medical_bills: usize,
}

impl DocumentCounts {
    pub fn record(&mut self, document_type: DocumentType) {
        match document_type {
            DocumentType::MedicalRecords => self.medical_records += 1,
            DocumentType::PoliceReport => self.police_reports += 1,
            DocumentType::InsurancePolicy => self.insurance_policies += 1,
            DocumentType::MedicalBills => self.medical_bills += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.medical_records + self.police_reports + self.insurance_policies + self.medical_bills
    }
}

/// One immutable case summary per run. Assembled once from the normalized
/// sections and derived analysis; never incrementally merged with a prior run.
/// `Default` stamps the Unix epoch; [`crate::pipeline::assemble`] always sets
/// the real generation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    /// Derived from the corpus directory name.
    pub case_id: String,
    pub generated_at: DateTime<Utc>,
    pub document_counts: DocumentCounts,
    pub plaintiff: Plaintiff,
    pub defendant: Defendant,
    pub accident: Accident,
    pub injuries: Injuries,
    pub medical_bills: MedicalBills,
    pub insurance_coverage: InsuranceCoverage,
    pub liability_analysis: LiabilityAnalysis,
    pub serious_injury_analysis: SeriousInjuryAnalysis,
    pub special_damages: SpecialDamages,
    pub recommended_actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<DemandCalculation>,
}
