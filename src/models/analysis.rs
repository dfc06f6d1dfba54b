//! Derived analysis sections: liability, serious-injury threshold, damages.

use serde::{Deserialize, Serialize};

use super::enums::ThresholdCategory;
use super::sections::Lien;

/// Fault split between the parties; shares always sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilitySplit {
    pub plaintiff: u8,
    pub defendant: u8,
}

impl Default for LiabilitySplit {
    fn default() -> Self {
        LiabilitySplit {
            plaintiff: 0,
            defendant: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiabilityAnalysis {
    pub fault_determination: String,
    pub at_fault_party: String,
    pub contributing_factors: Vec<String>,
    /// Evidence items in load order; duplicates are separate signal instances.
    pub evidence: Vec<String>,
    pub liability_percentage: LiabilitySplit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriousInjuryAnalysis {
    /// Categories met, deduplicated, first-seen order.
    pub threshold_categories: Vec<ThresholdCategory>,
    pub supporting_evidence: Vec<String>,
    pub meets_threshold: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalExpenses {
    pub total_billed: f64,
    pub paid_by_insurance: f64,
    pub adjustments: f64,
    pub outstanding: f64,
    pub liens: Vec<Lien>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostWages {
    pub estimated: f64,
    pub notes: String,
}

impl Default for LostWages {
    fn default() -> Self {
        LostWages {
            estimated: 0.0,
            notes: "To be calculated based on employment records".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialDamages {
    pub medical_expenses: MedicalExpenses,
    pub lost_wages: LostWages,
    pub total_special_damages: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liability_split_defaults_to_full_defendant_fault() {
        let split = LiabilitySplit::default();
        assert_eq!(split.plaintiff, 0);
        assert_eq!(split.defendant, 100);
        assert_eq!(split.plaintiff as u16 + split.defendant as u16, 100);
    }
}
