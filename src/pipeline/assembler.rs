//! Final assembly of the case summary output contract.

use chrono::Utc;

use crate::models::{CaseSummary, DemandCalculation};

use super::analysis::DerivedAnalysis;
use super::types::NormalizedCase;

/// Compose the immutable summary from the normalized case and its derived
/// analysis. Consumes both; a summary is assembled exactly once per run.
pub fn assemble(
    case_id: &str,
    case: NormalizedCase,
    analysis: DerivedAnalysis,
    demand: Option<DemandCalculation>,
) -> CaseSummary {
    CaseSummary {
        case_id: case_id.to_string(),
        generated_at: Utc::now(),
        document_counts: case.document_counts,
        plaintiff: case.plaintiff,
        defendant: case.defendant,
        accident: case.accident,
        injuries: case.injuries,
        medical_bills: case.medical_bills,
        insurance_coverage: case.insurance_coverage,
        liability_analysis: analysis.liability,
        serious_injury_analysis: analysis.serious_injury,
        special_damages: analysis.special_damages,
        recommended_actions: analysis.recommended_actions,
        demand,
    }
}
