//! Liability assessment from police-report fault facts.

use crate::models::{LiabilityAnalysis, LiabilitySplit};

use super::super::types::NormalizedCase;

/// Build the liability section. Fault language passes through directly; the
/// narrative is only consulted for contributing factors when no explicit
/// fault-indicator section supplied them.
pub fn assess(case: &NormalizedCase) -> LiabilityAnalysis {
    let fault = &case.fault;
    let mut analysis = LiabilityAnalysis {
        fault_determination: fault.fault_determination.clone(),
        at_fault_party: fault.at_fault_party.clone(),
        contributing_factors: fault.contributing_factors.clone(),
        evidence: Vec::new(),
        liability_percentage: LiabilitySplit::default(),
    };

    if analysis.contributing_factors.is_empty() {
        analysis.contributing_factors = factors_from_narrative(&case.accident.description);
    }

    // Evidence items in fixed order so repeated runs render identically.
    if fault.diagram_present {
        analysis.evidence.push("Accident diagram".to_string());
    }
    if fault.photos_taken {
        analysis.evidence.push("Photos taken at scene".to_string());
    }
    if fault.witness_count > 0 {
        analysis
            .evidence
            .push(format!("{} witness statement(s)", fault.witness_count));
    }
    if fault.camera_evidence || mentions_camera(&case.accident.description) {
        analysis.evidence.push("Traffic camera footage".to_string());
    }

    analysis
}

fn factors_from_narrative(description: &str) -> Vec<String> {
    let text = description.to_lowercase();
    let mut factors = Vec::new();
    if text.contains("red light") || text.contains("red traffic signal") {
        factors.push("Ran red light".to_string());
    }
    if text.contains("cell phone") || text.contains("mobile telephone") {
        factors.push("Distracted driving (cell phone)".to_string());
    }
    factors
}

fn mentions_camera(description: &str) -> bool {
    let text = description.to_lowercase();
    text.contains("traffic camera") || text.contains("camera footage")
}
