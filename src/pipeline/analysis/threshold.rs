//! Serious-injury threshold assessment (NY Insurance Law § 5102(d) analogue).
//!
//! The result is a union of indicator flags asserted by the documents
//! themselves and keyword scans over the normalized injuries section. Neither
//! source outranks the other. Categories deduplicate; evidence accumulates.

use crate::models::{SeriousInjuryAnalysis, ThresholdCategory};

use super::super::types::NormalizedCase;

pub fn assess(case: &NormalizedCase) -> SeriousInjuryAnalysis {
    let mut categories: Vec<ThresholdCategory> = Vec::new();
    let mut evidence = case.threshold_evidence.clone();

    for flag in &case.threshold_flags {
        mark(&mut categories, *flag);
    }

    let injuries = &case.injuries;
    if !injuries.work_restrictions.is_empty() {
        mark(&mut categories, ThresholdCategory::NinetyOneEighty);
        evidence.push(format!("Work restriction: {}", injuries.work_restrictions));
    }

    for diagnosis in &injuries.diagnoses {
        let lowered = diagnosis.to_lowercase();
        if lowered.contains("radiculopathy") {
            mark(&mut categories, ThresholdCategory::SignificantLimitation);
            evidence.push("Radiculopathy diagnosis".to_string());
        }
        if lowered.contains("fracture") {
            mark(&mut categories, ThresholdCategory::Fracture);
            evidence.push(format!("Fracture: {diagnosis}"));
        }
    }

    for finding in &injuries.imaging_findings {
        let lowered = finding.to_lowercase();
        if lowered.contains("bulging") || lowered.contains("herniation") {
            mark(&mut categories, ThresholdCategory::PermanentConsequentialLimitation);
            evidence.push(format!("Disc pathology: {finding}"));
        }
        // Tears support the claim but do not by themselves meet a category.
        if lowered.contains("tear") {
            evidence.push(format!("Soft tissue damage: {finding}"));
        }
    }

    let prognosis = injuries.prognosis.to_lowercase();
    if prognosis.contains("uncertain") || prognosis.contains("permanent") {
        evidence.push(format!("Prognosis: {}", injuries.prognosis));
    }

    let meets_threshold = !categories.is_empty();
    let notes = if meets_threshold {
        "Case likely meets NY serious injury threshold based on documented injuries and limitations."
    } else {
        "Additional documentation may be needed to establish serious injury threshold."
    };

    SeriousInjuryAnalysis {
        threshold_categories: categories,
        supporting_evidence: evidence,
        meets_threshold,
        notes: notes.to_string(),
    }
}

fn mark(categories: &mut Vec<ThresholdCategory>, category: ThresholdCategory) {
    if !categories.contains(&category) {
        categories.push(category);
    }
}
