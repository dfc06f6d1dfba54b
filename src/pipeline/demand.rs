//! Settlement demand calculation.
//!
//! Pure function of the normalized case and derived analysis. Severity is an
//! ordered decision list (first match wins), liability strength is a bounded
//! additive score over fault language and evidence, and the final figure is
//! rounded to the nearest $500, half up.

use tracing::debug;

use crate::models::{
    DemandCalculation, InjurySeverity, LiabilityAnalysis, MultiplierTable, PolicyInfo,
    ThresholdCategory,
};

use super::analysis::DerivedAnalysis;
use super::types::NormalizedCase;
use super::value::parse_currency;

const PERMANENT_MARKERS: [&str; 4] = ["permanent", "chronic", "irreversible", "uncertain recovery"];

pub struct DemandCalculator {
    table: MultiplierTable,
}

impl Default for DemandCalculator {
    fn default() -> Self {
        DemandCalculator::new(MultiplierTable::default())
    }
}

impl DemandCalculator {
    pub fn new(table: MultiplierTable) -> Self {
        DemandCalculator { table }
    }

    pub fn calculate(&self, case: &NormalizedCase, analysis: &DerivedAnalysis) -> DemandCalculation {
        let mut specials = case.medical_bills.total_charges;
        if specials == 0.0 {
            // The damages section may carry a total the bills section lacks.
            specials = analysis.special_damages.total_special_damages;
        }

        let severity = classify_severity(case, &analysis.serious_injury.threshold_categories);
        let range = self.table.range_for(severity);
        let strength = liability_strength(case, &analysis.liability);

        let fraction = if strength >= 0.90 {
            1.0
        } else if strength >= 0.75 {
            0.75
        } else if strength >= 0.50 {
            0.5
        } else {
            0.0
        };
        let multiplier = range.at(fraction);

        let pain_and_suffering = specials * multiplier;
        let total_demand = round_to_nearest_500(specials + pain_and_suffering);
        let defendant_bi_limit = defendant_limit(&case.insurance_coverage.defendant_policy);
        let exceeds_coverage = defendant_bi_limit.map(|limit| total_demand > limit);

        debug!(
            severity = severity.label(),
            multiplier,
            liability_strength = strength,
            total_demand,
            "Calculated settlement demand"
        );

        DemandCalculation {
            total_specials: specials,
            severity,
            multiplier_range: range,
            multiplier_used: multiplier,
            liability_strength: strength,
            pain_and_suffering,
            total_demand,
            defendant_bi_limit,
            exceeds_coverage,
        }
    }
}

/// Ordered severity classification; the first matching tier wins.
fn classify_severity(case: &NormalizedCase, categories: &[ThresholdCategory]) -> InjurySeverity {
    let injuries = &case.injuries;
    let imaging = injuries.imaging_findings.join(" ").to_lowercase();
    let full_text = format!(
        "{imaging} {} {}",
        injuries.diagnoses.join(" ").to_lowercase(),
        injuries.prognosis.to_lowercase()
    );

    // Permanence needs both the language and a consequential-limitation flag.
    if PERMANENT_MARKERS.iter().any(|marker| full_text.contains(marker))
        && categories.contains(&ThresholdCategory::PermanentConsequentialLimitation)
    {
        return InjurySeverity::Permanent;
    }
    if imaging.contains("herniation") || imaging.contains("herniated") {
        return InjurySeverity::DiscHerniation;
    }
    if full_text.contains("radiculopathy") {
        return InjurySeverity::Radiculopathy;
    }
    if imaging.contains("bulging") || imaging.contains("bulge") || imaging.contains("protrusion") {
        return InjurySeverity::DiscBulging;
    }
    InjurySeverity::SoftTissue
}

/// 0.5 prior plus bounded bonuses, clamped to [0, 1].
fn liability_strength(case: &NormalizedCase, liability: &LiabilityAnalysis) -> f64 {
    let mut strength: f64 = 0.5;

    let fault = liability.fault_determination.to_lowercase();
    if fault.contains("100%") || fault.contains("at fault") || fault.contains("driver 2") {
        strength += 0.2;
    }

    strength += 0.1 * case.defendant.violations.len().min(2) as f64;

    let evidence_mentions = |needle: &str| {
        liability
            .evidence
            .iter()
            .any(|item| item.to_lowercase().contains(needle))
    };
    if evidence_mentions("camera") || evidence_mentions("video") {
        strength += 0.15;
    }
    if evidence_mentions("witness") {
        strength += 0.10;
    }

    strength += 0.05 * liability.contributing_factors.len().min(2) as f64;

    strength.clamp(0.0, 1.0)
}

/// Nearest multiple of 500, half rounds up.
fn round_to_nearest_500(amount: f64) -> f64 {
    (amount / 500.0).round() * 500.0
}

/// Per-person BI limit from the numeric field, else the "$X/Y" display string.
fn defendant_limit(policy: &PolicyInfo) -> Option<f64> {
    if policy.bi_per_person != 0.0 {
        return Some(policy.bi_per_person);
    }
    let first = policy.bi_limits.split('/').next()?;
    let parsed = parse_currency(first);
    (parsed != 0.0).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::super::analysis::analyze;
    use super::*;

    fn case_with_imaging(findings: &[&str]) -> NormalizedCase {
        let mut case = NormalizedCase::default();
        case.injuries.imaging_findings = findings.iter().map(|f| f.to_string()).collect();
        case
    }

    #[test]
    fn permanent_requires_both_language_and_category() {
        let mut case = NormalizedCase::default();
        case.injuries.prognosis = "Permanent impairment expected".to_string();
        assert_eq!(classify_severity(&case, &[]), InjurySeverity::SoftTissue);
        assert_eq!(
            classify_severity(&case, &[ThresholdCategory::PermanentConsequentialLimitation]),
            InjurySeverity::Permanent
        );
    }

    #[test]
    fn herniation_outranks_radiculopathy() {
        let mut case = case_with_imaging(&["MRI Lumbar: L4-L5 disc herniation"]);
        case.injuries.diagnoses = vec!["Lumbar radiculopathy".to_string()];
        assert_eq!(classify_severity(&case, &[]), InjurySeverity::DiscHerniation);
    }

    #[test]
    fn radiculopathy_read_from_any_injury_text() {
        let mut case = NormalizedCase::default();
        case.injuries.diagnoses = vec!["Cervical radiculopathy".to_string()];
        assert_eq!(classify_severity(&case, &[]), InjurySeverity::Radiculopathy);
    }

    #[test]
    fn bulging_counts_only_in_imaging_findings() {
        let case = case_with_imaging(&["MRI Cervical: C5-C6 disc bulging"]);
        assert_eq!(classify_severity(&case, &[]), InjurySeverity::DiscBulging);

        let mut diagnosed_only = NormalizedCase::default();
        diagnosed_only.injuries.diagnoses = vec!["Disc bulging".to_string()];
        assert_eq!(classify_severity(&diagnosed_only, &[]), InjurySeverity::SoftTissue);
    }

    #[test]
    fn baseline_strength_is_half() {
        let strength = liability_strength(&NormalizedCase::default(), &LiabilityAnalysis::default());
        assert_eq!(strength, 0.5);
    }

    #[test]
    fn strength_bonuses_are_capped() {
        let mut case = NormalizedCase::default();
        case.defendant.violations = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let liability = LiabilityAnalysis {
            contributing_factors: vec!["x".into(), "y".into(), "z".into()],
            ..LiabilityAnalysis::default()
        };
        // 0.5 + 0.2 (two violations) + 0.1 (two factors)
        let strength = liability_strength(&case, &liability);
        assert!((strength - 0.8).abs() < 1e-9);
    }

    #[test]
    fn full_signal_clamps_to_one() {
        let mut case = NormalizedCase::default();
        case.defendant.violations = vec!["a".into(), "b".into()];
        let liability = LiabilityAnalysis {
            fault_determination: "Driver 2 determined to be 100% at fault".to_string(),
            contributing_factors: vec!["x".into(), "y".into()],
            evidence: vec![
                "Traffic camera footage".to_string(),
                "2 witness statement(s)".to_string(),
            ],
            ..LiabilityAnalysis::default()
        };
        assert_eq!(liability_strength(&case, &liability), 1.0);
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_to_nearest_500(47_750.0), 48_000.0);
        assert_eq!(round_to_nearest_500(47_749.0), 47_500.0);
        assert_eq!(round_to_nearest_500(48_000.0), 48_000.0);
        assert_eq!(round_to_nearest_500(0.0), 0.0);
    }

    #[test]
    fn strong_herniation_case_demands_top_of_range() {
        let mut case = case_with_imaging(&["MRI Lumbar: L4-L5 disc herniation"]);
        case.medical_bills.total_charges = 9_740.0;
        case.defendant.violations = vec![
            "VTL 1111(d)(1) - Failure to obey traffic control device".to_string(),
            "VTL 1225-c - Use of mobile telephone while driving".to_string(),
        ];
        case.fault.fault_determination = "Driver 2 determined to be AT FAULT".to_string();
        case.fault.contributing_factors =
            vec!["Ran red light".to_string(), "Distracted driving".to_string()];
        case.fault.witness_count = 2;
        case.fault.camera_evidence = true;

        let analysis = analyze(&case);
        let demand = DemandCalculator::default().calculate(&case, &analysis);

        assert_eq!(demand.severity, InjurySeverity::DiscHerniation);
        assert_eq!(demand.liability_strength, 1.0);
        assert_eq!(demand.multiplier_used, 4.0);
        assert_eq!(demand.pain_and_suffering, 38_960.0);
        // 48,700 rounds down to the nearest 500.
        assert_eq!(demand.total_demand, 48_500.0);
        assert!(demand.multiplier_range.contains(demand.multiplier_used));
    }

    #[test]
    fn total_demand_is_always_a_multiple_of_500() {
        let mut case = case_with_imaging(&["disc bulging"]);
        case.medical_bills.total_charges = 1_234.56;
        let analysis = analyze(&case);
        let demand = DemandCalculator::default().calculate(&case, &analysis);
        assert_eq!(demand.total_demand % 500.0, 0.0);
    }

    #[test]
    fn coverage_limit_from_numeric_then_display_string() {
        let mut policy = PolicyInfo {
            bi_per_person: 100_000.0,
            ..PolicyInfo::default()
        };
        assert_eq!(defendant_limit(&policy), Some(100_000.0));

        policy.bi_per_person = 0.0;
        policy.bi_limits = "$100,000/300,000".to_string();
        assert_eq!(defendant_limit(&policy), Some(100_000.0));

        policy.bi_limits.clear();
        assert_eq!(defendant_limit(&policy), None);
    }

    #[test]
    fn unknown_limit_leaves_exceeds_coverage_unset() {
        let mut case = NormalizedCase::default();
        case.medical_bills.total_charges = 5_000.0;
        let analysis = analyze(&case);
        let demand = DemandCalculator::default().calculate(&case, &analysis);
        assert_eq!(demand.defendant_bi_limit, None);
        assert_eq!(demand.exceeds_coverage, None);
    }

    #[test]
    fn demand_compared_against_defendant_limit() {
        let mut case = case_with_imaging(&["disc herniation"]);
        case.medical_bills.total_charges = 50_000.0;
        case.insurance_coverage.defendant_policy.bi_per_person = 100_000.0;
        let analysis = analyze(&case);
        let demand = DemandCalculator::default().calculate(&case, &analysis);
        // 50,000 × (1 + 3.25) = 212,500 after rounding, over the limit.
        assert_eq!(demand.exceeds_coverage, Some(true));
    }

    #[test]
    fn zero_bill_total_falls_back_to_damages_section() {
        let case = NormalizedCase::default();
        let mut analysis = analyze(&case);
        analysis.special_damages.total_special_damages = 5_000.0;
        let demand = DemandCalculator::default().calculate(&case, &analysis);
        assert_eq!(demand.total_specials, 5_000.0);
    }
}
