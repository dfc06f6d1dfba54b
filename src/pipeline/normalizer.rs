//! Case normalization: fold per-document contributions into one canonical case.
//!
//! The fold is a pure reduction over contributions in load order. Scalars are
//! last-supplied-wins (a document that found nothing never clears an earlier
//! value), code lists deduplicate preserving first-seen order, evidence lists
//! keep duplicates as separate signal instances, and bill totals are additive.

use tracing::debug;

use crate::models::{InsuranceCoverage, PolicyClassification, PolicyInfo};

use super::types::{
    AccidentPatch, BillsPatch, DefendantPatch, DocumentContribution, FaultFacts, FaultPatch,
    InjuriesPatch, NormalizedCase, PlaintiffPatch, PolicyPatch,
};

/// Fold contributions into a normalized case and assign insurance policies to
/// parties. Consumes the contributions; they are never re-merged.
pub fn normalize(contributions: Vec<DocumentContribution>) -> NormalizedCase {
    let mut case = NormalizedCase::default();
    let mut policies: Vec<PolicyPatch> = Vec::new();

    for contribution in contributions {
        case.document_counts.record(contribution.document_type);
        merge_plaintiff(&mut case, contribution.plaintiff);
        merge_defendant(&mut case, contribution.defendant);
        merge_accident(&mut case, contribution.accident);
        merge_injuries(&mut case, contribution.injuries);
        merge_bills(&mut case, contribution.bills);
        merge_fault(&mut case.fault, contribution.fault);
        for flag in contribution.threshold_flags {
            if !case.threshold_flags.contains(&flag) {
                case.threshold_flags.push(flag);
            }
        }
        case.threshold_evidence.extend(contribution.threshold_evidence);
        if let Some(policy) = contribution.policy {
            policies.push(policy);
        }
    }

    case.insurance_coverage = assign_policies(policies, &case.plaintiff.name);

    debug!(
        documents = case.document_counts.total(),
        diagnoses = case.injuries.diagnoses.len(),
        threshold_flags = case.threshold_flags.len(),
        "Normalized case sections"
    );
    case
}

/// Last-supplied-wins scalar merge.
fn put(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Zero means the document did not supply the amount.
fn put_amount(target: &mut f64, value: f64) {
    if value != 0.0 {
        *target = value;
    }
}

/// Append preserving first-seen order, skipping values already present.
fn extend_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

fn merge_plaintiff(case: &mut NormalizedCase, patch: PlaintiffPatch) {
    put(&mut case.plaintiff.name, patch.name);
    put(&mut case.plaintiff.date_of_birth, patch.date_of_birth);
    put(&mut case.plaintiff.address, patch.address);
    put(&mut case.plaintiff.phone, patch.phone);
    put(&mut case.plaintiff.medical_record_number, patch.medical_record_number);
}

fn merge_defendant(case: &mut NormalizedCase, patch: DefendantPatch) {
    put(&mut case.defendant.name, patch.name);
    put(&mut case.defendant.address, patch.address);
    put(&mut case.defendant.phone, patch.phone);
    put(&mut case.defendant.vehicle, patch.vehicle);
    put(&mut case.defendant.insurance, patch.insurance);
    case.defendant.violations.extend(patch.violations);
}

fn merge_accident(case: &mut NormalizedCase, patch: AccidentPatch) {
    put(&mut case.accident.date, patch.date);
    put(&mut case.accident.time, patch.time);
    put(&mut case.accident.location, patch.location);
    put(&mut case.accident.report_number, patch.report_number);
    put(&mut case.accident.description, patch.description);
    put(&mut case.accident.weather, patch.weather);
    put(&mut case.accident.road_conditions, patch.road_conditions);
}

fn merge_injuries(case: &mut NormalizedCase, patch: InjuriesPatch) {
    extend_unique(&mut case.injuries.diagnoses, patch.diagnoses);
    extend_unique(&mut case.injuries.icd_codes, patch.icd_codes);
    extend_unique(&mut case.injuries.body_parts, patch.body_parts);
    case.injuries.treatment_plan.extend(patch.treatment_plan);
    case.injuries.imaging_findings.extend(patch.imaging_findings);
    put(&mut case.injuries.work_restrictions, patch.work_restrictions);
    put(&mut case.injuries.prognosis, patch.prognosis);
}

fn merge_bills(case: &mut NormalizedCase, patch: BillsPatch) {
    if let Some(provider) = patch.provider {
        extend_unique(&mut case.medical_bills.providers, vec![provider]);
    }
    case.medical_bills.total_charges += patch.charges;
    case.medical_bills.total_paid += patch.paid;
    case.medical_bills.total_owed += patch.owed;
    case.medical_bills.total_adjustments += patch.adjustments;
    case.medical_bills.liens.extend(patch.liens);
    extend_unique(&mut case.medical_bills.cpt_codes, patch.cpt_codes);
    case.medical_bills.line_items.extend(patch.line_items);
}

fn merge_fault(facts: &mut FaultFacts, patch: FaultPatch) {
    put(&mut facts.fault_determination, patch.fault_determination);
    put(&mut facts.at_fault_party, patch.at_fault_party);
    facts.contributing_factors.extend(patch.contributing_factors);
    facts.witness_count += patch.witness_count;
    facts.diagram_present |= patch.diagram_present;
    facts.photos_taken |= patch.photos_taken;
    facts.camera_evidence |= patch.camera_evidence;
}

// ═══════════════════════════════════════════
// Policy role assignment
// ═══════════════════════════════════════════

enum PolicyRole {
    Plaintiff,
    Defendant,
}

/// Assign each policy to a party, or carry it unassigned when neither the
/// named insured nor a personal/commercial marker settles ownership.
fn assign_policies(policies: Vec<PolicyPatch>, plaintiff_name: &str) -> InsuranceCoverage {
    let mut coverage = InsuranceCoverage::default();

    for policy in policies {
        match policy_role(&policy, plaintiff_name) {
            Some(PolicyRole::Plaintiff) => merge_policy(&mut coverage.plaintiff_policy, policy),
            Some(PolicyRole::Defendant) => merge_policy(&mut coverage.defendant_policy, policy),
            None => {
                debug!(
                    carrier = policy.carrier.as_deref().unwrap_or(""),
                    "Policy owner undetermined; carrying unassigned"
                );
                let mut info = PolicyInfo::default();
                merge_policy(&mut info, policy);
                coverage.unassigned_policies.push(info);
            }
        }
    }

    coverage.pip_available = coverage.plaintiff_policy.pip_amount;
    coverage.sum_available = coverage.plaintiff_policy.sum_amount;
    coverage.um_available = coverage.plaintiff_policy.um_amount;
    coverage.total_available_coverage = coverage.pip_available + coverage.sum_available;
    coverage
}

fn policy_role(policy: &PolicyPatch, plaintiff_name: &str) -> Option<PolicyRole> {
    if let Some(insured) = &policy.named_insured {
        if names_match(insured, plaintiff_name) {
            return Some(PolicyRole::Plaintiff);
        }
    }
    match policy.classification {
        Some(PolicyClassification::Personal) => Some(PolicyRole::Plaintiff),
        Some(PolicyClassification::Commercial) => Some(PolicyRole::Defendant),
        None => None,
    }
}

/// Case-insensitive token match on name parts of length >= 3, so initials and
/// particles never produce a false ownership claim.
fn names_match(insured: &str, plaintiff: &str) -> bool {
    let insured = insured.to_lowercase();
    let insured_tokens: Vec<&str> = insured.split_whitespace().collect();
    plaintiff
        .to_lowercase()
        .split_whitespace()
        .filter(|part| part.len() >= 3)
        .any(|part| insured_tokens.contains(&part))
}

fn merge_policy(target: &mut PolicyInfo, patch: PolicyPatch) {
    put(&mut target.carrier, patch.carrier);
    put(&mut target.policy_number, patch.policy_number);
    put(&mut target.claim_number, patch.claim_number);
    put(&mut target.bi_limits, patch.bi_limits);
    put(&mut target.pip_limits, patch.pip_limits);
    put(&mut target.sum_limits, patch.sum_limits);
    put_amount(&mut target.bi_per_person, patch.bi_per_person);
    put_amount(&mut target.pip_amount, patch.pip_amount);
    put_amount(&mut target.sum_amount, patch.sum_amount);
    put_amount(&mut target.um_amount, patch.um_amount);
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, Lien, ThresholdCategory};

    fn medical(name: Option<&str>) -> DocumentContribution {
        let mut c = DocumentContribution::new(DocumentType::MedicalRecords);
        c.plaintiff.name = name.map(String::from);
        c
    }

    #[test]
    fn later_document_wins_but_absence_never_clears() {
        let mut first = medical(Some("Maria Rodriguez"));
        first.plaintiff.address = Some("456 East 78th Street".into());
        let mut second = medical(None);
        second.plaintiff.address = Some("789 West End Avenue".into());

        let case = normalize(vec![first, second]);
        assert_eq!(case.plaintiff.name, "Maria Rodriguez");
        assert_eq!(case.plaintiff.address, "789 West End Avenue");
    }

    #[test]
    fn code_lists_deduplicate_preserving_first_seen_order() {
        let mut first = medical(None);
        first.injuries.icd_codes = vec!["S13.4XXA".into(), "M54.16".into()];
        let mut second = medical(None);
        second.injuries.icd_codes = vec!["M54.16".into(), "S43.5".into()];

        let case = normalize(vec![first, second]);
        assert_eq!(case.injuries.icd_codes, vec!["S13.4XXA", "M54.16", "S43.5"]);
    }

    #[test]
    fn violations_and_liens_keep_duplicates() {
        let mut first = DocumentContribution::new(DocumentType::PoliceReport);
        first.defendant.violations = vec!["VTL 1111(d)(1) - Red light".into()];
        let mut second = first.clone();
        second.bills.liens.push(Lien { provider: "Bellevue".into(), amount: 630.0 });
        let mut third = second.clone();
        third.defendant.violations.clear();

        let case = normalize(vec![first, second, third]);
        assert_eq!(case.defendant.violations.len(), 2);
        assert_eq!(case.medical_bills.liens.len(), 2);
    }

    #[test]
    fn bill_totals_are_additive_across_documents() {
        let mut first = DocumentContribution::new(DocumentType::MedicalBills);
        first.bills.provider = Some("Bellevue Hospital Center".into());
        first.bills.charges = 6_290.0;
        first.bills.owed = 630.0;
        let mut second = DocumentContribution::new(DocumentType::MedicalBills);
        second.bills.provider = Some("Bellevue Hospital Center".into());
        second.bills.charges = 3_450.0;
        second.bills.owed = 450.0;

        let case = normalize(vec![first, second]);
        assert_eq!(case.medical_bills.total_charges, 9_740.0);
        assert_eq!(case.medical_bills.total_owed, 1_080.0);
        // Same provider seen twice is listed once.
        assert_eq!(case.medical_bills.providers, vec!["Bellevue Hospital Center"]);
    }

    #[test]
    fn document_counts_tally_by_type() {
        let case = normalize(vec![
            DocumentContribution::new(DocumentType::MedicalRecords),
            DocumentContribution::new(DocumentType::MedicalRecords),
            DocumentContribution::new(DocumentType::PoliceReport),
            DocumentContribution::new(DocumentType::MedicalBills),
        ]);
        assert_eq!(case.document_counts.medical_records, 2);
        assert_eq!(case.document_counts.police_reports, 1);
        assert_eq!(case.document_counts.insurance_policies, 0);
        assert_eq!(case.document_counts.total(), 4);
    }

    #[test]
    fn threshold_flags_deduplicate_but_evidence_accumulates() {
        let mut first = medical(None);
        first.threshold_flags = vec![ThresholdCategory::Fracture];
        first.threshold_evidence = vec!["Fracture noted".into()];
        let mut second = medical(None);
        second.threshold_flags = vec![ThresholdCategory::Fracture];
        second.threshold_evidence = vec!["Fracture noted".into()];

        let case = normalize(vec![first, second]);
        assert_eq!(case.threshold_flags, vec![ThresholdCategory::Fracture]);
        assert_eq!(case.threshold_evidence.len(), 2);
    }

    #[test]
    fn fault_counts_sum_and_flags_accumulate() {
        let mut first = DocumentContribution::new(DocumentType::PoliceReport);
        first.fault.witness_count = 2;
        first.fault.diagram_present = true;
        let mut second = DocumentContribution::new(DocumentType::PoliceReport);
        second.fault.witness_count = 1;
        second.fault.photos_taken = true;

        let case = normalize(vec![first, second]);
        assert_eq!(case.fault.witness_count, 3);
        assert!(case.fault.diagram_present);
        assert!(case.fault.photos_taken);
    }

    fn policy_contribution(patch: PolicyPatch) -> DocumentContribution {
        let mut c = DocumentContribution::new(DocumentType::InsurancePolicy);
        c.policy = Some(patch);
        c
    }

    #[test]
    fn named_insured_match_assigns_policy_to_plaintiff() {
        let policy = PolicyPatch {
            carrier: Some("State Farm".into()),
            named_insured: Some("MARIA RODRIGUEZ".into()),
            pip_amount: 150_000.0,
            sum_amount: 100_000.0,
            um_amount: 100_000.0,
            ..PolicyPatch::default()
        };
        let case = normalize(vec![medical(Some("Maria Rodriguez")), policy_contribution(policy)]);

        let coverage = &case.insurance_coverage;
        assert_eq!(coverage.plaintiff_policy.carrier, "State Farm");
        assert_eq!(coverage.pip_available, 150_000.0);
        assert_eq!(coverage.sum_available, 100_000.0);
        assert_eq!(coverage.um_available, 100_000.0);
        assert_eq!(coverage.total_available_coverage, 250_000.0);
    }

    #[test]
    fn classification_assigns_when_name_is_unknown() {
        let personal = PolicyPatch {
            carrier: Some("State Farm".into()),
            classification: Some(PolicyClassification::Personal),
            ..PolicyPatch::default()
        };
        let commercial = PolicyPatch {
            carrier: Some("Progressive".into()),
            classification: Some(PolicyClassification::Commercial),
            ..PolicyPatch::default()
        };
        let case = normalize(vec![
            policy_contribution(personal),
            policy_contribution(commercial),
        ]);

        assert_eq!(case.insurance_coverage.plaintiff_policy.carrier, "State Farm");
        assert_eq!(case.insurance_coverage.defendant_policy.carrier, "Progressive");
    }

    #[test]
    fn unmatched_policy_is_carried_unassigned() {
        let policy = PolicyPatch {
            carrier: Some("Acme Mutual".into()),
            named_insured: Some("Somebody Else".into()),
            pip_amount: 25_000.0,
            ..PolicyPatch::default()
        };
        let case = normalize(vec![medical(Some("Maria Rodriguez")), policy_contribution(policy)]);

        assert!(case.insurance_coverage.plaintiff_policy.is_empty());
        assert_eq!(case.insurance_coverage.unassigned_policies.len(), 1);
        assert_eq!(case.insurance_coverage.unassigned_policies[0].carrier, "Acme Mutual");
        assert_eq!(case.insurance_coverage.pip_available, 0.0);
    }

    #[test]
    fn short_name_tokens_never_match() {
        // Both plaintiff name parts are under three characters.
        assert!(!names_match("Amalgamated Li Insurance Trust", "Li Wu"));
        assert!(names_match("Rodriguez, Maria", "Maria Rodriguez"));
    }

    #[test]
    fn empty_input_normalizes_to_empty_case() {
        let case = normalize(Vec::new());
        assert_eq!(case.document_counts.total(), 0);
        assert_eq!(case.plaintiff.name, "");
        assert!(case.insurance_coverage.plaintiff_policy.is_empty());
    }
}
