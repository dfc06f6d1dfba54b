//! Nested typed-JSON adapters.
//!
//! The richest upstream shape: one object per document with typed sub-objects
//! (`patient_info`, `accident_details`, `coverages`, `billing_summary`).
//! Lookups are lenient: alternate key spellings for the same concept are
//! tried in order, and anything unreadable contributes its default.

use serde_json::Value;

use crate::models::{BillLineItem, DocumentType, Lien, PolicyClassification, ThresholdCategory};

use super::super::types::{DocumentContribution, Payload, PolicyPatch};
use super::super::value::{
    first_amount, first_str, format_dollars, format_limit_pair, scalar_string, str_list,
};
use super::SchemaAdapter;

fn has_any_key(payload: &Payload, keys: &[&str]) -> bool {
    payload
        .as_json()
        .is_some_and(|record| keys.iter().any(|key| record.get(key).is_some()))
}

/// Loose boolean: JSON true, non-zero number, or "true"/"yes" string.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => {
            let lowered = s.trim().to_lowercase();
            lowered == "true" || lowered == "yes"
        }
        _ => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Medical records
// ═══════════════════════════════════════════════════════════════════════════

/// Indicator keys appear in two spellings across extraction runs.
const INDICATOR_KEYS: &[(&[&str], ThresholdCategory)] = &[
    (
        &["permanent_consequential_limitation"],
        ThresholdCategory::PermanentConsequentialLimitation,
    ),
    (
        &["significant_limitation_of_use", "significant_limitation"],
        ThresholdCategory::SignificantLimitation,
    ),
    (&["permanent_loss_of_use"], ThresholdCategory::PermanentLossOfUse),
    (&["fracture"], ThresholdCategory::Fracture),
    (
        &["significant_disfigurement"],
        ThresholdCategory::SignificantDisfigurement,
    ),
    (
        &["ninety_one_eighty_disability", "ninety_one_eighty"],
        ThresholdCategory::NinetyOneEighty,
    ),
];

pub struct NestedMedicalRecords;

impl SchemaAdapter for NestedMedicalRecords {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalRecords
    }

    fn variant(&self) -> &'static str {
        "nested json"
    }

    fn matches(&self, payload: &Payload) -> bool {
        has_any_key(payload, &["patient_info", "diagnoses", "ny_serious_injury_indicators"])
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(record) = payload.as_json() else {
            return out;
        };

        if let Some(patient) = record.get("patient_info") {
            out.plaintiff.name = first_str(patient, &["name"]);
            out.plaintiff.date_of_birth = first_str(patient, &["date_of_birth"]);
            out.plaintiff.medical_record_number = first_str(patient, &["medical_record_number"]);
            out.plaintiff.address = first_str(patient, &["address"]);
            out.plaintiff.phone = first_str(patient, &["phone"]);
        }

        if let Some(Value::Array(diagnoses)) = record.get("diagnoses") {
            for entry in diagnoses {
                if let Some(description) = first_str(entry, &["description"]) {
                    out.injuries.diagnoses.push(description);
                }
                if let Some(icd) = first_str(entry, &["icd_code"]) {
                    out.injuries.icd_codes.push(icd);
                }
                if let Some(body_part) = first_str(entry, &["body_part"]) {
                    out.injuries.body_parts.push(body_part);
                }
            }
        }

        match record.get("imaging_findings") {
            Some(Value::Array(findings)) => {
                for entry in findings {
                    match entry {
                        Value::String(s) if !s.trim().is_empty() => {
                            out.injuries.imaging_findings.push(s.trim().to_string());
                        }
                        Value::Object(_) => {
                            let study = first_str(entry, &["study"]).unwrap_or_default();
                            if let Some(finding) = first_str(entry, &["findings", "finding"]) {
                                out.injuries.imaging_findings.push(if study.is_empty() {
                                    finding
                                } else {
                                    format!("{study}: {finding}")
                                });
                            }
                        }
                        _ => {}
                    }
                }
            }
            Some(Value::Object(findings)) => {
                for (study, finding) in findings {
                    if let Some(finding) =
                        finding.as_str().map(str::trim).filter(|f| !f.is_empty())
                    {
                        out.injuries.imaging_findings.push(format!("{study}: {finding}"));
                    }
                }
            }
            _ => {}
        }

        out.injuries.treatment_plan = str_list(record, "treatment_plan");
        if out.injuries.treatment_plan.is_empty() {
            out.injuries.treatment_plan = str_list(record, "plan");
        }
        out.injuries.prognosis = first_str(record, &["prognosis"]);

        if let Some(func) = record.get("functional_limitations") {
            out.injuries.work_restrictions = match func.get("work_restrictions") {
                Some(Value::Array(items)) => {
                    let joined = items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ");
                    (!joined.is_empty()).then_some(joined)
                }
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            };
        }

        if let Some(indicators) = record.get("ny_serious_injury_indicators") {
            for (keys, category) in INDICATOR_KEYS {
                if keys.iter().any(|key| truthy(indicators.get(key))) {
                    out.threshold_flags.push(*category);
                }
            }
            out.threshold_evidence
                .extend(str_list(indicators, "supporting_language"));
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Police report
// ═══════════════════════════════════════════════════════════════════════════

fn vehicle_number(entry: &Value) -> Option<i64> {
    match entry.get("vehicle_number") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

pub struct NestedPoliceReport;

impl SchemaAdapter for NestedPoliceReport {
    fn document_type(&self) -> DocumentType {
        DocumentType::PoliceReport
    }

    fn variant(&self) -> &'static str {
        "nested json"
    }

    fn matches(&self, payload: &Payload) -> bool {
        has_any_key(payload, &["report_info", "accident_details", "fault_indicators"])
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(report) = payload.as_json() else {
            return out;
        };

        if let Some(info) = report.get("report_info") {
            out.accident.report_number = first_str(info, &["report_number"]);
            out.accident.date = first_str(info, &["date_prepared"]);
        }

        if let Some(details) = report.get("accident_details") {
            // The accident date beats the report preparation date.
            if let Some(date) = first_str(details, &["date"]) {
                out.accident.date = Some(date);
            }
            out.accident.time = first_str(details, &["time"]);
            out.accident.weather = first_str(details, &["weather_conditions"]);
            out.accident.road_conditions = first_str(details, &["road_conditions"]);
            out.accident.location = match details.get("location") {
                Some(location @ Value::Object(_)) => {
                    let joined = ["cross_street", "borough", "county"]
                        .into_iter()
                        .filter_map(|key| first_str(location, &[key]))
                        .collect::<Vec<_>>()
                        .join(", ");
                    (!joined.is_empty()).then_some(joined)
                }
                Some(location) => scalar_string(location),
                None => None,
            };
        }

        if let Some(narrative) = first_str(report, &["narrative"]) {
            // Camera mentions must be scanned before the 500-char cut.
            let lowered = narrative.to_lowercase();
            if lowered.contains("traffic camera") || lowered.contains("camera footage") {
                out.fault.camera_evidence = true;
            }
            out.accident.description = Some(match narrative.char_indices().nth(500) {
                Some((idx, _)) => narrative[..idx].to_string(),
                None => narrative,
            });
        }

        if let Some(Value::Array(drivers)) = report.get("drivers") {
            for driver in drivers {
                match vehicle_number(driver) {
                    Some(1) => {
                        out.plaintiff.address = first_str(driver, &["address"]);
                        out.plaintiff.phone = first_str(driver, &["phone"]);
                    }
                    Some(2) => {
                        out.defendant.name = first_str(driver, &["name"]);
                        out.defendant.address = first_str(driver, &["address"]);
                        out.defendant.phone = first_str(driver, &["phone"]);
                    }
                    _ => {}
                }
            }
        }

        if let Some(Value::Array(vehicles)) = report.get("vehicles") {
            for vehicle in vehicles {
                if vehicle_number(vehicle) != Some(2) {
                    continue;
                }
                let described = ["year", "make", "model"]
                    .into_iter()
                    .filter_map(|key| vehicle.get(key).and_then(scalar_string))
                    .collect::<Vec<_>>()
                    .join(" ");
                if !described.is_empty() {
                    out.defendant.vehicle = Some(described);
                }
                if let Some(insurance) = vehicle.get("insurance") {
                    let company = first_str(insurance, &["company"]).unwrap_or_default();
                    let policy = first_str(insurance, &["policy_number"]).unwrap_or_default();
                    if !company.is_empty() || !policy.is_empty() {
                        out.defendant.insurance =
                            Some(format!("{company} Policy #{policy}").trim().to_string());
                    }
                }
            }
        }

        if let Some(fault) = report.get("fault_indicators") {
            out.fault.fault_determination = first_str(fault, &["fault_determination"]);
            out.fault.at_fault_party = first_str(fault, &["apparent_fault"]);
            out.fault.contributing_factors = str_list(fault, "contributing_factors");

            if let Some(Value::Array(violations)) = fault.get("violations_cited") {
                for violation in violations {
                    let vtl = first_str(violation, &["vtl_section"]).unwrap_or_default();
                    let description = first_str(violation, &["description"]).unwrap_or_default();
                    if !vtl.is_empty() || !description.is_empty() {
                        let line = format!("VTL {vtl} - {description}");
                        out.defendant
                            .violations
                            .push(line.trim_matches([' ', '-']).to_string());
                    }
                }
            }
        }

        out.fault.diagram_present = truthy(report.get("diagram_present"));
        out.fault.photos_taken = truthy(report.get("photos_taken"));
        if let Some(Value::Array(witnesses)) = report.get("witnesses") {
            out.fault.witness_count = witnesses.len();
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Insurance policy
// ═══════════════════════════════════════════════════════════════════════════

pub struct NestedInsurancePolicy;

impl SchemaAdapter for NestedInsurancePolicy {
    fn document_type(&self) -> DocumentType {
        DocumentType::InsurancePolicy
    }

    fn variant(&self) -> &'static str {
        "nested json"
    }

    fn matches(&self, payload: &Payload) -> bool {
        has_any_key(payload, &["policy_info", "coverages"])
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(record) = payload.as_json() else {
            return out;
        };

        let mut policy = PolicyPatch::default();

        if let Some(info) = record.get("policy_info") {
            policy.carrier = first_str(info, &["insurance_company", "company"]);
            policy.policy_number = first_str(info, &["policy_number"]);
            if let Some(policy_type) = first_str(info, &["policy_type"]) {
                if policy_type.contains("Commercial") {
                    policy.classification = Some(PolicyClassification::Commercial);
                } else if policy_type.contains("Personal") {
                    policy.classification = Some(PolicyClassification::Personal);
                }
            }
        }

        if let Some(insured) = record.get("named_insured") {
            policy.named_insured = first_str(insured, &["name"]);
        }
        if let Some(claims) = record.get("claims_info") {
            policy.claim_number = first_str(claims, &["claim_number"]);
        }

        if let Some(coverages) = record.get("coverages") {
            if let Some(bi) = coverages.get("bodily_injury_liability") {
                let per_person = first_amount(bi, &["per_person"]);
                let per_accident = first_amount(bi, &["per_accident"]);
                policy.bi_per_person = per_person;
                if per_person > 0.0 {
                    policy.bi_limits = Some(format_limit_pair(per_person, per_accident));
                }
            }
            if let Some(pip) = coverages.get("personal_injury_protection_no_fault") {
                let total =
                    first_amount(pip, &["basic_pip"]) + first_amount(pip, &["additional_pip"]);
                policy.pip_amount = total;
                if total > 0.0 {
                    policy.pip_limits = Some(format_dollars(total));
                }
            }
            if let Some(um) = coverages.get("uninsured_motorist") {
                policy.um_amount = first_amount(um, &["bodily_injury_per_person"]);
            }
            if let Some(sum) = coverages.get("underinsured_motorist_sum") {
                let per_person = first_amount(sum, &["per_person"]);
                let per_accident = first_amount(sum, &["per_accident"]);
                policy.sum_amount = per_person;
                if per_person > 0.0 {
                    policy.sum_limits = Some(format_limit_pair(per_person, per_accident));
                }
            }
        }

        out.policy = Some(policy);
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Medical bills
// ═══════════════════════════════════════════════════════════════════════════

pub struct NestedMedicalBills;

impl SchemaAdapter for NestedMedicalBills {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalBills
    }

    fn variant(&self) -> &'static str {
        "nested json"
    }

    fn matches(&self, payload: &Payload) -> bool {
        has_any_key(payload, &["billing_provider", "billing_summary", "line_items"])
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(bill) = payload.as_json() else {
            return out;
        };

        let provider = bill
            .get("billing_provider")
            .and_then(|p| first_str(p, &["name"]));
        out.bills.provider = provider.clone();

        if let Some(summary) = bill.get("billing_summary") {
            out.bills.charges = first_amount(summary, &["total_charges"]);
            out.bills.paid = first_amount(summary, &["total_payments"]);
            out.bills.owed = first_amount(summary, &["balance_due"]);
            out.bills.adjustments = first_amount(summary, &["total_adjustments"]);
        }

        if let Some(Value::Array(items)) = bill.get("line_items") {
            for item in items {
                let cpt = first_str(item, &["cpt_code"]).unwrap_or_default();
                if !cpt.is_empty() {
                    out.bills.cpt_codes.push(cpt.clone());
                }
                out.bills.line_items.push(BillLineItem {
                    date: first_str(item, &["date_of_service"]).unwrap_or_default(),
                    cpt,
                    description: first_str(item, &["description"]).unwrap_or_default(),
                    charge: first_amount(item, &["total_charge"]),
                });
            }
        }

        match bill
            .get("lien_info")
            .filter(|info| truthy(info.get("lien_filed")))
        {
            Some(lien_info) => {
                let holder = first_str(lien_info, &["lien_holder"])
                    .or_else(|| provider.clone())
                    .unwrap_or_default();
                let amount = match lien_info.get("lien_amount") {
                    Some(_) => first_amount(lien_info, &["lien_amount"]),
                    None => out.bills.owed,
                };
                out.bills.liens.push(Lien { provider: holder, amount });
            }
            // An unpaid balance is a potential lien even when none is filed.
            None if out.bills.owed > 0.0 => {
                out.bills.liens.push(Lien {
                    provider: provider.unwrap_or_default(),
                    amount: out.bills.owed,
                });
            }
            None => {}
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
