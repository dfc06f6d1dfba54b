//! Flat JSON report adapter.
//!
//! One extraction generation wrote medical records as a flat object with
//! camelCase patient fields and an `assessment` array. Only medical records
//! were observed in this shape.

use serde_json::Value;

use crate::models::DocumentType;

use super::super::types::{DocumentContribution, Payload};
use super::super::value::{first_str, str_list};
use super::SchemaAdapter;

/// Body-part labels inferred from diagnosis wording. "ac joint" counts as
/// shoulder in this shape's vocabulary.
fn body_parts_from_diagnosis(diagnosis: &str, out: &mut Vec<String>) {
    let lowered = diagnosis.to_lowercase();
    if lowered.contains("cervical") {
        out.push("Cervical Spine (Neck)".to_string());
    }
    if lowered.contains("lumbar") {
        out.push("Lumbar Spine (Lower Back)".to_string());
    }
    if lowered.contains("shoulder") || lowered.contains("ac joint") {
        out.push("Shoulder".to_string());
    }
}

pub struct FlatMedicalRecords;

impl SchemaAdapter for FlatMedicalRecords {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalRecords
    }

    fn variant(&self) -> &'static str {
        "flat json"
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.as_json().is_some_and(|record| {
            record.get("patientName").is_some()
                || record.get("assessment").is_some()
                || record.get("diagnosticImaging").is_some()
        })
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(record) = payload.as_json() else {
            return out;
        };

        out.plaintiff.name = first_str(record, &["patientName"]);
        out.plaintiff.date_of_birth = first_str(record, &["dateOfBirth"]);
        out.plaintiff.medical_record_number = first_str(record, &["medicalRecordNumber"]);

        if let Some(Value::Array(assessment)) = record.get("assessment") {
            for entry in assessment {
                if let Some(diagnosis) = first_str(entry, &["diagnosis"]) {
                    body_parts_from_diagnosis(&diagnosis, &mut out.injuries.body_parts);
                    out.injuries.diagnoses.push(diagnosis);
                }
                if let Some(icd) = first_str(entry, &["icd10Code"]) {
                    out.injuries.icd_codes.push(icd);
                }
            }
        }

        out.injuries.treatment_plan = str_list(record, "plan");
        out.injuries.prognosis = first_str(record, &["prognosis"]);

        if let Some(Value::Object(imaging)) = record.get("diagnosticImaging") {
            for (study, finding) in imaging {
                if let Some(finding) = finding.as_str().map(str::trim).filter(|f| !f.is_empty()) {
                    out.injuries.imaging_findings.push(format!("{study}: {finding}"));
                }
            }
        }

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

        // A plan item spelling out "no work" is the operative restriction.
        if let Some(item) = out
            .injuries
            .treatment_plan
            .iter()
            .rev()
            .find(|item| item.to_lowercase().contains("no work"))
        {
            out.injuries.work_restrictions = Some(item.clone());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_record() -> Payload {
        Payload::Json(json!({
            "patientName": "Maria Rodriguez",
            "dateOfBirth": "03/15/1985",
            "medicalRecordNumber": "BH-2024-789456",
            "assessment": [
                {"diagnosis": "Cervical strain/sprain", "icd10Code": "S13.4XXA"},
                {"diagnosis": "Lumbar strain/sprain with radiculopathy", "icd10Code": "S33.5XXA"},
                {"diagnosis": "AC joint sprain, Grade I", "icd10Code": "S43.50XA"}
            ],
            "plan": [
                "Follow up with orthopedics within 1 week",
                "MRI cervical and lumbar spine recommended",
                "Patient advised no work x 2 weeks"
            ],
            "prognosis": "Full recovery uncertain pending further evaluation",
            "diagnosticImaging": {
                "CT Lumbar Spine": "L4-L5 and L5-S1 disc bulging",
                "X-ray Left Shoulder": "AC joint widening"
            },
            "functional_limitations": {
                "work_restrictions": ["No lifting over 10 lbs", "No prolonged sitting"]
            }
        }))
    }

    #[test]
    fn patient_fields_read_from_camel_case_keys() {
        let contribution = FlatMedicalRecords.extract(&flat_record());
        assert_eq!(contribution.plaintiff.name.as_deref(), Some("Maria Rodriguez"));
        assert_eq!(contribution.plaintiff.date_of_birth.as_deref(), Some("03/15/1985"));
        assert_eq!(
            contribution.plaintiff.medical_record_number.as_deref(),
            Some("BH-2024-789456")
        );
    }

    #[test]
    fn assessment_entries_become_diagnoses_and_codes() {
        let contribution = FlatMedicalRecords.extract(&flat_record());
        assert_eq!(contribution.injuries.diagnoses.len(), 3);
        assert_eq!(
            contribution.injuries.icd_codes,
            vec!["S13.4XXA", "S33.5XXA", "S43.50XA"]
        );
    }

    #[test]
    fn body_parts_inferred_from_diagnosis_keywords() {
        let contribution = FlatMedicalRecords.extract(&flat_record());
        assert!(contribution
            .injuries
            .body_parts
            .contains(&"Cervical Spine (Neck)".to_string()));
        assert!(contribution
            .injuries
            .body_parts
            .contains(&"Lumbar Spine (Lower Back)".to_string()));
        // "AC joint" maps to shoulder
        assert!(contribution.injuries.body_parts.contains(&"Shoulder".to_string()));
    }

    #[test]
    fn imaging_map_rendered_as_study_finding_pairs() {
        let contribution = FlatMedicalRecords.extract(&flat_record());
        assert!(contribution
            .injuries
            .imaging_findings
            .contains(&"CT Lumbar Spine: L4-L5 and L5-S1 disc bulging".to_string()));
        assert_eq!(contribution.injuries.imaging_findings.len(), 2);
    }

    #[test]
    fn no_work_plan_item_overrides_functional_limitations() {
        let contribution = FlatMedicalRecords.extract(&flat_record());
        assert_eq!(
            contribution.injuries.work_restrictions.as_deref(),
            Some("Patient advised no work x 2 weeks")
        );
    }

    #[test]
    fn functional_limitations_used_when_plan_is_silent() {
        let record = Payload::Json(json!({
            "patientName": "Maria Rodriguez",
            "functional_limitations": {"work_restrictions": "No lifting over 10 lbs"}
        }));
        let contribution = FlatMedicalRecords.extract(&record);
        assert_eq!(
            contribution.injuries.work_restrictions.as_deref(),
            Some("No lifting over 10 lbs")
        );
    }

    #[test]
    fn plan_scalar_becomes_single_item() {
        let record = Payload::Json(json!({
            "assessment": [],
            "plan": "Conservative management with physical therapy"
        }));
        let contribution = FlatMedicalRecords.extract(&record);
        assert_eq!(contribution.injuries.treatment_plan.len(), 1);
    }
}
