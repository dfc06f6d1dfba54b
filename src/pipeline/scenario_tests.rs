//! End-to-end pipeline scenarios over realistic mixed-schema corpora.

use serde_json::json;

use crate::models::{DocumentType, InjurySeverity, ThresholdCategory};

use super::demand::DemandCalculator;
use super::types::{Payload, RawDocument};
use super::run;

fn text_doc(document_type: DocumentType, source: &str, body: &str) -> RawDocument {
    RawDocument {
        document_type,
        source: source.to_string(),
        payload: Payload::Text(body.to_string()),
    }
}

fn json_doc(document_type: DocumentType, source: &str, body: serde_json::Value) -> RawDocument {
    RawDocument {
        document_type,
        source: source.to_string(),
        payload: Payload::Json(body),
    }
}

fn er_record() -> RawDocument {
    text_doc(
        DocumentType::MedicalRecords,
        "medical_record.txt",
        "BELLEVUE HOSPITAL CENTER\n\
         Emergency Department Medical Record\n\
         Patient Name: Maria Rodriguez DOB: 03/15/1985\n\
         MRN: BH-2024-789456 Date of Service: 01/15/2024\n\
         PHYSICAL EXAMINATION:\n\
         Neck: Decreased ROM - flexion limited to 30 degrees due to pain.\n\
         DIAGNOSTIC IMAGING:\n\
         CT Lumbar Spine: No acute fracture. L4-L5 and L5-S1 disc bulging.\n\
         ASSESSMENT:\n\
         1. Cervical strain/sprain ICD-10: S13.4XXA\n\
         2. Lumbar strain/sprain with radiculopathy ICD-10: S33.5XXA\n\
         PLAN:\n\
         1. Cervical collar for comfort\n\
         2. MRI cervical and lumbar spine recommended if symptoms persist\n\
         3. Patient advised no work x 2 weeks\n\
         Patient is unable to perform usual daily activities.\n\
         Prognosis for full recovery uncertain pending further evaluation.\n\
         Attending Physician: James Chen, MD\n",
    )
}

fn police_report() -> RawDocument {
    text_doc(
        DocumentType::PoliceReport,
        "police_report.txt",
        "NEW YORK CITY POLICE DEPARTMENT\n\
         Report Number: 2024-MAN-0115-7892\n\
         Date of Accident: 01/15/2024 Time: 18:32\n\
         Location: Broadway & W 42nd Street, Manhattan, NY\n\
         VEHICLE 1 (PLAINTIFF):\n\
         Driver: Maria Rodriguez\n\
         Address: 456 East 78th Street, Apt 4B, New York, NY 10075\n\
         VEHICLE 2 (AT-FAULT):\n\
         Driver: James Thompson\n\
         Vehicle: 2019 Ford F-150 Plate: XYZ-9876 (NJ)\n\
         Insurance: Progressive Commercial Policy #PC-2024-45678\n\
         NARRATIVE:\n\
         Witness statements and traffic camera footage confirm that Vehicle 2\n\
         proceeded through a red traffic signal, striking Vehicle 1.\n\
         VIOLATIONS ISSUED:\n\
         VTL 1111(d)(1) - Failure to obey traffic control device (red light)\n\
         VTL 1225-c - Use of mobile telephone while driving\n\
         WITNESS INFORMATION:\n\
         1. Robert Kim, pedestrian at corner, confirmed Vehicle 2 ran red light.\n\
         2. Sarah Johnson, driver of Vehicle 3 (stopped at light), confirmed same.\n\
         FAULT DETERMINATION:\n\
         Vehicle 2 driver (James Thompson) is determined to be AT FAULT for this collision.\n",
    )
}

fn declarations_page() -> RawDocument {
    text_doc(
        DocumentType::InsurancePolicy,
        "insurance_policy.txt",
        "STATE FARM INSURANCE\n\
         Personal Auto Policy Declarations\n\
         Policy Number: SF-2024-78901-NY\n\
         Named Insured: Maria Rodriguez\n\
         COVERAGE SUMMARY:\n\
         Bodily Injury Liability $100,000 per person / $300,000 per accident\n\
         Personal Injury Protection (No-Fault) $50,000 per person (Basic PIP)\n\
         Uninsured Motorist BI $100,000 per person / $300,000 per accident\n\
         Underinsured Motorist BI (SUM) $100,000 per person / $300,000 per accident\n",
    )
}

fn hospital_bill() -> RawDocument {
    text_doc(
        DocumentType::MedicalBills,
        "medical_bills.txt",
        "BELLEVUE HOSPITAL CENTER\n\
         Patient Billing Statement\n\
         ITEMIZED CHARGES:\n\
         99285 Emergency Dept Visit - Level 5 (High Severity) 1 $1,850.00\n\
         72125 CT Cervical Spine without Contrast 1 $1,200.00\n\
         Total Charges: $6,290.00\n\
         Insurance Payment (State Farm PIP): -$5,032.00\n\
         Amount Due: $630.00\n\
         MEDICAL LIEN NOTICE:\n\
         A medical lien in the amount of $630.00 has been filed.\n",
    )
}

fn imaging_bill() -> RawDocument {
    text_doc(
        DocumentType::MedicalBills,
        "imaging_bill.txt",
        "NYU LANGONE MEDICAL CENTER\n\
         Patient Billing Statement\n\
         Total Charges: $3,450.00\n\
         Amount Due: $450.00\n",
    )
}

#[test]
fn full_text_corpus_produces_complete_summary() {
    let docs = vec![er_record(), police_report(), declarations_page(), hospital_bill()];
    let calculator = DemandCalculator::default();
    let summary = run("rodriguez-v-thompson", &docs, Some(&calculator));

    assert_eq!(summary.case_id, "rodriguez-v-thompson");
    assert_eq!(summary.document_counts.total(), 4);
    assert_eq!(summary.plaintiff.name, "Maria Rodriguez");
    assert_eq!(summary.defendant.name, "James Thompson");
    assert_eq!(summary.accident.date, "01/15/2024");
    assert_eq!(summary.medical_bills.total_charges, 6_290.0);
    assert_eq!(summary.insurance_coverage.plaintiff_policy.bi_limits, "$100,000/300,000");
    assert_eq!(summary.insurance_coverage.pip_available, 50_000.0);

    let liability = &summary.liability_analysis;
    assert_eq!(liability.at_fault_party, "James Thompson");
    assert!(liability.evidence.contains(&"2 witness statement(s)".to_string()));
    assert!(liability.evidence.contains(&"Traffic camera footage".to_string()));

    let threshold = &summary.serious_injury_analysis;
    assert!(threshold.meets_threshold);
    assert!(threshold
        .threshold_categories
        .contains(&ThresholdCategory::NinetyOneEighty));
    assert!(threshold
        .threshold_categories
        .contains(&ThresholdCategory::PermanentConsequentialLimitation));

    assert!(summary
        .recommended_actions
        .contains(&"Request traffic camera footage via FOIL request".to_string()));
    assert!(summary
        .recommended_actions
        .contains(&"File No-Fault claim (PIP available: $50,000)".to_string()));
    assert!(summary
        .recommended_actions
        .contains(&"Negotiate outstanding medical liens totaling $630.00".to_string()));

    let demand = summary.demand.expect("demand calculated");
    assert_eq!(demand.severity, InjurySeverity::Radiculopathy);
    assert_eq!(demand.liability_strength, 1.0);
    assert_eq!(demand.multiplier_used, 3.5);
    assert_eq!(demand.total_demand, 28_500.0);
    assert!(demand.multiplier_range.contains(demand.multiplier_used));
}

#[test]
fn police_and_bills_corpus_takes_the_soft_tissue_high_end() {
    let docs = vec![police_report(), hospital_bill()];
    let calculator = DemandCalculator::default();
    let summary = run("rodriguez-v-thompson", &docs, Some(&calculator));

    assert_eq!(summary.medical_bills.total_charges, 6_290.0);
    assert_eq!(summary.medical_bills.total_paid, 5_032.0);
    assert_eq!(summary.medical_bills.total_owed, 630.0);

    // Without medical records the severity stays at the lowest tier, while
    // clear fault, two violations, camera footage, and witnesses clamp
    // liability strength and select the top of the 1.5-2.5 band.
    let demand = summary.demand.expect("demand calculated");
    assert_eq!(demand.severity, InjurySeverity::SoftTissue);
    assert_eq!(demand.liability_strength, 1.0);
    assert_eq!(demand.multiplier_used, 2.5);
    assert_eq!(demand.pain_and_suffering, 15_725.0);
    assert_eq!(demand.total_demand, 22_000.0);
    assert_eq!(demand.defendant_bi_limit, None);
}

#[test]
fn mixed_schema_corpus_merges_without_clobbering() {
    let flat_record = json_doc(
        DocumentType::MedicalRecords,
        "specialist_record.json",
        json!({
            "patientName": "Maria Rodriguez",
            "assessment": [
                {"diagnosis": "Cervical strain/sprain", "icd10Code": "S13.4XXA"},
                {"diagnosis": "Post-traumatic headache", "icd10Code": "G44.309"}
            ],
            "plan": ["Physical therapy 3x weekly"]
        }),
    );
    let nested_police = json_doc(
        DocumentType::PoliceReport,
        "police_report.json",
        json!({
            "report_info": {"report_number": "2024-MAN-0115-7892"},
            "accident_details": {
                "date": "01/15/2024",
                "weather_conditions": "Clear",
                "location": {"cross_street": "Broadway & W 42nd St", "borough": "Manhattan"}
            },
            "narrative": "Vehicle 2 struck Vehicle 1 in the intersection.",
            "witnesses": [{"name": "Robert Kim"}]
        }),
    );
    let nested_bill = json_doc(
        DocumentType::MedicalBills,
        "hospital_bill.json",
        json!({
            "billing_provider": {"name": "Bellevue Hospital Center"},
            "billing_summary": {"total_charges": 6290.0, "balance_due": 0.0}
        }),
    );

    let docs = vec![er_record(), flat_record, nested_police, nested_bill, imaging_bill()];
    let summary = run("rodriguez-v-thompson", &docs, None);

    assert_eq!(summary.document_counts.medical_records, 2);
    assert_eq!(summary.document_counts.police_reports, 1);
    assert_eq!(summary.document_counts.medical_bills, 2);

    // Duplicate diagnosis collapses; the new one is appended.
    assert_eq!(
        summary.injuries.diagnoses,
        vec![
            "Cervical strain/sprain",
            "Lumbar strain/sprain with radiculopathy",
            "Post-traumatic headache"
        ]
    );
    assert_eq!(summary.injuries.icd_codes.len(), 3);
    // Treatment plans accumulate in load order without deduplication.
    assert_eq!(summary.injuries.treatment_plan.len(), 4);

    assert_eq!(summary.accident.weather, "Clear");
    assert_eq!(summary.accident.location, "Broadway & W 42nd St, Manhattan");
    assert_eq!(summary.medical_bills.total_charges, 9_740.0);
    assert_eq!(summary.medical_bills.providers.len(), 2);
    assert!(summary.demand.is_none());
}

#[test]
fn radiculopathy_outranks_bulging_when_both_present() {
    let record = json_doc(
        DocumentType::MedicalRecords,
        "mri_report.json",
        json!({
            "patient_info": {"name": "Maria Rodriguez"},
            "diagnoses": [{"description": "Cervical radiculopathy", "icd_code": "M54.12"}],
            "imaging_findings": [{"study": "MRI Cervical", "findings": "C5-C6 disc bulging"}]
        }),
    );
    let bill = json_doc(
        DocumentType::MedicalBills,
        "bill.json",
        json!({"billing_summary": {"total_charges": 10000.0}}),
    );

    let calculator = DemandCalculator::default();
    let summary = run("case", &[record, bill], Some(&calculator));
    let demand = summary.demand.unwrap();

    assert_eq!(demand.severity, InjurySeverity::Radiculopathy);
    // Baseline strength selects the midpoint of the 2.5-3.5 band.
    assert_eq!(demand.multiplier_used, 3.0);
    assert_eq!(demand.total_demand, 40_000.0);
}

#[test]
fn demand_exceeding_defendant_coverage_is_flagged() {
    let record = json_doc(
        DocumentType::MedicalRecords,
        "mri_report.json",
        json!({
            "patient_info": {"name": "Maria Rodriguez"},
            "imaging_findings": ["MRI Lumbar: L4-L5 disc herniation"]
        }),
    );
    let bill = json_doc(
        DocumentType::MedicalBills,
        "surgical_bill.json",
        json!({"billing_summary": {"total_charges": 80000.0}}),
    );
    let commercial_policy = text_doc(
        DocumentType::InsurancePolicy,
        "defendant_policy.txt",
        "PROGRESSIVE INSURANCE\n\
         Commercial Auto Policy Declarations\n\
         Policy Number: PC-2024-45678\n\
         Bodily Injury Liability $100,000 per person / $300,000 per accident\n",
    );

    let calculator = DemandCalculator::default();
    let summary = run("case", &[record, bill, commercial_policy], Some(&calculator));

    assert_eq!(
        summary.insurance_coverage.defendant_policy.bi_per_person,
        100_000.0
    );
    let demand = summary.demand.unwrap();
    assert_eq!(demand.severity, InjurySeverity::DiscHerniation);
    assert_eq!(demand.total_demand, 340_000.0);
    assert_eq!(demand.defendant_bi_limit, Some(100_000.0));
    assert_eq!(demand.exceeds_coverage, Some(true));
}

#[test]
fn missing_defendant_policy_leaves_coverage_unknown() {
    let calculator = DemandCalculator::default();
    let summary = run("case", &[hospital_bill()], Some(&calculator));
    let demand = summary.demand.unwrap();

    assert_eq!(demand.defendant_bi_limit, None);
    assert_eq!(demand.exceeds_coverage, None);
    assert_eq!(demand.total_demand % 500.0, 0.0);
}

#[test]
fn pipeline_is_idempotent_modulo_timestamp() {
    let docs = vec![er_record(), police_report(), declarations_page(), hospital_bill()];
    let calculator = DemandCalculator::default();

    let mut first = run("case", &docs, Some(&calculator));
    let second = run("case", &docs, Some(&calculator));
    first.generated_at = second.generated_at;
    assert_eq!(first, second);
}

#[test]
fn unrecognized_and_malformed_documents_contribute_zero() {
    let unrecognized = json_doc(
        DocumentType::MedicalBills,
        "export.json",
        json!({"rows": [1, 2, 3]}),
    );
    let garbled = text_doc(
        DocumentType::MedicalBills,
        "scan_artifact.txt",
        "Total Charges: $### OCR FAILURE ###\n",
    );

    let docs = vec![hospital_bill(), imaging_bill(), unrecognized, garbled];
    let summary = run("case", &docs, None);

    // The unrecognized JSON shape is skipped entirely; the garbled text
    // document matches the text adapter but yields no amounts.
    assert_eq!(summary.document_counts.medical_bills, 3);
    assert_eq!(summary.medical_bills.total_charges, 9_740.0);
    assert_eq!(summary.medical_bills.total_owed, 1_080.0);
}

#[test]
fn repeated_documents_do_not_duplicate_code_lists() {
    let docs = vec![er_record(), er_record()];
    let summary = run("case", &docs, None);

    assert_eq!(summary.injuries.icd_codes, vec!["S13.4XXA", "S33.5XXA"]);
    assert_eq!(summary.injuries.diagnoses.len(), 2);
    assert_eq!(
        summary
            .serious_injury_analysis
            .threshold_categories
            .iter()
            .filter(|c| **c == ThresholdCategory::NinetyOneEighty)
            .count(),
        1
    );
    // Plans accumulate; the repeat is visible there instead.
    assert_eq!(summary.injuries.treatment_plan.len(), 6);
}
