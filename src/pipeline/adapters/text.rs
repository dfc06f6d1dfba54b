//! Free-text adapters for OCR-extracted document pages.
//!
//! These recover fields from the labeled-line conventions of the source
//! documents ("Patient Name:", "Date of Accident:", "Total Charges:"), with
//! multi-line sections captured up to the next section header. Any text
//! payload matches, so these sit last in the adapter chain for each type.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DocumentType, Lien, PolicyClassification, ThresholdCategory};

use super::super::types::{DocumentContribution, Payload, PolicyPatch};
use super::super::value::parse_currency;
use super::SchemaAdapter;

// ═══════════════════════════════════════════════════════════════════════════
// Shared helpers
// ═══════════════════════════════════════════════════════════════════════════

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid text anchor regex pattern")
}

/// First capture group of the first match, trimmed. None when empty.
fn capture1(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Truncate on a character boundary. Narrative fields are capped at 500.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// "STATE FARM" -> "State Farm".
fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ═══════════════════════════════════════════════════════════════════════════
// Medical records
// ═══════════════════════════════════════════════════════════════════════════

static PATIENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Patient(?:\s+Name)?[:\s]+([A-Z][a-z]+\s+[A-Z][a-z]+)"));
static DATE_OF_BIRTH: LazyLock<Regex> = LazyLock::new(|| regex(r"DOB[:\s]+(\d{2}/\d{2}/\d{4})"));
static RECORD_NUMBER: LazyLock<Regex> = LazyLock::new(|| regex(r"MRN[:\s]+(\S+)"));
static ICD_CODE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"ICD-10[:\s]+([A-Z]\d+\.\d+[A-Z]*)"));
static NUMBERED_DIAGNOSIS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\d+\.\s+([A-Za-z\s,/\-]+?)\s+ICD"));
static WORK_RESTRICTION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(?:no work|off work|work restriction)[^\n]*?(\d+\s+weeks?)")
});
static PLAN_SECTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)PLAN[:\s]*\n(.+?)(?:Patient is|Attending|\z)"));
static PLAN_ITEM: LazyLock<Regex> = LazyLock::new(|| regex(r"\d+\.\s+([^\n]+)"));
static IMAGING_SECTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)DIAGNOSTIC IMAGING[:\s]*\n(.+?)(?:ASSESSMENT|\z)"));
static IMAGING_KEYWORD_LINE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?im)^[^\n]*(?:disc|bulging|herniat|protrusion|tear)[^\n]*$"));
static PROGNOSIS_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)prognosis[^\n]*"));
static ROM_RESTRICTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?:flexion|extension)\s+limited\s+to\s+(\d+)\s+degrees"));

/// Body-part labels triggered by exam/diagnosis wording.
static BODY_PART_TRIGGERS: &[(&str, &str)] = &[
    ("cervical", "Cervical Spine (Neck)"),
    ("lumbar", "Lumbar Spine (Lower Back)"),
    ("shoulder", "Shoulder"),
];

pub struct TextMedicalRecords;

impl SchemaAdapter for TextMedicalRecords {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalRecords
    }

    fn variant(&self) -> &'static str {
        "text"
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.as_text().is_some()
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(text) = payload.as_text() else {
            return out;
        };

        out.plaintiff.name = capture1(&PATIENT_NAME, text);
        out.plaintiff.date_of_birth = capture1(&DATE_OF_BIRTH, text);
        out.plaintiff.medical_record_number = capture1(&RECORD_NUMBER, text);

        for caps in ICD_CODE.captures_iter(text) {
            out.injuries.icd_codes.push(caps[1].to_string());
        }
        for caps in NUMBERED_DIAGNOSIS.captures_iter(text) {
            out.injuries.diagnoses.push(caps[1].trim().to_string());
        }

        let lowered = text.to_lowercase();
        for (trigger, label) in BODY_PART_TRIGGERS {
            if lowered.contains(trigger) {
                out.injuries.body_parts.push((*label).to_string());
            }
        }

        out.injuries.work_restrictions =
            capture1(&WORK_RESTRICTION, text).map(|weeks| format!("No work x {weeks}"));

        if let Some(plan) = capture1(&PLAN_SECTION, text) {
            for caps in PLAN_ITEM.captures_iter(&plan) {
                out.injuries.treatment_plan.push(caps[1].trim().to_string());
            }
        }

        if let Some(imaging) = capture1(&IMAGING_SECTION, text) {
            out.injuries.imaging_findings.extend(
                imaging
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
        } else {
            // No labeled imaging section; fall back to a disc-pathology
            // keyword scan so severity still sees structural findings.
            for m in IMAGING_KEYWORD_LINE.find_iter(text) {
                out.injuries.imaging_findings.push(m.as_str().trim().to_string());
            }
        }

        out.injuries.prognosis = PROGNOSIS_LINE
            .find(text)
            .map(|m| m.as_str().trim().to_string());

        if lowered.contains("no work") || lowered.contains("unable to perform") {
            out.threshold_flags.push(ThresholdCategory::NinetyOneEighty);
            out.threshold_evidence.push("Work restriction documented".to_string());
        }
        if lowered.contains("limited")
            && (text.contains("ROM") || lowered.contains("range of motion"))
        {
            out.threshold_flags.push(ThresholdCategory::SignificantLimitation);
            if let Some(caps) = ROM_RESTRICTION.captures(text) {
                out.threshold_evidence
                    .push(format!("Range of motion limited to {} degrees", &caps[1]));
            }
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Police report
// ═══════════════════════════════════════════════════════════════════════════

static ACCIDENT_DATE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Date of Accident[:\s]+(\d{2}/\d{2}/\d{4})"));
static ACCIDENT_TIME: LazyLock<Regex> = LazyLock::new(|| regex(r"Time[:\s]+(\d{2}:\d{2})"));
static ACCIDENT_LOCATION: LazyLock<Regex> = LazyLock::new(|| regex(r"Location[:\s]+([^\n]+)"));
static REPORT_NUMBER: LazyLock<Regex> = LazyLock::new(|| regex(r"Report Number[:\s]+(\S+)"));
static NARRATIVE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)NARRATIVE[:\s]*\n(.+?)(?:VIOLATIONS|WITNESS|\z)"));
static VEHICLE_ONE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| regex(r"VEHICLE 1"));
static AT_FAULT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| regex(r"VEHICLE 2|AT-FAULT"));
static DRIVER_NAME: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Driver[:\s]+([A-Z][a-z]+\s+[A-Z][a-z]+)"));
static DRIVER_VEHICLE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Vehicle[:\s]+(20\d{2}[^\n]*?)(?:\s+Plate|\n|\z)"));
static DRIVER_INSURANCE: LazyLock<Regex> = LazyLock::new(|| regex(r"Insurance[:\s]+([^\n]+)"));
static DRIVER_ADDRESS: LazyLock<Regex> = LazyLock::new(|| regex(r"Address[:\s]+([^\n]+)"));
static DRIVER_PHONE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Phone[:\s]+([\d() .\-]{7,})"));
static VIOLATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"VTL\s+[\w()\-]+\s*-\s*[^\n]+"));
static FAULT_DETERMINED: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"([A-Z][a-z]+\s+[A-Z][a-z]+)[^\n]*(?:is determined to be|determined)\s+AT FAULT")
});
static WITNESS_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\d+\.\s+[A-Z][a-z]+\s+[A-Z][a-z]+,\s+(?:pedestrian|driver)"));

pub struct TextPoliceReport;

impl SchemaAdapter for TextPoliceReport {
    fn document_type(&self) -> DocumentType {
        DocumentType::PoliceReport
    }

    fn variant(&self) -> &'static str {
        "text"
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.as_text().is_some()
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(text) = payload.as_text() else {
            return out;
        };

        out.accident.date = capture1(&ACCIDENT_DATE, text);
        out.accident.time = capture1(&ACCIDENT_TIME, text);
        out.accident.location = capture1(&ACCIDENT_LOCATION, text);
        out.accident.report_number = capture1(&REPORT_NUMBER, text);
        out.accident.description =
            capture1(&NARRATIVE_SECTION, text).map(|n| truncate_chars(&n, 500));

        // Party fields come from the per-vehicle blocks. Vehicle 1 (the
        // plaintiff) is listed first, so slice the text at the anchors.
        let at_fault = AT_FAULT_ANCHOR.find(text);
        if let Some(anchor) = VEHICLE_ONE_ANCHOR.find(text) {
            let end = at_fault.map_or(text.len(), |m| m.start().max(anchor.end()));
            let block = &text[anchor.end()..end];
            out.plaintiff.address = capture1(&DRIVER_ADDRESS, block);
            out.plaintiff.phone = capture1(&DRIVER_PHONE, block);
        }
        if let Some(anchor) = at_fault {
            let tail = &text[anchor.end()..];
            out.defendant.name = capture1(&DRIVER_NAME, tail);
            out.defendant.vehicle = capture1(&DRIVER_VEHICLE, tail);
            out.defendant.insurance = capture1(&DRIVER_INSURANCE, tail);
        }

        for m in VIOLATION_LINE.find_iter(text) {
            out.defendant.violations.push(m.as_str().trim().to_string());
        }

        let lowered = text.to_lowercase();
        if lowered.contains("at fault") {
            if let Some(name) = capture1(&FAULT_DETERMINED, text) {
                out.fault.fault_determination = Some(format!("{name} determined AT FAULT"));
                out.fault.at_fault_party = Some(name);
            }
        }
        if lowered.contains("red light") || lowered.contains("red traffic signal") {
            out.fault.contributing_factors.push("Ran red light".to_string());
        }
        if lowered.contains("cell phone") || lowered.contains("mobile telephone") {
            out.fault
                .contributing_factors
                .push("Distracted driving (cell phone)".to_string());
        }
        if lowered.contains("traffic camera") || lowered.contains("camera footage") {
            out.fault.camera_evidence = true;
        }
        if lowered.contains("witness") {
            out.fault.witness_count = WITNESS_ENTRY.find_iter(text).count();
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Insurance policy
// ═══════════════════════════════════════════════════════════════════════════

static POLICY_NUMBER: LazyLock<Regex> = LazyLock::new(|| regex(r"Policy Number[:\s]+(\S+)"));
static NAMED_INSURED: LazyLock<Regex> = LazyLock::new(|| regex(r"Named Insured[:\s]+([^\n]+)"));
static BI_LIMITS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Bodily Injury Liability\s+\$?([\d,]+)[^$]*?\$?([\d,]+)"));
static PIP_LIMIT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Personal Injury Protection[^$]*\$([\d,]+)"));
static SUM_LIMITS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Underinsured Motorist[^$]*\$([\d,]+)[^$]*?\$([\d,]+)"));
static UM_LIMIT: LazyLock<Regex> = LazyLock::new(|| regex(r"Uninsured Motorist[^$]*\$([\d,]+)"));

/// Declarations pages lead with an all-caps carrier letterhead line.
fn carrier_from_letterhead(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().any(|c| c.is_lowercase()) {
        return None;
    }
    let name = line.strip_suffix("INSURANCE").unwrap_or(line).trim_end();
    (!name.is_empty()).then(|| title_case(name))
}

pub struct TextInsurancePolicy;

impl SchemaAdapter for TextInsurancePolicy {
    fn document_type(&self) -> DocumentType {
        DocumentType::InsurancePolicy
    }

    fn variant(&self) -> &'static str {
        "text"
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.as_text().is_some()
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(text) = payload.as_text() else {
            return out;
        };

        let mut policy = PolicyPatch {
            carrier: carrier_from_letterhead(text),
            policy_number: capture1(&POLICY_NUMBER, text),
            named_insured: capture1(&NAMED_INSURED, text),
            ..PolicyPatch::default()
        };

        if text.contains("Commercial") {
            policy.classification = Some(PolicyClassification::Commercial);
        } else if text.contains("Personal Auto") {
            policy.classification = Some(PolicyClassification::Personal);
        }

        if let Some(caps) = BI_LIMITS.captures(text) {
            policy.bi_limits = Some(format!("${}/{}", &caps[1], &caps[2]));
            policy.bi_per_person = parse_currency(&caps[1]);
        }
        if let Some(caps) = PIP_LIMIT.captures(text) {
            policy.pip_limits = Some(format!("${}", &caps[1]));
            policy.pip_amount = parse_currency(&caps[1]);
        }
        if let Some(caps) = SUM_LIMITS.captures(text) {
            policy.sum_limits = Some(format!("${}/{}", &caps[1], &caps[2]));
            policy.sum_amount = parse_currency(&caps[1]);
        }
        if let Some(caps) = UM_LIMIT.captures(text) {
            policy.um_amount = parse_currency(&caps[1]);
        }

        out.policy = Some(policy);
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Medical bills
// ═══════════════════════════════════════════════════════════════════════════

static PROVIDER_LETTERHEAD: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r"(?m)^\s*([A-Z][A-Z .&'\-]*(?:HOSPITAL|MEDICAL|CENTER|CLINIC|THERAPY|IMAGING|RADIOLOGY|ORTHOPEDIC)[A-Z .&'\-]*)\s*$",
    )
});
static TOTAL_CHARGES: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Total Charges[:\s]+\$?([\d,]+\.?\d*)"));
static INSURANCE_PAYMENT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Insurance Payment[^$]*\$([\d,]+\.?\d*)"));
static AMOUNT_DUE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Amount Due[:\s]+\$?([\d,]+\.?\d*)"));
static LIEN_AMOUNT: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)lien[^$]*\$([\d,]+\.?\d*)"));
static CPT_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^(\d{5})\s+[A-Z]"));

pub struct TextMedicalBills;

impl SchemaAdapter for TextMedicalBills {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalBills
    }

    fn variant(&self) -> &'static str {
        "text"
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.as_text().is_some()
    }

    fn extract(&self, payload: &Payload) -> DocumentContribution {
        let mut out = DocumentContribution::new(self.document_type());
        let Some(text) = payload.as_text() else {
            return out;
        };

        out.bills.provider = capture1(&PROVIDER_LETTERHEAD, text).map(|name| title_case(&name));
        if let Some(amount) = capture1(&TOTAL_CHARGES, text) {
            out.bills.charges = parse_currency(&amount);
        }
        if let Some(amount) = capture1(&INSURANCE_PAYMENT, text) {
            out.bills.paid = parse_currency(&amount);
        }
        if let Some(amount) = capture1(&AMOUNT_DUE, text) {
            out.bills.owed = parse_currency(&amount);
        }
        if let Some(amount) = capture1(&LIEN_AMOUNT, text) {
            out.bills.liens.push(Lien {
                provider: out.bills.provider.clone().unwrap_or_default(),
                amount: parse_currency(&amount),
            });
        }
        for caps in CPT_LINE.captures_iter(text) {
            out.bills.cpt_codes.push(caps[1].to_string());
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
