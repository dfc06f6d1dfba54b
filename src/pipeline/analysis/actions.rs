//! Recommended next actions, derived from fixed condition → action rules.
//!
//! Rule order is part of the output contract: conditional case-specific
//! actions first, then the always-present procedural tail, then coverage and
//! statute-of-limitations reminders, then the closing demand-letter note.

use chrono::{Duration, NaiveDate, Utc};

use crate::models::LiabilityAnalysis;

use super::super::types::NormalizedCase;
use super::super::value::{format_currency, format_dollars};

pub fn recommend(case: &NormalizedCase, liability: &LiabilityAnalysis) -> Vec<String> {
    let mut actions = Vec::new();

    let plan = case.injuries.treatment_plan.join(" ").to_lowercase();
    if plan.contains("mri") {
        actions.push("Schedule MRI as recommended in treatment plan".to_string());
    }
    if plan.contains("follow up") && plan.contains("orthopedic") {
        actions.push("Schedule orthopedic follow-up appointment".to_string());
    }
    if !case.injuries.work_restrictions.is_empty() {
        actions.push("Obtain employment records for lost wage calculation".to_string());
    }

    let lien_total: f64 = case.medical_bills.liens.iter().map(|lien| lien.amount).sum();
    if lien_total > 0.0 {
        actions.push(format!(
            "Negotiate outstanding medical liens totaling {}",
            format_currency(lien_total)
        ));
    }
    if liability
        .evidence
        .iter()
        .any(|item| item.to_lowercase().contains("camera"))
    {
        actions.push("Request traffic camera footage via FOIL request".to_string());
    }

    actions.push("Send preservation letter to defendant's insurance carrier".to_string());
    actions.push("Request certified copy of police report".to_string());
    actions.push("Obtain complete medical records from all treating providers".to_string());

    let pip = case.insurance_coverage.pip_available;
    if pip > 0.0 {
        actions.push(format!(
            "File No-Fault claim (PIP available: {})",
            format_dollars(pip)
        ));
    }
    if let Some(reminder) = limitations_reminder(&case.accident.date) {
        actions.push(reminder);
    }

    actions.push("Consider demand letter after maximum medical improvement".to_string());
    actions
}

/// Three-year personal-injury limitations period from the accident date.
/// Silent unless the deadline is inside a year; urgent inside 180 days.
fn limitations_reminder(accident_date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(accident_date, "%m/%d/%Y").ok()?;
    let deadline = date + Duration::days(365 * 3);
    let days_left = (deadline - Utc::now().date_naive()).num_days();
    let formatted = deadline.format("%m/%d/%Y");

    if days_left < 180 {
        Some(format!(
            "URGENT: Statute of limitations expires in {days_left} days ({formatted})"
        ))
    } else if days_left < 365 {
        Some(format!(
            "NOTE: Statute of limitations expires in {days_left} days ({formatted})"
        ))
    } else {
        None
    }
}
