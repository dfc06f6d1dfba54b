//! Case summary rendering: JSON, markdown, and a printable HTML page.
//!
//! The markdown report walks the summary section by section in a fixed order,
//! so two runs over the same corpus diff cleanly. HTML wraps the markdown in a
//! `<pre>` block inside a small self-contained page.

use crate::models::CaseSummary;
use crate::pipeline::value::{format_currency, format_dollars};

/// Pretty-printed JSON form of the summary.
pub fn summary_json(summary: &CaseSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// Sectioned markdown report mirroring the summary fields.
pub fn summary_markdown(summary: &CaseSummary) -> String {
    let mut md = format!(
        "# NY Personal Injury Case Summary\n\
         ## Case ID: {case_id}\n\
         Generated: {generated}\n\n\
         ---\n\n\
         ## Document Summary\n\
         | Document Type | Count |\n\
         |--------------|-------|\n\
         | Medical Records | {medical_records} |\n\
         | Police Reports | {police_reports} |\n\
         | Insurance Policies | {insurance_policies} |\n\
         | Medical Bills | {medical_bills} |\n\n\
         ---\n\n",
        case_id = summary.case_id,
        generated = summary.generated_at.to_rfc3339(),
        medical_records = summary.document_counts.medical_records,
        police_reports = summary.document_counts.police_reports,
        insurance_policies = summary.document_counts.insurance_policies,
        medical_bills = summary.document_counts.medical_bills,
    );

    let plaintiff = &summary.plaintiff;
    md.push_str(&format!(
        "## Plaintiff Information\n\
         - **Name:** {}\n\
         - **Date of Birth:** {}\n\
         - **Address:** {}\n\
         - **Medical Record #:** {}\n\n",
        or_na(&plaintiff.name),
        or_na(&plaintiff.date_of_birth),
        or_na(&plaintiff.address),
        or_na(&plaintiff.medical_record_number),
    ));

    let defendant = &summary.defendant;
    md.push_str(&format!(
        "## Defendant (At-Fault Party)\n\
         - **Name:** {}\n\
         - **Vehicle:** {}\n\
         - **Insurance:** {}\n",
        or_na(&defendant.name),
        or_na(&defendant.vehicle),
        or_na(&defendant.insurance),
    ));
    if !defendant.violations.is_empty() {
        md.push_str("- **Violations Issued:**\n");
        for violation in &defendant.violations {
            md.push_str(&format!("  - {violation}\n"));
        }
    }

    let accident = &summary.accident;
    md.push_str(&format!(
        "\n## Accident Details\n\
         - **Date:** {}\n\
         - **Time:** {}\n\
         - **Location:** {}\n\
         - **Report Number:** {}\n\n\
         **Narrative:**\n{}\n\n\
         ---\n\n",
        or_na(&accident.date),
        or_na(&accident.time),
        or_na(&accident.location),
        or_na(&accident.report_number),
        or_na(&accident.description),
    ));

    let injuries = &summary.injuries;
    md.push_str("## Injuries & Diagnoses\n\n### Body Parts Affected\n");
    push_bullets(&mut md, &injuries.body_parts);
    md.push_str("\n### Diagnoses\n");
    push_bullets(&mut md, &injuries.diagnoses);
    md.push_str("\n### ICD-10 Codes\n");
    for code in &injuries.icd_codes {
        md.push_str(&format!("- `{code}`\n"));
    }
    if !injuries.imaging_findings.is_empty() {
        md.push_str("\n### Imaging Findings\n");
        push_bullets(&mut md, &injuries.imaging_findings);
    }
    md.push_str(&format!(
        "\n### Work Restrictions\n{}\n\n### Prognosis\n{}\n\n---\n\n",
        fallback(&injuries.work_restrictions, "None documented"),
        fallback(&injuries.prognosis, "Not documented"),
    ));

    let bills = &summary.medical_bills;
    md.push_str(&format!(
        "## Medical Bills & Special Damages\n\n\
         | Category | Amount |\n\
         |----------|--------|\n\
         | Total Billed | {} |\n\
         | Paid by Insurance | {} |\n\
         | Adjustments | {} |\n\
         | Outstanding Balance | {} |\n\n\
         ### Providers\n",
        format_currency(bills.total_charges),
        format_currency(bills.total_paid),
        format_currency(bills.total_adjustments),
        format_currency(bills.total_owed),
    ));
    push_bullets(&mut md, &bills.providers);
    if !bills.liens.is_empty() {
        md.push_str("\n### Medical Liens\n");
        for lien in &bills.liens {
            md.push_str(&format!(
                "- {}: {}\n",
                lien.provider,
                format_currency(lien.amount)
            ));
        }
    }
    if !bills.cpt_codes.is_empty() {
        md.push_str("\n### CPT Codes\n");
        let shown: Vec<String> = bills
            .cpt_codes
            .iter()
            .take(10)
            .map(|code| format!("`{code}`"))
            .collect();
        md.push_str(&shown.join(", "));
        if bills.cpt_codes.len() > 10 {
            md.push_str(&format!(" (+{} more)", bills.cpt_codes.len() - 10));
        }
        md.push('\n');
    }

    let coverage = &summary.insurance_coverage;
    let plaintiff_policy = &coverage.plaintiff_policy;
    md.push_str(&format!(
        "\n---\n\n\
         ## Insurance Coverage\n\n\
         ### Plaintiff's Policy ({})\n\
         - **Policy #:** {}\n\
         - **BI Limits:** {}\n\
         - **PIP:** {}\n\
         - **SUM:** {}\n\n\
         ### Available Coverage\n\
         | Coverage Type | Amount |\n\
         |--------------|--------|\n\
         | PIP Available | {} |\n\
         | SUM Available | {} |\n\
         | UM Available | {} |\n\
         | **Total Available** | **{}** |\n\n\
         ---\n\n",
        or_na(&plaintiff_policy.carrier),
        or_na(&plaintiff_policy.policy_number),
        or_na(&plaintiff_policy.bi_limits),
        or_na(&plaintiff_policy.pip_limits),
        or_na(&plaintiff_policy.sum_limits),
        format_currency(coverage.pip_available),
        format_currency(coverage.sum_available),
        format_currency(coverage.um_available),
        format_currency(coverage.total_available_coverage),
    ));

    let liability = &summary.liability_analysis;
    md.push_str(&format!(
        "## Liability Analysis\n\n\
         **Fault Determination:** {}\n\
         **At-Fault Party:** {}\n\
         **Liability Split:** plaintiff {}% / defendant {}%\n\n\
         ### Contributing Factors\n",
        or_na(&liability.fault_determination),
        or_na(&liability.at_fault_party),
        liability.liability_percentage.plaintiff,
        liability.liability_percentage.defendant,
    ));
    push_bullets(&mut md, &liability.contributing_factors);
    md.push_str("\n### Evidence\n");
    push_bullets(&mut md, &liability.evidence);

    let serious = &summary.serious_injury_analysis;
    md.push_str(&format!(
        "\n---\n\n\
         ## NY Serious Injury Analysis (Insurance Law 5102(d))\n\n\
         **Meets Threshold:** {}\n\n\
         ### Threshold Categories Met\n",
        if serious.meets_threshold {
            "✅ YES"
        } else {
            "⚠️ NEEDS REVIEW"
        },
    ));
    if serious.threshold_categories.is_empty() {
        md.push_str("- None identified\n");
    } else {
        for category in &serious.threshold_categories {
            md.push_str(&format!("- {}\n", category.label()));
        }
    }
    md.push_str("\n### Supporting Evidence\n");
    push_bullets(&mut md, &serious.supporting_evidence);
    md.push_str(&format!("\n**Notes:** {}\n\n---\n\n", serious.notes));

    md.push_str("## Recommended Actions\n");
    for (index, action) in summary.recommended_actions.iter().enumerate() {
        md.push_str(&format!("{}. {action}\n", index + 1));
    }

    let expenses = &summary.special_damages.medical_expenses;
    md.push_str(&format!(
        "\n---\n\n\
         ## Case Value Summary\n\n\
         | Category | Amount |\n\
         |----------|--------|\n\
         | Total Medical Specials | {} |\n\
         | Outstanding Medical Bills | {} |\n\
         | Available Coverage | {} |\n",
        format_currency(expenses.total_billed),
        format_currency(expenses.outstanding),
        format_currency(coverage.total_available_coverage),
    ));

    if let Some(demand) = &summary.demand {
        md.push_str(&format!(
            "\n---\n\n\
             ## Demand Calculation\n\n\
             | Category | Amount |\n\
             |----------|--------|\n\
             | Medical Specials | {} |\n\
             | Pain and Suffering | {} |\n\
             | **Total Demand** | **{}** |\n\n\
             - **Injury Severity:** {}\n\
             - **Liability Strength:** {:.2}\n\
             - **Multiplier Used:** {:.2}x (range {:.1}x to {:.1}x)\n",
            format_currency(demand.total_specials),
            format_currency(demand.pain_and_suffering),
            format_currency(demand.total_demand),
            demand.severity.label(),
            demand.liability_strength,
            demand.multiplier_used,
            demand.multiplier_range.low,
            demand.multiplier_range.high,
        ));
        match (demand.defendant_bi_limit, demand.exceeds_coverage) {
            (Some(limit), Some(true)) => md.push_str(&format!(
                "- **Defendant BI Limit:** {} (demand exceeds coverage)\n",
                format_dollars(limit)
            )),
            (Some(limit), _) => md.push_str(&format!(
                "- **Defendant BI Limit:** {}\n",
                format_dollars(limit)
            )),
            (None, _) => md.push_str("- **Defendant BI Limit:** Unknown\n"),
        }
    }

    md.push_str("\n---\n*This summary was automatically generated from extracted case documents.*\n");
    md
}

/// The markdown report wrapped in a self-contained HTML page.
pub fn summary_html(summary: &CaseSummary) -> String {
    let body = escape_html(&summary_markdown(summary));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Case Summary - {case_id}</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; }}
        h1 {{ color: #2c3e50; border-bottom: 2px solid #3498db; }}
        h2 {{ color: #34495e; margin-top: 30px; }}
        table {{ border-collapse: collapse; width: 100%; margin: 15px 0; }}
        th, td {{ border: 1px solid #ddd; padding: 10px; text-align: left; }}
        th {{ background-color: #3498db; color: white; }}
        pre {{ background: #f4f4f4; padding: 15px; overflow-x: auto; }}
    </style>
</head>
<body>
<pre>{body}</pre>
</body>
</html>"#,
        case_id = escape_html(&summary.case_id),
    )
}

fn or_na(value: &str) -> &str {
    fallback(value, "N/A")
}

fn fallback<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn push_bullets(md: &mut String, items: &[String]) {
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
