//! Settlement demand letter rendering.
//!
//! Builds the letter section by section (letterhead through closing) from the
//! case summary, the demand calculation, and the firm profile. The HTML form
//! converts the markdown letter into a print-oriented page: the converter
//! handles exactly the markup the letter emits (headings, bold, italics,
//! inline code, tables, bullet lists, rules), nothing more.

use std::sync::LazyLock;

use chrono::{Duration, Local};
use regex::Regex;

use crate::config::FirmConfig;
use crate::models::{CaseSummary, DemandCalculation, InjurySeverity};
use crate::pipeline::value::{format_currency, format_dollars};
use crate::report::summary::escape_html;

static POLICY_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([A-Z0-9-]+)").expect("Invalid policy number regex pattern")
});
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold markup regex pattern"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("Invalid italic markup regex pattern"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("Invalid code markup regex pattern"));

/// Complete demand letter in markdown.
pub fn demand_letter_markdown(
    summary: &CaseSummary,
    demand: &DemandCalculation,
    firm: &FirmConfig,
) -> String {
    let sections = [
        letterhead(firm),
        date_and_addressee(summary, firm),
        re_line(summary),
        introduction(summary),
        facts(summary),
        liability(summary),
        injuries(summary),
        specials_table(summary),
        serious_injury(summary),
        damages_discussion(summary, demand),
        demand_terms(demand, firm),
        enclosures(),
        closing(summary, firm),
    ];
    sections.join("\n")
}

/// The markdown letter converted into a self-contained, print-styled page.
pub fn demand_letter_html(
    summary: &CaseSummary,
    demand: &DemandCalculation,
    firm: &FirmConfig,
) -> String {
    let body = markdown_to_html(&demand_letter_markdown(summary, demand, firm));
    let title = if summary.plaintiff.name.is_empty() {
        &summary.case_id
    } else {
        &summary.plaintiff.name
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Demand Letter - {title}</title>
    <style>
        @page {{ margin: 1in; size: letter; }}
        @media print {{ body {{ font-size: 11pt; }} }}
        body {{
            font-family: 'Times New Roman', Times, serif;
            font-size: 12pt;
            line-height: 1.6;
            max-width: 8.5in;
            margin: 0 auto;
            padding: 0.5in;
            color: #000;
        }}
        h2 {{
            font-size: 14pt;
            margin-top: 1.5em;
            margin-bottom: 0.5em;
            border-bottom: 1px solid #ccc;
            padding-bottom: 0.25em;
        }}
        h3 {{ font-size: 12pt; margin-top: 1em; }}
        table {{ border-collapse: collapse; width: 100%; margin: 1em 0; }}
        th, td {{ border: 1px solid #000; padding: 8px 12px; text-align: left; }}
        th {{ background-color: #f0f0f0; font-weight: bold; }}
        td:nth-child(n+2) {{ text-align: right; }}
        hr {{ border: none; border-top: 2px solid #000; margin: 1em 0; }}
        ul {{ margin: 0.5em 0; padding-left: 2em; }}
        li {{ margin: 0.25em 0; }}
        code {{ font-family: monospace; background: #f5f5f5; padding: 0.1em 0.3em; }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

// ═══════════════════════════════════════════
// Letter sections
// ═══════════════════════════════════════════

fn letterhead(firm: &FirmConfig) -> String {
    format!(
        "**{}**\n{}\n{}, {} {}\nTel: {} | Fax: {}\n{}\n\n---\n",
        firm.firm_name,
        firm.firm_address.street,
        firm.firm_address.city,
        firm.firm_address.state,
        firm.firm_address.zip,
        firm.firm_phone,
        firm.firm_fax,
        firm.firm_email,
    )
}

fn date_and_addressee(summary: &CaseSummary, firm: &FirmConfig) -> String {
    let mut md = format!("{}\n\n", Local::now().format("%B %d, %Y"));
    if firm.defaults.certified_mail {
        md.push_str("**VIA CERTIFIED MAIL AND REGULAR MAIL**\n\n");
    }
    md.push_str(&format!(
        "Claims Department\n{}\n[Claims Address]\n",
        carrier_name(summary)
    ));
    md
}

/// Carrier from the assigned defendant policy, falling back to the insurance
/// display string from the police report ("Progressive Insurance Policy #...").
fn carrier_name(summary: &CaseSummary) -> String {
    let carrier = &summary.insurance_coverage.defendant_policy.carrier;
    if !carrier.is_empty() {
        return carrier.clone();
    }
    let insurance = &summary.defendant.insurance;
    if !insurance.is_empty() {
        if let Some(prefix) = insurance.split(" Policy").next() {
            return prefix.to_string();
        }
    }
    "[INSURANCE CARRIER]".to_string()
}

fn re_line(summary: &CaseSummary) -> String {
    let defendant_policy = &summary.insurance_coverage.defendant_policy;
    let policy_number = if !defendant_policy.policy_number.is_empty() {
        defendant_policy.policy_number.clone()
    } else {
        POLICY_NUMBER_RE
            .captures(&summary.defendant.insurance)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| "[POLICY NUMBER]".to_string())
    };
    format!(
        "**Re:** Claimant: {}\n       \
         Date of Loss: {}\n       \
         Claim Number: {}\n       \
         Insured: {}\n       \
         Policy Number: {}\n\n\
         Dear Claims Representative:\n",
        or_placeholder(&summary.plaintiff.name, "[CLAIMANT NAME]"),
        or_placeholder(&summary.accident.date, "[DATE OF LOSS]"),
        or_placeholder(&defendant_policy.claim_number, "[CLAIM NUMBER]"),
        or_placeholder(&summary.defendant.name, "[INSURED NAME]"),
        policy_number,
    )
}

fn introduction(summary: &CaseSummary) -> String {
    format!(
        "## Introduction\n\nThis firm represents **{}** for injuries sustained in a motor \
         vehicle collision that occurred on **{}** at **{}**. This letter serves as a formal \
         demand for settlement of our client's bodily injury claim.\n",
        or_placeholder(&summary.plaintiff.name, "[CLIENT NAME]"),
        or_placeholder(&summary.accident.date, "[DATE]"),
        or_placeholder(&summary.accident.location, "[LOCATION]"),
    )
}

fn facts(summary: &CaseSummary) -> String {
    let accident = &summary.accident;
    let mut md = format!(
        "## Facts of the Accident\n\nOn **{}** at approximately **{}**, a motor vehicle \
         collision occurred at **{}**.\n\n",
        accident.date, accident.time, accident.location,
    );
    if !accident.report_number.is_empty() {
        md.push_str(&format!("*Police Report No. {}*\n\n", accident.report_number));
    }
    md.push_str(or_placeholder(
        &accident.description,
        "[Accident narrative to be inserted]",
    ));
    md.push('\n');
    md
}

fn liability(summary: &CaseSummary) -> String {
    let analysis = &summary.liability_analysis;
    let mut md = String::from("## Liability\n\nLiability in this matter is clear and uncontested.\n\n");

    if !analysis.fault_determination.is_empty() {
        md.push_str(&format!(
            "**Fault Determination:** {}\n\n",
            analysis.fault_determination
        ));
    }
    if !summary.defendant.violations.is_empty() {
        md.push_str("**Traffic Violations Cited:**\n");
        push_bullets(&mut md, &summary.defendant.violations);
        md.push('\n');
    }
    if !analysis.contributing_factors.is_empty() {
        md.push_str("**Contributing Factors:**\n");
        push_bullets(&mut md, &analysis.contributing_factors);
        md.push('\n');
    }
    if !analysis.evidence.is_empty() {
        md.push_str("**Evidence Supporting Liability:**\n");
        push_bullets(&mut md, &analysis.evidence);
        md.push('\n');
    }
    md.push_str("Based on the foregoing, your insured bears 100% liability for this collision.\n");
    md
}

fn injuries(summary: &CaseSummary) -> String {
    let injuries = &summary.injuries;
    let mut md = String::from(
        "## Injuries and Medical Treatment\n\nAs a direct and proximate result of this \
         collision, our client sustained the following injuries:\n\n",
    );

    if !injuries.body_parts.is_empty() {
        md.push_str("**Body Parts Affected:**\n");
        push_bullets(&mut md, &injuries.body_parts);
        md.push('\n');
    }
    if !injuries.diagnoses.is_empty() {
        md.push_str("**Diagnoses:**\n");
        for (index, diagnosis) in injuries.diagnoses.iter().enumerate() {
            match injuries.icd_codes.get(index) {
                Some(icd) => md.push_str(&format!("- {diagnosis} (ICD-10: `{icd}`)\n")),
                None => md.push_str(&format!("- {diagnosis}\n")),
            }
        }
        md.push('\n');
    }
    if !injuries.imaging_findings.is_empty() {
        md.push_str("**Diagnostic Imaging Findings:**\n");
        push_bullets(&mut md, &injuries.imaging_findings);
        md.push('\n');
    }
    if !injuries.treatment_plan.is_empty() {
        md.push_str("**Treatment:**\n");
        for treatment in injuries.treatment_plan.iter().take(5) {
            md.push_str(&format!("- {treatment}\n"));
        }
        md.push('\n');
    }
    if !injuries.prognosis.is_empty() {
        md.push_str(&format!("**Prognosis:**\n{}\n", injuries.prognosis));
    }
    md
}

/// Provider table. Per-provider amounts are an even split of the totals; the
/// bill documents do not tie line items back to a provider, so only the TOTAL
/// row is authoritative.
fn specials_table(summary: &CaseSummary) -> String {
    let bills = &summary.medical_bills;
    let mut md = String::from(
        "## Medical Specials Itemization\n\n\
         | Provider | Total Charges | Paid | Balance |\n\
         |----------|-------------:|-----:|--------:|\n",
    );

    if !bills.providers.is_empty() {
        let count = bills.providers.len() as f64;
        let charges = bills.total_charges / count;
        let paid = bills.total_paid / count;
        let balance = bills.total_owed / count;
        for provider in &bills.providers {
            md.push_str(&format!(
                "| {provider} | {} | {} | {} |\n",
                format_currency(charges),
                format_currency(paid),
                format_currency(balance),
            ));
        }
    }
    md.push_str(&format!(
        "| **TOTAL** | **{}** | **{}** | **{}** |\n\n",
        format_currency(bills.total_charges),
        format_currency(bills.total_paid),
        format_currency(bills.total_owed),
    ));

    if !bills.liens.is_empty() {
        md.push_str("### Outstanding Medical Liens\n\n");
        for lien in &bills.liens {
            md.push_str(&format!(
                "- {}: {}\n",
                lien.provider,
                format_currency(lien.amount)
            ));
        }
        md.push('\n');
    }
    if !bills.cpt_codes.is_empty() {
        let shown: Vec<&str> = bills.cpt_codes.iter().take(8).map(String::as_str).collect();
        md.push_str(&format!("*CPT Codes: {}*\n", shown.join(", ")));
    }
    md
}

fn serious_injury(summary: &CaseSummary) -> String {
    let analysis = &summary.serious_injury_analysis;
    if !analysis.meets_threshold && analysis.threshold_categories.is_empty() {
        return String::new();
    }

    let mut md = String::from(
        "## NY Serious Injury Threshold (Insurance Law 5102(d))\n\n\
         Our client's injuries meet the serious injury threshold under New York Insurance \
         Law 5102(d).\n\n",
    );
    if !analysis.threshold_categories.is_empty() {
        md.push_str("**Threshold Categories Met:**\n");
        for category in &analysis.threshold_categories {
            md.push_str(&format!("- {}\n", category.label()));
        }
        md.push('\n');
    }
    if !analysis.supporting_evidence.is_empty() {
        md.push_str("**Supporting Evidence:**\n");
        push_bullets(&mut md, &analysis.supporting_evidence);
        md.push('\n');
    }
    md
}

fn damages_discussion(summary: &CaseSummary, demand: &DemandCalculation) -> String {
    let injuries = &summary.injuries;
    let mut md = String::from(
        "## Damages\n\nAs a result of this collision, our client has endured significant \
         pain and suffering, including but not limited to:\n\n\
         - Physical pain from injuries sustained\n\
         - Emotional distress and anxiety\n\
         - Interference with daily activities and quality of life\n\
         - Medical treatment and rehabilitation\n",
    );
    if !injuries.work_restrictions.is_empty() {
        md.push_str(&format!(
            "- Lost time from work: {}\n",
            injuries.work_restrictions
        ));
    }
    md.push('\n');

    if matches!(
        demand.severity,
        InjurySeverity::Permanent | InjurySeverity::DiscHerniation
    ) {
        md.push_str(
            "Given the permanent nature of our client's injuries and the documented \
             structural damage, the impact on our client's quality of life will continue \
             indefinitely.\n\n",
        );
    }
    if !injuries.prognosis.is_empty() {
        md.push_str(&format!("*Prognosis: {}*\n", injuries.prognosis));
    }
    md
}

fn demand_terms(demand: &DemandCalculation, firm: &FirmConfig) -> String {
    let deadline_days = firm.defaults.response_deadline_days;
    let deadline_date = (Local::now() + Duration::days(deadline_days)).format("%B %d, %Y");

    let mut md = format!(
        "## Demand\n\nBased on the foregoing facts, injuries, and damages, we hereby demand \
         the sum of **{total}** to settle all claims arising from this incident.\n\n\
         | Category | Amount |\n\
         |----------|-------:|\n\
         | Medical Specials | {specials} |\n\
         | Pain and Suffering | {pain} |\n\
         | **TOTAL DEMAND** | **{total}** |\n\n",
        total = format_currency(demand.total_demand),
        specials = format_currency(demand.total_specials),
        pain = format_currency(demand.pain_and_suffering),
    );

    if let (Some(limit), Some(true)) = (demand.defendant_bi_limit, demand.exceeds_coverage) {
        md.push_str(&format!(
            "*Note: This demand exceeds your insured's policy limits of {}. We reserve the \
             right to pursue the excess from your insured personally.*\n\n",
            format_dollars(limit)
        ));
    }

    md.push_str(&format!(
        "This demand will remain open for **{deadline_days} days** from the date of this \
         letter (until {deadline_date}). Please respond with your settlement position within \
         this timeframe. Failure to respond may result in the commencement of litigation \
         without further notice.\n"
    ));
    md
}

fn enclosures() -> String {
    String::from(
        "## Enclosures\n\n\
         - Police Report\n\
         - Medical Records\n\
         - Medical Bills\n\
         - Photographs (if available)\n",
    )
}

fn closing(summary: &CaseSummary, firm: &FirmConfig) -> String {
    let mut md = format!(
        "Please do not hesitate to contact the undersigned with any questions.\n\n\
         Very truly yours,\n\n\
         **{}**\n{}\nTel: {}\nEmail: {}\n",
        firm.attorney.name, firm.firm_name, firm.attorney.direct_phone, firm.attorney.email,
    );
    if firm.defaults.cc_client && !summary.plaintiff.name.is_empty() {
        md.push_str(&format!("\ncc: {} (Client)\n", summary.plaintiff.name));
    }
    md
}

fn or_placeholder<'a>(value: &'a str, label: &'a str) -> &'a str {
    if value.trim().is_empty() {
        label
    } else {
        value
    }
}

fn push_bullets(md: &mut String, items: &[String]) {
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
}

// ═══════════════════════════════════════════
// Markdown to HTML
// ═══════════════════════════════════════════

fn markdown_to_html(markdown: &str) -> String {
    let mut html = String::new();
    let mut in_table = false;
    let mut in_list = false;
    let mut header_row = false;

    for line in markdown.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('|') && trimmed.len() > 1 {
            if in_list {
                html.push_str("</ul>\n");
                in_list = false;
            }
            if !in_table {
                html.push_str("<table>\n");
                in_table = true;
                header_row = true;
            }
            if is_separator_row(trimmed) {
                continue;
            }
            let tag = if header_row { "th" } else { "td" };
            html.push_str("<tr>");
            for cell in trimmed.trim_matches('|').split('|') {
                html.push_str(&format!("<{tag}>{}</{tag}>", inline_html(cell.trim())));
            }
            html.push_str("</tr>\n");
            header_row = false;
            continue;
        }
        if in_table {
            html.push_str("</table>\n");
            in_table = false;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            if !in_list {
                html.push_str("<ul>\n");
                in_list = true;
            }
            html.push_str(&format!("<li>{}</li>\n", inline_html(item)));
            continue;
        }
        if in_list {
            html.push_str("</ul>\n");
            in_list = false;
        }

        if trimmed == "---" {
            html.push_str("<hr>\n");
        } else if let Some(heading) = trimmed.strip_prefix("### ") {
            html.push_str(&format!("<h3>{}</h3>\n", inline_html(heading)));
        } else if let Some(heading) = trimmed.strip_prefix("## ") {
            html.push_str(&format!("<h2>{}</h2>\n", inline_html(heading)));
        } else if trimmed.is_empty() {
            html.push('\n');
        } else {
            html.push_str(&format!("<p>{}</p>\n", inline_html(trimmed)));
        }
    }
    if in_table {
        html.push_str("</table>\n");
    }
    if in_list {
        html.push_str("</ul>\n");
    }
    html
}

/// A table alignment row like `|------|-----:|`.
fn is_separator_row(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn inline_html(text: &str) -> String {
    let escaped = escape_html(text);
    let with_bold = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let with_italic = ITALIC_RE.replace_all(&with_bold, "<em>$1</em>");
    CODE_RE.replace_all(&with_italic, "<code>$1</code>").into_owned()
}
