//! Special damages: medical expenses plus a lost-wage placeholder.

use crate::models::{LostWages, MedicalExpenses, SpecialDamages};

use super::super::types::NormalizedCase;

/// Mirror the aggregated bill totals into the damages section. Lost wages
/// cannot be computed from case documents alone, so the section carries a
/// zero estimate with an explanatory note until employment records arrive.
pub fn assess(case: &NormalizedCase) -> SpecialDamages {
    let bills = &case.medical_bills;
    SpecialDamages {
        medical_expenses: MedicalExpenses {
            total_billed: bills.total_charges,
            paid_by_insurance: bills.total_paid,
            adjustments: bills.total_adjustments,
            outstanding: bills.total_owed,
            liens: bills.liens.clone(),
        },
        lost_wages: LostWages::default(),
        total_special_damages: bills.total_charges,
    }
}
