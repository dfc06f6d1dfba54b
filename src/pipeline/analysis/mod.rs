//! Derived analysis over the normalized case.
//!
//! Each assessment is a pure function of the normalized sections; nothing
//! here re-reads documents. Liability is assessed first because the
//! recommended actions condition on its evidence list.

pub mod actions;
pub mod damages;
pub mod liability;
pub mod threshold;

use tracing::debug;

use crate::models::{LiabilityAnalysis, SeriousInjuryAnalysis, SpecialDamages};

use super::types::NormalizedCase;

/// All derived sections for one case, computed in one pass.
#[derive(Debug, Clone)]
pub struct DerivedAnalysis {
    pub liability: LiabilityAnalysis,
    pub serious_injury: SeriousInjuryAnalysis,
    pub special_damages: SpecialDamages,
    pub recommended_actions: Vec<String>,
}

pub fn analyze(case: &NormalizedCase) -> DerivedAnalysis {
    let liability = liability::assess(case);
    let serious_injury = threshold::assess(case);
    let special_damages = damages::assess(case);
    let recommended_actions = actions::recommend(case, &liability);

    debug!(
        meets_threshold = serious_injury.meets_threshold,
        evidence = liability.evidence.len(),
        actions = recommended_actions.len(),
        "Derived case analysis"
    );

    DerivedAnalysis {
        liability,
        serious_injury,
        special_damages,
        recommended_actions,
    }
}
