//! Case aggregation pipeline.
//!
//! Raw document fragments flow through four stages:
//! adapters (shape-matched extraction) → normalizer (pure fold) →
//! analysis (derived sections) → assembler (output contract), with the
//! demand calculator as an optional fifth stage.

pub mod adapters;
pub mod analysis;
pub mod assembler;
pub mod demand;
pub mod normalizer;
pub mod types;
pub mod value;

pub use adapters::{adapters_for, extract, SchemaAdapter};
pub use analysis::{analyze, DerivedAnalysis};
pub use assembler::assemble;
pub use demand::DemandCalculator;
pub use normalizer::normalize;
pub use types::{DocumentContribution, NormalizedCase, Payload, RawDocument};

use crate::models::CaseSummary;

/// Run the whole pipeline over one case's documents. Documents no adapter
/// recognizes contribute nothing; they are warned about at extraction.
pub fn run(
    case_id: &str,
    documents: &[RawDocument],
    calculator: Option<&DemandCalculator>,
) -> CaseSummary {
    let contributions: Vec<DocumentContribution> = documents.iter().filter_map(extract).collect();
    let case = normalize(contributions);
    let analysis = analyze(&case);
    let demand = calculator.map(|calc| calc.calculate(&case, &analysis));
    assemble(case_id, case, analysis, demand)
}

#[cfg(test)]
mod scenario_tests;
