//! Domain model: canonical sections, derived analysis, demand, summary.

pub mod analysis;
pub mod demand;
pub mod enums;
pub mod sections;
pub mod summary;

pub use analysis::{
    LiabilityAnalysis, LiabilitySplit, LostWages, MedicalExpenses, SeriousInjuryAnalysis,
    SpecialDamages,
};
pub use demand::{DemandCalculation, MultiplierRange, MultiplierTable};
pub use enums::{
    DocumentType, InjurySeverity, InvalidEnum, PolicyClassification, ThresholdCategory,
};
pub use sections::{
    Accident, BillLineItem, Defendant, Injuries, InsuranceCoverage, Lien, MedicalBills,
    Plaintiff, PolicyInfo,
};
pub use summary::{CaseSummary, DocumentCounts};
