//! Demand calculation output and the severity → multiplier table.
//!
//! The multiplier table is injected into the calculator rather than read from
//! a global, so alternate tables (firm policy, jurisdiction) can be tested
//! against the same scoring logic.

use serde::{Deserialize, Serialize};

use super::enums::InjurySeverity;

/// Inclusive multiplier band applied to special damages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierRange {
    pub low: f64,
    pub high: f64,
}

impl MultiplierRange {
    pub fn new(low: f64, high: f64) -> Self {
        MultiplierRange { low, high }
    }

    /// Point at `fraction` of the way from low to high (0.0 → low, 1.0 → high).
    pub fn at(&self, fraction: f64) -> f64 {
        self.low + (self.high - self.low) * fraction
    }

    pub fn midpoint(&self) -> f64 {
        self.at(0.5)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Published multiplier bands per severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    pub permanent: MultiplierRange,
    pub disc_herniation: MultiplierRange,
    pub radiculopathy: MultiplierRange,
    pub disc_bulging: MultiplierRange,
    pub soft_tissue: MultiplierRange,
}

impl Default for MultiplierTable {
    fn default() -> Self {
        MultiplierTable {
            permanent: MultiplierRange::new(3.0, 5.0),
            disc_herniation: MultiplierRange::new(2.5, 4.0),
            radiculopathy: MultiplierRange::new(2.5, 3.5),
            disc_bulging: MultiplierRange::new(2.0, 3.0),
            soft_tissue: MultiplierRange::new(1.5, 2.5),
        }
    }
}

impl MultiplierTable {
    pub fn range_for(&self, severity: InjurySeverity) -> MultiplierRange {
        match severity {
            InjurySeverity::Permanent => self.permanent,
            InjurySeverity::DiscHerniation => self.disc_herniation,
            InjurySeverity::Radiculopathy => self.radiculopathy,
            InjurySeverity::DiscBulging => self.disc_bulging,
            InjurySeverity::SoftTissue => self.soft_tissue,
        }
    }
}

/// Settlement demand computed from the normalized case + derived analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCalculation {
    pub total_specials: f64,
    pub severity: InjurySeverity,
    pub multiplier_range: MultiplierRange,
    pub multiplier_used: f64,
    pub liability_strength: f64,
    pub pain_and_suffering: f64,
    /// Always a multiple of 500.
    pub total_demand: f64,
    /// Defendant's per-person BI limit; None when no policy or limit was found.
    pub defendant_bi_limit: Option<f64>,
    /// None when the limit is unknown, never false-by-default.
    pub exceeds_coverage: Option<bool>,
}
