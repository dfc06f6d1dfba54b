//! Casebrief turns IDP-extracted personal injury case documents into a
//! canonical case model with derived legal analysis.
//!
//! The pipeline runs in fixed stages: schema adapters lift raw text and JSON
//! payloads into per-document contributions, the normalizer merges those into
//! one [`pipeline::NormalizedCase`], the analyzers derive liability, NY
//! serious-injury threshold, and special damages, and an optional
//! [`pipeline::DemandCalculator`] prices the settlement demand. The assembler
//! packages everything as a [`CaseSummary`], which the report module renders
//! as JSON, markdown, or HTML, plus a demand letter.
//!
//! Per-document problems never abort a run. Malformed payloads are logged and
//! skipped; only a missing corpus root is fatal.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod source;

pub use config::FirmConfig;
pub use error::EngineError;
pub use models::{CaseSummary, DemandCalculation, DocumentType};
pub use pipeline::DemandCalculator;
pub use source::{load_corpus, CaseCorpus};
