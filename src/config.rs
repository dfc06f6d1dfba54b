//! Firm profile configuration.
//!
//! Consumed only by the demand letter renderer; scoring never reads config.
//! Every field carries a serde default so a partial profile file (or none at
//! all) falls back to bracketed placeholders the way a letter template would.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Application-level constants
pub const APP_NAME: &str = "Casebrief";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn default_log_filter() -> &'static str {
    "info"
}

fn default_firm_name() -> String {
    "LAW OFFICES OF [FIRM NAME]".into()
}

fn default_street() -> String {
    "[Street Address]".into()
}

fn default_city() -> String {
    "[City]".into()
}

fn default_state() -> String {
    "NY".into()
}

fn default_zip() -> String {
    "[ZIP]".into()
}

fn default_phone() -> String {
    "[Phone]".into()
}

fn default_fax() -> String {
    "[Fax]".into()
}

fn default_email() -> String {
    "[Email]".into()
}

fn default_attorney_name() -> String {
    "[Attorney Name]".into()
}

fn default_bar_number() -> String {
    "[Bar Number]".into()
}

fn default_attorney_email() -> String {
    "[Attorney Email]".into()
}

fn default_direct_phone() -> String {
    "[Direct Phone]".into()
}

fn default_deadline_days() -> i64 {
    30
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmAddress {
    #[serde(default = "default_street")]
    pub street: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_zip")]
    pub zip: String,
}

impl Default for FirmAddress {
    fn default() -> Self {
        FirmAddress {
            street: default_street(),
            city: default_city(),
            state: default_state(),
            zip: default_zip(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attorney {
    #[serde(default = "default_attorney_name")]
    pub name: String,
    #[serde(default = "default_bar_number")]
    pub bar_number: String,
    #[serde(default = "default_attorney_email")]
    pub email: String,
    #[serde(default = "default_direct_phone")]
    pub direct_phone: String,
}

impl Default for Attorney {
    fn default() -> Self {
        Attorney {
            name: default_attorney_name(),
            bar_number: default_bar_number(),
            email: default_attorney_email(),
            direct_phone: default_direct_phone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterDefaults {
    #[serde(default = "default_deadline_days")]
    pub response_deadline_days: i64,
    #[serde(default = "default_true")]
    pub certified_mail: bool,
    #[serde(default = "default_true")]
    pub cc_client: bool,
}

impl Default for LetterDefaults {
    fn default() -> Self {
        LetterDefaults {
            response_deadline_days: default_deadline_days(),
            certified_mail: true,
            cc_client: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmConfig {
    #[serde(default = "default_firm_name")]
    pub firm_name: String,
    #[serde(default)]
    pub firm_address: FirmAddress,
    #[serde(default = "default_phone")]
    pub firm_phone: String,
    #[serde(default = "default_fax")]
    pub firm_fax: String,
    #[serde(default = "default_email")]
    pub firm_email: String,
    #[serde(default)]
    pub attorney: Attorney,
    #[serde(default)]
    pub defaults: LetterDefaults,
}

impl Default for FirmConfig {
    fn default() -> Self {
        FirmConfig {
            firm_name: default_firm_name(),
            firm_address: FirmAddress::default(),
            firm_phone: default_phone(),
            firm_fax: default_fax(),
            firm_email: default_email(),
            attorney: Attorney::default(),
            defaults: LetterDefaults::default(),
        }
    }
}

impl FirmConfig {
    /// Load a firm profile from a JSON file. Absent fields keep their
    /// placeholder defaults; a malformed file is a hard error.
    pub fn load(path: &Path) -> Result<FirmConfig, EngineError> {
        let raw = fs::read_to_string(path).map_err(|source| EngineError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| EngineError::Config {
            path: path.display().to_string(),
            source,
        })
    }
}
