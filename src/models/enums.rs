use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentType {
    MedicalRecords => "medical_records",
    PoliceReport => "police_report",
    InsurancePolicy => "insurance_policy",
    MedicalBills => "medical_bills",
});

impl DocumentType {
    pub fn all() -> [DocumentType; 4] {
        [
            DocumentType::MedicalRecords,
            DocumentType::PoliceReport,
            DocumentType::InsurancePolicy,
            DocumentType::MedicalBills,
        ]
    }

    /// Map a corpus directory name ("MEDICAL_RECORDS", "police_report", ...)
    /// onto a document type. Matching is case-insensitive.
    pub fn from_dir_name(name: &str) -> Option<DocumentType> {
        name.to_ascii_lowercase().parse().ok()
    }
}

str_enum!(InjurySeverity {
    Permanent => "permanent",
    DiscHerniation => "disc_herniation",
    Radiculopathy => "radiculopathy",
    DiscBulging => "disc_bulging",
    SoftTissue => "soft_tissue",
});

impl InjurySeverity {
    /// Human-readable form used in rendered reports and the demand letter.
    pub fn label(&self) -> &'static str {
        match self {
            InjurySeverity::Permanent => "permanent injury",
            InjurySeverity::DiscHerniation => "disc herniation",
            InjurySeverity::Radiculopathy => "radiculopathy",
            InjurySeverity::DiscBulging => "disc bulging",
            InjurySeverity::SoftTissue => "soft tissue injury",
        }
    }
}

str_enum!(ThresholdCategory {
    NinetyOneEighty => "ninety_one_eighty",
    SignificantLimitation => "significant_limitation",
    PermanentConsequentialLimitation => "permanent_consequential_limitation",
    PermanentLossOfUse => "permanent_loss_of_use",
    Fracture => "fracture",
    SignificantDisfigurement => "significant_disfigurement",
});

impl ThresholdCategory {
    pub fn all() -> [ThresholdCategory; 6] {
        [
            ThresholdCategory::NinetyOneEighty,
            ThresholdCategory::SignificantLimitation,
            ThresholdCategory::PermanentConsequentialLimitation,
            ThresholdCategory::PermanentLossOfUse,
            ThresholdCategory::Fracture,
            ThresholdCategory::SignificantDisfigurement,
        ]
    }

    /// Statutory phrasing per NY Insurance Law 5102(d), used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ThresholdCategory::NinetyOneEighty => {
                "90/180-day impairment of customary daily activities"
            }
            ThresholdCategory::SignificantLimitation => {
                "Significant limitation of use of a body function or system"
            }
            ThresholdCategory::PermanentConsequentialLimitation => {
                "Permanent consequential limitation of use of a body organ or member"
            }
            ThresholdCategory::PermanentLossOfUse => {
                "Permanent loss of use of a body organ, member, function or system"
            }
            ThresholdCategory::Fracture => "Fracture",
            ThresholdCategory::SignificantDisfigurement => "Significant disfigurement",
        }
    }
}

str_enum!(PolicyClassification {
    Personal => "personal",
    Commercial => "commercial",
});
