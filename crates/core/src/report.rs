//! Creator reports: the moderation write path.
//!
//! A report is created once and never mutated afterwards.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::validation::field_error;

/// The fixed set of report reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Harassment,
    FakeProfile,
    Copyright,
    Other,
}

impl ReportReason {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "spam" => Ok(Self::Spam),
            "inappropriate" => Ok(Self::Inappropriate),
            "harassment" => Ok(Self::Harassment),
            "fake_profile" => Ok(Self::FakeProfile),
            "copyright" => Ok(Self::Copyright),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid report reason '{s}'. Must be one of: spam, inappropriate, \
                 harassment, fake_profile, copyright, other"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Inappropriate => "inappropriate",
            Self::Harassment => "harassment",
            Self::FakeProfile => "fake_profile",
            Self::Copyright => "copyright",
            Self::Other => "other",
        }
    }
}

/// A report submission against a creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub creator_id: String,
    pub reason: ReportReason,
    pub additional_details: String,
}

impl Validate for NewReport {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.creator_id.trim().is_empty() {
            errors.add(
                "creatorId",
                field_error("required", "A creator to report is required"),
            );
        }
        let details = self.additional_details.trim();
        if details.is_empty() {
            errors.add(
                "additionalDetails",
                field_error("required", "Additional details are required"),
            );
        } else if details.chars().count() < 10 {
            errors.add(
                "additionalDetails",
                field_error("min", "Please provide at least 10 characters"),
            );
        } else if details.chars().count() > 1000 {
            errors.add(
                "additionalDetails",
                field_error("max", "Details must be less than 1000 characters"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl NewReport {
    /// Render the report document body, stamping the submission time.
    pub fn to_document(&self, user_id: &str) -> Value {
        json!({
            "creatorId": self.creator_id,
            "userId": user_id,
            "reason": self.reason.as_str(),
            "details": self.additional_details.trim(),
            "reportedAt": Utc::now().to_rfc3339(),
        })
    }
}
