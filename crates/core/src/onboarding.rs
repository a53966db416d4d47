//! Role-selection onboarding: the short wizard every new user completes
//! before profile creation.
//!
//! Both tracks are four steps; the client track asks for company size and
//! purpose where the freelancer track asks for the freelance type.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::validation::{field_error, is_blank};

/// Number of steps in either onboarding track.
pub const ONBOARDING_STEPS: u8 = 4;

/// The role a user picks during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Freelancer,
    Client,
}

impl Role {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "freelancer" => Ok(Self::Freelancer),
            "client" => Ok(Self::Client),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: freelancer, client"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freelancer => "freelancer",
            Self::Client => "client",
        }
    }

    /// Step labels for this role's onboarding track.
    pub fn track(&self) -> [&'static str; ONBOARDING_STEPS as usize] {
        match self {
            Self::Freelancer => [
                "Choose Role",
                "Employment Type",
                "Freelance Type",
                "Summary",
            ],
            Self::Client => ["Choose Role", "Employment Type", "Company Size", "Purpose"],
        }
    }
}

/// The completed onboarding form submitted at the end of the track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    pub role: Role,
    #[serde(default)]
    pub employment_type: String,
    /// Freelancer track only.
    #[serde(default)]
    pub freelance_type: Option<String>,
    /// Client track only.
    #[serde(default)]
    pub company_size: Option<String>,
    /// Client track only.
    #[serde(default)]
    pub purpose: Option<String>,
}

impl Validate for OnboardingForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.employment_type) {
            errors.add(
                "employmentType",
                field_error("required", "Employment type is required"),
            );
        }

        match self.role {
            Role::Freelancer => {
                if self.freelance_type.as_deref().map_or(true, is_blank) {
                    errors.add(
                        "freelanceType",
                        field_error("required", "Freelance type is required"),
                    );
                }
            }
            Role::Client => {
                if self.company_size.as_deref().map_or(true, is_blank) {
                    errors.add(
                        "companySize",
                        field_error("required", "Company size is required"),
                    );
                }
                if self.purpose.as_deref().map_or(true, is_blank) {
                    errors.add("purpose", field_error("required", "Purpose is required"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl OnboardingForm {
    /// Render the onboarding document body.
    pub fn to_document(&self, user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "role": self.role.as_str(),
            "employmentType": self.employment_type,
            "freelanceType": self.freelance_type,
            "companySize": self.company_size,
            "purpose": self.purpose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freelancer_form() -> OnboardingForm {
        OnboardingForm {
            role: Role::Freelancer,
            employment_type: "full_time".into(),
            freelance_type: Some("video_editing".into()),
            company_size: None,
            purpose: None,
        }
    }

    fn client_form() -> OnboardingForm {
        OnboardingForm {
            role: Role::Client,
            employment_type: "full_time".into(),
            freelance_type: None,
            company_size: Some("2-10".into()),
            purpose: Some("hire_editors".into()),
        }
    }

    #[test]
    fn role_roundtrip() {
        for role in [Role::Freelancer, Role::Client] {
            assert_eq!(Role::from_str_db(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str_db("admin").is_err());
    }

    #[test]
    fn both_tracks_have_four_steps() {
        assert_eq!(Role::Freelancer.track().len(), 4);
        assert_eq!(Role::Client.track().len(), 4);
        // Step 3/4 content differs between tracks.
        assert_ne!(Role::Freelancer.track()[2], Role::Client.track()[2]);
    }

    #[test]
    fn freelancer_requires_freelance_type() {
        let mut form = freelancer_form();
        form.freelance_type = None;
        let errors = form.validate().unwrap_err();
        assert!(errors.errors().contains_key("freelanceType"));
    }

    #[test]
    fn client_requires_company_size_and_purpose() {
        let mut form = client_form();
        form.company_size = Some("   ".into());
        form.purpose = None;
        let errors = form.validate().unwrap_err();
        assert!(errors.errors().contains_key("companySize"));
        assert!(errors.errors().contains_key("purpose"));
    }

    #[test]
    fn client_does_not_require_freelance_type() {
        assert!(client_form().validate().is_ok());
    }

    #[test]
    fn employment_type_required_for_both() {
        let mut form = freelancer_form();
        form.employment_type = "".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn document_carries_owner_and_role() {
        let doc = freelancer_form().to_document("u1");
        assert_eq!(doc["userId"], "u1");
        assert_eq!(doc["role"], "freelancer");
        assert!(doc["companySize"].is_null());
    }
}
