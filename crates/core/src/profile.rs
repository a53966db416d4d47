//! Create-profile wizard payloads, parent-profile model, and validation.
//!
//! Each wizard step has one payload type; the accumulated [`ProfileForm`]
//! holds an optional slice per step. Payloads validate to a field-keyed
//! error map and know how to render themselves as store documents (the
//! camelCase field names are the persisted wire format).

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

use crate::catalog;
use crate::error::CoreError;
use crate::types::DocId;
use crate::validation::{check_length, field_error, is_blank};

/// Total number of steps in the create-profile wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum step number (0-based).
pub const MIN_STEP: u8 = 0;

/// Maximum step number (0-based).
pub const MAX_STEP: u8 = 6;

// ---------------------------------------------------------------------------
// Profile status
// ---------------------------------------------------------------------------

/// Status values for a parent profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    InProgress,
    Completed,
}

impl ProfileStatus {
    /// Parse a status string from a persisted document.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid profile status '{s}'. Must be one of: in_progress, completed"
            ))),
        }
    }

    /// Convert to the persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Profile steps
// ---------------------------------------------------------------------------

/// The seven steps in the create-profile wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStep {
    Platforms,
    BasicInfo,
    ProfilePicture,
    Languages,
    Experience,
    AdditionalSkills,
    Education,
}

impl ProfileStep {
    /// Convert a 0-based step number to a `ProfileStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            0 => Ok(Self::Platforms),
            1 => Ok(Self::BasicInfo),
            2 => Ok(Self::ProfilePicture),
            3 => Ok(Self::Languages),
            4 => Ok(Self::Experience),
            5 => Ok(Self::AdditionalSkills),
            6 => Ok(Self::Education),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 0-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Platforms => 0,
            Self::BasicInfo => 1,
            Self::ProfilePicture => 2,
            Self::Languages => 3,
            Self::Experience => 4,
            Self::AdditionalSkills => 5,
            Self::Education => 6,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Platforms => "Platforms & Content Types",
            Self::BasicInfo => "Basic Info",
            Self::ProfilePicture => "Profile Picture",
            Self::Languages => "Languages",
            Self::Experience => "Occupation & Skills",
            Self::AdditionalSkills => "Additional Skills",
            Self::Education => "Education",
        }
    }

    /// All steps in submission order.
    pub fn all() -> [ProfileStep; TOTAL_STEPS as usize] {
        [
            Self::Platforms,
            Self::BasicInfo,
            Self::ProfilePicture,
            Self::Languages,
            Self::Experience,
            Self::AdditionalSkills,
            Self::Education,
        ]
    }
}

// ---------------------------------------------------------------------------
// Step 0: platforms & content types
// ---------------------------------------------------------------------------

/// Step 0 payload: where the creator publishes and what they make.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPreferences {
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub custom_platform: String,
    #[serde(default)]
    pub content_types: Vec<String>,
}

impl Validate for PlatformPreferences {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.platforms.is_empty() && is_blank(&self.custom_platform) {
            errors.add(
                "platforms",
                field_error(
                    "platform_required",
                    "Please select at least one platform or specify a custom platform",
                ),
            );
        }
        if self.custom_platform.chars().count() > 100 {
            errors.add(
                "customPlatform",
                field_error("length", "Custom platform must not exceed 100 characters"),
            );
        }
        if self.content_types.is_empty() {
            errors.add(
                "contentTypes",
                field_error("required", "Please select at least one content type"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl PlatformPreferences {
    /// Render the step-0 document body.
    pub fn to_document(&self, profile_id: &DocId, user_id: &str) -> Value {
        json!({
            "profileId": profile_id,
            "userId": user_id,
            "platforms": self.platforms,
            "customPlatform": self.custom_platform,
            "contentTypes": self.content_types,
            "step": 0,
            "completed": true,
        })
    }
}

// ---------------------------------------------------------------------------
// Step 1: basic info
// ---------------------------------------------------------------------------

/// Step 1 payload: name and self-description.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(length(min = 10, max = 500, message = "Description must be 10-500 characters"))]
    pub description: String,
}

impl BasicInfo {
    pub fn to_document(&self, profile_id: &DocId, user_id: &str) -> Value {
        json!({
            "profileId": profile_id,
            "userId": user_id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "description": self.description,
            "step": 1,
            "completed": true,
        })
    }
}

// ---------------------------------------------------------------------------
// Step 2: profile picture
// ---------------------------------------------------------------------------

/// An uploadable picture carried inside the form (base64-encoded bytes).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: String,
    /// Base64-encoded file contents.
    pub data: String,
}

/// Render the step-2 document body.
///
/// `picture_url` is the public view URL produced after the blob upload;
/// both fields are null when no picture was provided.
pub fn picture_document(
    profile_id: &DocId,
    user_id: &str,
    picture_url: Option<&str>,
    file_name: Option<&str>,
) -> Value {
    json!({
        "profileId": profile_id,
        "userId": user_id,
        "profilePictureUrl": picture_url,
        "profilePictureFileId": file_name,
        "step": 2,
        "completed": true,
    })
}

// ---------------------------------------------------------------------------
// Step 3: languages
// ---------------------------------------------------------------------------

/// One declared language (step 3 fans out into one document per entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl LanguageEntry {
    pub fn to_document(&self, profile_id: &DocId, user_id: &str) -> Value {
        json!({
            "profileId": [profile_id],
            "userId": user_id,
            "language": self.language,
            "proficiency": self.proficiency,
            "isCustom": self.is_custom,
            "step": 3,
            "completed": true,
        })
    }
}

/// Validate the declared-language set: at least one entry, every entry
/// carrying a language and a known proficiency tag.
pub fn validate_languages(languages: &[LanguageEntry]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if languages.is_empty() {
        errors.add(
            "languages",
            field_error("required", "Please add at least one language"),
        );
    }
    for entry in languages {
        if is_blank(&entry.language) {
            errors.add(
                "languages",
                field_error("language_required", "Every language needs a name"),
            );
            break;
        }
    }
    for entry in languages {
        if !catalog::is_known_proficiency(&entry.proficiency) {
            errors.add(
                "languages",
                field_error(
                    "proficiency_invalid",
                    "Every language needs a valid proficiency level",
                ),
            );
            break;
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Step 4: occupation & specializations
// ---------------------------------------------------------------------------

/// Step 4 payload: current occupation, work dates, and specializations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default)]
    pub occupation: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_currently_working: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub timezone: String,
}

impl WorkExperience {
    /// Validate against an explicit "today" so tests stay deterministic.
    pub fn validate_with_today(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.occupation) {
            errors.add(
                "occupation",
                field_error("required", "Please select an occupation"),
            );
        }
        match self.start_date {
            None => errors.add("startDate", field_error("required", "Start date is required")),
            Some(start) if start > today => errors.add(
                "startDate",
                field_error("future", "Start date cannot be in the future"),
            ),
            Some(_) => {}
        }
        // End date is ignored entirely while currently working.
        if !self.is_currently_working && self.end_date.is_none() {
            errors.add(
                "endDate",
                field_error(
                    "required",
                    "Please provide an end date or check \"Currently working in this role\"",
                ),
            );
        }
        if self.skills.len() < 2 {
            errors.add(
                "skills",
                field_error("min", "Please select at least 2 specializations"),
            );
        } else if self.skills.len() > 5 {
            errors.add(
                "skills",
                field_error("max", "You can select up to 5 specializations"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whole calendar years between the start date and either the end date
    /// or today (when currently working). Partial years truncate; never
    /// negative.
    pub fn years_of_experience(&self, today: NaiveDate) -> i32 {
        let Some(start) = self.start_date else {
            return 0;
        };
        let end = if self.is_currently_working {
            today
        } else {
            match self.end_date {
                Some(end) => end,
                None => return 0,
            }
        };

        let mut years = end.year() - start.year();
        if (end.month(), end.day()) < (start.month(), start.day()) {
            years -= 1;
        }
        years.max(0)
    }

    pub fn to_document(&self, profile_id: &DocId, user_id: &str, today: NaiveDate) -> Value {
        json!({
            "profileId": profile_id,
            "userId": user_id,
            "occupation": self.occupation,
            "startDate": self.start_date.map(iso_midnight),
            "endDate": if self.is_currently_working {
                None
            } else {
                self.end_date.map(iso_midnight)
            },
            "isCurrentlyWorking": self.is_currently_working,
            "skills": self.skills,
            "yearsOfExperience": self.years_of_experience(today),
            "timezone": self.timezone,
            "step": 4,
            "completed": true,
        })
    }
}

impl Validate for WorkExperience {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_with_today(Utc::now().date_naive())
    }
}

// ---------------------------------------------------------------------------
// Step 5: additional skills
// ---------------------------------------------------------------------------

/// One additional skill (step 5 fans out into one document per entry).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    #[validate(length(min = 2, max = 50, message = "Skill name must be 2-50 characters"))]
    pub skill_name: String,
    #[validate(range(min = 1, max = 5, message = "Proficiency must be between 1 and 5"))]
    pub proficiency: u8,
}

impl SkillEntry {
    pub fn to_document(&self, profile_id: &DocId, user_id: &str) -> Value {
        json!({
            "profileId": [profile_id],
            "userId": user_id,
            "skillName": self.skill_name,
            "proficiency": self.proficiency,
            "step": 5,
            "completed": true,
        })
    }
}

/// Validate every additional skill. The ≤5 cap is a client-side soft cap
/// and is deliberately not re-checked here.
pub fn validate_additional_skills(skills: &[SkillEntry]) -> Result<(), ValidationErrors> {
    for skill in skills {
        skill.validate()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Step 6: education
// ---------------------------------------------------------------------------

/// Step 6 payload: one education record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub education_level: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Education {
    pub fn validate_with_today(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_length(
            &mut errors,
            "profession",
            &self.profession,
            2,
            100,
            "Profession must be 2-100 characters",
        );
        if is_blank(&self.country) {
            errors.add("country", field_error("required", "Country is required"));
        }
        check_length(
            &mut errors,
            "school",
            &self.school,
            2,
            100,
            "School name must be 2-100 characters",
        );
        if is_blank(&self.education_level) {
            errors.add(
                "educationLevel",
                field_error("required", "Education level is required"),
            );
        }

        match self.start_date {
            None => errors.add("startDate", field_error("required", "Start date is required")),
            Some(start) if start > today => errors.add(
                "startDate",
                field_error("future", "Start date cannot be in the future"),
            ),
            Some(_) => {}
        }
        match (self.start_date, self.end_date) {
            (_, None) => errors.add("endDate", field_error("required", "End date is required")),
            (Some(start), Some(end)) if end <= start => errors.add(
                "endDate",
                field_error("order", "End date must be after start date"),
            ),
            (_, Some(end)) if end > today => errors.add(
                "endDate",
                field_error("future", "End date cannot be in the future"),
            ),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_document(&self, profile_id: &DocId, user_id: &str) -> Value {
        json!({
            "profileId": profile_id,
            "userId": user_id,
            "profession": self.profession,
            "country": self.country,
            "school": self.school,
            "educationLevel": self.education_level,
            "startDate": self.start_date.map(iso_midnight),
            "endDate": self.end_date.map(iso_midnight),
            "step": 6,
            "completed": true,
        })
    }
}

impl Validate for Education {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_with_today(Utc::now().date_naive())
    }
}

// ---------------------------------------------------------------------------
// Accumulated form
// ---------------------------------------------------------------------------

/// The accumulated wizard form: one optional slice per step.
///
/// The wizard controller owns an instance of this for the duration of a
/// session; nothing is persisted until submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub platform_preferences: Option<PlatformPreferences>,
    pub basic_info: Option<BasicInfo>,
    pub profile_picture: Option<PictureUpload>,
    pub languages: Option<Vec<LanguageEntry>>,
    pub experience: Option<WorkExperience>,
    pub additional_skills: Option<Vec<SkillEntry>>,
    pub education: Option<Education>,
}

/// One step's payload, tagged by step number.
#[derive(Debug, Clone)]
pub enum StepData {
    Platforms(PlatformPreferences),
    BasicInfo(BasicInfo),
    Picture(Option<PictureUpload>),
    Languages(Vec<LanguageEntry>),
    Experience(WorkExperience),
    Skills(Vec<SkillEntry>),
    Education(Education),
}

impl StepData {
    pub fn step(&self) -> ProfileStep {
        match self {
            Self::Platforms(_) => ProfileStep::Platforms,
            Self::BasicInfo(_) => ProfileStep::BasicInfo,
            Self::Picture(_) => ProfileStep::ProfilePicture,
            Self::Languages(_) => ProfileStep::Languages,
            Self::Experience(_) => ProfileStep::Experience,
            Self::Skills(_) => ProfileStep::AdditionalSkills,
            Self::Education(_) => ProfileStep::Education,
        }
    }

    /// Validate this slice (field-keyed errors on failure).
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Platforms(p) => p.validate(),
            Self::BasicInfo(b) => b.validate(),
            // A missing picture is a valid step-2 submission.
            Self::Picture(_) => Ok(()),
            Self::Languages(l) => validate_languages(l),
            Self::Experience(e) => e.validate(),
            Self::Skills(s) => validate_additional_skills(s),
            Self::Education(e) => e.validate(),
        }
    }
}

impl ProfileForm {
    /// Extract the typed slice for a step, or `None` when unpopulated.
    ///
    /// Step 2 always yields a slice: a profile picture is optional and the
    /// step record is written either way.
    pub fn slice(&self, step: ProfileStep) -> Option<StepData> {
        match step {
            ProfileStep::Platforms => self
                .platform_preferences
                .clone()
                .map(StepData::Platforms),
            ProfileStep::BasicInfo => self.basic_info.clone().map(StepData::BasicInfo),
            ProfileStep::ProfilePicture => Some(StepData::Picture(self.profile_picture.clone())),
            ProfileStep::Languages => self.languages.clone().map(StepData::Languages),
            ProfileStep::Experience => self.experience.clone().map(StepData::Experience),
            ProfileStep::AdditionalSkills => {
                self.additional_skills.clone().map(StepData::Skills)
            }
            ProfileStep::Education => self.education.clone().map(StepData::Education),
        }
    }

    /// Merge a validated slice into the form (the reducer's merge step).
    pub fn merge(mut self, data: StepData) -> Self {
        match data {
            StepData::Platforms(p) => self.platform_preferences = Some(p),
            StepData::BasicInfo(b) => self.basic_info = Some(b),
            StepData::Picture(p) => self.profile_picture = p,
            StepData::Languages(l) => self.languages = Some(l),
            StepData::Experience(e) => self.experience = Some(e),
            StepData::Skills(s) => self.additional_skills = Some(s),
            StepData::Education(e) => self.education = Some(e),
        }
        self
    }

    /// Defensive re-check before an all-at-once submission: every mandatory
    /// slice must be present and every populated slice must pass its own
    /// validator. Fails on the first invalid step so the error map points
    /// at one step at a time.
    pub fn validate_complete(&self) -> Result<(), ValidationErrors> {
        for step in ProfileStep::all() {
            match self.slice(step) {
                Some(data) => data.validate()?,
                None if step_required(step) => {
                    let mut errors = ValidationErrors::new();
                    errors.add(
                        section_key(step),
                        field_error("required", "This step has not been filled in"),
                    );
                    return Err(errors);
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Whether an all-at-once submission must include this step's slice.
///
/// Additional skills may legitimately be empty; the picture is optional.
fn step_required(step: ProfileStep) -> bool {
    !matches!(
        step,
        ProfileStep::ProfilePicture | ProfileStep::AdditionalSkills
    )
}

/// The form-section key used for a missing-step error.
fn section_key(step: ProfileStep) -> &'static str {
    match step {
        ProfileStep::Platforms => "platformPreferences",
        ProfileStep::BasicInfo => "basicInfo",
        ProfileStep::ProfilePicture => "profilePicture",
        ProfileStep::Languages => "languages",
        ProfileStep::Experience => "experience",
        ProfileStep::AdditionalSkills => "additionalSkills",
        ProfileStep::Education => "education",
    }
}

// ---------------------------------------------------------------------------
// Parent profile documents
// ---------------------------------------------------------------------------

/// Document body for a freshly created parent profile.
pub fn parent_profile_document(
    user_id: &str,
    form: &ProfileForm,
    current_step: u8,
) -> Value {
    let (first, last, description) = match &form.basic_info {
        Some(info) => (
            info.first_name.as_str(),
            info.last_name.as_str(),
            info.description.as_str(),
        ),
        None => ("", "", ""),
    };
    json!({
        "userId": user_id,
        "firstName": first,
        "lastName": last,
        "description": description,
        "profileStatus": ProfileStatus::InProgress.as_str(),
        "currentStep": current_step,
        "totalSteps": TOTAL_STEPS,
        "completedSteps": Vec::<u8>::new(),
    })
}

/// Document body for a parent-profile progress update.
pub fn parent_progress_update(
    current_step: u8,
    completed_steps: &[u8],
    status: Option<ProfileStatus>,
) -> Value {
    let mut update = json!({
        "currentStep": current_step,
        "completedSteps": completed_steps,
    });
    if let Some(status) = status {
        update["profileStatus"] = json!(status.as_str());
    }
    update
}

/// Convert a calendar date to the persisted RFC 3339 form (UTC midnight).
pub fn iso_midnight(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc3339()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
