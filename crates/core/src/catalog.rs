//! Static selection catalogs offered by the wizard UI.
//!
//! These are the tags the validators check membership against. Free-text
//! fields (custom platform, custom language, occupation) deliberately skip
//! membership checks.

/// Platform tags selectable in step 0.
pub const PLATFORMS: &[&str] = &["youtube", "tiktok", "instagram", "no_platform"];

/// Content-type tags selectable in step 0.
pub const CONTENT_TYPES: &[&str] = &["short_form", "long_form"];

/// Language proficiency tags for step 3.
pub const LANGUAGE_PROFICIENCIES: &[&str] = &["beginner", "intermediate", "advanced", "native"];

/// Education level tags for step 6.
pub const EDUCATION_LEVELS: &[&str] = &[
    "high_school",
    "associate",
    "bachelor",
    "master",
    "doctorate",
    "other",
];

/// Maximum number of languages a profile may declare (client-side cap).
pub const MAX_LANGUAGES: usize = 5;

/// Maximum number of additional skills (client-side soft cap, not
/// re-validated server-side).
pub const MAX_ADDITIONAL_SKILLS: usize = 5;

pub fn is_known_platform(tag: &str) -> bool {
    PLATFORMS.contains(&tag)
}

pub fn is_known_content_type(tag: &str) -> bool {
    CONTENT_TYPES.contains(&tag)
}

pub fn is_known_proficiency(tag: &str) -> bool {
    LANGUAGE_PROFICIENCIES.contains(&tag)
}
