use gigfolio_core::profile::ProfileStep;

/// Collection ids for every document kind the backend writes.
#[derive(Debug, Clone)]
pub struct Collections {
    pub parent_profiles: String,
    pub platform_preferences: String,
    pub basic_info: String,
    pub profile_pictures: String,
    pub languages: String,
    pub experience: String,
    pub additional_skills: String,
    pub education: String,
    pub onboarding: String,
    pub reports: String,
}

impl Collections {
    /// Collection id holding the per-step documents for a wizard step.
    pub fn for_step(&self, step: ProfileStep) -> &str {
        match step {
            ProfileStep::Platforms => &self.platform_preferences,
            ProfileStep::BasicInfo => &self.basic_info,
            ProfileStep::ProfilePicture => &self.profile_pictures,
            ProfileStep::Languages => &self.languages,
            ProfileStep::Experience => &self.experience,
            ProfileStep::AdditionalSkills => &self.additional_skills,
            ProfileStep::Education => &self.education,
        }
    }
}

/// Connection settings for the hosted document/blob store.
///
/// All fields have local-development defaults; override via environment
/// variables in production.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST API.
    pub endpoint: String,
    /// Project id, sent as a header and appended to public file URLs.
    pub project_id: String,
    /// Server API key with database and storage scopes.
    pub api_key: String,
    /// Database id under which all collections live.
    pub database_id: String,
    /// Bucket holding uploaded profile pictures.
    pub profile_picture_bucket: String,
    /// Per-kind collection ids.
    pub collections: Collections,
}

impl StoreConfig {
    /// Load store configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                        |
    /// |----------------------------------|--------------------------------|
    /// | `STORE_ENDPOINT`                 | `http://localhost:8080/v1`     |
    /// | `STORE_PROJECT_ID`               | `gigfolio-dev`                 |
    /// | `STORE_API_KEY`                  | (empty)                        |
    /// | `STORE_DATABASE_ID`              | `gigfolio`                     |
    /// | `STORE_PROFILE_PICTURE_BUCKET`   | `profile-pictures`             |
    /// | `STORE_COLL_PARENT_PROFILES`     | `parent-profiles`              |
    /// | `STORE_COLL_PLATFORM_PREFS`      | `platform-preferences`         |
    /// | `STORE_COLL_BASIC_INFO`          | `basic-info`                   |
    /// | `STORE_COLL_PROFILE_PICTURES`    | `profile-picture-records`      |
    /// | `STORE_COLL_LANGUAGES`           | `languages`                    |
    /// | `STORE_COLL_EXPERIENCE`          | `experience`                   |
    /// | `STORE_COLL_ADDITIONAL_SKILLS`   | `additional-skills`            |
    /// | `STORE_COLL_EDUCATION`           | `education`                    |
    /// | `STORE_COLL_ONBOARDING`          | `onboarding`                   |
    /// | `STORE_COLL_REPORTS`             | `creator-reports`              |
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.into())
        };

        Self {
            endpoint: var("STORE_ENDPOINT", "http://localhost:8080/v1"),
            project_id: var("STORE_PROJECT_ID", "gigfolio-dev"),
            api_key: var("STORE_API_KEY", ""),
            database_id: var("STORE_DATABASE_ID", "gigfolio"),
            profile_picture_bucket: var("STORE_PROFILE_PICTURE_BUCKET", "profile-pictures"),
            collections: Collections {
                parent_profiles: var("STORE_COLL_PARENT_PROFILES", "parent-profiles"),
                platform_preferences: var("STORE_COLL_PLATFORM_PREFS", "platform-preferences"),
                basic_info: var("STORE_COLL_BASIC_INFO", "basic-info"),
                profile_pictures: var("STORE_COLL_PROFILE_PICTURES", "profile-picture-records"),
                languages: var("STORE_COLL_LANGUAGES", "languages"),
                experience: var("STORE_COLL_EXPERIENCE", "experience"),
                additional_skills: var("STORE_COLL_ADDITIONAL_SKILLS", "additional-skills"),
                education: var("STORE_COLL_EDUCATION", "education"),
                onboarding: var("STORE_COLL_ONBOARDING", "onboarding"),
                reports: var("STORE_COLL_REPORTS", "creator-reports"),
            },
        }
    }

    /// Public view URL for a stored file.
    pub fn file_view_url(&self, bucket: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.endpoint, bucket, file_id, self.project_id
        )
    }
}
