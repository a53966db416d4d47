//! Profile submission orchestrator.
//!
//! Turns a wizard form into documents at the hosted store: one parent
//! profile plus one record per step, with steps 3 (languages) and 5
//! (additional skills) fanning out into one document per entry. Both the
//! all-at-once submission and the per-step endpoint funnel through
//! [`Submitter::write_step`], so the two strategies cannot drift apart.
//!
//! Store writes are not transactional. A failed write stops the
//! submission and is reported in the outcome; everything already written
//! stays behind, and the parent's `currentStep`/`completedSteps` reflect
//! the last step that fully landed.

use base64::Engine;
use serde::Serialize;
use serde_json::Value;

use gigfolio_core::error::CoreError;
use gigfolio_core::profile::{
    parent_profile_document, parent_progress_update, picture_document, ProfileForm, ProfileStatus,
    ProfileStep, StepData, MAX_STEP,
};
use gigfolio_core::types::DocId;
use gigfolio_store::{BlobStore, DocumentStore, StoreConfig, StoreError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Result of writing one step's documents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub step: u8,
    pub label: &'static str,
    pub success: bool,
    /// Ids of the documents written for this step (fan-out steps may
    /// have several, a failed step may have some).
    pub document_ids: Vec<DocId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of an all-at-once profile submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<DocId>,
    pub completed_steps: Vec<u8>,
    pub steps: Vec<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a single per-step submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSubmission {
    pub success: bool,
    pub profile_id: DocId,
    pub outcome: StepOutcome,
}

/// Borrow-only view over the store handles the orchestrator needs.
pub struct Submitter<'a> {
    documents: &'a dyn DocumentStore,
    blobs: &'a dyn BlobStore,
    config: &'a StoreConfig,
}

impl<'a> Submitter<'a> {
    pub fn new(
        documents: &'a dyn DocumentStore,
        blobs: &'a dyn BlobStore,
        config: &'a StoreConfig,
    ) -> Self {
        Self {
            documents,
            blobs,
            config,
        }
    }

    pub fn for_state(state: &'a AppState) -> Self {
        Self::new(
            state.documents.as_ref(),
            state.blobs.as_ref(),
            state.store_config.as_ref(),
        )
    }

    /// Submit a complete form: create the parent profile, then write the
    /// seven step records in order, updating the parent's progress after
    /// each one. The first failed write stops the run; the outcome then
    /// reports which steps landed.
    ///
    /// The form must already have passed [`ProfileForm::validate_complete`];
    /// handlers reject invalid forms before any write happens.
    pub async fn submit_complete(
        &self,
        user_id: &str,
        form: &ProfileForm,
        existing_profile_id: Option<DocId>,
    ) -> Result<SubmissionOutcome, StoreError> {
        let profile_id = match existing_profile_id {
            Some(id) => {
                self.documents
                    .get(&self.config.collections.parent_profiles, &id)
                    .await?;
                id
            }
            None => {
                let parent = self
                    .documents
                    .create(
                        &self.config.collections.parent_profiles,
                        parent_profile_document(user_id, form, 0),
                    )
                    .await?;
                tracing::info!(profile_id = %parent.id, user_id, "Parent profile created");
                parent.id
            }
        };

        let mut completed_steps: Vec<u8> = Vec::new();
        let mut steps: Vec<StepOutcome> = Vec::new();

        for step in ProfileStep::all() {
            let outcome = match form.slice(step) {
                Some(data) => self.write_step(&profile_id, user_id, &data).await,
                // Optional step left empty: nothing to write, still done.
                None => StepOutcome {
                    step: step.to_number(),
                    label: step.label(),
                    success: true,
                    document_ids: Vec::new(),
                    error: None,
                },
            };

            if !outcome.success {
                tracing::warn!(
                    profile_id = %profile_id,
                    step = outcome.step,
                    error = outcome.error.as_deref().unwrap_or(""),
                    "Step write failed, stopping submission"
                );
                let error = Some(format!(
                    "Submission stopped at step {} ({})",
                    outcome.step, outcome.label
                ));
                steps.push(outcome);
                return Ok(SubmissionOutcome {
                    success: false,
                    profile_id: Some(profile_id),
                    completed_steps,
                    steps,
                    error,
                });
            }

            completed_steps.push(step.to_number());
            let status = (step.to_number() == MAX_STEP).then_some(ProfileStatus::Completed);
            if let Err(err) = self
                .update_progress(&profile_id, step.to_number(), &completed_steps, status)
                .await
            {
                steps.push(outcome);
                return Ok(SubmissionOutcome {
                    success: false,
                    profile_id: Some(profile_id),
                    completed_steps,
                    steps,
                    error: Some(format!("Progress update failed: {err}")),
                });
            }
            steps.push(outcome);
        }

        tracing::info!(profile_id = %profile_id, user_id, "Profile submission completed");
        Ok(SubmissionOutcome {
            success: true,
            profile_id: Some(profile_id),
            completed_steps,
            steps,
            error: None,
        })
    }

    /// Submit a single step for an existing parent profile, creating the
    /// parent first when `profile_id` is `None`.
    pub async fn submit_step(
        &self,
        user_id: &str,
        profile_id: Option<DocId>,
        data: &StepData,
    ) -> AppResult<StepSubmission> {
        let step = data.step();
        let profile_id = match profile_id {
            Some(id) => {
                // Existence check so a bad id is a 404, not a dangling write.
                self.documents
                    .get(&self.config.collections.parent_profiles, &id)
                    .await
                    .map_err(|err| match err {
                        StoreError::NotFound { .. } => AppError::Core(CoreError::NotFound {
                            entity: "Profile",
                            id: id.clone(),
                        }),
                        other => AppError::Store(other),
                    })?;
                id
            }
            None => {
                let form = ProfileForm::default().merge(data.clone());
                let parent = self
                    .documents
                    .create(
                        &self.config.collections.parent_profiles,
                        parent_profile_document(user_id, &form, step.to_number()),
                    )
                    .await?;
                tracing::info!(profile_id = %parent.id, user_id, "Parent profile created");
                parent.id
            }
        };

        let outcome = self.write_step(&profile_id, user_id, data).await;
        if outcome.success {
            let completed_steps = self.completed_steps_with(&profile_id, step.to_number()).await?;
            let status = (step.to_number() == MAX_STEP).then_some(ProfileStatus::Completed);
            self.update_progress(&profile_id, step.to_number(), &completed_steps, status)
                .await
                .map_err(AppError::Store)?;
        }

        Ok(StepSubmission {
            success: outcome.success,
            profile_id,
            outcome,
        })
    }

    /// Write the documents one step produces, reporting per-step success.
    ///
    /// Fan-out steps (languages, additional skills) write one document
    /// per entry; a mid-fan-out failure leaves the earlier entries in
    /// place and reports their ids.
    async fn write_step(&self, profile_id: &DocId, user_id: &str, data: &StepData) -> StepOutcome {
        let step = data.step();
        let collection = self.config.collections.for_step(step);
        let mut document_ids: Vec<DocId> = Vec::new();
        let mut error: Option<String> = None;

        match data {
            StepData::Platforms(prefs) => {
                match self
                    .documents
                    .create(collection, prefs.to_document(profile_id, user_id))
                    .await
                {
                    Ok(doc) => document_ids.push(doc.id),
                    Err(err) => error = Some(err.to_string()),
                }
            }
            StepData::BasicInfo(info) => {
                match self
                    .documents
                    .create(collection, info.to_document(profile_id, user_id))
                    .await
                {
                    Ok(doc) => document_ids.push(doc.id),
                    Err(err) => error = Some(err.to_string()),
                }
            }
            StepData::Picture(upload) => {
                match self.picture_body(profile_id, user_id, upload.as_ref()).await {
                    Ok(body) => match self.documents.create(collection, body).await {
                        Ok(doc) => document_ids.push(doc.id),
                        Err(err) => error = Some(err.to_string()),
                    },
                    Err(message) => error = Some(message),
                }
            }
            StepData::Languages(entries) => {
                for entry in entries {
                    match self
                        .documents
                        .create(collection, entry.to_document(profile_id, user_id))
                        .await
                    {
                        Ok(doc) => document_ids.push(doc.id),
                        Err(err) => {
                            error = Some(err.to_string());
                            break;
                        }
                    }
                }
            }
            StepData::Experience(experience) => {
                let today = chrono::Utc::now().date_naive();
                match self
                    .documents
                    .create(collection, experience.to_document(profile_id, user_id, today))
                    .await
                {
                    Ok(doc) => document_ids.push(doc.id),
                    Err(err) => error = Some(err.to_string()),
                }
            }
            StepData::Skills(entries) => {
                for entry in entries {
                    match self
                        .documents
                        .create(collection, entry.to_document(profile_id, user_id))
                        .await
                    {
                        Ok(doc) => document_ids.push(doc.id),
                        Err(err) => {
                            error = Some(err.to_string());
                            break;
                        }
                    }
                }
            }
            StepData::Education(education) => {
                match self
                    .documents
                    .create(collection, education.to_document(profile_id, user_id))
                    .await
                {
                    Ok(doc) => document_ids.push(doc.id),
                    Err(err) => error = Some(err.to_string()),
                }
            }
        }

        StepOutcome {
            step: step.to_number(),
            label: step.label(),
            success: error.is_none(),
            document_ids,
            error,
        }
    }

    /// Build the step-2 document body, uploading the picture first when
    /// one was provided.
    async fn picture_body(
        &self,
        profile_id: &DocId,
        user_id: &str,
        upload: Option<&gigfolio_core::profile::PictureUpload>,
    ) -> Result<Value, String> {
        let Some(upload) = upload else {
            return Ok(picture_document(profile_id, user_id, None, None));
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&upload.data)
            .map_err(|err| format!("Invalid picture payload: {err}"))?;

        let file = self
            .blobs
            .upload(
                &self.config.profile_picture_bucket,
                &upload.file_name,
                &upload.content_type,
                bytes,
            )
            .await
            .map_err(|err| err.to_string())?;

        let url = self
            .config
            .file_view_url(&self.config.profile_picture_bucket, &file.id);
        tracing::info!(profile_id = %profile_id, file_id = %file.id, "Profile picture uploaded");
        Ok(picture_document(
            profile_id,
            user_id,
            Some(&url),
            Some(&upload.file_name),
        ))
    }

    /// Patch the parent's progress fields.
    async fn update_progress(
        &self,
        profile_id: &DocId,
        current_step: u8,
        completed_steps: &[u8],
        status: Option<ProfileStatus>,
    ) -> Result<(), StoreError> {
        self.documents
            .update(
                &self.config.collections.parent_profiles,
                profile_id,
                parent_progress_update(current_step, completed_steps, status),
            )
            .await?;
        Ok(())
    }

    /// Read the parent's `completedSteps` and append `step` if missing.
    async fn completed_steps_with(
        &self,
        profile_id: &DocId,
        step: u8,
    ) -> Result<Vec<u8>, StoreError> {
        let parent = self
            .documents
            .get(&self.config.collections.parent_profiles, profile_id)
            .await?;
        let mut completed: Vec<u8> = parent
            .data
            .get("completedSteps")
            .and_then(Value::as_array)
            .map(|steps| {
                steps
                    .iter()
                    .filter_map(Value::as_u64)
                    .map(|n| n as u8)
                    .collect()
            })
            .unwrap_or_default();
        if !completed.contains(&step) {
            completed.push(step);
            completed.sort_unstable();
        }
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigfolio_core::profile::{
        BasicInfo, Education, LanguageEntry, PlatformPreferences, SkillEntry, WorkExperience,
    };
    use gigfolio_store::{Collections, MemoryStore};

    fn test_config() -> StoreConfig {
        StoreConfig {
            endpoint: "http://store.test/v1".into(),
            project_id: "proj".into(),
            api_key: "key".into(),
            database_id: "db".into(),
            profile_picture_bucket: "pics".into(),
            collections: Collections {
                parent_profiles: "parents".into(),
                platform_preferences: "plat".into(),
                basic_info: "basic".into(),
                profile_pictures: "pic-records".into(),
                languages: "langs".into(),
                experience: "exp".into(),
                additional_skills: "skills".into(),
                education: "edu".into(),
                onboarding: "onboard".into(),
                reports: "reports".into(),
            },
        }
    }

    fn complete_form() -> ProfileForm {
        let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let edu_end = chrono::NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        ProfileForm {
            platform_preferences: Some(PlatformPreferences {
                platforms: vec!["youtube".into()],
                custom_platform: String::new(),
                content_types: vec!["short_form".into()],
            }),
            basic_info: Some(BasicInfo {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                description: "Video editor with a focus on short-form cuts.".into(),
            }),
            profile_picture: None,
            languages: Some(vec![
                LanguageEntry {
                    language: "English".into(),
                    proficiency: "native".into(),
                    is_custom: false,
                },
                LanguageEntry {
                    language: "French".into(),
                    proficiency: "intermediate".into(),
                    is_custom: false,
                },
            ]),
            experience: Some(WorkExperience {
                occupation: "Editor".into(),
                start_date: Some(start),
                end_date: None,
                is_currently_working: true,
                skills: vec!["editing".into(), "color grading".into()],
                timezone: "UTC".into(),
            }),
            additional_skills: Some(vec![
                SkillEntry {
                    skill_name: "Motion design".into(),
                    proficiency: 4,
                },
                SkillEntry {
                    skill_name: "Sound mixing".into(),
                    proficiency: 3,
                },
                SkillEntry {
                    skill_name: "Thumbnails".into(),
                    proficiency: 5,
                },
            ]),
            education: Some(Education {
                profession: "Film production".into(),
                school: "State University".into(),
                country: "France".into(),
                education_level: "bachelor".into(),
                start_date: Some(start),
                end_date: Some(edu_end),
            }),
        }
    }

    #[tokio::test]
    async fn complete_submission_writes_parent_and_all_steps() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        let outcome = submitter
            .submit_complete("user-1", &complete_form(), None)
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.completed_steps, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(store.count("parents"), 1);
        assert_eq!(store.count("plat"), 1);
        assert_eq!(store.count("basic"), 1);
        assert_eq!(store.count("pic-records"), 1);
        // Fan-out: one document per language / skill entry.
        assert_eq!(store.count("langs"), 2);
        assert_eq!(store.count("skills"), 3);

        let parent = &store.documents("parents")[0];
        assert_eq!(parent.data["profileStatus"], "completed");
        assert_eq!(parent.data["currentStep"], 6);
        assert_eq!(parent.data["firstName"], "Ada");
    }

    #[tokio::test]
    async fn fan_out_language_documents_reference_parent_as_array() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        let outcome = submitter
            .submit_complete("user-1", &complete_form(), None)
            .await
            .unwrap();
        let profile_id = outcome.profile_id.unwrap();

        for doc in store.documents("langs") {
            assert_eq!(doc.data["profileId"], serde_json::json!([profile_id]));
            assert_eq!(doc.data["step"], 3);
            assert_eq!(doc.data["completed"], true);
        }
    }

    #[tokio::test]
    async fn failed_step_stops_submission_and_keeps_progress() {
        let store = MemoryStore::new();
        store.fail_on("exp"); // step 4
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        let outcome = submitter
            .submit_complete("user-1", &complete_form(), None)
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.completed_steps, vec![0, 1, 2, 3]);
        let failed = outcome.steps.last().unwrap();
        assert_eq!(failed.step, 4);
        assert!(!failed.success);

        // Earlier writes stay behind; parent still reflects step 3.
        let parent = &store.documents("parents")[0];
        assert_eq!(parent.data["currentStep"], 3);
        assert_eq!(parent.data["profileStatus"], "in_progress");
        assert_eq!(store.count("langs"), 2);
        assert_eq!(store.count("skills"), 0);
    }

    #[tokio::test]
    async fn resubmission_creates_a_second_parent() {
        // Submitting twice duplicates the profile; the caller is expected
        // to guard against it. Documented here so a behavior change is
        // deliberate.
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        submitter
            .submit_complete("user-1", &complete_form(), None)
            .await
            .unwrap();
        submitter
            .submit_complete("user-1", &complete_form(), None)
            .await
            .unwrap();

        assert_eq!(store.count("parents"), 2);
        assert_eq!(store.count("langs"), 4);
    }

    #[tokio::test]
    async fn picture_upload_lands_in_bucket_and_document() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        let mut form = complete_form();
        form.profile_picture = Some(gigfolio_core::profile::PictureUpload {
            file_name: "avatar.png".into(),
            content_type: "image/png".into(),
            data: base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3]),
        });

        let outcome = submitter.submit_complete("user-1", &form, None).await.unwrap();
        assert!(outcome.success);
        assert_eq!(store.file_count("pics"), 1);

        let record = &store.documents("pic-records")[0];
        let url = record.data["profilePictureUrl"].as_str().unwrap();
        assert!(url.starts_with("http://store.test/v1/storage/buckets/pics/files/"));
        assert!(url.ends_with("/view?project=proj"));
    }

    #[tokio::test]
    async fn failed_upload_fails_the_picture_step() {
        let store = MemoryStore::new();
        store.fail_uploads();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);

        let mut form = complete_form();
        form.profile_picture = Some(gigfolio_core::profile::PictureUpload {
            file_name: "avatar.png".into(),
            content_type: "image/png".into(),
            data: base64::engine::general_purpose::STANDARD.encode([1u8]),
        });

        let outcome = submitter.submit_complete("user-1", &form, None).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.completed_steps, vec![0, 1]);
        assert_eq!(store.count("pic-records"), 0);
    }

    #[tokio::test]
    async fn step_submission_creates_parent_then_reuses_it() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);
        let form = complete_form();

        let first = submitter
            .submit_step("user-1", None, &form.slice(ProfileStep::Platforms).unwrap())
            .await
            .unwrap();
        assert!(first.success);
        assert_eq!(store.count("parents"), 1);

        let second = submitter
            .submit_step(
                "user-1",
                Some(first.profile_id.clone()),
                &form.slice(ProfileStep::BasicInfo).unwrap(),
            )
            .await
            .unwrap();
        assert!(second.success);
        assert_eq!(second.profile_id, first.profile_id);
        assert_eq!(store.count("parents"), 1);

        let parent = &store.documents("parents")[0];
        assert_eq!(parent.data["completedSteps"], serde_json::json!([0, 1]));
        assert_eq!(parent.data["currentStep"], 1);
    }

    #[tokio::test]
    async fn step_submission_with_unknown_profile_is_not_found() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);
        let form = complete_form();

        let err = submitter
            .submit_step(
                "user-1",
                Some("missing".into()),
                &form.slice(ProfileStep::BasicInfo).unwrap(),
            )
            .await
            .unwrap_err();
        assert_matches::assert_matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: "Profile", .. })
        );
    }

    #[tokio::test]
    async fn final_step_submission_completes_profile() {
        let store = MemoryStore::new();
        let config = test_config();
        let submitter = Submitter::new(&store, &store, &config);
        let form = complete_form();

        let mut profile_id: Option<DocId> = None;
        for step in ProfileStep::all() {
            let data = form.slice(step).unwrap();
            let result = submitter
                .submit_step("user-1", profile_id.clone(), &data)
                .await
                .unwrap();
            assert!(result.success);
            profile_id = Some(result.profile_id);
        }

        let parent = &store.documents("parents")[0];
        assert_eq!(parent.data["profileStatus"], "completed");
        assert_eq!(
            parent.data["completedSteps"],
            serde_json::json!([0, 1, 2, 3, 4, 5, 6])
        );
    }
}
