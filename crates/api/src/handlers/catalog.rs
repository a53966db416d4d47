//! Static catalogs the wizard UI renders its pickers from.

use axum::Json;
use serde::Serialize;

use gigfolio_core::catalog;

use crate::response::DataResponse;

/// Every selectable tag set, bundled into one response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub platforms: &'static [&'static str],
    pub content_types: &'static [&'static str],
    pub language_proficiencies: &'static [&'static str],
    pub education_levels: &'static [&'static str],
    pub max_languages: usize,
    pub max_additional_skills: usize,
}

/// GET /catalog -- selection catalogs and client-side caps.
pub async fn get_catalog() -> Json<DataResponse<Catalog>> {
    Json(DataResponse {
        data: Catalog {
            platforms: catalog::PLATFORMS,
            content_types: catalog::CONTENT_TYPES,
            language_proficiencies: catalog::LANGUAGE_PROFICIENCIES,
            education_levels: catalog::EDUCATION_LEVELS,
            max_languages: catalog::MAX_LANGUAGES,
            max_additional_skills: catalog::MAX_ADDITIONAL_SKILLS,
        },
    })
}
