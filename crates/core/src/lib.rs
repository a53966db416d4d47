//! Domain core for the Gigfolio marketplace backend.
//!
//! Pure types and rules: step payloads and their validation, the wizard
//! state machine, onboarding and report models, and derived-field
//! computation. No IO lives here; persistence is the store crate's job.

pub mod account;
pub mod catalog;
pub mod error;
pub mod onboarding;
pub mod profile;
pub mod report;
pub mod types;
pub mod validation;
pub mod wizard;
