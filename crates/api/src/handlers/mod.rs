pub mod auth;
pub mod catalog;
pub mod onboarding;
pub mod profiles;
pub mod reports;
