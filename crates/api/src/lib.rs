//! Gigfolio API server library.
//!
//! Exposes the building blocks (config, state, error handling, session
//! management, routes, the submission orchestrator) so integration tests
//! and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod submission;
