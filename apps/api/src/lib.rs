//! Placement readiness service: turns a job description into a structured
//! preparation profile and keeps a history of past analyses.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod history;
pub mod routes;
pub mod state;
