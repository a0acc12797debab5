//! Persisted analysis history: canonical schema, normalizer, store and repository.

pub mod handlers;
pub mod normalize;
pub mod repair;
pub mod repository;
pub mod schema;
pub mod store;
