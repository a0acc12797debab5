use std::sync::Arc;

use crate::analysis::heuristics::Heuristics;
use crate::config::Config;
use crate::history::repository::HistoryRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub history: HistoryRepository,
    /// Compiled once at startup; read-only afterwards.
    pub heuristics: Arc<Heuristics>,
    pub config: Config,
}
