use std::sync::Arc;

use crate::matching::scorer::Scorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Remote scorer. Production: `GeminiScorer`.
    pub scorer: Arc<dyn Scorer>,
}
