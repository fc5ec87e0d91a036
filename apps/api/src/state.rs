use std::sync::Arc;

use crate::config::Config;
use crate::relevance::extractor::SkillExtractor;
use crate::relevance::scorer::RelevanceScorer;
use crate::storage::{EvaluationStore, JdStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable JD store. In-memory unless DATABASE_URL is set.
    pub store: Arc<dyn JdStore>,
    pub evaluations: Arc<dyn EvaluationStore>,
    pub extractor: SkillExtractor,
    pub scorer: Arc<RelevanceScorer>,
    pub config: Config,
}

impl AppState {
    /// Builds the extractor and scorer from config; one verdict scale for the whole process.
    pub fn new(
        config: Config,
        store: Arc<dyn JdStore>,
        evaluations: Arc<dyn EvaluationStore>,
    ) -> Self {
        let extractor = SkillExtractor::new(config.extraction_mode);
        let scorer = RelevanceScorer::new(
            config.match_threshold,
            config.weights.clone(),
            config.verdict_scale,
        );

        Self {
            store,
            evaluations,
            extractor,
            scorer: Arc::new(scorer),
            config,
        }
    }
}
