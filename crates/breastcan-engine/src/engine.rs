use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span};

use breastcan_model::ClinicalSnapshot;
use breastcan_standards::MutationTherapyTable;

use crate::compose::{Recommendation, compose};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::normalize::{normalize, validate_mutations};
use crate::rules::evaluate_rules;

/// Snapshot in, recommendation out.
///
/// Holds only read-only state, so one engine can serve any number of
/// concurrent evaluations.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    table: Arc<MutationTherapyTable>,
    config: EngineConfig,
}

impl Default for RecommendationEngine {
    /// Built-in mutation table and default thresholds.
    fn default() -> Self {
        Self::new(MutationTherapyTable::builtin(), EngineConfig::default())
    }
}

impl RecommendationEngine {
    pub fn new(table: Arc<MutationTherapyTable>, config: EngineConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &MutationTherapyTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a snapshot-shaped mapping without evaluating it.
    pub fn normalize(&self, raw: &Value) -> Result<ClinicalSnapshot> {
        normalize(raw, &self.table)
    }

    /// Normalize `raw` and evaluate it.
    pub fn evaluate(&self, raw: &Value) -> Result<Recommendation> {
        let snapshot = self.normalize(raw)?;
        self.evaluate_snapshot(&snapshot)
    }

    /// Evaluate an already-built snapshot.
    ///
    /// The snapshot's mutations are re-checked against this engine's table,
    /// since a snapshot built by hand never went through the normalizer.
    pub fn evaluate_snapshot(&self, snapshot: &ClinicalSnapshot) -> Result<Recommendation> {
        let span = info_span!("evaluate", stage = %snapshot.stage);
        let _guard = span.enter();

        validate_mutations(snapshot.mutations.iter().map(String::as_str), &self.table)?;
        let lines = evaluate_rules(snapshot, &self.table, &self.config);
        let recommendation = compose(lines)?;
        info!(
            lines = recommendation.lines().len(),
            categories = recommendation.categories().len(),
            "recommendation composed"
        );
        Ok(recommendation)
    }
}

/// Evaluate with the built-in mutation table and default thresholds.
pub fn evaluate(raw: &Value) -> Result<Recommendation> {
    RecommendationEngine::default().evaluate(raw)
}
