//! Rule evaluator.
//!
//! Each clinical rule looks at the snapshot independently and proposes
//! candidate lines for its own category; no rule can block another. Where a
//! category receives competing candidates (a pregnant HER2-positive patient,
//! for instance) exactly one survives, chosen by precedence
//! contraindication > targeted > standard. The mutation rule is the exception:
//! it contributes one line per selected mutation. The performance-status gate
//! runs last because it annotates the systemic lines produced before it.

mod chemotherapy;
mod endocrine;
mod gating;
mod her2;
mod mutation;
mod surgery;

use tracing::debug;

use breastcan_model::{Category, ClinicalSnapshot, ReceptorStatus, RecommendationLine};
use breastcan_standards::MutationTherapyTable;

use crate::config::EngineConfig;

/// Inputs shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub snapshot: &'a ClinicalSnapshot,
    pub table: &'a MutationTherapyTable,
    pub config: &'a EngineConfig,
}

/// Run every rule and return the surviving lines in evaluation order.
///
/// The snapshot's mutations must already have been checked against `table`.
pub fn evaluate_rules(
    snapshot: &ClinicalSnapshot,
    table: &MutationTherapyTable,
    config: &EngineConfig,
) -> Vec<RecommendationLine> {
    let ctx = RuleContext {
        snapshot,
        table,
        config,
    };

    let per_category = [
        (Category::Surgery, surgery::candidates(&ctx)),
        (Category::Endocrine, endocrine::candidates(&ctx)),
        (Category::Her2Targeted, her2::candidates(&ctx)),
        (Category::Chemotherapy, chemotherapy::candidates(&ctx)),
    ];

    let mut lines = Vec::new();
    for (category, candidates) in per_category {
        let considered = candidates.len();
        match select_by_precedence(candidates) {
            Some(line) => {
                debug!(
                    category = %category,
                    priority = %line.priority,
                    considered,
                    "rule contributed a line"
                );
                lines.push(line);
            }
            None => debug!(category = %category, "rule abstained"),
        }
    }

    let mutation_lines = mutation::lines(&ctx);
    debug!(
        category = %Category::MutationTargeted,
        count = mutation_lines.len(),
        "mutation rule evaluated"
    );
    lines.extend(mutation_lines);

    if let Some(note) = gating::note(&ctx, &lines) {
        debug!(category = %Category::GeneralNotes, "fitness gate fired");
        lines.push(note);
    }

    lines
}

/// Keep the highest-priority candidate; the earliest wins a tie.
pub fn select_by_precedence(
    candidates: impl IntoIterator<Item = RecommendationLine>,
) -> Option<RecommendationLine> {
    let mut best: Option<RecommendationLine> = None;
    for candidate in candidates {
        match &best {
            Some(current) if current.priority >= candidate.priority => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Compact receptor profile, e.g. `ER+/PR-/HER2-`.
pub(crate) fn receptor_profile(status: &ReceptorStatus) -> String {
    let sign = |positive: bool| if positive { '+' } else { '-' };
    format!(
        "ER{}/PR{}/HER2{}",
        sign(status.er.is_positive()),
        sign(status.pr.is_positive()),
        sign(status.her2.is_positive())
    )
}

/// Size in centimetres with one decimal, or more when one would round.
pub(crate) fn centimetres(value: f64) -> String {
    let short = format!("{value:.1}");
    if short.parse::<f64>() == Ok(value) {
        short
    } else {
        value.to_string()
    }
}
