use tracing::warn;

use breastcan_model::{Category, RecommendationLine};
use breastcan_standards::MutationTherapy;

use super::RuleContext;

/// One line per selected mutation, in snapshot order.
pub(super) fn lines(ctx: &RuleContext<'_>) -> Vec<RecommendationLine> {
    let mut lines = Vec::with_capacity(ctx.snapshot.mutations.len());
    for mutation in &ctx.snapshot.mutations {
        let Some(entry) = ctx.table.get(mutation) else {
            warn!(mutation = %mutation, "mutation missing from therapy table");
            continue;
        };
        lines.push(line_for(ctx, entry));
    }
    lines
}

fn line_for(ctx: &RuleContext<'_>, entry: &MutationTherapy) -> RecommendationLine {
    let snapshot = ctx.snapshot;
    let preferred = &entry.preferred_therapy;

    if !snapshot.has_prior_therapy(preferred) {
        let line = RecommendationLine::targeted(
            Category::MutationTargeted,
            format!("{} mutation: {preferred}.", entry.mutation),
        );
        return with_notes(line, None, &entry.eligibility_notes);
    }

    let fallback = entry
        .fallback_therapies
        .iter()
        .find(|therapy| !snapshot.has_prior_therapy(therapy));
    match fallback {
        Some(fallback) => {
            let line = RecommendationLine::targeted(
                Category::MutationTargeted,
                format!("{} mutation: {fallback}.", entry.mutation),
            );
            let prior = format!(
                "{preferred} was already administered (prior use); {fallback} is the next option."
            );
            with_notes(line, Some(prior), &entry.eligibility_notes)
        }
        None => {
            let prior = if entry.fallback_therapies.is_empty() {
                format!("{preferred} was already administered and no fallback is defined.")
            } else {
                format!(
                    "{preferred} and every fallback ({}) were already administered.",
                    entry.fallback_therapies.join(", ")
                )
            };
            RecommendationLine::contraindication(
                Category::MutationTargeted,
                format!(
                    "{} mutation: no further mutation-directed option is available.",
                    entry.mutation
                ),
            )
            .with_rationale(prior)
        }
    }
}

fn with_notes(line: RecommendationLine, prior: Option<String>, notes: &str) -> RecommendationLine {
    let rationale = match (prior, notes.is_empty()) {
        (Some(prior), false) => format!("{prior} {notes}"),
        (Some(prior), true) => prior,
        (None, false) => notes.to_string(),
        (None, true) => return line,
    };
    line.with_rationale(rationale)
}
