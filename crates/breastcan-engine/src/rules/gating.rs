use breastcan_model::{Category, RecommendationLine};

use super::RuleContext;

/// Fitness gate: poor performance status or advanced age.
///
/// Adds a general note naming the systemic sections it applies to; the lines
/// themselves are left untouched.
pub(super) fn note(
    ctx: &RuleContext<'_>,
    lines: &[RecommendationLine],
) -> Option<RecommendationLine> {
    let patient = &ctx.snapshot.patient_context;
    let config = ctx.config;

    let mut reasons = Vec::new();
    if patient.performance_status.value() >= config.poor_performance_status {
        reasons.push(format!(
            "ECOG performance status {} (threshold {})",
            patient.performance_status, config.poor_performance_status
        ));
    }
    if patient.age > config.frailty_age {
        reasons.push(format!(
            "age {} exceeds {}",
            patient.age, config.frailty_age
        ));
    }
    if reasons.is_empty() {
        return None;
    }

    let mut affected: Vec<Category> = lines
        .iter()
        .filter(|line| line.category.is_systemic() && line.recommends_therapy())
        .map(|line| line.category)
        .collect();
    affected.dedup();

    let text = if affected.is_empty() {
        "Reduced fitness: consider best supportive care; no systemic therapy line is currently \
         recommended."
            .to_string()
    } else {
        let sections: Vec<&str> = affected.iter().map(Category::heading).collect();
        format!(
            "Reduced fitness: consider dose modification or best supportive care for {}.",
            sections.join(", ")
        )
    };
    Some(
        RecommendationLine::contraindication(Category::GeneralNotes, text)
            .with_rationale(format!("{}.", capitalize(&reasons.join("; ")))),
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
