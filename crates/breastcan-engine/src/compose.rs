//! Recommendation composer.
//!
//! Orders lines by the fixed category sequence and renders them as
//! newline-delimited text:
//!
//! ```text
//! Surgery:
//! - Surgery indicated: breast-conserving surgery with ...
//!   Rationale: Stage I, 1.5 cm tumor, N0.
//! Endocrine Therapy:
//! - Note: Endocrine therapy (tamoxifen or aromatase inhibitors) is contraindicated ...
//! ```

use std::fmt;

use serde::Serialize;
use tracing::error;

use breastcan_model::{Category, RecommendationLine};

use crate::error::{EngineError, Result};

/// The engine's output. Built once per evaluation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    lines: Vec<RecommendationLine>,
    text: String,
}

impl Recommendation {
    /// Lines in report order.
    pub fn lines(&self) -> &[RecommendationLine] {
        &self.lines
    }

    pub fn lines_for(&self, category: Category) -> impl Iterator<Item = &RecommendationLine> {
        self.lines
            .iter()
            .filter(move |line| line.category == category)
    }

    /// Categories that contributed at least one line, in report order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.lines.iter().map(|line| line.category).collect();
        categories.dedup();
        categories
    }

    /// The rendered report text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Group `lines` by category and render the report.
///
/// Order within a category is the evaluation order. Fails with
/// [`EngineError::EmptyRecommendation`] when there is nothing to report.
pub fn compose(mut lines: Vec<RecommendationLine>) -> Result<Recommendation> {
    if lines.is_empty() {
        error!("rule evaluation produced no lines; the rule table has a gap");
        return Err(EngineError::EmptyRecommendation);
    }
    // Stable sort keeps evaluation order inside each category.
    lines.sort_by_key(|line| line.category.sort_order());
    let text = render(&lines);
    Ok(Recommendation { lines, text })
}

fn render(lines: &[RecommendationLine]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len() * 3);
    let mut current: Option<Category> = None;
    for line in lines {
        if current != Some(line.category) {
            out.push(format!("{}:", line.category.heading()));
            current = Some(line.category);
        }
        if line.is_contraindication() {
            out.push(format!("- Note: {}", line.text));
        } else {
            out.push(format!("- {}", line.text));
        }
        if let Some(rationale) = &line.rationale {
            out.push(format!("  Rationale: {rationale}"));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_set_fails() {
        assert_eq!(compose(Vec::new()), Err(EngineError::EmptyRecommendation));
    }

    #[test]
    fn groups_in_fixed_category_order() {
        let recommendation = compose(vec![
            RecommendationLine::standard(Category::Chemotherapy, "chemo"),
            RecommendationLine::targeted(Category::MutationTargeted, "first mutation"),
            RecommendationLine::standard(Category::Surgery, "surgery"),
            RecommendationLine::targeted(Category::MutationTargeted, "second mutation"),
        ])
        .unwrap();

        assert_eq!(
            recommendation.categories(),
            vec![
                Category::Surgery,
                Category::Chemotherapy,
                Category::MutationTargeted
            ]
        );
        assert_eq!(
            recommendation.text(),
            "Surgery:\n- surgery\nChemotherapy:\n- chemo\nMutation-Targeted Therapy:\n\
             - first mutation\n- second mutation"
        );
    }

    #[test]
    fn renders_notes_and_rationale() {
        let recommendation = compose(vec![
            RecommendationLine::contraindication(Category::Endocrine, "Deferred.")
                .with_rationale("Pregnant."),
        ])
        .unwrap();

        insta::assert_snapshot!(recommendation.text(), @r"
        Endocrine Therapy:
        - Note: Deferred.
          Rationale: Pregnant.
        ");
    }

    #[test]
    fn lines_for_filters_category() {
        let recommendation = compose(vec![
            RecommendationLine::standard(Category::Surgery, "surgery"),
            RecommendationLine::standard(Category::Chemotherapy, "chemo"),
        ])
        .unwrap();
        let chemo: Vec<_> = recommendation.lines_for(Category::Chemotherapy).collect();
        assert_eq!(chemo.len(), 1);
        assert_eq!(chemo[0].text, "chemo");
        assert_eq!(recommendation.to_string(), recommendation.text());
    }
}
