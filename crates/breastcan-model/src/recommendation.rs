//! Recommendation lines: the atomic output of the rule evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Report section a recommendation line belongs to.
///
/// The declaration order is the rendering order of the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Surgery,
    Endocrine,
    Her2Targeted,
    Chemotherapy,
    MutationTargeted,
    GeneralNotes,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 6] = [
        Category::Surgery,
        Category::Endocrine,
        Category::Her2Targeted,
        Category::Chemotherapy,
        Category::MutationTargeted,
        Category::GeneralNotes,
    ];

    /// Stable machine-readable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Surgery => "surgery",
            Category::Endocrine => "systemic-endocrine",
            Category::Her2Targeted => "systemic-HER2",
            Category::Chemotherapy => "systemic-chemo",
            Category::MutationTargeted => "targeted-mutation",
            Category::GeneralNotes => "general-notes",
        }
    }

    /// Section heading used in the rendered report.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Surgery => "Surgery",
            Category::Endocrine => "Endocrine Therapy",
            Category::Her2Targeted => "HER2-Targeted Therapy",
            Category::Chemotherapy => "Chemotherapy",
            Category::MutationTargeted => "Mutation-Targeted Therapy",
            Category::GeneralNotes => "General Notes",
        }
    }

    pub fn sort_order(&self) -> u8 {
        match self {
            Category::Surgery => 1,
            Category::Endocrine => 2,
            Category::Her2Targeted => 3,
            Category::Chemotherapy => 4,
            Category::MutationTargeted => 5,
            Category::GeneralNotes => 6,
        }
    }

    /// Drug-therapy sections.
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            Category::Endocrine
                | Category::Her2Targeted
                | Category::Chemotherapy
                | Category::MutationTargeted
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision class of a line; higher wins when a category has competing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinePriority {
    Standard,
    Targeted,
    #[serde(rename = "contraindication-note")]
    Contraindication,
}

impl LinePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinePriority::Standard => "standard",
            LinePriority::Targeted => "targeted",
            LinePriority::Contraindication => "contraindication-note",
        }
    }
}

impl fmt::Display for LinePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLine {
    pub category: Category,
    pub priority: LinePriority,
    pub text: String,
    /// Why the rule chose this line (prior use, eligibility, thresholds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Set on lines that advise against or postpone therapy in their category.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub advisory: bool,
}

impl RecommendationLine {
    pub fn new(category: Category, priority: LinePriority, text: impl Into<String>) -> Self {
        Self {
            category,
            priority,
            text: text.into(),
            rationale: None,
            advisory: false,
        }
    }

    pub fn standard(category: Category, text: impl Into<String>) -> Self {
        Self::new(category, LinePriority::Standard, text)
    }

    pub fn targeted(category: Category, text: impl Into<String>) -> Self {
        Self::new(category, LinePriority::Targeted, text)
    }

    pub fn contraindication(category: Category, text: impl Into<String>) -> Self {
        Self::new(category, LinePriority::Contraindication, text)
    }

    #[must_use]
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    #[must_use]
    pub fn advisory(mut self) -> Self {
        self.advisory = true;
        self
    }

    pub fn is_contraindication(&self) -> bool {
        self.priority == LinePriority::Contraindication
    }

    /// True when the line prescribes a treatment.
    pub fn recommends_therapy(&self) -> bool {
        !self.advisory && !self.is_contraindication()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_declaration() {
        let mut sorted = Category::ALL;
        sorted.sort_by_key(Category::sort_order);
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Surgery < Category::GeneralNotes);
    }

    #[test]
    fn priority_precedence() {
        assert!(LinePriority::Contraindication > LinePriority::Targeted);
        assert!(LinePriority::Targeted > LinePriority::Standard);
    }

    #[test]
    fn advisory_lines_prescribe_nothing() {
        let line = RecommendationLine::standard(Category::Chemotherapy, "Likely unnecessary.");
        assert!(line.recommends_therapy());
        assert!(!line.advisory().recommends_therapy());
        assert!(
            !RecommendationLine::contraindication(Category::Endocrine, "Deferred.")
                .recommends_therapy()
        );
    }

    #[test]
    fn systemic_categories() {
        assert!(!Category::Surgery.is_systemic());
        assert!(Category::Chemotherapy.is_systemic());
        assert!(!Category::GeneralNotes.is_systemic());
    }
}
