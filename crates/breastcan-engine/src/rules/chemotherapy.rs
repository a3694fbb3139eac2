//! Chemotherapy and the genomic-score gate.
//!
//! The recurrence score is consulted only for HR+/HER2- disease. HER2-positive
//! and triple-negative disease get chemotherapy outright.

use breastcan_model::{Category, Ki67, RecommendationLine, TumorCharacteristics, TumorGrade};

use super::{RuleContext, centimetres, receptor_profile};

pub(super) fn candidates(ctx: &RuleContext<'_>) -> Vec<RecommendationLine> {
    let snapshot = ctx.snapshot;
    let receptors = &snapshot.receptor_status;
    let profile = receptor_profile(receptors);

    if receptors.her2_positive() {
        let line = if snapshot.patient_context.pregnant {
            RecommendationLine::standard(
                Category::Chemotherapy,
                "Chemotherapy recommended: taxane-based backbone (e.g. paclitaxel, or docetaxel \
                 with carboplatin); HER2-directed therapy is deferred until after delivery.",
            )
            .with_rationale(format!(
                "HER2-positive disease ({profile}) in a pregnant patient; genomic score not \
                 consulted."
            ))
        } else {
            RecommendationLine::standard(
                Category::Chemotherapy,
                "Chemotherapy recommended: taxane-based backbone (e.g. paclitaxel, or docetaxel \
                 with carboplatin) given together with HER2-directed therapy.",
            )
            .with_rationale(format!(
                "HER2-positive disease ({profile}); genomic score not consulted."
            ))
        };
        return vec![line];
    }

    if receptors.triple_negative() {
        return vec![
            RecommendationLine::standard(
                Category::Chemotherapy,
                "Chemotherapy recommended as the primary systemic option: anthracycline- and \
                 taxane-based regimen. Immunotherapy note: pembrolizumab may be added for stage \
                 II-III disease or PD-L1-positive metastatic disease.",
            )
            .with_rationale(format!(
                "Triple-negative disease ({profile}); genomic score not consulted."
            )),
        ];
    }

    let threshold = ctx.config.genomic_low_risk_threshold;
    let line = match snapshot.genomic_score {
        Some(score) if score < threshold => RecommendationLine::standard(
            Category::Chemotherapy,
            "Chemotherapy likely unnecessary: endocrine therapy alone is expected to suffice.",
        )
        .advisory()
        .with_rationale(format!(
            "Oncotype DX score {score} is below the low-risk threshold of {threshold}."
        )),
        Some(score) => RecommendationLine::standard(
            Category::Chemotherapy,
            "Chemotherapy recommended in addition to endocrine therapy.",
        )
        .with_rationale(format!(
            "Oncotype DX score {score} is at or above the threshold of {threshold}."
        )),
        None => {
            let features =
                high_risk_features(&snapshot.tumor, ctx.config.breast_conserving_max_size_cm);
            if features.is_empty() {
                RecommendationLine::standard(
                    Category::Chemotherapy,
                    "Genomic testing (Oncotype DX) recommended before deciding on chemotherapy.",
                )
                .advisory()
                .with_rationale("No genomic score available and no high-risk clinical features.")
            } else {
                RecommendationLine::standard(
                    Category::Chemotherapy,
                    "Chemotherapy recommended in addition to endocrine therapy.",
                )
                .with_rationale(format!(
                    "No genomic score available; high-risk clinical features: {}.",
                    features.join(", ")
                ))
            }
        }
    };
    vec![line]
}

/// Clinical features that argue for chemotherapy when no genomic score exists.
fn high_risk_features(tumor: &TumorCharacteristics, large_tumor_cm: f64) -> Vec<String> {
    let mut features = Vec::new();
    if tumor.node_status.is_node_positive() {
        features.push("node-positive".to_string());
    }
    if tumor.grade == TumorGrade::Grade3 {
        features.push("grade 3".to_string());
    }
    if tumor.ki67 == Ki67::High {
        features.push("high Ki-67".to_string());
    }
    if tumor.lvi {
        features.push("lymphovascular invasion".to_string());
    }
    if tumor.size_cm > large_tumor_cm {
        features.push(format!("tumor larger than {} cm", centimetres(large_tumor_cm)));
    }
    features
}
