use breastcan_model::{Category, NodeStatus, RecommendationLine};

use super::{RuleContext, centimetres};

pub(super) fn candidates(ctx: &RuleContext<'_>) -> Vec<RecommendationLine> {
    let snapshot = ctx.snapshot;
    let tumor = &snapshot.tumor;
    let presentation = format!(
        "Stage {}, {} cm tumor, {}.",
        snapshot.stage,
        centimetres(tumor.size_cm),
        tumor.node_status
    );

    if !snapshot.surgery_possible {
        return vec![
            RecommendationLine::contraindication(
                Category::Surgery,
                "Surgery is not currently feasible: start neoadjuvant systemic therapy first \
                 and re-evaluate resectability after response assessment.",
            )
            .with_rationale(presentation),
        ];
    }

    if snapshot.stage.is_metastatic() {
        return vec![
            RecommendationLine::standard(
                Category::Surgery,
                "Surgery is not routinely indicated for stage IV disease; reserve local surgery \
                 for symptom control while systemic therapy remains the backbone of treatment.",
            )
            .with_rationale(presentation),
        ];
    }

    let within_size = tumor.size_cm <= ctx.config.breast_conserving_max_size_cm;
    let line = if snapshot.stage.is_early() && within_size {
        let axilla = match tumor.node_status {
            NodeStatus::N0 => "sentinel lymph node biopsy",
            NodeStatus::N1 => "axillary lymph node staging",
        };
        RecommendationLine::standard(
            Category::Surgery,
            format!(
                "Surgery indicated: breast-conserving surgery with {axilla}, followed by \
                 whole-breast radiotherapy."
            ),
        )
        .with_rationale(presentation)
    } else {
        let rationale = if within_size {
            presentation
        } else {
            format!(
                "{presentation} Tumor exceeds {} cm.",
                centimetres(ctx.config.breast_conserving_max_size_cm)
            )
        };
        RecommendationLine::standard(
            Category::Surgery,
            "Surgery indicated: consider mastectomy with axillary lymph node management; \
             discuss post-mastectomy radiotherapy.",
        )
        .with_rationale(rationale)
    };
    vec![line]
}
