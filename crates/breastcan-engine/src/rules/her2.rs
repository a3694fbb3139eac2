use breastcan_model::{Category, RecommendationLine};

use super::{RuleContext, receptor_profile};

pub(super) fn candidates(ctx: &RuleContext<'_>) -> Vec<RecommendationLine> {
    let snapshot = ctx.snapshot;
    if !snapshot.receptor_status.her2_positive() {
        return Vec::new();
    }
    let profile = receptor_profile(&snapshot.receptor_status);

    let mut candidates = vec![
        RecommendationLine::targeted(
            Category::Her2Targeted,
            "Trastuzumab plus pertuzumab combined with a chemotherapy backbone; complete one \
             year of HER2-directed therapy.",
        )
        .with_rationale(format!("HER2-positive disease ({profile}).")),
    ];
    // Trastuzumab causes oligohydramnios.
    if snapshot.patient_context.pregnant {
        candidates.push(
            RecommendationLine::contraindication(
                Category::Her2Targeted,
                "HER2-directed antibodies (trastuzumab, pertuzumab) are contraindicated during \
                 pregnancy; start them after delivery.",
            )
            .with_rationale(format!(
                "HER2-positive disease ({profile}) in a pregnant patient."
            )),
        );
    }
    candidates
}
