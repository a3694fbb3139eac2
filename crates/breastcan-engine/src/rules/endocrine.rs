use breastcan_model::{Category, MenopausalStatus, RecommendationLine};

use super::{RuleContext, receptor_profile};

/// Endocrine therapy for hormone-receptor-positive disease.
pub(super) fn candidates(ctx: &RuleContext<'_>) -> Vec<RecommendationLine> {
    let snapshot = ctx.snapshot;
    if !snapshot.receptor_status.hormone_receptor_positive() {
        return Vec::new();
    }
    let profile = receptor_profile(&snapshot.receptor_status);
    let patient = &snapshot.patient_context;

    let standard = match patient.menopausal_status {
        MenopausalStatus::Premenopausal => RecommendationLine::standard(
            Category::Endocrine,
            "Tamoxifen 20 mg daily for 5-10 years; consider ovarian function suppression for \
             higher-risk disease.",
        ),
        MenopausalStatus::Postmenopausal => RecommendationLine::standard(
            Category::Endocrine,
            "Aromatase inhibitor (letrozole, anastrozole or exemestane) for 5-10 years.",
        ),
    }
    .with_rationale(format!(
        "Hormone-receptor-positive disease ({profile}), {}.",
        patient.menopausal_status
    ));

    let mut candidates = vec![standard];
    if patient.pregnant {
        candidates.push(
            RecommendationLine::contraindication(
                Category::Endocrine,
                "Endocrine therapy (tamoxifen or aromatase inhibitors) is contraindicated during \
                 pregnancy; defer it until after delivery.",
            )
            .with_rationale(format!(
                "Hormone-receptor-positive disease ({profile}) in a pregnant patient."
            )),
        );
    }
    candidates
}
