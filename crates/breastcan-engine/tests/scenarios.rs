//! End-to-end scenarios through the public `evaluate` entry point.

use std::sync::Arc;
use std::thread;

use serde_json::{Value, json};

use breastcan_engine::{EngineConfig, EngineError, RecommendationEngine, evaluate};
use breastcan_model::{Category, LinePriority};
use breastcan_standards::{MutationTherapy, MutationTherapyTable};

fn snapshot(
    receptors: (&str, &str, &str),
    stage: &str,
    genomic_score: Value,
    menopausal_status: &str,
) -> Value {
    json!({
        "receptor_status": {"ER": receptors.0, "PR": receptors.1, "HER2": receptors.2},
        "tumor": {"size_cm": 1.5, "grade": 1, "node_status": "N0", "ki67": "low", "lvi": false},
        "stage": stage,
        "surgery_possible": true,
        "genomic_score": genomic_score,
        "patient_context": {
            "age": 62, "pregnant": false, "performance_status": 0,
            "menopausal_status": menopausal_status
        },
        "mutations": [],
        "prior_therapies": []
    })
}

#[test]
fn scenario_a_low_genomic_score_postmenopausal() {
    let raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(10),
        "postmenopausal",
    );

    let recommendation = evaluate(&raw).expect("valid snapshot");

    insta::assert_snapshot!(recommendation.text(), @r"
    Surgery:
    - Surgery indicated: breast-conserving surgery with sentinel lymph node biopsy, followed by whole-breast radiotherapy.
      Rationale: Stage I, 1.5 cm tumor, N0.
    Endocrine Therapy:
    - Aromatase inhibitor (letrozole, anastrozole or exemestane) for 5-10 years.
      Rationale: Hormone-receptor-positive disease (ER+/PR+/HER2-), postmenopausal.
    Chemotherapy:
    - Chemotherapy likely unnecessary: endocrine therapy alone is expected to suffice.
      Rationale: Oncotype DX score 10 is below the low-risk threshold of 26.
    ");
    assert_eq!(recommendation.lines_for(Category::Her2Targeted).count(), 0);
}

#[test]
fn scenario_b_her2_positive_stage_three() {
    let raw = snapshot(
        ("negative", "negative", "positive"),
        "III",
        Value::Null,
        "premenopausal",
    );

    let recommendation = evaluate(&raw).expect("valid snapshot");

    let her2: Vec<_> = recommendation.lines_for(Category::Her2Targeted).collect();
    assert_eq!(her2.len(), 1);
    assert_eq!(her2[0].priority, LinePriority::Targeted);
    let chemo: Vec<_> = recommendation.lines_for(Category::Chemotherapy).collect();
    assert_eq!(chemo.len(), 1);
    assert!(chemo[0].text.contains("HER2-directed therapy"));
    let surgery: Vec<_> = recommendation.lines_for(Category::Surgery).collect();
    assert_eq!(surgery.len(), 1);
    assert!(surgery[0].text.starts_with("Surgery indicated"));
    assert!(surgery[0].text.contains("mastectomy"));
    assert_eq!(recommendation.lines_for(Category::Endocrine).count(), 0);
}

#[test]
fn scenario_c_mutation_fallback_after_prior_use() {
    let mut raw = snapshot(
        ("positive", "negative", "negative"),
        "II",
        json!(30),
        "postmenopausal",
    );
    raw["mutations"] = json!(["PIK3CA"]);
    raw["prior_therapies"] = json!(["Alpelisib"]);

    let recommendation = evaluate(&raw).expect("valid snapshot");

    let lines: Vec<_> = recommendation
        .lines_for(Category::MutationTargeted)
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "PIK3CA mutation: Capivasertib.");
    let rationale = lines[0].rationale.as_deref().expect("rationale");
    assert!(rationale.contains("Alpelisib"));
    assert!(rationale.contains("prior use"));
    assert!(
        recommendation
            .text()
            .contains("- PIK3CA mutation: Capivasertib.\n  Rationale: Alpelisib was already")
    );
}

#[test]
fn pregnant_patient_report() {
    let mut raw = snapshot(
        ("positive", "negative", "positive"),
        "II",
        Value::Null,
        "premenopausal",
    );
    raw["patient_context"]["pregnant"] = json!(true);
    raw["surgery_possible"] = json!(false);

    let recommendation = evaluate(&raw).expect("valid snapshot");

    insta::assert_snapshot!(recommendation.text(), @r"
    Surgery:
    - Note: Surgery is not currently feasible: start neoadjuvant systemic therapy first and re-evaluate resectability after response assessment.
      Rationale: Stage II, 1.5 cm tumor, N0.
    Endocrine Therapy:
    - Note: Endocrine therapy (tamoxifen or aromatase inhibitors) is contraindicated during pregnancy; defer it until after delivery.
      Rationale: Hormone-receptor-positive disease (ER+/PR-/HER2+) in a pregnant patient.
    HER2-Targeted Therapy:
    - Note: HER2-directed antibodies (trastuzumab, pertuzumab) are contraindicated during pregnancy; start them after delivery.
      Rationale: HER2-positive disease (ER+/PR-/HER2+) in a pregnant patient.
    Chemotherapy:
    - Chemotherapy recommended: taxane-based backbone (e.g. paclitaxel, or docetaxel with carboplatin); HER2-directed therapy is deferred until after delivery.
      Rationale: HER2-positive disease (ER+/PR-/HER2+) in a pregnant patient; genomic score not consulted.
    ");
}

#[test]
fn elderly_patient_with_spared_chemotherapy() {
    let mut raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(10),
        "postmenopausal",
    );
    raw["patient_context"]["age"] = json!(80);

    let recommendation = evaluate(&raw).expect("valid snapshot");

    let note = recommendation
        .lines_for(Category::GeneralNotes)
        .next()
        .expect("fitness note");
    assert_eq!(
        note.text,
        "Reduced fitness: consider dose modification or best supportive care for Endocrine \
         Therapy."
    );
    assert_eq!(note.rationale.as_deref(), Some("Age 80 exceeds 75."));
    assert!(recommendation.text().contains("Chemotherapy likely unnecessary"));
}

#[test]
fn validation_failure_names_field() {
    let mut raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(10),
        "postmenopausal",
    );
    raw["patient_context"]["menopausal_status"] = json!("perimenopausal");

    let err = evaluate(&raw).unwrap_err();

    assert_eq!(err.field(), Some("patient_context.menopausal_status"));
    assert!(err.to_string().contains("perimenopausal"));
}

#[test]
fn unknown_mutation_is_not_skipped() {
    let mut raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(10),
        "postmenopausal",
    );
    raw["mutations"] = json!(["TP53"]);

    let err = evaluate(&raw).unwrap_err();

    assert!(matches!(err, EngineError::UnknownMutation { ref mutation, .. } if mutation == "TP53"));
}

#[test]
fn hand_built_snapshot_is_checked_against_table() {
    let engine = RecommendationEngine::default();
    let raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(10),
        "postmenopausal",
    );
    let mut snapshot = engine.normalize(&raw).unwrap();
    snapshot.mutations = vec!["NOT-A-GENE".to_string()];

    let err = engine.evaluate_snapshot(&snapshot).unwrap_err();

    assert!(matches!(err, EngineError::UnknownMutation { .. }));
}

#[test]
fn custom_table_and_config() {
    let table = MutationTherapyTable::from_entries(
        vec![MutationTherapy::new("ESR1", "Camizestrant").with_fallbacks(&["Elacestrant"])],
        "custom",
    )
    .unwrap();
    let config = EngineConfig {
        genomic_low_risk_threshold: 16,
        ..EngineConfig::default()
    };
    let engine = RecommendationEngine::new(Arc::new(table), config);
    let mut raw = snapshot(
        ("positive", "positive", "negative"),
        "I",
        json!(20),
        "premenopausal",
    );
    raw["mutations"] = json!(["esr1"]);

    let recommendation = engine.evaluate(&raw).unwrap();

    let text = recommendation.text();
    assert!(text.contains("- ESR1 mutation: Camizestrant."));
    assert!(text.contains("Oncotype DX score 20 is at or above the threshold of 16."));
    // PIK3CA exists only in the built-in table.
    raw["mutations"] = json!(["PIK3CA"]);
    assert!(engine.evaluate(&raw).is_err());
}

#[test]
fn shared_engine_across_threads() {
    let engine = Arc::new(RecommendationEngine::default());
    let raw = Arc::new(snapshot(
        ("negative", "negative", "negative"),
        "II",
        Value::Null,
        "premenopausal",
    ));
    let expected = engine.evaluate(&raw).unwrap().into_text();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let raw = Arc::clone(&raw);
                scope.spawn(move || engine.evaluate(&raw).unwrap().into_text())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
