use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use tempfile::tempdir;

use breastcan_engine::{Recommendation, RecommendationEngine};
use breastcan_model::ClinicalSnapshot;
use breastcan_report::{ReportError, ReportHeader, render_report, write_report};

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn evaluation() -> (ClinicalSnapshot, Recommendation) {
    let raw = json!({
        "receptor_status": {"ER": "positive", "PR": "negative", "HER2": "negative"},
        "tumor_characteristics": {
            "tumor_size_cm": 1.5, "tumor_grade": 2, "node_status": "N0",
            "ki67": "low", "lvi": false
        },
        "stage": "II",
        "surgery_possible": true,
        "genomic_score": {"oncotype_dx_score": 30},
        "patient_context": {
            "age": 62, "pregnant": false, "performance_status": 0,
            "menopausal_status": "postmenopausal"
        },
        "mutations": ["PIK3CA"],
        "prior_therapies": ["Alpelisib"]
    });
    let engine = RecommendationEngine::default();
    let snapshot = engine.normalize(&raw).unwrap();
    let recommendation = engine.evaluate_snapshot(&snapshot).unwrap();
    (snapshot, recommendation)
}

#[test]
fn full_report_layout() {
    let (snapshot, recommendation) = evaluation();
    let header = ReportHeader::new("alice", "Jane Doe", "P-001", generated_at());

    let report = render_report(&header, &snapshot, &recommendation).unwrap();

    assert!(report.ends_with('\n'));
    insta::assert_snapshot!(report.trim_end(), @r"
    Breast Cancer Therapy Report
    ============================
    Date: 2026-03-01 09:30
    Doctor: Dr. alice
    Patient: Jane Doe (ID: P-001)

    Clinical Inputs
    ---------------
    Receptor Status: ER = positive, PR = negative, HER2 = negative
    Stage: II | Surgery Possible: Yes
    Oncotype DX Score: 30
    Tumor Size: 1.5 cm | Grade: 2, Node: N0, Ki-67: low, LVI: No
    Patient Age: 62 | Pregnant: No, ECOG: 0, Menopausal Status: postmenopausal
    Mutations: PIK3CA
    Prior Therapies Used: Alpelisib

    Final Recommendation
    --------------------
    Surgery:
    - Surgery indicated: breast-conserving surgery with sentinel lymph node biopsy, followed by whole-breast radiotherapy.
      Rationale: Stage II, 1.5 cm tumor, N0.
    Endocrine Therapy:
    - Aromatase inhibitor (letrozole, anastrozole or exemestane) for 5-10 years.
      Rationale: Hormone-receptor-positive disease (ER+/PR-/HER2-), postmenopausal.
    Chemotherapy:
    - Chemotherapy recommended in addition to endocrine therapy.
      Rationale: Oncotype DX score 30 is at or above the threshold of 26.
    Mutation-Targeted Therapy:
    - PIK3CA mutation: Capivasertib.
      Rationale: Alpelisib was already administered (prior use); Capivasertib is the next option. HR+/HER2- advanced disease, given with fulvestrant; monitor for hyperglycemia.
    ");
}

#[test]
fn optional_inputs_are_omitted_or_marked() {
    let (mut snapshot, recommendation) = evaluation();
    snapshot.mutations.clear();
    snapshot.prior_therapies.clear();
    snapshot.genomic_score = None;
    let header = ReportHeader::new("alice", "Jane Doe", "P-001", generated_at());

    let report = render_report(&header, &snapshot, &recommendation).unwrap();

    assert!(report.contains("Oncotype DX Score: not measured\n"));
    assert!(!report.contains("Mutations:"));
    assert!(!report.contains("Prior Therapies Used:"));
}

#[test]
fn non_latin1_characters_are_dropped() {
    let (snapshot, recommendation) = evaluation();
    let header = ReportHeader::new("Zoë 🎗", "Jane Doe", "P-001", generated_at());

    let report = render_report(&header, &snapshot, &recommendation).unwrap();

    assert!(report.contains("Doctor: Dr. Zoë \n"));
    assert!(report.chars().all(|c| u32::from(c) <= 0xFF));
}

#[test]
fn blank_patient_fields_rejected() {
    let (snapshot, recommendation) = evaluation();
    let header = ReportHeader::new("alice", "  ", "P-001", generated_at());

    let err = render_report(&header, &snapshot, &recommendation).unwrap_err();

    assert!(matches!(err, ReportError::MissingField { field: "patient name" }));
}

#[test]
fn writes_named_file() {
    let dir = tempdir().unwrap();
    let (snapshot, recommendation) = evaluation();
    let header = ReportHeader::new("alice", "Jane Doe", "P-001", generated_at());
    let out_dir = dir.path().join("reports");

    let path = write_report(&out_dir, &header, &snapshot, &recommendation).unwrap();

    assert_eq!(path, out_dir.join("report_Jane_Doe_P-001.txt"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        render_report(&header, &snapshot, &recommendation).unwrap()
    );
}
