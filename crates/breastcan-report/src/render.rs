//! Report layout.
//!
//! ```text
//! Breast Cancer Therapy Report
//! ============================
//! Date: 2026-03-01 09:30
//! Doctor: Dr. alice
//! Patient: Jane Doe (ID: P-001)
//!
//! Clinical Inputs
//! ---------------
//! Receptor Status: ER = positive, PR = positive, HER2 = negative
//! ...
//!
//! Final Recommendation
//! --------------------
//! <recommendation text>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use breastcan_engine::Recommendation;
use breastcan_model::ClinicalSnapshot;

use crate::error::{ReportError, Result};
use crate::text::{clean_text, report_file_name};

pub const REPORT_TITLE: &str = "Breast Cancer Therapy Report";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Who the report is for and when it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub doctor: String,
    pub patient_name: String,
    pub patient_id: String,
    pub generated_at: NaiveDateTime,
}

impl ReportHeader {
    pub fn new(
        doctor: impl Into<String>,
        patient_name: impl Into<String>,
        patient_id: impl Into<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            doctor: doctor.into(),
            patient_name: patient_name.into(),
            patient_id: patient_id.into(),
            generated_at,
        }
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("doctor", &self.doctor),
            ("patient name", &self.patient_name),
            ("patient id", &self.patient_id),
        ] {
            if value.trim().is_empty() {
                return Err(ReportError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Render the full report. The result is Latin-1 clean and ends with a newline.
pub fn render_report(
    header: &ReportHeader,
    snapshot: &ClinicalSnapshot,
    recommendation: &Recommendation,
) -> Result<String> {
    header.validate()?;

    let mut lines: Vec<String> = vec![
        REPORT_TITLE.to_string(),
        "=".repeat(REPORT_TITLE.len()),
        format!("Date: {}", header.generated_at.format(DATE_FORMAT)),
        format!("Doctor: Dr. {}", header.doctor.trim()),
        format!(
            "Patient: {} (ID: {})",
            header.patient_name.trim(),
            header.patient_id.trim()
        ),
        String::new(),
    ];
    push_section(&mut lines, "Clinical Inputs");
    lines.extend(clinical_inputs(snapshot));
    lines.push(String::new());
    push_section(&mut lines, "Final Recommendation");
    lines.extend(recommendation.text().lines().map(str::to_string));

    let mut report = clean_text(&lines.join("\n"));
    report.push('\n');
    Ok(report)
}

/// Render the report into `dir` under [`report_file_name`] and return the path.
pub fn write_report(
    dir: &Path,
    header: &ReportHeader,
    snapshot: &ClinicalSnapshot,
    recommendation: &Recommendation,
) -> Result<PathBuf> {
    let report = render_report(header, snapshot, recommendation)?;
    fs::create_dir_all(dir).map_err(|err| ReportError::io("create directory", dir, err))?;
    let path = dir.join(report_file_name(&header.patient_name, &header.patient_id));
    fs::write(&path, report).map_err(|err| ReportError::io("write", &path, err))?;
    info!(path = %path.display(), "report written");
    Ok(path)
}

fn push_section(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn clinical_inputs(snapshot: &ClinicalSnapshot) -> Vec<String> {
    let receptors = &snapshot.receptor_status;
    let tumor = &snapshot.tumor;
    let patient = &snapshot.patient_context;

    let score = snapshot
        .genomic_score
        .map_or_else(|| "not measured".to_string(), |score| score.to_string());
    let mut lines = vec![
        format!(
            "Receptor Status: ER = {}, PR = {}, HER2 = {}",
            receptors.er, receptors.pr, receptors.her2
        ),
        format!(
            "Stage: {} | Surgery Possible: {}",
            snapshot.stage,
            yes_no(snapshot.surgery_possible)
        ),
        format!("Oncotype DX Score: {score}"),
        format!(
            "Tumor Size: {:.1} cm | Grade: {}, Node: {}, Ki-67: {}, LVI: {}",
            tumor.size_cm,
            tumor.grade,
            tumor.node_status,
            tumor.ki67,
            yes_no(tumor.lvi)
        ),
        format!(
            "Patient Age: {} | Pregnant: {}, ECOG: {}, Menopausal Status: {}",
            patient.age,
            yes_no(patient.pregnant),
            patient.performance_status,
            patient.menopausal_status
        ),
    ];
    if !snapshot.mutations.is_empty() {
        lines.push(format!("Mutations: {}", snapshot.mutations.join(", ")));
    }
    if !snapshot.prior_therapies.is_empty() {
        let prior: Vec<&str> = snapshot.prior_therapies.iter().map(String::as_str).collect();
        lines.push(format!("Prior Therapies Used: {}", prior.join(", ")));
    }
    lines
}
