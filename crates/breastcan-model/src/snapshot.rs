//! The validated clinical snapshot consumed by the rule evaluator.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::enums::{
    Ki67, MenopausalStatus, NodeStatus, PerformanceStatus, ReceptorResult, Stage, TumorGrade,
};

/// ER, PR and HER2 assay results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceptorStatus {
    pub er: ReceptorResult,
    pub pr: ReceptorResult,
    pub her2: ReceptorResult,
}

impl ReceptorStatus {
    /// ER positive or PR positive.
    pub fn hormone_receptor_positive(&self) -> bool {
        self.er.is_positive() || self.pr.is_positive()
    }

    pub fn her2_positive(&self) -> bool {
        self.her2.is_positive()
    }

    /// ER-, PR- and HER2-.
    pub fn triple_negative(&self) -> bool {
        !self.hormone_receptor_positive() && !self.her2_positive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TumorCharacteristics {
    pub size_cm: f64,
    pub grade: TumorGrade,
    pub node_status: NodeStatus,
    pub ki67: Ki67,
    /// Lymphovascular invasion.
    pub lvi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatientContext {
    pub age: u32,
    pub pregnant: bool,
    pub performance_status: PerformanceStatus,
    pub menopausal_status: MenopausalStatus,
}

/// A patient's clinical picture at the time of the recommendation.
///
/// Built by the input normalizer; the rule evaluator only ever reads it.
/// `mutations` keeps entry order (it drives rendering order) but holds no
/// duplicates and at most [`ClinicalSnapshot::MAX_MUTATIONS`] identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalSnapshot {
    pub receptor_status: ReceptorStatus,
    pub tumor: TumorCharacteristics,
    pub stage: Stage,
    pub surgery_possible: bool,
    /// Oncotype DX recurrence score, when one was measured.
    pub genomic_score: Option<u32>,
    pub patient_context: PatientContext,
    pub mutations: Vec<String>,
    pub prior_therapies: BTreeSet<String>,
}

impl ClinicalSnapshot {
    pub const MAX_MUTATIONS: usize = 2;

    /// Case-insensitive membership test against `prior_therapies`.
    pub fn has_prior_therapy(&self, therapy: &str) -> bool {
        self.prior_therapies
            .iter()
            .any(|prior| prior.eq_ignore_ascii_case(therapy.trim()))
    }
}
