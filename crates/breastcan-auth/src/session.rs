use tracing::info;

use breastcan_engine::Recommendation;
use breastcan_model::ClinicalSnapshot;

use crate::error::{AuthError, Result};
use crate::store::CredentialStore;

/// The patient and result of the most recent evaluation in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    pub patient_name: String,
    pub patient_id: String,
    pub snapshot: ClinicalSnapshot,
    pub recommendation: Recommendation,
}

/// An authenticated clinician's working context.
///
/// Owned by the caller; nothing about a session is global. Only the latest
/// evaluation is kept, ready for export.
#[derive(Debug)]
pub struct Session {
    username: String,
    last_evaluation: Option<EvaluationRecord>,
}

impl Session {
    /// Authenticate against `store` and open a session.
    pub fn login<S>(store: &S, username: &str, password: &str) -> Result<Self>
    where
        S: CredentialStore + ?Sized,
    {
        if !store.authenticate(username, password)? {
            return Err(AuthError::InvalidCredentials);
        }
        let username = username.trim().to_string();
        info!(username = %username, "session opened");
        Ok(Self {
            username,
            last_evaluation: None,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replace the session's last evaluation.
    pub fn record_evaluation(&mut self, record: EvaluationRecord) {
        self.last_evaluation = Some(record);
    }

    pub fn last_evaluation(&self) -> Option<&EvaluationRecord> {
        self.last_evaluation.as_ref()
    }

    /// End the session, discarding any recorded evaluation.
    pub fn logout(mut self) {
        self.last_evaluation = None;
        info!(username = %self.username, "session closed");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use breastcan_engine::RecommendationEngine;

    use super::*;
    use crate::store::MemoryCredentialStore;

    fn store() -> MemoryCredentialStore {
        let mut store = MemoryCredentialStore::new();
        store.register("alice", "secret").unwrap();
        store
    }

    fn record() -> EvaluationRecord {
        let raw = json!({
            "receptor_status": {"ER": "positive", "PR": "positive", "HER2": "negative"},
            "tumor": {"size_cm": 1.2, "grade": 2, "node_status": "N0", "ki67": "low", "lvi": false},
            "stage": "I",
            "surgery_possible": true,
            "genomic_score": 12,
            "patient_context": {
                "age": 58, "pregnant": false, "performance_status": 1,
                "menopausal_status": "postmenopausal"
            },
            "mutations": [],
            "prior_therapies": []
        });
        let engine = RecommendationEngine::default();
        let snapshot = engine.normalize(&raw).unwrap();
        let recommendation = engine.evaluate_snapshot(&snapshot).unwrap();
        EvaluationRecord {
            patient_name: "Jane Doe".to_string(),
            patient_id: "P-001".to_string(),
            snapshot,
            recommendation,
        }
    }

    #[test]
    fn login_with_valid_credentials() {
        let session = Session::login(&store(), " alice", "secret").unwrap();
        assert_eq!(session.username(), "alice");
        assert!(session.last_evaluation().is_none());
    }

    #[test]
    fn login_with_wrong_password_fails() {
        let err = Session::login(&store(), "alice", "nope").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn records_only_latest_evaluation() {
        let mut session = Session::login(&store(), "alice", "secret").unwrap();
        session.record_evaluation(record());
        let mut second = record();
        second.patient_id = "P-002".to_string();
        session.record_evaluation(second);

        let last = session.last_evaluation().unwrap();
        assert_eq!(last.patient_id, "P-002");
        assert!(last.recommendation.text().starts_with("Surgery:"));
        session.logout();
    }

    #[test]
    fn works_through_trait_object() {
        let store: Box<dyn CredentialStore> = Box::new(store());
        assert!(Session::login(store.as_ref(), "alice", "secret").is_ok());
    }
}
