//! Mutation-to-therapy reference table.
//!
//! The table is read-only once built. The built-in table is initialized once
//! per process and handed out as a shared [`Arc`]; custom tables loaded from
//! CSV are wrapped the same way so every evaluation sees the same data.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::StandardsError;

/// Therapy options for one actionable mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationTherapy {
    /// Canonical upper-case gene symbol (e.g. "PIK3CA").
    pub mutation: String,
    pub preferred_therapy: String,
    /// Alternatives in order of preference, used once the preferred therapy was given.
    #[serde(default)]
    pub fallback_therapies: Vec<String>,
    #[serde(default)]
    pub eligibility_notes: String,
}

impl MutationTherapy {
    pub fn new(mutation: &str, preferred_therapy: &str) -> Self {
        Self {
            mutation: canonical_mutation_id(mutation),
            preferred_therapy: preferred_therapy.trim().to_string(),
            fallback_therapies: Vec::new(),
            eligibility_notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: &[&str]) -> Self {
        self.fallback_therapies = fallbacks.iter().map(|f| f.trim().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.eligibility_notes = notes.trim().to_string();
        self
    }
}

/// Normalize a user-supplied mutation identifier to its table key.
pub fn canonical_mutation_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationTherapyTable {
    entries: BTreeMap<String, MutationTherapy>,
}

static BUILTIN_TABLE: LazyLock<Arc<MutationTherapyTable>> =
    LazyLock::new(|| Arc::new(MutationTherapyTable::builtin_entries()));

impl MutationTherapyTable {
    /// Build a table, rejecting empty, duplicate or incomplete entries.
    pub fn from_entries(
        entries: impl IntoIterator<Item = MutationTherapy>,
        source_name: &str,
    ) -> Result<Self, StandardsError> {
        let mut map = BTreeMap::new();
        for (idx, mut entry) in entries.into_iter().enumerate() {
            let row = idx + 1;
            entry.mutation = canonical_mutation_id(&entry.mutation);
            entry.preferred_therapy = entry.preferred_therapy.trim().to_string();
            entry.fallback_therapies.retain(|f| !f.trim().is_empty());
            if entry.mutation.is_empty() {
                return Err(StandardsError::InvalidRow {
                    source_name: source_name.to_string(),
                    row,
                    message: "mutation identifier is empty".to_string(),
                });
            }
            if entry.preferred_therapy.is_empty() {
                return Err(StandardsError::InvalidRow {
                    source_name: source_name.to_string(),
                    row,
                    message: format!("mutation {} has no preferred therapy", entry.mutation),
                });
            }
            let key = entry.mutation.clone();
            if map.contains_key(&key) {
                return Err(StandardsError::DuplicateMutation {
                    source_name: source_name.to_string(),
                    mutation: key,
                });
            }
            map.insert(key, entry);
        }
        if map.is_empty() {
            return Err(StandardsError::EmptyTable {
                source_name: source_name.to_string(),
            });
        }
        Ok(Self { entries: map })
    }

    /// The process-wide built-in table.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN_TABLE)
    }

    fn builtin_entries() -> Self {
        let entries = [
            MutationTherapy::new("PIK3CA", "Alpelisib")
                .with_fallbacks(&["Capivasertib"])
                .with_notes(
                    "HR+/HER2- advanced disease, given with fulvestrant; monitor for hyperglycemia.",
                ),
            MutationTherapy::new("AKT1", "Capivasertib").with_notes(
                "HR+/HER2- advanced disease after progression on endocrine therapy, with fulvestrant.",
            ),
            MutationTherapy::new("PTEN", "Capivasertib").with_notes(
                "HR+/HER2- advanced disease after progression on endocrine therapy, with fulvestrant.",
            ),
            MutationTherapy::new("ESR1", "Elacestrant")
                .with_fallbacks(&["Fulvestrant"])
                .with_notes("ER+/HER2- advanced disease after at least one line of endocrine therapy."),
            MutationTherapy::new("BRCA1", "Olaparib")
                .with_fallbacks(&["Talazoparib"])
                .with_notes("Germline pathogenic variant carriers with HER2- disease."),
            MutationTherapy::new("BRCA2", "Olaparib")
                .with_fallbacks(&["Talazoparib"])
                .with_notes("Germline pathogenic variant carriers with HER2- disease."),
            MutationTherapy::new("PALB2", "Olaparib")
                .with_notes("Germline PALB2 carriers; supporting evidence is limited to phase II data."),
            MutationTherapy::new("ERBB2", "Neratinib")
                .with_fallbacks(&["Tucatinib"])
                .with_notes("Activating HER2 (ERBB2) mutations without HER2 amplification."),
            MutationTherapy::new("NTRK", "Larotrectinib")
                .with_fallbacks(&["Entrectinib"])
                .with_notes("NTRK gene fusions, tumor-agnostic indication."),
        ];
        let entries = entries
            .into_iter()
            .map(|entry| (entry.mutation.clone(), entry))
            .collect();
        Self { entries }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, mutation: &str) -> Option<&MutationTherapy> {
        self.entries.get(&canonical_mutation_id(mutation))
    }

    pub fn contains(&self, mutation: &str) -> bool {
        self.get(mutation).is_some()
    }

    /// Identifiers the presentation layer may offer for selection.
    pub fn list_mutations(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationTherapy> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_shared() {
        let a = MutationTherapyTable::builtin();
        let b = MutationTherapyTable::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        let table = MutationTherapyTable::builtin();
        let entry = table.get(" pik3ca ").expect("PIK3CA present");
        assert_eq!(entry.preferred_therapy, "Alpelisib");
        assert_eq!(entry.fallback_therapies, vec!["Capivasertib".to_string()]);
    }

    #[test]
    fn builtin_entries_are_complete() {
        let table = MutationTherapyTable::builtin();
        for entry in table.iter() {
            assert!(!entry.preferred_therapy.is_empty(), "{}", entry.mutation);
            assert!(!entry.eligibility_notes.is_empty(), "{}", entry.mutation);
            assert_eq!(entry.mutation, entry.mutation.to_uppercase());
        }
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let result = MutationTherapyTable::from_entries(
            vec![
                MutationTherapy::new("PIK3CA", "Alpelisib"),
                MutationTherapy::new("pik3ca", "Capivasertib"),
            ],
            "test",
        );
        assert!(matches!(
            result,
            Err(StandardsError::DuplicateMutation { mutation, .. }) if mutation == "PIK3CA"
        ));
    }

    #[test]
    fn from_entries_rejects_empty() {
        let result = MutationTherapyTable::from_entries(Vec::new(), "test");
        assert!(matches!(result, Err(StandardsError::EmptyTable { .. })));
    }

    #[test]
    fn from_entries_rejects_missing_preferred() {
        let result =
            MutationTherapyTable::from_entries(vec![MutationTherapy::new("ESR1", " ")], "test");
        assert!(matches!(
            result,
            Err(StandardsError::InvalidRow { row: 1, .. })
        ));
    }
}
