//! Input normalizer.
//!
//! Turns a snapshot-shaped JSON mapping into a [`ClinicalSnapshot`]. Field
//! names follow the canonical snapshot layout but the spellings produced by
//! the clinic intake form (`tumor_characteristics`, `tumor_size_cm`,
//! `{"oncotype_dx_score": n}`) are accepted as aliases. Unrecognized keys such
//! as patient identifiers are ignored.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use breastcan_model::{
    ClinicalSnapshot, PatientContext, PerformanceStatus, ReceptorStatus, TumorCharacteristics,
};
use breastcan_standards::{MutationTherapyTable, canonical_mutation_id};

use crate::error::{EngineError, Result, ValidationError};

const ONCOTYPE_KEY: &str = "oncotype_dx_score";

/// Validate `raw` and build a snapshot. Pure: no I/O, no shared state.
pub fn normalize(raw: &Value, table: &MutationTherapyTable) -> Result<ClinicalSnapshot> {
    let result = normalize_inner(raw, table);
    if let Err(error) = &result {
        warn!(field = error.field().unwrap_or("-"), %error, "snapshot rejected");
    }
    result
}

fn normalize_inner(raw: &Value, table: &MutationTherapyTable) -> Result<ClinicalSnapshot> {
    let root = Record::root(raw)?;

    let receptors = root.record(&["receptor_status"])?;
    let receptor_status = ReceptorStatus {
        er: receptors.enumeration(&["ER", "er"])?,
        pr: receptors.enumeration(&["PR", "pr"])?,
        her2: receptors.enumeration(&["HER2", "her2"])?,
    };

    let tumor_record = root.record(&["tumor", "tumor_characteristics"])?;
    let tumor = TumorCharacteristics {
        size_cm: tumor_record.non_negative_real(&["size_cm", "tumor_size_cm"])?,
        grade: tumor_record.enumeration(&["grade", "tumor_grade"])?,
        node_status: tumor_record.enumeration(&["node_status"])?,
        ki67: tumor_record.enumeration(&["ki67", "ki_67"])?,
        lvi: tumor_record.boolean(&["lvi"])?,
    };

    let context = root.record(&["patient_context"])?;
    let patient_context = PatientContext {
        age: context.non_negative_integer(&["age"])?,
        pregnant: context.boolean(&["pregnant"])?,
        performance_status: context.performance_status(&["performance_status", "ecog"])?,
        menopausal_status: context.enumeration(&["menopausal_status"])?,
    };

    let mutations = root.string_list(&["mutations"])?;
    let mutations = validate_mutations(mutations.iter().map(String::as_str), table)?;

    let prior_therapies = root
        .string_list(&["prior_therapies"])?
        .into_iter()
        .collect::<BTreeSet<_>>();

    let snapshot = ClinicalSnapshot {
        receptor_status,
        tumor,
        stage: root.enumeration(&["stage"])?,
        surgery_possible: root.boolean(&["surgery_possible"])?,
        genomic_score: root.genomic_score()?,
        patient_context,
        mutations,
        prior_therapies,
    };
    debug!(
        stage = %snapshot.stage,
        mutations = snapshot.mutations.len(),
        prior_therapies = snapshot.prior_therapies.len(),
        "snapshot normalized"
    );
    Ok(snapshot)
}

/// Check a mutation list against the table and return canonical identifiers.
///
/// Enforces the size limit, rejects duplicates and unknown identifiers, and
/// keeps the input order.
pub fn validate_mutations<'a>(
    mutations: impl IntoIterator<Item = &'a str>,
    table: &MutationTherapyTable,
) -> Result<Vec<String>> {
    let mutations: Vec<&str> = mutations.into_iter().collect();
    if mutations.len() > ClinicalSnapshot::MAX_MUTATIONS {
        return Err(ValidationError::new(
            "mutations",
            format!(
                "at most {} mutations may be selected, got {}",
                ClinicalSnapshot::MAX_MUTATIONS,
                mutations.len()
            ),
        )
        .into());
    }
    let mut canonical = Vec::with_capacity(mutations.len());
    for (idx, raw) in mutations.into_iter().enumerate() {
        let field = format!("mutations[{idx}]");
        let Some(entry) = table.get(raw) else {
            return Err(EngineError::UnknownMutation {
                field,
                mutation: raw.trim().to_string(),
            });
        };
        if canonical.contains(&entry.mutation) {
            return Err(ValidationError::new(
                field,
                format!("duplicate mutation {}", canonical_mutation_id(raw)),
            )
            .into());
        }
        canonical.push(entry.mutation.clone());
    }
    Ok(canonical)
}

/// A JSON object together with its dotted path, for field-naming errors.
struct Record<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    fn root(raw: &'a Value) -> std::result::Result<Self, ValidationError> {
        match raw {
            Value::Object(map) => Ok(Self {
                path: String::new(),
                map,
            }),
            other => Err(ValidationError::new(
                "snapshot",
                format!("expected an object, got {}", json_type(other)),
            )),
        }
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// First present, non-null value among `keys` (canonical name first).
    fn lookup(&self, keys: &[&str]) -> Option<(String, &'a Value)> {
        keys.iter().find_map(|key| {
            self.map
                .get(*key)
                .filter(|value| !value.is_null())
                .map(|value| (self.field_path(key), value))
        })
    }

    fn required(&self, keys: &[&str]) -> std::result::Result<(String, &'a Value), ValidationError> {
        self.lookup(keys)
            .ok_or_else(|| ValidationError::missing(&self.field_path(keys[0])))
    }

    fn record(&self, keys: &[&str]) -> std::result::Result<Record<'a>, ValidationError> {
        let (path, value) = self.required(keys)?;
        match value {
            Value::Object(map) => Ok(Record { path, map }),
            other => Err(ValidationError::new(
                path,
                format!("expected an object, got {}", json_type(other)),
            )),
        }
    }

    fn enumeration<T>(&self, keys: &[&str]) -> std::result::Result<T, ValidationError>
    where
        T: FromStr<Err = String>,
    {
        let (path, value) = self.required(keys)?;
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(_) => integer_value(&path, value)?.to_string(),
            other => {
                return Err(ValidationError::new(
                    path,
                    format!("expected a string, got {}", json_type(other)),
                ));
            }
        };
        text.parse::<T>()
            .map_err(|reason| ValidationError::new(path, reason))
    }

    fn boolean(&self, keys: &[&str]) -> std::result::Result<bool, ValidationError> {
        let (path, value) = self.required(keys)?;
        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) => match text.trim().to_lowercase().as_str() {
                "true" | "yes" => Ok(true),
                "false" | "no" => Ok(false),
                _ => Err(ValidationError::new(
                    path,
                    format!("expected true/false or yes/no, got {text:?}"),
                )),
            },
            other => Err(ValidationError::new(
                path,
                format!("expected a boolean, got {}", json_type(other)),
            )),
        }
    }

    fn non_negative_real(&self, keys: &[&str]) -> std::result::Result<f64, ValidationError> {
        let (path, value) = self.required(keys)?;
        let number = number_value(&path, value)?;
        if number < 0.0 {
            return Err(ValidationError::new(
                path,
                format!("must be non-negative, got {number}"),
            ));
        }
        // Folds -0.0 into 0.0.
        Ok(number + 0.0)
    }

    fn non_negative_integer(&self, keys: &[&str]) -> std::result::Result<u32, ValidationError> {
        let (path, value) = self.required(keys)?;
        integer_value(&path, value)
    }

    fn performance_status(
        &self,
        keys: &[&str],
    ) -> std::result::Result<PerformanceStatus, ValidationError> {
        let (path, value) = self.required(keys)?;
        let raw = integer_value(&path, value)?;
        u8::try_from(raw)
            .ok()
            .and_then(PerformanceStatus::new)
            .ok_or_else(|| {
                ValidationError::new(
                    path,
                    format!(
                        "ECOG performance status must be between 0 and {}, got {raw}",
                        PerformanceStatus::MAX
                    ),
                )
            })
    }

    /// Optional list of strings; missing or null yields an empty list.
    fn string_list(&self, keys: &[&str]) -> std::result::Result<Vec<String>, ValidationError> {
        let Some((path, value)) = self.lookup(keys) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(ValidationError::new(
                path,
                format!("expected a list, got {}", json_type(value)),
            ));
        };
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::String(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
                Value::String(_) => Err(ValidationError::new(
                    format!("{path}[{idx}]"),
                    "must not be blank",
                )),
                other => Err(ValidationError::new(
                    format!("{path}[{idx}]"),
                    format!("expected a string, got {}", json_type(other)),
                )),
            })
            .collect()
    }

    /// Integer score, `{"oncotype_dx_score": n}`, or absent.
    fn genomic_score(&self) -> std::result::Result<Option<u32>, ValidationError> {
        let Some((path, value)) = self.lookup(&["genomic_score", ONCOTYPE_KEY]) else {
            return Ok(None);
        };
        match value {
            Value::Object(map) => match map.get(ONCOTYPE_KEY).filter(|v| !v.is_null()) {
                Some(score) => integer_value(&format!("{path}.{ONCOTYPE_KEY}"), score).map(Some),
                None => Ok(None),
            },
            other => integer_value(&path, other).map(Some),
        }
    }
}

fn number_value(path: &str, value: &Value) -> std::result::Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(ValidationError::new(
            path,
            format!("expected a number, got {}", describe(value)),
        )),
    }
}

fn integer_value(path: &str, value: &Value) -> std::result::Result<u32, ValidationError> {
    let number = number_value(path, value)?;
    if number < 0.0 {
        return Err(ValidationError::new(
            path,
            format!("must be non-negative, got {number}"),
        ));
    }
    if number.fract() != 0.0 {
        return Err(ValidationError::new(
            path,
            format!("must be a whole number, got {number}"),
        ));
    }
    if number > f64::from(u32::MAX) {
        return Err(ValidationError::new(path, format!("is too large: {number}")));
    }
    // Whole and within range, so the cast is exact.
    Ok(number as u32)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("{text:?}"),
        other => json_type(other).to_string(),
    }
}
