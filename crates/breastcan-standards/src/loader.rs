//! CSV loader for custom mutation tables.
//!
//! Expected header: `mutation,preferred_therapy,fallback_therapies,eligibility_notes`.
//! `fallback_therapies` is `;`-separated and may be empty, as may
//! `eligibility_notes`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::StandardsError;
use crate::table::{MutationTherapy, MutationTherapyTable};

const REQUIRED_COLUMNS: &[&str] = &["mutation", "preferred_therapy"];

/// Load a mutation table from a CSV file.
pub fn load_mutation_table(path: &Path) -> Result<MutationTherapyTable, StandardsError> {
    let file = File::open(path).map_err(|source| StandardsError::io(path, source))?;
    read_mutation_table(file, &path.display().to_string())
}

/// Parse a mutation table from any CSV reader.
pub fn read_mutation_table<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<MutationTherapyTable, StandardsError> {
    let rows = read_csv_rows(reader, source_name)?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        let fallbacks = get_field(row, "fallback_therapies");
        entries.push(MutationTherapy {
            mutation: get_field(row, "mutation"),
            preferred_therapy: get_field(row, "preferred_therapy"),
            fallback_therapies: fallbacks
                .split(';')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
            eligibility_notes: get_field(row, "eligibility_notes"),
        });
    }
    let table = MutationTherapyTable::from_entries(entries, source_name)?;
    debug!(source = source_name, mutations = table.len(), "loaded mutation table");
    Ok(table)
}

/// Read CSV rows into header-keyed maps, trimming values and any BOM.
fn read_csv_rows<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<BTreeMap<String, String>>, StandardsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| StandardsError::csv(source_name, source))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_lowercase())
        .collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(StandardsError::MissingColumn {
                source_name: source_name.to_string(),
                column: (*column).to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| StandardsError::csv(source_name, source))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(key) = headers.get(idx) {
                row.insert(key.clone(), value.trim().to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}
