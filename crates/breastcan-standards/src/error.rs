use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column {column} in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("row {row} of {source_name}: {message}")]
    InvalidRow {
        source_name: String,
        row: usize,
        message: String,
    },

    #[error("duplicate mutation identifier {mutation} in {source_name}")]
    DuplicateMutation {
        source_name: String,
        mutation: String,
    },

    #[error("mutation table {source_name} has no entries")]
    EmptyTable { source_name: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(source_name: &str, source: csv::Error) -> Self {
        Self::Csv {
            source_name: source_name.to_string(),
            source,
        }
    }
}
