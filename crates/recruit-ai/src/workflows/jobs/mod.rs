mod parser;

use crate::workflows::screening::NewJob;
use parser::ParsedRow;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum JobImportError {
    NotCsv { file_name: String },
    Io(std::io::Error),
    Csv(csv::Error),
    MissingDescription { line: u64 },
    Empty,
}

impl std::fmt::Display for JobImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobImportError::NotCsv { file_name } => {
                write!(f, "job description upload '{}' must be a CSV file", file_name)
            }
            JobImportError::Io(err) => write!(f, "failed to read job description file: {}", err),
            JobImportError::Csv(err) => write!(f, "invalid job description CSV: {}", err),
            JobImportError::MissingDescription { line } => {
                write!(f, "job description missing on line {}", line)
            }
            JobImportError::Empty => write!(f, "job description CSV contains no rows"),
        }
    }
}

impl std::error::Error for JobImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobImportError::Io(err) => Some(err),
            JobImportError::Csv(err) => Some(err),
            JobImportError::NotCsv { .. }
            | JobImportError::MissingDescription { .. }
            | JobImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for JobImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for JobImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads job descriptions from an uploaded spreadsheet export.
pub struct JobDescriptionImporter;

impl JobDescriptionImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NewJob>, JobImportError> {
        let path = path.as_ref();
        ensure_csv_name(&path.to_string_lossy())?;
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Validate an uploaded file by name before parsing its contents.
    pub fn from_upload(file_name: &str, content: &[u8]) -> Result<Vec<NewJob>, JobImportError> {
        ensure_csv_name(file_name)?;
        Self::from_reader(content)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NewJob>, JobImportError> {
        let rows = parser::parse_rows(reader)?;
        if rows.is_empty() {
            return Err(JobImportError::Empty);
        }

        rows.into_iter()
            .map(|row| match row {
                ParsedRow::Job(job) => Ok(job),
                ParsedRow::MissingDescription { line } => {
                    Err(JobImportError::MissingDescription { line })
                }
            })
            .collect()
    }
}

fn ensure_csv_name(file_name: &str) -> Result<(), JobImportError> {
    if file_name.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(JobImportError::NotCsv {
            file_name: file_name.to_string(),
        })
    }
}
