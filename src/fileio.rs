use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ViewerError;

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Where the records come from: a file, or standard input when no path is given
pub struct Source {
    path: Option<PathBuf>,
    delimiter: u8,
}

impl Source {
    /// An explicit delimiter wins over the one implied by the file extension
    pub fn new(path: Option<PathBuf>, delimiter: Option<u8>) -> Self {
        let delimiter = delimiter
            .or_else(|| {
                path.as_deref()
                    .and_then(FileFormat::from_extension)
                    .map(|f| f.delimiter())
            })
            .unwrap_or(b',');
        Self { path, delimiter }
    }

    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string())
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Read every record, header included
    pub fn load(&self) -> Result<Vec<Vec<String>>, ViewerError> {
        debug!(source = %self.name(), delimiter = %(self.delimiter() as char).escape_default(), "loading");

        let records = match &self.path {
            Some(path) => {
                let file = File::open(path)?;
                read_records(BufReader::with_capacity(1 << 20, file), self.delimiter)?
            }
            None => read_records(io::stdin().lock(), self.delimiter)?,
        };

        info!(source = %self.name(), records = records.len(), "loaded");
        Ok(records)
    }
}

/// Parse delimited text into rows of fields. Rows may differ in length; the
/// table decides what to do about that.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, ViewerError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}
