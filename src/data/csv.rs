// CSV data source implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{DataError, DataSet, DataSource, Row, Value};

/// CSV data source; the first record is the header row
pub struct CsvSource {
    path: String,
    delimiter: u8,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, delimiter: char) -> Self {
        CsvSource {
            path: path.as_ref().to_string_lossy().to_string(),
            delimiter: delimiter as u8,
        }
    }

    /// Parse a dataset from any reader. Cells stay strings; empty cells are kept
    /// as empty strings so they count as missing downstream.
    pub fn parse_reader<R: Read>(reader: R, delimiter: u8) -> Result<DataSet, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut dataset = DataSet::new();

        for result in csv_reader.records() {
            let record = result?;

            // Short records simply lack the trailing keys
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(name, field)| (name.clone(), Value::String(field.to_string())))
                .collect();

            dataset.add_row(row);
        }

        Ok(dataset)
    }

    /// Parse a dataset from a string
    pub fn parse_str(data: &str, delimiter: u8) -> Result<DataSet, DataError> {
        Self::parse_reader(data.as_bytes(), delimiter)
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<DataSet, DataError> {
        let file = File::open(&self.path)?;
        let dataset = Self::parse_reader(BufReader::new(file), self.delimiter)?;

        log::debug!("Read {} rows from {}", dataset.len(), self.path);
        Ok(dataset)
    }

    fn name(&self) -> &str {
        &self.path
    }
}
