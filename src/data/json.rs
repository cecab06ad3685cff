// JSON data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{DataError, DataSet, DataSink, DataSource, Row};

/// JSON data source
pub struct JsonSource {
    path: String,
    array_path: Option<String>,
}

impl JsonSource {
    /// Create a new JSON data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonSource {
            path: path.as_ref().to_string_lossy().to_string(),
            array_path: None,
        }
    }

    /// Create a new JSON data source with a dotted path to the row array
    pub fn with_array_path<P: AsRef<Path>, S: Into<String>>(path: P, array_path: S) -> Self {
        JsonSource {
            path: path.as_ref().to_string_lossy().to_string(),
            array_path: Some(array_path.into()),
        }
    }

    /// Parse a dataset from a JSON string
    pub fn parse_str(json: &str, array_path: Option<&str>) -> Result<DataSet, DataError> {
        let json: JsonValue = serde_json::from_str(json)?;
        Self::from_json(json, array_path)
    }

    /// Parse a dataset from a reader
    pub fn parse_reader<R: Read>(reader: R, array_path: Option<&str>) -> Result<DataSet, DataError> {
        let json: JsonValue = serde_json::from_reader(reader)?;
        Self::from_json(json, array_path)
    }

    /// Convert a parsed JSON document into a dataset
    pub fn from_json(json: JsonValue, array_path: Option<&str>) -> Result<DataSet, DataError> {
        let mut current = json;

        if let Some(array_path) = array_path {
            for part in array_path.split('.') {
                current = match current {
                    JsonValue::Object(mut obj) => obj.remove(part).ok_or_else(|| {
                        DataError::Parse(format!("Path '{}' not found in JSON", array_path))
                    })?,
                    _ => {
                        return Err(DataError::Parse(format!(
                            "Path '{}' not found in JSON",
                            array_path
                        )))
                    }
                };
            }
        }

        let array = match current {
            JsonValue::Array(array) => array,
            _ => {
                return Err(DataError::Parse(
                    "JSON root is not an array of rows".to_string(),
                ))
            }
        };

        array
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                JsonValue::Object(obj) => Ok(Row::from(obj)),
                _ => Err(DataError::Parse(format!("Array element {} is not an object", i))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DataSet::from)
    }
}

impl DataSource for JsonSource {
    fn read(&self) -> Result<DataSet, DataError> {
        let file = File::open(&self.path)?;
        let dataset = Self::parse_reader(BufReader::new(file), self.array_path.as_deref())?;

        log::debug!("Read {} rows from {}", dataset.len(), self.path);
        Ok(dataset)
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// JSON data sink
pub struct JsonSink {
    path: String,
    pretty: bool,
}

impl JsonSink {
    /// Create a new JSON data sink
    pub fn new<P: AsRef<Path>>(path: P, pretty: bool) -> Self {
        JsonSink {
            path: path.as_ref().to_string_lossy().to_string(),
            pretty,
        }
    }
}

impl DataSink for JsonSink {
    fn write<T: Serialize>(&self, data: &T) -> Result<(), DataError> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);

        if self.pretty {
            serde_json::to_writer_pretty(writer, data)?;
        } else {
            serde_json::to_writer(writer, data)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.path
    }
}
