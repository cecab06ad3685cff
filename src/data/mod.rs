// Data module for loosely-typed tabular records
// Author: Gabriel Demetrios Lafis

mod csv;
mod json;

pub use self::csv::*;
pub use self::json::*;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use thiserror::Error;

/// Represents a generic data source
pub trait DataSource {
    /// Read data from the source
    fn read(&self) -> Result<DataSet, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Represents a generic data sink
pub trait DataSink {
    /// Write a serializable result to the sink
    fn write<T: Serialize>(&self, data: &T) -> Result<(), DataError>;

    /// Get the sink name
    fn name(&self) -> &str;
}

/// Represents a scalar value in a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Value {
    /// Null and the empty string both count as missing
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Get the string content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            // Rows are flat; nested structures are kept as their JSON text
            nested => Value::String(nested.to_string()),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(i.into())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A flat record: column names mapped to scalar values, in the order supplied.
/// Two rows are equal when they serialize to the same JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "JsonMap<String, JsonValue>", into = "JsonMap<String, JsonValue>")]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Row { fields: Vec::new() }
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, column: K, value: V) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert a value, replacing any previous value for the column
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, column: K, value: V) {
        let column = column.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Get a value by column name; `None` means the key is absent
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Get a value only if it is present and not missing
    pub fn present(&self, column: &str) -> Option<&Value> {
        self.get(column).filter(|value| !value.is_missing())
    }

    /// Check if the column is absent, null or empty
    pub fn is_missing(&self, column: &str) -> bool {
        self.present(column).is_none()
    }

    /// Column names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl From<JsonMap<String, JsonValue>> for Row {
    fn from(obj: JsonMap<String, JsonValue>) -> Self {
        obj.into_iter().collect()
    }
}

impl From<Row> for JsonMap<String, JsonValue> {
    fn from(row: Row) -> Self {
        row.fields
            .into_iter()
            .map(|(name, value)| (name, JsonValue::from(value)))
            .collect()
    }
}

/// An ordered sequence of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSet {
    pub data: Vec<Row>,
}

impl DataSet {
    /// Create a new empty dataset
    pub fn new() -> Self {
        DataSet { data: Vec::new() }
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, row: Row) {
        self.data.push(row);
    }

    /// Column names, taken from the first row
    pub fn columns(&self) -> Vec<String> {
        self.data
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Get the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The first `n` rows, in order
    pub fn head(&self, n: usize) -> &[Row] {
        &self.data[..n.min(self.data.len())]
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.data.iter()
    }
}

impl From<Vec<Row>> for DataSet {
    fn from(data: Vec<Row>) -> Self {
        DataSet { data }
    }
}

impl FromIterator<Row> for DataSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        DataSet { data: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
