// Summary data model
// Author: Gabriel Demetrios Lafis

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{DataSet, Value};

/// Sample and summary produced by one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sample: DataSet,
    pub summary: Summary,
}

/// Statistical summary of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub overview: Overview,
    pub statistics: IndexMap<String, ColumnStat>,
    pub patterns: Patterns,
    pub data_quality: DataQuality,
}

impl Summary {
    /// The canonical empty summary: zero counts, empty containers
    pub fn empty() -> Self {
        Summary::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<String>,
    pub sample_size: usize,
}

/// Per-column statistics, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnStat {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

impl ColumnStat {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnStat::Numeric(_) => ColumnType::Numeric,
            ColumnStat::Categorical(_) => ColumnType::Categorical,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            ColumnStat::Numeric(stats) => Some(stats),
            ColumnStat::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            ColumnStat::Categorical(stats) => Some(stats),
            ColumnStat::Numeric(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub quartiles: [f64; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalStats {
    pub count: usize,
    pub unique: usize,
    pub top_values: Vec<ValueCount>,
}

/// A value and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

/// Cross-column patterns; trends and outliers are reserved and always empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patterns {
    pub correlations: IndexMap<String, f64>,
    pub trends: Vec<JsonValue>,
    pub outliers: Vec<JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub missing_values: IndexMap<String, usize>,
    pub duplicates: usize,
    pub data_types: IndexMap<String, ColumnType>,
}

/// Inferred column type used by data-quality reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Date,
    Empty,
}
