// Column classification used by sampling and summarization
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use log::debug;

use crate::data::{Row, Value};
use super::coerce::{try_parse_date, try_parse_number};
use super::summary::ColumnType;

/// Rows inspected when looking for a stratification column
pub const CATEGORICAL_SCAN_ROWS: usize = 1000;
/// Rows inspected when looking for a date column
pub const DATE_SCAN_ROWS: usize = 100;
/// Non-missing values probed by the date rule
pub const DATE_PROBE_VALUES: usize = 10;
/// Sample rows inspected when picking correlation candidates
pub const CORRELATION_SCAN_ROWS: usize = 100;

const MIN_CATEGORIES: usize = 2;
const MAX_CATEGORIES: usize = 20;
const MAX_UNIQUE_RATIO: f64 = 0.5;

/// At least 70% of `total` values are numeric. Integer arithmetic keeps the
/// boundary exact: 70 of 100 qualifies, 69 does not.
pub fn meets_numeric_threshold(numeric: usize, total: usize) -> bool {
    total > 0 && numeric * 10 >= total * 7
}

/// Strictly more than 70% of `total` values are dates
fn meets_date_threshold(dates: usize, total: usize) -> bool {
    total > 0 && dates * 10 > total * 7
}

/// Non-missing values of a column, in row order
pub fn present_values<'a>(rows: &'a [Row], column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
    rows.iter().filter_map(move |row| row.present(column))
}

/// Per-column numeric classifier: enough of the values coerce to numbers
pub fn is_numeric_column(values: &[&Value]) -> bool {
    let numeric = values.iter().filter(|v| try_parse_number(v).is_some()).count();
    meets_numeric_threshold(numeric, values.len())
}

/// Date rule: more than 70% of the first ten values parse as dates
pub fn is_date_like<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a Value>,
{
    let probe: Vec<&Value> = values.into_iter().take(DATE_PROBE_VALUES).collect();
    let dates = probe.iter().filter(|v| try_parse_date(v).is_some()).count();
    meets_date_threshold(dates, probe.len())
}

/// Pick the column best suited for stratified sampling.
///
/// A column qualifies when, over the first 1000 rows, it has between 2 and 20
/// distinct values and fewer distinct values than half its non-missing count.
/// The lowest unique ratio wins; on a tie the earlier column is kept.
pub fn best_categorical_column(rows: &[Row], columns: &[String]) -> Option<String> {
    let window = &rows[..rows.len().min(CATEGORICAL_SCAN_ROWS)];
    let mut best: Option<(&String, f64)> = None;

    for column in columns {
        let mut count = 0usize;
        let mut unique = HashSet::new();

        for value in present_values(window, column) {
            count += 1;
            unique.insert(value);
        }

        if count == 0 || unique.len() < MIN_CATEGORIES || unique.len() > MAX_CATEGORIES {
            continue;
        }

        let unique_ratio = unique.len() as f64 / count as f64;
        if unique_ratio >= MAX_UNIQUE_RATIO {
            continue;
        }

        let score = 1.0 - unique_ratio;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((column, score));
        }
    }

    if let Some((column, score)) = best {
        debug!("Best categorical column '{}' (score {:.3})", column, score);
    }

    best.map(|(column, _)| column.clone())
}

/// Find the first column whose leading values look like dates
pub fn detect_date_column(rows: &[Row], columns: &[String]) -> Option<String> {
    let window = &rows[..rows.len().min(DATE_SCAN_ROWS)];

    columns
        .iter()
        .find(|column| is_date_like(present_values(window, column)))
        .cloned()
}

/// Numeric columns considered for correlation, judged on the first 100 sample
/// rows only. This can disagree with the per-column classifier, which sees
/// every sample row.
pub fn correlation_numeric_columns(sample: &[Row], columns: &[String]) -> Vec<String> {
    let window = &sample[..sample.len().min(CORRELATION_SCAN_ROWS)];

    columns
        .iter()
        .filter(|column| {
            let values: Vec<&Value> = present_values(window, column).collect();
            is_numeric_column(&values)
        })
        .cloned()
        .collect()
}

/// Infer the data-quality type of a column from all its non-missing values
pub fn infer_column_type(values: &[&Value]) -> ColumnType {
    if values.is_empty() {
        ColumnType::Empty
    } else if is_numeric_column(values) {
        ColumnType::Numeric
    } else if is_date_like(values.iter().take(DATE_SCAN_ROWS).copied()) {
        ColumnType::Date
    } else {
        ColumnType::Categorical
    }
}
