// Statistical summarization of a sample and its source dataset
// Author: Gabriel Demetrios Lafis

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::data::{DataSet, Row, Value};
use super::coerce::try_parse_number;
use super::detect::{correlation_numeric_columns, infer_column_type, meets_numeric_threshold, present_values};
use super::progress::{Checkpoint, ProgressSink};
use super::stats::{
    compute_correlation, compute_max, compute_mean, compute_median, compute_min,
    compute_quartiles, compute_std_dev, round_to,
};
use super::summary::{
    CategoricalStats, ColumnStat, DataQuality, NumericStats, Overview, Patterns, Summary,
    ValueCount,
};

/// Most frequent values kept per categorical column
pub const TOP_VALUES: usize = 10;
/// Correlations at or below this magnitude are not reported
pub const CORRELATION_THRESHOLD: f64 = 0.3;
/// Leading rows of the full dataset checked for exact duplicates
pub const DUPLICATE_SCAN_ROWS: usize = 1000;

/// Builds a `Summary` from a sample and the dataset it was drawn from.
///
/// Column statistics and correlations are computed on the sample; missing
/// values and column types on the full dataset; duplicates on its first 1000 rows.
pub struct Summarizer;

impl Summarizer {
    /// Summarize, reporting progress at 40, 60, 80 and 100 percent
    pub fn summarize(sample: &DataSet, full: &DataSet, progress: &mut dyn ProgressSink) -> Summary {
        progress.report(Checkpoint::Summarizing.percent());

        if full.is_empty() {
            progress.report(Checkpoint::Done.percent());
            return Summary::empty();
        }

        let columns = full.columns();

        let overview = Overview {
            total_rows: full.len(),
            total_columns: columns.len(),
            columns: columns.clone(),
            sample_size: sample.len(),
        };

        let statistics = columns
            .iter()
            .map(|column| (column.clone(), Self::column_stat(&sample.data, column)))
            .collect();
        progress.report(Checkpoint::ColumnStats.percent());

        let patterns = Patterns {
            correlations: Self::correlations(&sample.data, &columns),
            ..Patterns::default()
        };
        progress.report(Checkpoint::Correlations.percent());

        let data_quality = Self::data_quality(&full.data, &columns);
        progress.report(Checkpoint::Done.percent());

        Summary {
            overview,
            statistics,
            patterns,
            data_quality,
        }
    }

    /// Numeric stats when enough values coerce to numbers, categorical otherwise
    pub fn column_stat(rows: &[Row], column: &str) -> ColumnStat {
        let values: Vec<&Value> = present_values(rows, column).collect();
        let numbers: Vec<f64> = values.iter().filter_map(|v| try_parse_number(v)).collect();

        if meets_numeric_threshold(numbers.len(), values.len()) {
            ColumnStat::Numeric(NumericStats {
                count: numbers.len(),
                mean: compute_mean(&numbers),
                median: compute_median(&numbers),
                min: compute_min(&numbers),
                max: compute_max(&numbers),
                std_dev: compute_std_dev(&numbers),
                quartiles: compute_quartiles(&numbers),
            })
        } else {
            ColumnStat::Categorical(Self::categorical_stats(&values))
        }
    }

    fn categorical_stats(values: &[&Value]) -> CategoricalStats {
        // Frequency table in first-seen order
        let mut index: HashMap<&Value, usize> = HashMap::new();
        let mut counts: Vec<(&Value, usize)> = Vec::new();

        for &value in values {
            match index.get(value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        let unique = counts.len();

        // Stable, so ties keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_VALUES);

        CategoricalStats {
            count: values.len(),
            unique,
            top_values: counts
                .into_iter()
                .map(|(value, count)| ValueCount { value: value.clone(), count })
                .collect(),
        }
    }

    /// Pearson coefficients above the threshold for each pair of numeric columns,
    /// keyed `"a_b"` in column order and rounded to three decimals
    pub fn correlations(sample: &[Row], columns: &[String]) -> IndexMap<String, f64> {
        let numeric = correlation_numeric_columns(sample, columns);
        let mut correlations = IndexMap::new();

        for (i, a) in numeric.iter().enumerate() {
            for b in &numeric[i + 1..] {
                // Pairs with an unparsable side are dropped
                let (xs, ys): (Vec<f64>, Vec<f64>) = sample
                    .iter()
                    .filter_map(|row| {
                        let x = try_parse_number(row.get(a)?)?;
                        let y = try_parse_number(row.get(b)?)?;
                        Some((x, y))
                    })
                    .unzip();

                let r = compute_correlation(&xs, &ys);
                if !r.is_nan() && r.abs() > CORRELATION_THRESHOLD {
                    correlations.insert(format!("{}_{}", a, b), round_to(r, 3));
                }
            }
        }

        debug!(
            "{} correlated pairs among {} numeric columns",
            correlations.len(),
            numeric.len()
        );
        correlations
    }

    /// Missing counts and types over every row, duplicates over the leading rows
    pub fn data_quality(rows: &[Row], columns: &[String]) -> DataQuality {
        let mut quality = DataQuality::default();

        for column in columns {
            let values: Vec<&Value> = present_values(rows, column).collect();
            quality.missing_values.insert(column.clone(), rows.len() - values.len());
            quality.data_types.insert(column.clone(), infer_column_type(&values));
        }

        let mut seen: HashSet<&Row> = HashSet::new();
        quality.duplicates = rows
            .iter()
            .take(DUPLICATE_SCAN_ROWS)
            .filter(|&row| !seen.insert(row))
            .count();

        quality
    }
}
