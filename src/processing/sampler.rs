// Representative sampling of large datasets
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::{DataSet, Row, Value};
use super::coerce::try_parse_date;
use super::detect::{best_categorical_column, detect_date_column};

/// Default upper bound on the sample size
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// How a sample was drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// The dataset already fit; returned unchanged
    Identity,
    /// Proportional draw per value of a categorical column
    Stratified { column: String },
    /// Evenly spaced rows after sorting by a date column
    TimeBased { column: String },
    /// Uniform draw without replacement
    Random,
}

/// Sampler reducing a dataset to at most `sample_size` rows
pub struct Sampler {
    sample_size: usize,
}

impl Sampler {
    /// Create a new sampler
    pub fn new(sample_size: usize) -> Self {
        Sampler { sample_size }
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Draw a sample using the first applicable strategy
    pub fn sample<R: Rng + ?Sized>(&self, data: &DataSet, rng: &mut R) -> DataSet {
        self.sample_with_strategy(data, rng).0
    }

    /// Draw a sample and report which strategy produced it
    pub fn sample_with_strategy<R: Rng + ?Sized>(
        &self,
        data: &DataSet,
        rng: &mut R,
    ) -> (DataSet, SamplingStrategy) {
        let rows = &data.data;
        if rows.len() <= self.sample_size {
            return (data.clone(), SamplingStrategy::Identity);
        }

        let columns = data.columns();

        let (indices, strategy) = if let Some(column) = best_categorical_column(rows, &columns) {
            let indices = self.stratified_indices(rows, &column, rng);
            (indices, SamplingStrategy::Stratified { column })
        } else if let Some(column) = detect_date_column(rows, &columns) {
            let indices = self.time_based_indices(rows, &column);
            (indices, SamplingStrategy::TimeBased { column })
        } else {
            (self.random_indices(rows.len(), rng), SamplingStrategy::Random)
        };

        debug!(
            "Sampled {} of {} rows using {:?}",
            indices.len(),
            rows.len(),
            strategy
        );

        let sample = indices.into_iter().map(|i| rows[i].clone()).collect();
        (sample, strategy)
    }

    /// Proportional allocation per group, topped up at random and cut to size
    fn stratified_indices<R: Rng + ?Sized>(&self, rows: &[Row], column: &str, rng: &mut R) -> Vec<usize> {
        let total = rows.len();

        // Groups in first-seen order; missing and null share the null group
        let null = Value::Null;
        let mut group_of: HashMap<&Value, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let key = row.get(column).unwrap_or(&null);
            let group = *group_of.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(i);
        }

        let mut selected = Vec::with_capacity(self.sample_size);
        let mut taken = vec![false; total];

        for mut group in groups {
            let group_sample_size = group.len() * self.sample_size / total;
            group.shuffle(rng);

            for &i in group.iter().take(group_sample_size) {
                taken[i] = true;
                selected.push(i);
            }
        }

        if selected.len() < self.sample_size {
            let mut remaining: Vec<usize> = (0..total).filter(|&i| !taken[i]).collect();
            remaining.shuffle(rng);
            let needed = self.sample_size - selected.len();
            selected.extend(remaining.into_iter().take(needed));
        }

        selected.truncate(self.sample_size);
        selected
    }

    /// Evenly spaced rows in ascending date order; unparsable dates sort last
    fn time_based_indices(&self, rows: &[Row], column: &str) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let keys: Vec<_> = rows
            .iter()
            .map(|row| row.get(column).and_then(try_parse_date))
            .collect();

        // Stable: equal dates keep their original order
        order.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let step = (rows.len() / self.sample_size.max(1)).max(1);
        order
            .into_iter()
            .step_by(step)
            .take(self.sample_size)
            .collect()
    }

    /// Uniform shuffle, keeping the first `sample_size` indices
    fn random_indices<R: Rng + ?Sized>(&self, total: usize, rng: &mut R) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..total).collect();
        indices.shuffle(rng);
        indices.truncate(self.sample_size);
        indices
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}
