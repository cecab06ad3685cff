// Sampling and summarization pipeline
// Author: Gabriel Demetrios Lafis

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::DataSet;
use crate::utils::EngineConfig;
use super::progress::{Checkpoint, ProgressSink, ProgressTracker};
use super::sampler::{Sampler, DEFAULT_SAMPLE_SIZE};
use super::summarizer::Summarizer;
use super::summary::{Analysis, Overview, Summary};
use super::ProcessingError;

/// Build the random source for a run: seeded when reproducibility is wanted
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Samples a dataset, then summarizes the sample against the full dataset.
///
/// The pipeline holds no state between runs; progress goes to the sink passed
/// into each run and never decreases.
pub struct SummaryPipeline {
    sampler: Sampler,
    seed: Option<u64>,
}

impl SummaryPipeline {
    /// Create a pipeline with the given sample size
    pub fn new(sample_size: usize) -> Result<Self, ProcessingError> {
        if sample_size == 0 {
            return Err(ProcessingError::InvalidArgument(
                "sample size must be positive".to_string(),
            ));
        }

        Ok(SummaryPipeline {
            sampler: Sampler::new(sample_size),
            seed: None,
        })
    }

    /// Create a pipeline from engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, ProcessingError> {
        Ok(Self::new(config.sample_size)?.with_seed(config.seed))
    }

    /// Use a fixed seed for runs that do not supply their own random source
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sampler.sample_size()
    }

    /// Run with the configured seed, or entropy when none is set
    pub fn execute(&self, data: &DataSet, progress: &mut dyn ProgressSink) -> Analysis {
        let mut rng = make_rng(self.seed);
        self.run(data, progress, &mut rng)
    }

    /// Run with a caller-supplied random source
    pub fn run<R: Rng + ?Sized>(
        &self,
        data: &DataSet,
        progress: &mut dyn ProgressSink,
        rng: &mut R,
    ) -> Analysis {
        let mut tracker = ProgressTracker::new(progress);

        tracker.checkpoint(Checkpoint::Sampling);
        let (sample, strategy) = self.sampler.sample_with_strategy(data, rng);

        let summary = Summarizer::summarize(&sample, data, &mut tracker);

        info!(
            "Summarized {} rows x {} columns from a {}-row sample ({:?})",
            summary.overview.total_rows,
            summary.overview.total_columns,
            summary.overview.sample_size,
            strategy
        );

        Analysis { sample, summary }
    }
}

impl Default for SummaryPipeline {
    fn default() -> Self {
        SummaryPipeline {
            sampler: Sampler::default(),
            seed: None,
        }
    }
}

/// Run the default pipeline (1000-row sample, entropy-seeded)
pub fn run(data: &DataSet, progress: &mut dyn ProgressSink) -> Analysis {
    SummaryPipeline::default().execute(data, progress)
}

/// Degraded result used when a full run is unavailable: the first 1000 rows
/// unmodified and an overview-only summary.
pub fn fallback_analysis(data: &DataSet) -> Analysis {
    let sample: DataSet = data.head(DEFAULT_SAMPLE_SIZE).to_vec().into();
    let columns = data.columns();

    let summary = Summary {
        overview: Overview {
            total_rows: data.len(),
            total_columns: columns.len(),
            columns,
            sample_size: sample.len(),
        },
        ..Summary::empty()
    };

    Analysis { sample, summary }
}
