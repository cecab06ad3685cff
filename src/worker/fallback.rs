// Host-side execution with a degraded fallback
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use log::warn;

use crate::data::DataSet;
use crate::processing::{
    fallback_analysis, Analysis, Checkpoint, ProgressSink, ProgressTracker, SummaryPipeline,
};
use crate::utils::EngineConfig;
use super::{SummaryWorker, WorkerError};

/// Summarize a dataset the way a host should: on a background worker when
/// enabled, otherwise in-line. If the worker cannot start or fails, the
/// degraded fallback is returned instead of retrying. Progress always ends at 100.
pub fn run_with_fallback<D: Into<Arc<DataSet>>>(
    data: D,
    config: &EngineConfig,
    progress: &mut dyn ProgressSink,
) -> Analysis {
    let data = data.into();

    match SummaryPipeline::from_config(config) {
        Ok(pipeline) if config.use_worker => run_job_with_fallback(
            data,
            move |data: &DataSet, progress: &mut dyn ProgressSink| pipeline.execute(data, progress),
            progress,
        ),
        Ok(pipeline) => {
            let mut tracker = ProgressTracker::new(progress);
            let analysis = pipeline.execute(&data, &mut tracker);
            finish(&data, Ok(analysis), tracker)
        }
        Err(err) => finish(&data, Err(err.into()), ProgressTracker::new(progress)),
    }
}

/// Run `job` on a background worker, forwarding its progress. A worker that
/// cannot start, reports `ERROR` or disconnects yields the degraded fallback.
pub fn run_job_with_fallback<D, F>(data: D, job: F, progress: &mut dyn ProgressSink) -> Analysis
where
    D: Into<Arc<DataSet>>,
    F: FnOnce(&DataSet, &mut dyn ProgressSink) -> Analysis + Send + 'static,
{
    let data = data.into();
    let mut tracker = ProgressTracker::new(progress);

    let result = SummaryWorker::spawn_job(Arc::clone(&data), job)
        .and_then(|handle| handle.wait(&mut tracker));

    finish(&data, result, tracker)
}

fn finish(
    data: &DataSet,
    result: Result<Analysis, WorkerError>,
    mut tracker: ProgressTracker<'_>,
) -> Analysis {
    let analysis = match result {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!("Falling back to overview-only summary: {}", err);
            fallback_analysis(data)
        }
    };

    tracker.checkpoint(Checkpoint::Done);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    #[test]
    fn disconnect_degrades_to_fallback() {
        let data: DataSet = (0..3).map(|i| Row::new().with("i", i)).collect();
        let mut seen = Vec::new();

        let analysis = {
            let mut sink = |p: u8| seen.push(p);
            let mut tracker = ProgressTracker::new(&mut sink);
            tracker.report(40);
            finish(&data, Err(WorkerError::Disconnected), tracker)
        };

        assert_eq!(analysis, fallback_analysis(&data));
        assert_eq!(seen, vec![40, 100]);
    }
}
