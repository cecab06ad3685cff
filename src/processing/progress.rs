// Progress reporting for pipeline runs
// Author: Gabriel Demetrios Lafis

/// Receives percentage updates (0..=100) from a pipeline run
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards every update
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// The five checkpoints a run passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Checkpoint {
    Sampling,
    Summarizing,
    ColumnStats,
    Correlations,
    Done,
}

impl Checkpoint {
    pub fn percent(self) -> u8 {
        match self {
            Checkpoint::Sampling => 20,
            Checkpoint::Summarizing => 40,
            Checkpoint::ColumnStats => 60,
            Checkpoint::Correlations => 80,
            Checkpoint::Done => 100,
        }
    }
}

/// Wraps a sink so it only sees values above the last one reported
pub struct ProgressTracker<'a> {
    sink: &'a mut dyn ProgressSink,
    last: Option<u8>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        ProgressTracker { sink, last: None }
    }

    /// Report a checkpoint unless it or a later one was already reported
    pub fn checkpoint(&mut self, checkpoint: Checkpoint) {
        self.report(checkpoint.percent());
    }

    pub fn report(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.last.map_or(true, |last| percent > last) {
            self.last = Some(percent);
            self.sink.report(percent);
        }
    }

    /// Last value forwarded to the sink
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

impl ProgressSink for ProgressTracker<'_> {
    fn report(&mut self, percent: u8) {
        ProgressTracker::report(self, percent)
    }
}
