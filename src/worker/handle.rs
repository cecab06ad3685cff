// Background worker thread and its handle
// Author: Gabriel Demetrios Lafis

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::data::DataSet;
use crate::processing::{Analysis, ProgressSink, SummaryPipeline};
use crate::utils::EngineConfig;
use super::{WorkerError, WorkerMessage};

const WORKER_THREAD_NAME: &str = "summary-worker";

/// Spawns pipeline runs on a dedicated thread
pub struct SummaryWorker;

impl SummaryWorker {
    /// Start a pipeline run. Messages stream back through the returned handle.
    pub fn spawn<D: Into<Arc<DataSet>>>(data: D, config: &EngineConfig) -> Result<WorkerHandle, WorkerError> {
        let pipeline = SummaryPipeline::from_config(config)?;
        Self::spawn_job(data, move |data: &DataSet, progress: &mut dyn ProgressSink| {
            pipeline.execute(data, progress)
        })
    }

    /// Start an arbitrary summary job on the worker thread. A panic inside the
    /// job is reported as a single `ERROR` message.
    pub fn spawn_job<D, F>(data: D, job: F) -> Result<WorkerHandle, WorkerError>
    where
        D: Into<Arc<DataSet>>,
        F: FnOnce(&DataSet, &mut dyn ProgressSink) -> Analysis + Send + 'static,
    {
        let data = data.into();
        let (tx, rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Self::work(job, &data, tx))?;

        Ok(WorkerHandle {
            receiver: rx,
            thread: Some(thread),
        })
    }

    fn work<F>(job: F, data: &DataSet, tx: Sender<WorkerMessage>)
    where
        F: FnOnce(&DataSet, &mut dyn ProgressSink) -> Analysis,
    {
        // Send errors mean the host hung up; the run is simply discarded
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut forward = |progress: u8| {
                let _ = tx.send(WorkerMessage::Progress { progress });
            };
            job(data, &mut forward)
        }));

        let message = match result {
            Ok(analysis) => WorkerMessage::Complete { data: analysis },
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!("Summary worker failed: {}", reason);
                WorkerMessage::Error { error: reason }
            }
        };

        let _ = tx.send(message);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "summary worker panicked".to_string()
    }
}

/// Host side of a running worker
pub struct WorkerHandle {
    receiver: Receiver<WorkerMessage>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Block for the next message; `None` once the worker is gone
    pub fn recv(&self) -> Option<WorkerMessage> {
        self.receiver.recv().ok()
    }

    /// Iterate over messages until the worker finishes
    pub fn iter(&self) -> impl Iterator<Item = WorkerMessage> + '_ {
        self.receiver.iter()
    }

    /// Forward progress and return the terminal result
    pub fn wait(mut self, progress: &mut dyn ProgressSink) -> Result<Analysis, WorkerError> {
        let outcome = loop {
            match self.recv() {
                Some(WorkerMessage::Progress { progress: percent }) => progress.report(percent),
                Some(WorkerMessage::Complete { data }) => break Ok(data),
                Some(WorkerMessage::Error { error }) => break Err(WorkerError::Failed(error)),
                None => break Err(WorkerError::Disconnected),
            }
        };

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("Summary worker thread ended with a panic");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_reports_a_closed_channel() {
        let (tx, rx) = mpsc::channel();
        tx.send(WorkerMessage::Progress { progress: 20 }).unwrap();
        drop(tx);

        let handle = WorkerHandle { receiver: rx, thread: None };
        let mut seen = Vec::new();
        let result = handle.wait(&mut |p: u8| seen.push(p));

        assert!(matches!(result, Err(WorkerError::Disconnected)));
        assert_eq!(seen, vec![20]);
    }
}
