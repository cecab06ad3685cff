// Worker module: runs the pipeline off the caller's thread
// Author: Gabriel Demetrios Lafis

mod fallback;
mod handle;
mod message;

pub use fallback::*;
pub use handle::*;
pub use message::*;

use thiserror::Error;

use crate::processing::ProcessingError;

/// Represents an error in the worker module
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The background thread could not be started
    #[error("Worker unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    /// The pipeline could not be configured
    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),
    /// The worker reported a failure as its terminal message
    #[error("Worker failed: {0}")]
    Failed(String),
    /// The worker went away without a terminal message
    #[error("Worker disconnected before completing")]
    Disconnected,
}
