// Processing module: sampling and summarization
// Author: Gabriel Demetrios Lafis

mod coerce;
mod detect;
mod pipeline;
mod progress;
mod sampler;
mod stats;
mod summarizer;
mod summary;

pub use coerce::*;
pub use detect::*;
pub use pipeline::*;
pub use progress::*;
pub use sampler::*;
pub use stats::*;
pub use summarizer::*;
pub use summary::*;

use thiserror::Error;

use crate::data::DataError;

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
