//! Message types for communication with the extraction worker

use crate::analysis::ExtractionResult;
use crate::error::ExtractionError;

/// Messages sent to the extraction worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Describe the latest published snapshot
    Describe,
    /// Request the worker to shutdown
    Shutdown,
}

/// Messages sent back by the extraction worker
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Extraction succeeded
    Described {
        result: ExtractionResult,
        /// Sentences ready for display or speech synthesis
        text: String,
    },
    /// Extraction failed for this snapshot; try again with a later frame
    ExtractionFailed(ExtractionError),
    /// Nothing has been published yet
    NoSnapshot,
}
