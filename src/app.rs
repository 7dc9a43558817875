//! Application Coordinator
//!
//! Runs chart extraction on a worker thread. The detector publishes
//! snapshots; the UI asks for a description and receives the outcome as an
//! event.

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

use crate::analysis::extract_data;
use crate::config::AppConfig;
use crate::shared::{snapshot_channel, SnapshotPublisher, SnapshotReceiver, WorkerCommand, WorkerEvent};
use crate::vision::TextRecognizer;

/// Main application coordinator
pub struct ChartReaderApp {
    /// Handle the detector side publishes snapshots through
    publisher: SnapshotPublisher,
    /// Channel to send commands to the worker
    to_worker: Sender<WorkerCommand>,
    /// Channel to receive outcomes from the worker
    from_worker: Receiver<WorkerEvent>,
    /// Handle to worker thread
    worker_handle: Option<JoinHandle<()>>,
}

impl ChartReaderApp {
    /// Create the coordinator and start the extraction worker
    pub fn start(config: AppConfig, recognizer: Arc<dyn TextRecognizer>) -> Result<Self> {
        let (publisher, snapshots) = snapshot_channel();
        let (to_worker, commands) = unbounded();
        let (events, from_worker) = unbounded();

        let handle = std::thread::Builder::new()
            .name("chart-extraction".to_string())
            .spawn(move || {
                info!("Extraction worker starting...");
                run_worker(config, recognizer, snapshots, commands, events);
                info!("Extraction worker exiting...");
            })?;

        Ok(Self {
            publisher,
            to_worker,
            from_worker,
            worker_handle: Some(handle),
        })
    }

    /// Handle for the detector side; cheap to clone
    pub fn publisher(&self) -> SnapshotPublisher {
        self.publisher.clone()
    }

    /// Request a description and block until the worker answers
    ///
    /// Takes `&mut self` so one request is in flight at a time and each
    /// answer pairs with its own request.
    pub fn describe_latest(&mut self) -> Result<WorkerEvent> {
        self.to_worker.send(WorkerCommand::Describe)?;
        Ok(self.from_worker.recv()?)
    }

    /// Check if the worker is running
    pub fn is_worker_running(&self) -> bool {
        self.worker_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ChartReaderApp {
    fn drop(&mut self) {
        // Signal worker to stop
        let _ = self.to_worker.send(WorkerCommand::Shutdown);

        // Wait for worker thread to finish
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker(
    config: AppConfig,
    recognizer: Arc<dyn TextRecognizer>,
    mut snapshots: SnapshotReceiver,
    commands: Receiver<WorkerCommand>,
    events: Sender<WorkerEvent>,
) {
    for command in commands.iter() {
        let event = match command {
            WorkerCommand::Shutdown => break,
            WorkerCommand::Describe => match snapshots.latest() {
                None => WorkerEvent::NoSnapshot,
                Some(snapshot) => {
                    match extract_data(&snapshot.detections, &snapshot.frame, recognizer.as_ref(), &config) {
                        Ok(result) => {
                            let text = result.describe();
                            WorkerEvent::Described { result, text }
                        }
                        Err(e) => {
                            warn!("Extraction failed: {}", e);
                            WorkerEvent::ExtractionFailed(e)
                        }
                    }
                }
            },
        };

        if events.send(event).is_err() {
            break;
        }
    }
}
