//! Single-slot channel carrying the latest detection snapshot
//!
//! The detector side publishes `(detections, frame)` pairs as fast as it
//! produces them; the extraction side only ever wants the newest one.
//! Publishing into a full slot replaces the stale snapshot.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

use crate::capture::Frame;
use crate::vision::RawDetection;

/// Immutable detections plus the frame they were produced from
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub detections: Vec<RawDetection>,
    pub frame: Frame,
}

impl FrameSnapshot {
    pub fn new(detections: Vec<RawDetection>, frame: Frame) -> Self {
        Self { detections, frame }
    }
}

/// Detector-side handle
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    tx: Sender<Arc<FrameSnapshot>>,
    // Used to evict the unconsumed snapshot when the slot is full
    evict: Receiver<Arc<FrameSnapshot>>,
}

/// Extraction-side handle
#[derive(Debug, Clone)]
pub struct SnapshotReceiver {
    rx: Receiver<Arc<FrameSnapshot>>,
    current: Option<Arc<FrameSnapshot>>,
}

/// Create a connected publisher/receiver pair
pub fn snapshot_channel() -> (SnapshotPublisher, SnapshotReceiver) {
    let (tx, rx) = bounded(1);
    (
        SnapshotPublisher { tx, evict: rx.clone() },
        SnapshotReceiver { rx, current: None },
    )
}

impl SnapshotPublisher {
    /// Publish a snapshot, replacing any snapshot not yet picked up
    pub fn publish(&self, snapshot: FrameSnapshot) {
        let mut snapshot = Arc::new(snapshot);
        // The publisher holds a receiver too, so the slot never disconnects
        while let Err(TrySendError::Full(back)) = self.tx.try_send(snapshot) {
            let _ = self.evict.try_recv();
            snapshot = back;
        }
    }
}

impl SnapshotReceiver {
    /// Newest snapshot published so far, without blocking
    ///
    /// Keeps returning the last snapshot until a newer one arrives.
    pub fn latest(&mut self) -> Option<Arc<FrameSnapshot>> {
        while let Ok(snapshot) = self.rx.try_recv() {
            self.current = Some(snapshot);
        }
        self.current.clone()
    }
}
