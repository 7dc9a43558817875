//! Message passing between the detector, the extraction worker and the UI
//!
//! Snapshots flow through a single-slot channel; requests and outcomes
//! flow through command/event channels. No state is shared by reference.

pub mod messages;
pub mod snapshot;

pub use messages::{WorkerCommand, WorkerEvent};
pub use snapshot::{snapshot_channel, FrameSnapshot, SnapshotPublisher, SnapshotReceiver};
