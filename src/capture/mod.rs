//! Frame acquisition
//!
//! Frames come from still image files here; live capture belongs to the
//! caller that owns the camera or screen.

pub mod frame;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

pub use frame::Frame;

/// Load a chart image from disk as a frame
pub fn load_frame(path: &Path) -> Result<Frame> {
    let image = image::open(path).with_context(|| format!("Failed to load chart image: {:?}", path))?;
    let frame = Frame::from_dynamic(image);
    let (width, height) = frame.dimensions();
    debug!("Loaded frame {:?} ({}x{})", path, width, height);
    Ok(frame)
}
