//! Frame pump - moves sensor frames from a channel into the pipeline

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use armturn_core::SensorFrame;

use crate::{FrameOutcome, Pipeline};

/// Frame sender handed to the sensor side
pub type FrameSender = mpsc::Sender<SensorFrame>;

/// Frame receiver drained by the pump
pub type FrameReceiver = mpsc::Receiver<SensorFrame>;

/// Create a bounded frame channel
pub fn frame_channel(buffer_size: usize) -> (FrameSender, FrameReceiver) {
    mpsc::channel(buffer_size)
}

/// Start a background loop feeding frames into the pipeline.
///
/// The sensor counts as attached while the loop runs. The loop ends when
/// every sender is dropped and resolves to the number of frames processed.
pub fn spawn_frame_pump(pipeline: Arc<Pipeline>, mut frames: FrameReceiver) -> JoinHandle<u64> {
    pipeline.attach_sensor();

    tokio::spawn(async move {
        let mut processed = 0u64;
        while let Some(frame) = frames.recv().await {
            match pipeline.handle_frame(&frame) {
                FrameOutcome::Processed(_) => processed += 1,
                FrameOutcome::Dropped => debug!(frame = frame.number, "Frame dropped"),
            }
        }
        pipeline.detach_sensor();
        info!(processed, "Frame source closed");
        processed
    })
}
