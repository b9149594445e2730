//! Gesture pipeline - frame handler, window timer and lifecycle

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use armturn_core::{AngleSet, ArmturnError, ArmturnResult, SensorFrame};
use armturn_gesture::{
    AngleCalculator, GestureStateStore, QueryResponder, TickOutcome, WindowAggregator,
    WindowSnapshot,
};

use crate::PipelineConfig;

/// Pipeline counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames handed to the pipeline while running
    pub frames: u64,
    /// Frames handed to the pipeline while stopped
    pub frames_dropped: u64,
    /// Processed frames carrying at least one body
    pub body_frames: u64,
    /// Fully tracked bodies that produced angles
    pub tracked_bodies: u64,
    /// Bodies reported with a center position only
    pub position_only_bodies: u64,
    /// Tracked bodies whose angles could not be computed
    pub angle_failures: u64,
    /// Windows closed
    pub ticks: u64,
    /// Windows that saw a full turn
    pub detections: u64,
    /// Most recent angle set
    pub last_angles: Option<AngleSet>,
}

/// Whether the pipeline is doing gesture processing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStatus {
    /// Never started, or stopped
    NotRunning,
    /// Timer running but no frame source attached
    NoSensor,
    Running,
}

impl PipelineStatus {
    pub fn description(&self) -> &'static str {
        match self {
            PipelineStatus::NotRunning => "Not running",
            PipelineStatus::NoSensor => "No sensor ready",
            PipelineStatus::Running => "Running",
        }
    }
}

/// What happened to one sensor frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Pipeline stopped; frame ignored
    Dropped,
    Processed(FrameReport),
}

/// Per-frame processing summary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Angles of each tracked body that could be computed
    pub angles: Vec<AngleSet>,
    pub position_only: usize,
    pub failures: usize,
}

struct WindowTimer {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// The gesture detection pipeline
pub struct Pipeline {
    config: PipelineConfig,
    calculator: AngleCalculator,
    aggregator: Arc<WindowAggregator>,
    stats: Arc<Mutex<PipelineStats>>,
    running: AtomicBool,
    sensor_attached: AtomicBool,
    timer: Mutex<Option<WindowTimer>>,
}

fn record_tick(aggregator: &WindowAggregator, stats: &Mutex<PipelineStats>) -> TickOutcome {
    let outcome = aggregator.tick();
    let mut stats = stats.lock();
    stats.ticks += 1;
    if outcome.detected {
        stats.detections += 1;
    }
    outcome
}

impl Pipeline {
    /// Create a stopped pipeline
    pub fn new(config: PipelineConfig) -> ArmturnResult<Self> {
        config.validate()?;
        Ok(Pipeline {
            aggregator: Arc::new(WindowAggregator::new(config.buckets)),
            config,
            calculator: AngleCalculator::new(),
            stats: Arc::new(Mutex::new(PipelineStats::default())),
            running: AtomicBool::new(false),
            sensor_attached: AtomicBool::new(false),
            timer: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Start the window timer. Must be called from within a tokio runtime.
    pub fn start(&self) -> ArmturnResult<()> {
        let mut timer = self.timer.lock();
        if timer.is_some() {
            return Err(ArmturnError::AlreadyRunning);
        }
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| ArmturnError::Runtime(e.to_string()))?;

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let aggregator = Arc::clone(&self.aggregator);
        let stats = Arc::clone(&self.stats);
        let period = self.config.window_period;

        // Flags left from a previous run belong to no window
        let stale = self.aggregator.reset();
        if !stale.is_empty() {
            debug!(flags = %stale, "Discarded unfinished window");
        }

        let task = handle.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        record_tick(&aggregator, &stats);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("Window timer stopped");
        });

        *timer = Some(WindowTimer { shutdown, task });
        self.running.store(true, Ordering::Release);
        info!(period = ?period, "Pipeline started");
        Ok(())
    }

    /// Stop the window timer and wait for it to exit.
    /// Frames handed in afterwards are dropped.
    pub async fn stop(&self) -> ArmturnResult<()> {
        let timer = self.timer.lock().take();
        let Some(timer) = timer else {
            return Err(ArmturnError::NotRunning);
        };

        self.running.store(false, Ordering::Release);
        let _ = timer.shutdown.send(true);
        if let Err(e) = timer.task.await {
            warn!("Window timer task failed: {}", e);
        }
        info!("Pipeline stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn status(&self) -> PipelineStatus {
        if !self.is_running() {
            PipelineStatus::NotRunning
        } else if !self.sensor_attached.load(Ordering::Acquire) {
            PipelineStatus::NoSensor
        } else {
            PipelineStatus::Running
        }
    }

    /// Mark a frame source as connected
    pub fn attach_sensor(&self) {
        self.sensor_attached.store(true, Ordering::Release);
    }

    /// Mark the frame source as gone
    pub fn detach_sensor(&self) {
        self.sensor_attached.store(false, Ordering::Release);
    }

    /// Process one sensor frame. Non-blocking; safe to call from the
    /// sensor's delivery thread.
    pub fn handle_frame(&self, frame: &SensorFrame) -> FrameOutcome {
        if !self.is_running() {
            self.stats.lock().frames_dropped += 1;
            return FrameOutcome::Dropped;
        }

        let mut report = FrameReport {
            position_only: frame.position_only_count(),
            ..FrameReport::default()
        };

        for body in frame.tracked_bodies() {
            match self.calculator.compute(&body.skeleton) {
                Ok(angles) => {
                    self.aggregator.observe_angles(&angles);
                    report.angles.push(angles);
                }
                Err(e) => {
                    debug!(frame = frame.number, "Cannot compute angles: {}", e);
                    report.failures += 1;
                }
            }
        }

        let mut stats = self.stats.lock();
        stats.frames += 1;
        if !frame.bodies.is_empty() {
            stats.body_frames += 1;
        }
        stats.tracked_bodies += report.angles.len() as u64;
        stats.position_only_bodies += report.position_only as u64;
        stats.angle_failures += report.failures as u64;
        if let Some(last) = report.angles.last() {
            stats.last_angles = Some(*last);
        }

        FrameOutcome::Processed(report)
    }

    /// Close the current window immediately, outside the timer schedule
    pub fn close_window(&self) -> TickOutcome {
        record_tick(&self.aggregator, &self.stats)
    }

    /// Read handle to the detection result
    pub fn store(&self) -> GestureStateStore {
        self.aggregator.store()
    }

    /// Responder for the messaging bridge
    pub fn responder(&self) -> QueryResponder {
        QueryResponder::new(self.aggregator.store())
    }

    /// Flags of the open window
    pub fn window(&self) -> WindowSnapshot {
        self.aggregator.snapshot()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats.lock().clone()
    }

    /// Status-bar text: latest angles followed by the window flags
    pub fn status_line(&self) -> String {
        let last = self.stats.lock().last_angles;
        match last {
            Some(angles) => format!("{}\t{}", angles, self.window()),
            None => self.status().description().to_string(),
        }
    }
}
