//! ARMTURN Console Bridge
//!
//! Stands in for the chat bot: every line typed is treated as an incoming
//! message body and answered from the gesture pipeline. A simulated sensor
//! feeds the pipeline at ~30 fps.
//!
//! Usage: `turn-bridge [config.json]`

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::interval;
use tracing::{info, warn};

use armturn_runtime::{
    frame_channel, init_logging, spawn_frame_pump, FrameSender, Pipeline, RuntimeConfig,
};
use armturn_test::{ArmMotion, ArmSimulator, SimulatorConfig};

/// Drive the pipeline from a simulated body until the motion channel closes
async fn run_sensor(tx: FrameSender, mut motion: watch::Receiver<ArmMotion>) {
    let mut sim = ArmSimulator::new(*motion.borrow(), SimulatorConfig::noisy());
    let mut ticker = interval(sim.frame_interval());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if tx.send(sim.next_frame()).await.is_err() {
                    break;
                }
            }
            changed = motion.changed() => {
                if changed.is_err() {
                    break;
                }
                sim.set_motion(*motion.borrow());
            }
        }
    }
}

/// One line of console input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Turn,
    Still,
    Status,
    Help,
    /// Message body for the responder, exactly as typed
    Message(&'a str),
}

impl<'a> Command<'a> {
    /// Console commands tolerate padding; message bodies go through as typed
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" => Command::Quit,
            "/turn" => Command::Turn,
            "/still" => Command::Still,
            "/status" => Command::Status,
            "/help" => Command::Help,
            _ => Command::Message(line),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  kinect   - Ask whether the arm turned in the last window");
    println!("  /turn    - Start turning the simulated arm");
    println!("  /still   - Hold the simulated arm still");
    println!("  /status  - Show angles, window flags and counters");
    println!("  /quit    - Exit");
    println!("Anything else is answered as an unrecognized request.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };
    config.apply_env()?;
    init_logging(config.log_format)?;

    if config.bridge.is_complete() {
        info!(server = %config.bridge.server, user = %config.bridge.username, "Bridge session configured");
    } else {
        warn!("Bridge credentials incomplete; running console only");
    }

    let pipeline = Arc::new(Pipeline::new(config.pipeline.clone())?);
    pipeline.start()?;
    let responder = pipeline.responder();

    let (frame_tx, frame_rx) = frame_channel(64);
    let pump = spawn_frame_pump(Arc::clone(&pipeline), frame_rx);

    let (motion_tx, motion_rx) = watch::channel(ArmMotion::still());
    let sensor = tokio::spawn(run_sensor(frame_tx, motion_rx));

    // Read stdin on a plain thread
    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let pipeline_config = pipeline.config();
    println!(
        "ARMTURN console bridge (window {:?}, buckets {:?})",
        pipeline_config.window_period,
        pipeline_config.buckets.edges()
    );
    print_help();
    print!("> ");
    io::stdout().flush()?;

    while let Some(line) = line_rx.recv().await {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Turn => {
                motion_tx.send_replace(ArmMotion::turning());
                println!("Arm turning");
            }
            Command::Still => {
                motion_tx.send_replace(ArmMotion::still());
                println!("Arm still");
            }
            Command::Status => {
                let stats = pipeline.stats();
                println!("{}", pipeline.status_line());
                println!(
                    "frames={} windows={} detections={} failures={}",
                    stats.frames, stats.ticks, stats.detections, stats.angle_failures
                );
            }
            Command::Help => print_help(),
            Command::Message(body) => println!("{}", responder.respond(body).body()),
        }
        print!("> ");
        io::stdout().flush()?;
    }

    drop(motion_tx);
    if let Err(e) = sensor.await {
        warn!("Sensor task failed: {}", e);
    }
    let frames = pump.await?;
    pipeline.stop().await?;
    info!(frames, "Bridge closed");

    println!("Goodbye!");
    Ok(())
}
