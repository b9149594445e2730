//! End-to-end tests: simulator → frame pump → pipeline → responder

use std::sync::Arc;
use std::time::Duration;

use armturn_core::SensorFrame;
use armturn_gesture::{GestureResponse, UNRECOGNIZED_TEXT, UNRECOGNIZED_XHTML};
use armturn_runtime::{
    frame_channel, spawn_frame_pump, FrameOutcome, FrameSender, Pipeline, PipelineConfig,
    PipelineStatus, RuntimeConfig,
};

use crate::{frame_with_right_elbow, ArmMotion, ArmSimulator, ScenarioRunner, SimulatorConfig};

/// Send frames at the simulator's rate for `duration` of tokio time
async fn feed(tx: &FrameSender, sim: &mut ArmSimulator, duration: Duration) {
    let end = tokio::time::Instant::now() + duration;
    while tokio::time::Instant::now() < end {
        tx.send(sim.next_frame()).await.unwrap();
        tokio::time::sleep(sim.frame_interval()).await;
    }
}

fn feed_sync(pipeline: &Pipeline, degrees: &[f64]) {
    for (i, &d) in degrees.iter().enumerate() {
        let outcome = pipeline.handle_frame(&frame_with_right_elbow(i as u64, d));
        assert!(matches!(outcome, FrameOutcome::Processed(_)));
    }
}

#[tokio::test]
async fn test_full_sweep_then_partial_sweep() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    pipeline.start().unwrap();
    let responder = pipeline.responder();

    feed_sync(&pipeline, &[20.0, 60.0, 100.0, 140.0]);
    assert!(pipeline.close_window().detected);
    assert!(pipeline.window().is_empty());
    assert_eq!(responder.respond("kinect").body(), "kinect:True");

    feed_sync(&pipeline, &[20.0, 60.0, 100.0]);
    assert!(!pipeline.close_window().detected);
    assert!(pipeline.window().is_empty());
    assert_eq!(responder.respond("kinect").body(), "kinect:False");

    pipeline.stop().await.unwrap();
}

#[tokio::test]
async fn test_sweep_order_irrelevant() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    pipeline.start().unwrap();

    feed_sync(&pipeline, &[140.0, 20.0, 175.0, 100.0, 60.0, 60.0]);
    assert!(pipeline.close_window().detected);

    pipeline.stop().await.unwrap();
}

#[test]
fn test_unrecognized_request() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let responder = pipeline.responder();

    let reply = responder.respond("hello");
    assert_eq!(reply, GestureResponse::Unrecognized);
    assert_eq!(reply.body(), UNRECOGNIZED_TEXT);
    assert_eq!(reply.xhtml(), Some(UNRECOGNIZED_XHTML));

    // Keyword match is exact
    assert_eq!(responder.respond("Kinect"), GestureResponse::Unrecognized);
    assert_eq!(responder.respond(" kinect "), GestureResponse::Unrecognized);
    assert_eq!(responder.respond(""), GestureResponse::Unrecognized);
}

#[test]
fn test_simulated_windows() {
    let mut runner = ScenarioRunner::standard();

    let mut turning = ArmSimulator::turning();
    assert_eq!(runner.run(&mut turning, 3), vec![true, true, true]);

    let mut still = ArmSimulator::still();
    assert_eq!(runner.run(&mut still, 2), vec![false, false]);
}

#[tokio::test(start_paused = true)]
async fn test_pumped_turn_then_still() {
    let pipeline = Arc::new(Pipeline::new(PipelineConfig::default()).unwrap());
    pipeline.start().unwrap();
    let responder = pipeline.responder();

    let (tx, rx) = frame_channel(64);
    let pump = spawn_frame_pump(Arc::clone(&pipeline), rx);
    assert_eq!(pipeline.status(), PipelineStatus::Running);

    let mut sim = ArmSimulator::new(
        ArmMotion::turning(),
        SimulatorConfig {
            frame_interval: Duration::from_millis(33),
            ..SimulatorConfig::noisy()
        },
    );

    // Windows [0, 2s) and [2s, 4s) both see complete sweeps
    feed(&tx, &mut sim, Duration::from_millis(4100)).await;
    assert_eq!(
        responder.respond("kinect"),
        GestureResponse::Detection(true)
    );

    // [6s, 8s) holds only a straight arm
    sim.set_motion(ArmMotion::still());
    feed(&tx, &mut sim, Duration::from_millis(4000)).await;
    assert_eq!(
        responder.respond("kinect"),
        GestureResponse::Detection(false)
    );

    drop(tx);
    let processed = pump.await.unwrap();
    assert_eq!(pipeline.status(), PipelineStatus::NoSensor);

    let stats = pipeline.stats();
    assert_eq!(stats.frames, processed);
    assert_eq!(stats.tracked_bodies, processed);
    assert_eq!(stats.position_only_bodies, processed);
    assert_eq!(stats.angle_failures, 0);
    assert_eq!(stats.ticks, 4);
    assert!(stats.detections >= 2);

    pipeline.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_configured_period() {
    let config = RuntimeConfig::from_json_str(r#"{"window_period": "500ms"}"#).unwrap();
    let pipeline = Arc::new(Pipeline::new(config.pipeline).unwrap());
    pipeline.start().unwrap();

    let (tx, rx) = frame_channel(16);
    let pump = spawn_frame_pump(Arc::clone(&pipeline), rx);

    // A 1.5 s cycle cannot sweep all buckets inside a window aligned to it
    let mut sim = ArmSimulator::new(
        ArmMotion::turning(),
        SimulatorConfig {
            frame_interval: Duration::from_millis(25),
            ..SimulatorConfig::default()
        },
    );
    feed(&tx, &mut sim, Duration::from_millis(3100)).await;

    drop(tx);
    pump.await.unwrap();

    let stats = pipeline.stats();
    assert_eq!(stats.ticks, 6);
    assert_eq!(stats.detections, 0);

    pipeline.stop().await.unwrap();
}

#[tokio::test]
async fn test_frames_after_stop_are_dropped() {
    let pipeline = Arc::new(Pipeline::new(PipelineConfig::default()).unwrap());
    pipeline.start().unwrap();
    pipeline.stop().await.unwrap();

    let (tx, rx) = frame_channel(4);
    let pump = spawn_frame_pump(Arc::clone(&pipeline), rx);
    tx.send(frame_with_right_elbow(0, 20.0)).await.unwrap();
    tx.send(SensorFrame::empty(1)).await.unwrap();
    drop(tx);

    assert_eq!(pump.await.unwrap(), 0);
    assert_eq!(pipeline.stats().frames_dropped, 2);
    assert!(pipeline.window().is_empty());
}

mod properties {
    use super::*;
    use armturn_gesture::{classify, Bucket};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_detected_iff_every_bucket_seen(degrees in prop::collection::vec(0u8..=180, 0..40)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
            let guard = runtime.enter();
            pipeline.start().unwrap();
            drop(guard);

            let values: Vec<f64> = degrees.iter().map(|&d| f64::from(d)).collect();
            feed_sync(&pipeline, &values);

            let expected = Bucket::all()
                .iter()
                .all(|bucket| degrees.iter().any(|&d| classify(d) == Some(*bucket)));
            prop_assert_eq!(pipeline.close_window().detected, expected);
            prop_assert!(pipeline.window().is_empty());

            runtime.block_on(pipeline.stop()).unwrap();
        }
    }
}
