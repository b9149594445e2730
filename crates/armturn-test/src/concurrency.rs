//! Concurrency stress tests
//!
//! Producers observe angles while a ticker closes windows and readers
//! poll the published result. No flag may be lost or carried into a
//! second window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use armturn_gesture::{Bucket, GestureResponse, QueryResponder, WindowAggregator};
use armturn_runtime::{FrameOutcome, Pipeline, PipelineConfig};

use crate::frame_with_right_elbow;

const PRODUCER_ROUNDS: usize = 2_000;

/// One representative angle per bucket
const BUCKET_ANGLES: [u8; 4] = [20, 60, 100, 140];

#[test]
fn test_observes_survive_concurrent_ticks() {
    let agg = Arc::new(WindowAggregator::default());
    let done = Arc::new(AtomicBool::new(false));
    let barrier = Arc::new(Barrier::new(BUCKET_ANGLES.len() + 1));

    let producers: Vec<_> = BUCKET_ANGLES
        .iter()
        .map(|&angle| {
            let agg = Arc::clone(&agg);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..PRODUCER_ROUNDS {
                    agg.observe(angle);
                }
            })
        })
        .collect();

    let ticker = {
        let agg = Arc::clone(&agg);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut windows = Vec::new();
            while !done.load(Ordering::Acquire) {
                windows.push(agg.tick());
            }
            windows
        })
    };

    barrier.wait();
    for producer in producers {
        producer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    let mut windows = ticker.join().unwrap();
    windows.push(agg.tick());

    for outcome in &windows {
        assert_eq!(outcome.detected, outcome.window.is_complete());
    }

    // Every bucket appears in some window, and each window holds at most
    // one observe per bucket, so a bucket appears in no more windows
    // than it was observed
    for bucket in Bucket::all() {
        let seen = windows.iter().filter(|o| o.window.contains(bucket)).count();
        assert!(seen >= 1, "{:?} lost", bucket);
        assert!(seen <= PRODUCER_ROUNDS);
    }

    assert!(agg.snapshot().is_empty());
}

#[test]
fn test_readers_see_only_published_values() {
    let agg = Arc::new(WindowAggregator::default());
    let responder = QueryResponder::new(agg.store());
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let responder = responder.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut answers = 0usize;
                while !done.load(Ordering::Acquire) {
                    match responder.respond("kinect") {
                        GestureResponse::Detection(_) => answers += 1,
                        other => panic!("unexpected reply {:?}", other),
                    }
                }
                answers
            })
        })
        .collect();

    // Alternate full and empty windows
    for round in 0..500 {
        if round % 2 == 0 {
            for angle in BUCKET_ANGLES {
                agg.observe(angle);
            }
            assert!(agg.tick().detected);
        } else {
            assert!(!agg.tick().detected);
        }
    }

    done.store(true, Ordering::Release);
    for reader in readers {
        reader.join().unwrap();
    }

    // Last round was empty
    assert_eq!(
        responder.respond("kinect"),
        GestureResponse::Detection(false)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pipeline_frames_from_many_threads() {
    let pipeline = Arc::new(Pipeline::new(PipelineConfig::default()).unwrap());
    pipeline.start().unwrap();

    const FRAMES_PER_THREAD: u64 = 250;
    let handles: Vec<_> = BUCKET_ANGLES
        .iter()
        .map(|&angle| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || {
                for n in 0..FRAMES_PER_THREAD {
                    let frame = frame_with_right_elbow(n, f64::from(angle));
                    assert!(matches!(
                        pipeline.handle_frame(&frame),
                        FrameOutcome::Processed(_)
                    ));
                    if n % 50 == 0 {
                        pipeline.close_window();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    pipeline.close_window();

    let stats = pipeline.stats();
    assert_eq!(stats.frames, FRAMES_PER_THREAD * BUCKET_ANGLES.len() as u64);
    assert_eq!(stats.tracked_bodies, stats.frames);
    assert_eq!(stats.angle_failures, 0);
    assert!(stats.ticks >= 1);
    assert!(pipeline.window().is_empty());

    pipeline.stop().await.unwrap();
}
