//! Arm simulator - synthetic sensor frames for a standing body
//!
//! The simulated body stands 2 m from the sensor with both upper arms
//! hanging down. The right forearm swings in the sagittal plane so the
//! right-elbow angle follows the configured motion exactly (before noise).

use std::time::Duration;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use armturn_core::{JointSample, JointType, SensorFrame, SkeletonFrame, TrackedBody, Vector3};

/// Forearm length used for wrist placement (meters)
const FOREARM_LENGTH: f64 = 0.25;

/// Depth of the simulated body (meters)
const BODY_Z: f64 = 2.0;

/// How the right elbow moves over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmMotion {
    /// Elbow held at a fixed angle
    Still { elbow_degrees: f64 },
    /// Elbow swings min → max → min once per cycle
    Turning {
        cycle: Duration,
        min_degrees: f64,
        max_degrees: f64,
    },
}

impl ArmMotion {
    /// Full turn sweeping 10°..170° every 1.5 s
    pub fn turning() -> Self {
        ArmMotion::Turning {
            cycle: Duration::from_millis(1500),
            min_degrees: 10.0,
            max_degrees: 170.0,
        }
    }

    /// Arm hanging straight
    pub fn still() -> Self {
        ArmMotion::Still {
            elbow_degrees: 175.0,
        }
    }

    /// Elbow angle at a point in time
    pub fn elbow_degrees_at(&self, elapsed: Duration) -> f64 {
        match *self {
            ArmMotion::Still { elbow_degrees } => elbow_degrees,
            ArmMotion::Turning {
                cycle,
                min_degrees,
                max_degrees,
            } => {
                let cycle = cycle.as_secs_f64();
                if cycle <= 0.0 {
                    return min_degrees;
                }
                let phase = (elapsed.as_secs_f64() % cycle) / cycle;
                let tri = if phase < 0.5 {
                    phase * 2.0
                } else {
                    2.0 - phase * 2.0
                };
                min_degrees + (max_degrees - min_degrees) * tri
            }
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Time between frames (sensor runs at ~30 Hz)
    pub frame_interval: Duration,
    /// Maximum per-axis wrist jitter (meters)
    pub noise_m: f64,
    /// Extra bystanders reported with position only
    pub position_only_bodies: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            frame_interval: Duration::from_micros(33_333),
            noise_m: 0.0,
            position_only_bodies: 0,
            seed: 42,
        }
    }
}

impl SimulatorConfig {
    /// Noisy sensor with a bystander in view
    pub fn noisy() -> Self {
        SimulatorConfig {
            noise_m: 0.005,
            position_only_bodies: 1,
            ..SimulatorConfig::default()
        }
    }
}

/// Produces sensor frames for one simulated body
pub struct ArmSimulator {
    motion: ArmMotion,
    config: SimulatorConfig,
    rng: StdRng,
    elapsed: Duration,
    frame_number: u64,
}

impl ArmSimulator {
    pub fn new(motion: ArmMotion, config: SimulatorConfig) -> Self {
        ArmSimulator {
            motion,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            elapsed: Duration::ZERO,
            frame_number: 0,
        }
    }

    pub fn turning() -> Self {
        Self::new(ArmMotion::turning(), SimulatorConfig::default())
    }

    pub fn still() -> Self {
        Self::new(ArmMotion::still(), SimulatorConfig::default())
    }

    pub fn set_motion(&mut self, motion: ArmMotion) {
        self.motion = motion;
    }

    pub fn motion(&self) -> ArmMotion {
        self.motion
    }

    pub fn frame_interval(&self) -> Duration {
        self.config.frame_interval
    }

    /// Simulated time since the first frame
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elbow angle the next frame will carry (before noise)
    pub fn elbow_degrees(&self) -> f64 {
        self.motion.elbow_degrees_at(self.elapsed)
    }

    /// Produce the next frame and advance simulated time
    pub fn next_frame(&mut self) -> SensorFrame {
        let mut skeleton = skeleton_with_elbows(self.elbow_degrees(), 175.0);

        if self.config.noise_m > 0.0 {
            let jitter = Uniform::new_inclusive(-self.config.noise_m, self.config.noise_m);
            if let Some(wrist) = skeleton.joint(JointType::WristRight).copied() {
                let p = wrist.position;
                let noisy = Vector3::new(
                    p.x + jitter.sample(&mut self.rng),
                    p.y + jitter.sample(&mut self.rng),
                    p.z + jitter.sample(&mut self.rng),
                );
                skeleton.set_joint(
                    JointType::WristRight,
                    JointSample::new(noisy, wrist.tracking),
                );
            }
        }

        let mut bodies = vec![TrackedBody::tracked(skeleton)];
        for i in 0..self.config.position_only_bodies {
            bodies.push(TrackedBody::position_only(Vector3::new(
                1.0 + i as f64 * 0.5,
                0.9,
                3.0,
            )));
        }

        let frame = SensorFrame::new(self.frame_number, bodies);
        self.frame_number += 1;
        self.elapsed += self.config.frame_interval;
        frame
    }

    /// Produce every frame covering `duration` of simulated time
    pub fn frames_for(&mut self, duration: Duration) -> Vec<SensorFrame> {
        let end = self.elapsed + duration;
        let mut frames = Vec::new();
        while self.elapsed < end {
            frames.push(self.next_frame());
        }
        frames
    }
}

fn arm_joints(
    skeleton: &mut SkeletonFrame,
    side: f64,
    joints: (JointType, JointType, JointType, JointType),
    elbow_degrees: f64,
) {
    let (shoulder, elbow, wrist, hand) = joints;
    let rad = elbow_degrees.to_radians();
    let (dy, dz) = (rad.cos(), -rad.sin());
    let x = 0.2 * side;

    skeleton.set_joint(shoulder, JointSample::tracked(x, 1.5, BODY_Z));
    skeleton.set_joint(elbow, JointSample::tracked(x, 1.2, BODY_Z));
    skeleton.set_joint(
        wrist,
        JointSample::tracked(x, 1.2 + FOREARM_LENGTH * dy, BODY_Z + FOREARM_LENGTH * dz),
    );
    skeleton.set_joint(
        hand,
        JointSample::inferred(
            x,
            1.2 + (FOREARM_LENGTH + 0.08) * dy,
            BODY_Z + (FOREARM_LENGTH + 0.08) * dz,
        ),
    );
}

/// Full standing skeleton with the given elbow angles (degrees)
pub fn skeleton_with_elbows(right_degrees: f64, left_degrees: f64) -> SkeletonFrame {
    let mut skeleton = SkeletonFrame::new()
        .with_joint(JointType::Head, JointSample::tracked(0.0, 1.75, BODY_Z))
        .with_joint(JointType::ShoulderCenter, JointSample::tracked(0.0, 1.5, BODY_Z))
        .with_joint(JointType::Spine, JointSample::tracked(0.0, 1.1, BODY_Z))
        .with_joint(JointType::HipCenter, JointSample::tracked(0.0, 0.9, BODY_Z));

    for (side, hip, knee, ankle, foot) in [
        (1.0, JointType::HipRight, JointType::KneeRight, JointType::AnkleRight, JointType::FootRight),
        (-1.0, JointType::HipLeft, JointType::KneeLeft, JointType::AnkleLeft, JointType::FootLeft),
    ] {
        let x = 0.1 * side;
        skeleton.set_joint(hip, JointSample::tracked(x, 0.85, BODY_Z));
        skeleton.set_joint(knee, JointSample::tracked(x, 0.5, BODY_Z));
        skeleton.set_joint(ankle, JointSample::tracked(x, 0.1, BODY_Z));
        skeleton.set_joint(foot, JointSample::inferred(x, 0.05, BODY_Z - 0.1));
    }

    arm_joints(
        &mut skeleton,
        1.0,
        (
            JointType::ShoulderRight,
            JointType::ElbowRight,
            JointType::WristRight,
            JointType::HandRight,
        ),
        right_degrees,
    );
    arm_joints(
        &mut skeleton,
        -1.0,
        (
            JointType::ShoulderLeft,
            JointType::ElbowLeft,
            JointType::WristLeft,
            JointType::HandLeft,
        ),
        left_degrees,
    );

    skeleton
}

/// Sensor frame with one tracked body bent to the given right-elbow angle
pub fn frame_with_right_elbow(number: u64, degrees: f64) -> SensorFrame {
    SensorFrame::new(
        number,
        vec![TrackedBody::tracked(skeleton_with_elbows(degrees, 175.0))],
    )
}
