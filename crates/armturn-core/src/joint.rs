//! Joints - named tracking points and their per-frame samples

use crate::Vector3;

/// Joint identifier for a depth-sensor skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointType {
    // Torso
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,

    // Left arm
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,

    // Right arm
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,

    // Left leg
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,

    // Right leg
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

impl JointType {
    /// All joints in sensor order
    pub fn all() -> &'static [JointType] {
        &[
            JointType::HipCenter,
            JointType::Spine,
            JointType::ShoulderCenter,
            JointType::Head,
            JointType::ShoulderLeft,
            JointType::ElbowLeft,
            JointType::WristLeft,
            JointType::HandLeft,
            JointType::ShoulderRight,
            JointType::ElbowRight,
            JointType::WristRight,
            JointType::HandRight,
            JointType::HipLeft,
            JointType::KneeLeft,
            JointType::AnkleLeft,
            JointType::FootLeft,
            JointType::HipRight,
            JointType::KneeRight,
            JointType::AnkleRight,
            JointType::FootRight,
        ]
    }

    /// Number of joints
    pub fn count() -> usize {
        20
    }
}

/// How confidently the sensor located a joint this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

/// A joint's position and tracking status for exactly one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSample {
    pub position: Vector3,
    pub tracking: TrackingState,
}

impl JointSample {
    pub fn new(position: Vector3, tracking: TrackingState) -> Self {
        Self { position, tracking }
    }

    /// Sample reported with full tracking confidence
    pub fn tracked(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z), TrackingState::Tracked)
    }

    /// Sample whose position the sensor estimated
    pub fn inferred(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z), TrackingState::Inferred)
    }

    pub fn is_tracked(&self) -> bool {
        self.tracking == TrackingState::Tracked
    }
}
