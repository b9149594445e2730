//! Skeleton frames - per-body joint maps and per-tick sensor output

use std::collections::HashMap;

use crate::{ArmturnError, ArmturnResult, JointSample, JointType, Vector3};

/// One body's joints for a single sensor tick
#[derive(Debug, Clone, Default)]
pub struct SkeletonFrame {
    joints: HashMap<JointType, JointSample>,
}

impl SkeletonFrame {
    pub fn new() -> Self {
        SkeletonFrame::default()
    }

    /// Builder-style joint insertion
    pub fn with_joint(mut self, joint: JointType, sample: JointSample) -> Self {
        self.joints.insert(joint, sample);
        self
    }

    /// Insert or replace a joint sample
    pub fn set_joint(&mut self, joint: JointType, sample: JointSample) {
        self.joints.insert(joint, sample);
    }

    /// Get a joint sample
    pub fn joint(&self, joint: JointType) -> Option<&JointSample> {
        self.joints.get(&joint)
    }

    /// Position of a joint, regardless of its tracking state
    pub fn position(&self, joint: JointType) -> ArmturnResult<Vector3> {
        self.joints
            .get(&joint)
            .map(|s| s.position)
            .ok_or(ArmturnError::MissingJoint(joint))
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JointType, &JointSample)> {
        self.joints.iter()
    }
}

/// Whole-body tracking status reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyTrackingState {
    #[default]
    NotTracked,
    /// Only the body's center is known
    PositionOnly,
    /// Full skeleton available
    Tracked,
}

/// A body seen by the sensor this tick
#[derive(Debug, Clone)]
pub struct TrackedBody {
    pub tracking: BodyTrackingState,
    /// Center of mass
    pub position: Vector3,
    pub skeleton: SkeletonFrame,
}

impl TrackedBody {
    /// Fully tracked body
    pub fn tracked(skeleton: SkeletonFrame) -> Self {
        let position = skeleton
            .joint(JointType::Spine)
            .map(|s| s.position)
            .unwrap_or_default();
        Self {
            tracking: BodyTrackingState::Tracked,
            position,
            skeleton,
        }
    }

    /// Body whose center is known but whose joints are not
    pub fn position_only(position: Vector3) -> Self {
        Self {
            tracking: BodyTrackingState::PositionOnly,
            position,
            skeleton: SkeletonFrame::new(),
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.tracking == BodyTrackingState::Tracked
    }
}

/// Everything the sensor delivered for one tick
#[derive(Debug, Clone, Default)]
pub struct SensorFrame {
    /// Monotonic frame number assigned by the source
    pub number: u64,
    pub bodies: Vec<TrackedBody>,
}

impl SensorFrame {
    pub fn new(number: u64, bodies: Vec<TrackedBody>) -> Self {
        Self { number, bodies }
    }

    /// A tick with nobody in view
    pub fn empty(number: u64) -> Self {
        Self {
            number,
            bodies: Vec::new(),
        }
    }

    /// Bodies eligible for the gesture pipeline
    pub fn tracked_bodies(&self) -> impl Iterator<Item = &TrackedBody> {
        self.bodies.iter().filter(|b| b.is_tracked())
    }

    pub fn position_only_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.tracking == BodyTrackingState::PositionOnly)
            .count()
    }
}
