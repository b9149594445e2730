//! Angle calculation - skeleton joints to upper-body angles
//!
//! Joint tracking state is NOT consulted: inferred and not-tracked joints
//! still contribute their reported positions. The clamp in
//! [`angle_between`] keeps the result defined for any non-degenerate input.

use armturn_core::{AngleSet, ArmturnError, ArmturnResult, JointType, SkeletonFrame, Vector3};

/// Angle between two vectors in degrees, in [0, 180].
/// Returns None if either vector has zero length.
pub fn angle_between(a: Vector3, b: Vector3) -> Option<f64> {
    let a = a.normalized()?;
    let b = b.normalized()?;
    let dot = a.dot(&b).clamp(-1.0, 1.0);
    Some(dot.acos().to_degrees())
}

/// Joints of one arm
#[derive(Debug, Clone, Copy)]
struct Arm {
    shoulder: JointType,
    elbow: JointType,
    wrist: JointType,
}

const RIGHT_ARM: Arm = Arm {
    shoulder: JointType::ShoulderRight,
    elbow: JointType::ElbowRight,
    wrist: JointType::WristRight,
};

const LEFT_ARM: Arm = Arm {
    shoulder: JointType::ShoulderLeft,
    elbow: JointType::ElbowLeft,
    wrist: JointType::WristLeft,
};

impl Arm {
    /// (elbow angle, shoulder angle) in raw degrees
    fn angles(&self, frame: &SkeletonFrame) -> ArmturnResult<(f64, f64)> {
        let shoulder = frame.position(self.shoulder)?;
        let elbow = frame.position(self.elbow)?;
        let wrist = frame.position(self.wrist)?;

        let upper = elbow - shoulder;
        let fore = elbow - wrist;

        let elbow_angle = angle_between(upper, fore).ok_or_else(|| {
            if upper.normalized().is_none() {
                ArmturnError::DegenerateSegment {
                    from: self.shoulder,
                    to: self.elbow,
                }
            } else {
                ArmturnError::DegenerateSegment {
                    from: self.wrist,
                    to: self.elbow,
                }
            }
        })?;

        let shoulder_angle =
            angle_between(Vector3::UP, shoulder - elbow).ok_or(ArmturnError::DegenerateSegment {
                from: self.shoulder,
                to: self.elbow,
            })?;

        Ok((elbow_angle, shoulder_angle))
    }
}

/// Computes the angle set for a skeleton
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleCalculator;

impl AngleCalculator {
    pub fn new() -> Self {
        AngleCalculator
    }

    /// Compute right/left elbow and shoulder angles.
    ///
    /// Fails with a "cannot compute" error when the frame holds no joints,
    /// lacks a shoulder, elbow or wrist, or has a zero-length limb segment.
    pub fn compute(&self, frame: &SkeletonFrame) -> ArmturnResult<AngleSet> {
        if frame.is_empty() {
            return Err(ArmturnError::EmptyFrame);
        }

        let (right_elbow, right_shoulder) = RIGHT_ARM.angles(frame)?;
        let (left_elbow, left_shoulder) = LEFT_ARM.angles(frame)?;

        Ok(AngleSet::from_degrees(
            right_elbow,
            right_shoulder,
            left_elbow,
            left_shoulder,
        ))
    }
}

/// Convenience wrapper around [`AngleCalculator::compute`]
pub fn compute_angles(frame: &SkeletonFrame) -> ArmturnResult<AngleSet> {
    AngleCalculator.compute(frame)
}
