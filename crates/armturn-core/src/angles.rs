//! Angle set - the four upper-body angles derived from one skeleton
//!
//! Angles are whole degrees stored one byte each, in the order
//! right-elbow, right-shoulder, left-elbow, left-shoulder.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{ArmturnError, ArmturnResult};

/// Encoded size of an angle set
pub const ANGLE_SET_SIZE: usize = 4;

/// Convert a degree value to its one-byte representation.
/// Halves round away from zero. Values outside 0..=255 saturate; NaN maps to 0.
#[inline]
pub fn degrees_to_byte(degrees: f64) -> u8 {
    if degrees.is_nan() {
        return 0;
    }
    degrees.round().clamp(0.0, 255.0) as u8
}

/// Upper-body angles for one frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AngleSet {
    pub right_elbow: u8,
    pub right_shoulder: u8,
    pub left_elbow: u8,
    pub left_shoulder: u8,
}

impl AngleSet {
    pub fn new(right_elbow: u8, right_shoulder: u8, left_elbow: u8, left_shoulder: u8) -> Self {
        Self {
            right_elbow,
            right_shoulder,
            left_elbow,
            left_shoulder,
        }
    }

    /// Build from raw degree values, rounding each to a byte
    pub fn from_degrees(
        right_elbow: f64,
        right_shoulder: f64,
        left_elbow: f64,
        left_shoulder: f64,
    ) -> Self {
        Self {
            right_elbow: degrees_to_byte(right_elbow),
            right_shoulder: degrees_to_byte(right_shoulder),
            left_elbow: degrees_to_byte(left_elbow),
            left_shoulder: degrees_to_byte(left_shoulder),
        }
    }

    pub fn to_array(&self) -> [u8; ANGLE_SET_SIZE] {
        [
            self.right_elbow,
            self.right_shoulder,
            self.left_elbow,
            self.left_shoulder,
        ]
    }

    /// Encode to wire format
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(ANGLE_SET_SIZE);
        buf.put_slice(&self.to_array());
        buf.freeze()
    }

    /// Decode from wire format
    pub fn decode(buf: &[u8]) -> ArmturnResult<Self> {
        if buf.len() < ANGLE_SET_SIZE {
            return Err(ArmturnError::BufferTooShort {
                expected: ANGLE_SET_SIZE,
                actual: buf.len(),
            });
        }
        Ok(Self::new(buf[0], buf[1], buf[2], buf[3]))
    }
}

impl fmt::Display for AngleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RightElbow: {}\t RightShoulder: {}\t LeftElbow: {}\t LeftShoulder: {}",
            self.right_elbow, self.right_shoulder, self.left_elbow, self.left_shoulder
        )
    }
}
