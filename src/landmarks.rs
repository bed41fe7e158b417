// src/landmarks.rs - MediaPipe hand landmark layout and validated hand sets
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const HAND_LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FingerName {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// The three landmarks whose angle decides whether a finger is straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerJointTriple {
    pub proximal: usize,
    pub pivot: usize,
    pub tip: usize,
}

impl FingerName {
    pub const ALL: [FingerName; 5] = [
        FingerName::Thumb,
        FingerName::Index,
        FingerName::Middle,
        FingerName::Ring,
        FingerName::Pinky,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FingerName::Thumb => "thumb",
            FingerName::Index => "index",
            FingerName::Middle => "middle",
            FingerName::Ring => "ring",
            FingerName::Pinky => "pinky",
        }
    }

    /// Position in [`FingerName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Thumb pivots on the IP joint, the other fingers on the PIP joint.
    /// The DIP joint is skipped.
    pub fn joint_triple(self) -> FingerJointTriple {
        let (proximal, pivot, tip) = match self {
            FingerName::Thumb => (THUMB_MCP, THUMB_IP, THUMB_TIP),
            FingerName::Index => (INDEX_MCP, INDEX_PIP, INDEX_TIP),
            FingerName::Middle => (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
            FingerName::Ring => (RING_MCP, RING_PIP, RING_TIP),
            FingerName::Pinky => (PINKY_MCP, PINKY_PIP, PINKY_TIP),
        };
        FingerJointTriple { proximal, pivot, tip }
    }
}

impl std::fmt::Display for FingerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detector landmark. `x`/`y` are normalized to the frame, `z` is
/// the detector's depth proxy and may be absent in recorded input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for Vector3<f64> {
    fn from(lm: Landmark) -> Self {
        Vector3::new(lm.x, lm.y, lm.z)
    }
}

impl From<[f64; 3]> for Landmark {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

/// Exactly 21 landmarks in MediaPipe ordinal order.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarkSet {
    points: [Vector3<f64>; HAND_LANDMARK_COUNT],
}

impl HandLandmarkSet {
    /// Wraps already-converted points, rejecting non-finite coordinates.
    pub fn new(points: [Vector3<f64>; HAND_LANDMARK_COUNT]) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(GestureError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// Builds a set from detector output, rejecting anything that is not a
    /// complete 21-point hand with finite coordinates.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self> {
        if landmarks.len() != HAND_LANDMARK_COUNT {
            return Err(GestureError::LandmarkCount {
                expected: HAND_LANDMARK_COUNT,
                found: landmarks.len(),
            });
        }

        let mut points = [Vector3::zeros(); HAND_LANDMARK_COUNT];
        for (slot, lm) in points.iter_mut().zip(landmarks) {
            *slot = Vector3::from(*lm);
        }

        Self::new(points)
    }

    pub fn point(&self, index: usize) -> &Vector3<f64> {
        &self.points[index]
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }
}

impl TryFrom<&[Landmark]> for HandLandmarkSet {
    type Error = GestureError;

    fn try_from(landmarks: &[Landmark]) -> Result<Self> {
        Self::from_landmarks(landmarks)
    }
}

impl TryFrom<&[[f64; 3]]> for HandLandmarkSet {
    type Error = GestureError;

    fn try_from(raw: &[[f64; 3]]) -> Result<Self> {
        let landmarks: Vec<Landmark> = raw.iter().copied().map(Landmark::from).collect();
        Self::from_landmarks(&landmarks)
    }
}
