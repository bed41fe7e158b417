// src/replay.rs - Classification of recorded landmark frames
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::geometry::estimate_hand_size;
use crate::gestures::{Classification, GestureClassifier, Handedness};
use crate::landmarks::{HandLandmarkSet, Landmark};

/// Frames without a timestamp are assumed to be this far apart.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// One detected hand as written by the landmark recorder.
#[derive(Debug, Clone, Deserialize)]
pub struct HandObservation {
    #[serde(default)]
    pub handedness: String,
    pub landmarks: Vec<Landmark>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

#[derive(Debug, Clone)]
pub struct HandResult {
    pub hand_index: usize,
    pub classification: Classification,
    pub hand_size: f64,
}

#[derive(Debug, Clone)]
pub struct FrameResult {
    pub frame: usize,
    pub timestamp: f64,
    pub hands: Vec<HandResult>,
    pub skipped_hands: usize,
}

pub fn load_frames(path: impl AsRef<Path>) -> Result<Vec<LandmarkFrame>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_frames(&text)
}

pub fn parse_frames(text: &str) -> Result<Vec<LandmarkFrame>> {
    Ok(serde_json::from_str(text)?)
}

/// Classifies every hand in the frame on its own. Hands with malformed
/// landmark sets are dropped and counted, never labelled.
pub fn classify_frame(
    classifier: &GestureClassifier,
    frame_index: usize,
    frame: &LandmarkFrame,
) -> FrameResult {
    let timestamp = frame
        .timestamp
        .unwrap_or(frame_index as f64 / DEFAULT_FRAME_RATE);

    let mut hands = Vec::with_capacity(frame.hands.len());
    let mut skipped_hands = 0;

    for (hand_index, observation) in frame.hands.iter().enumerate() {
        let set = match HandLandmarkSet::from_landmarks(&observation.landmarks) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(frame = frame_index, hand = hand_index, "skipping hand: {}", e);
                skipped_hands += 1;
                continue;
            }
        };

        let handedness = Handedness::from(observation.handedness.as_str());
        hands.push(HandResult {
            hand_index,
            classification: classifier.classify(&set, handedness),
            hand_size: estimate_hand_size(&set),
        });
    }

    FrameResult {
        frame: frame_index,
        timestamp,
        hands,
        skipped_hands,
    }
}

pub fn classify_frames(classifier: &GestureClassifier, frames: &[LandmarkFrame]) -> Vec<FrameResult> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| classify_frame(classifier, i, frame))
        .collect()
}
