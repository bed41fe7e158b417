//! Static hand gesture classification from 21-point hand landmarks.
//!
//! Landmarks come from an external hand-pose detector (MediaPipe layout).
//! Classification is a pure function of one hand's landmarks: no state is
//! kept between calls, so classifiers can be shared freely across threads.

pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod gestures;
pub mod landmarks;
pub mod replay;

pub use config::ClassifierConfig;
pub use error::{GestureError, Result};
pub use geometry::{angle_between, estimate_hand_size, finger_angle};
pub use gestures::{
    classify_gesture, compute_finger_states, display_label, thumb_up_orientation, Classification,
    FingerStates, Gesture, GestureClassifier, GestureLabel, Handedness,
};
pub use landmarks::{FingerJointTriple, FingerName, HandLandmarkSet, Landmark};
