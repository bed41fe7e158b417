// src/gestures.rs - Static hand gesture classification from finger extension
use std::fmt;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::geometry::finger_angle;
use crate::landmarks::{FingerName, HandLandmarkSet, THUMB_MCP, THUMB_TIP};

/// Extended/curled flag for each finger, indexed by [`FingerName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    extended: [bool; 5],
}

impl FingerStates {
    pub fn from_fn(mut f: impl FnMut(FingerName) -> bool) -> Self {
        let mut extended = [false; 5];
        for finger in FingerName::ALL {
            extended[finger.index()] = f(finger);
        }
        Self { extended }
    }

    pub fn is_extended(&self, finger: FingerName) -> bool {
        self.extended[finger.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FingerName, bool)> + '_ {
        FingerName::ALL
            .into_iter()
            .map(move |f| (f, self.is_extended(f)))
    }

    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|&&e| e).count()
    }

    /// Extended fingers in thumb-to-pinky order.
    pub fn extended_fingers(&self) -> Vec<FingerName> {
        self.iter().filter(|(_, e)| *e).map(|(f, _)| f).collect()
    }

    fn all(&self, fingers: &[FingerName]) -> bool {
        fingers.iter().all(|&f| self.is_extended(f))
    }

    fn none(&self, fingers: &[FingerName]) -> bool {
        !fingers.iter().any(|&f| self.is_extended(f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Fist,
    OpenPalm,
    Peace,
    ThumbsUp,
}

impl Gesture {
    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::Fist => "Fist",
            Gesture::OpenPalm => "Open Palm",
            Gesture::Peace => "Peace",
            Gesture::ThumbsUp => "Thumbs Up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    Known(Gesture),
    /// No rule matched; carries the extended fingers sorted by name.
    Unknown(Vec<FingerName>),
}

impl GestureLabel {
    pub fn unknown(mut fingers: Vec<FingerName>) -> Self {
        fingers.sort_by_key(|f| f.as_str());
        GestureLabel::Unknown(fingers)
    }

    pub fn gesture(&self) -> Option<Gesture> {
        match self {
            GestureLabel::Known(g) => Some(*g),
            GestureLabel::Unknown(_) => None,
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureLabel::Known(g) => f.write_str(g.as_str()),
            GestureLabel::Unknown(fingers) if fingers.is_empty() => f.write_str("Unknown"),
            GestureLabel::Unknown(fingers) => {
                let names: Vec<&str> = fingers.iter().map(|f| f.as_str()).collect();
                write!(f, "Unknown: {}", names.join(","))
            }
        }
    }
}

/// Handedness as reported by the detector. Only used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unspecified,
}

impl Handedness {
    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Unspecified => "",
        }
    }
}

impl From<&str> for Handedness {
    fn from(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            _ => Handedness::Unspecified,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status text for overlays, e.g. `"Peace (Right)"`.
pub fn display_label(label: &GestureLabel, handedness: Handedness) -> String {
    match handedness {
        Handedness::Unspecified => label.to_string(),
        hand => format!("{} ({})", label, hand),
    }
}

pub struct GestureRule {
    pub gesture: Gesture,
    pub matches: fn(&FingerStates) -> bool,
}

const FOUR_FINGERS: [FingerName; 4] = [
    FingerName::Index,
    FingerName::Middle,
    FingerName::Ring,
    FingerName::Pinky,
];

fn is_fist(s: &FingerStates) -> bool {
    s.extended_count() == 0
}

fn is_open_palm(s: &FingerStates) -> bool {
    s.all(&FOUR_FINGERS)
}

fn is_peace(s: &FingerStates) -> bool {
    s.all(&[FingerName::Index, FingerName::Middle]) && s.none(&[FingerName::Ring, FingerName::Pinky])
}

fn is_thumbs_up(s: &FingerStates) -> bool {
    s.is_extended(FingerName::Thumb) && s.none(&FOUR_FINGERS)
}

/// Gesture rules in priority order; the first match wins. A hand matching
/// none of them is labelled [`GestureLabel::Unknown`].
pub const GESTURE_RULES: [GestureRule; 4] = [
    GestureRule { gesture: Gesture::Fist, matches: is_fist },
    GestureRule { gesture: Gesture::OpenPalm, matches: is_open_palm },
    GestureRule { gesture: Gesture::Peace, matches: is_peace },
    GestureRule { gesture: Gesture::ThumbsUp, matches: is_thumbs_up },
];

pub fn evaluate_rules(states: &FingerStates) -> GestureLabel {
    GESTURE_RULES
        .iter()
        .find(|rule| (rule.matches)(states))
        .map(|rule| GestureLabel::Known(rule.gesture))
        .unwrap_or_else(|| GestureLabel::unknown(states.extended_fingers()))
}

/// Everything computed while classifying one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: GestureLabel,
    pub states: FingerStates,
    /// Joint angle per finger in degrees, indexed by [`FingerName::index`].
    pub angles: [f64; 5],
    pub thumb_up: bool,
    pub handedness: Handedness,
}

impl Classification {
    pub fn angle(&self, finger: FingerName) -> f64 {
        self.angles[finger.index()]
    }

    pub fn display_label(&self) -> String {
        display_label(&self.label, self.handedness)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn finger_angles(&self, hand: &HandLandmarkSet) -> [f64; 5] {
        FingerName::ALL.map(|finger| finger_angle(hand, finger))
    }

    pub fn compute_finger_states(&self, hand: &HandLandmarkSet) -> FingerStates {
        let angles = self.finger_angles(hand);
        self.states_from_angles(&angles)
    }

    fn states_from_angles(&self, angles: &[f64; 5]) -> FingerStates {
        let threshold = self.config.extension_threshold_deg;
        FingerStates::from_fn(|finger| angles[finger.index()] > threshold)
    }

    /// Image y grows downward, so an upward thumb has a smaller tip y.
    pub fn thumb_up_orientation(&self, hand: &HandLandmarkSet) -> bool {
        let rise = hand.point(THUMB_MCP).y - hand.point(THUMB_TIP).y;
        rise >= self.config.thumb_up_min_rise
    }

    pub fn classify(&self, hand: &HandLandmarkSet, handedness: Handedness) -> Classification {
        let angles = self.finger_angles(hand);
        let states = self.states_from_angles(&angles);
        let label = evaluate_rules(&states);

        // Reported only. A sideways thumb is still labelled Thumbs Up.
        let thumb_up = self.thumb_up_orientation(hand);

        tracing::debug!(
            label = %label,
            handedness = %handedness,
            extended = states.extended_count(),
            thumb_up,
            "classified hand"
        );

        Classification { label, states, angles, thumb_up, handedness }
    }

    pub fn classify_gesture(
        &self,
        hand: &HandLandmarkSet,
        handedness: Handedness,
    ) -> (GestureLabel, FingerStates) {
        let c = self.classify(hand, handedness);
        (c.label, c.states)
    }
}

pub fn compute_finger_states(hand: &HandLandmarkSet) -> FingerStates {
    GestureClassifier::default().compute_finger_states(hand)
}

pub fn thumb_up_orientation(hand: &HandLandmarkSet) -> bool {
    GestureClassifier::default().thumb_up_orientation(hand)
}

pub fn classify_gesture(hand: &HandLandmarkSet, handedness: Handedness) -> (GestureLabel, FingerStates) {
    GestureClassifier::default().classify_gesture(hand, handedness)
}
