// src/data.rs
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::landmarks::FingerName;
use crate::replay::{FrameResult, HandResult};

#[derive(Debug, Serialize)]
struct GestureRecord {
    frame: usize,
    timestamp: f64,
    hand: usize,
    handedness: String,
    label: String,
    display_label: String,

    thumb_extended: bool,
    index_extended: bool,
    middle_extended: bool,
    ring_extended: bool,
    pinky_extended: bool,

    // Joint angles in degrees
    thumb_angle: f64,
    index_angle: f64,
    middle_angle: f64,
    ring_angle: f64,
    pinky_angle: f64,

    thumb_up: bool,
    hand_size: f64,
}

impl GestureRecord {
    fn new(frame: &FrameResult, hand: &HandResult) -> Self {
        let c = &hand.classification;
        let ext = |f| c.states.is_extended(f);
        Self {
            frame: frame.frame,
            timestamp: frame.timestamp,
            hand: hand.hand_index,
            handedness: c.handedness.to_string(),
            label: c.label.to_string(),
            display_label: c.display_label(),
            thumb_extended: ext(FingerName::Thumb),
            index_extended: ext(FingerName::Index),
            middle_extended: ext(FingerName::Middle),
            ring_extended: ext(FingerName::Ring),
            pinky_extended: ext(FingerName::Pinky),
            thumb_angle: c.angle(FingerName::Thumb),
            index_angle: c.angle(FingerName::Index),
            middle_angle: c.angle(FingerName::Middle),
            ring_angle: c.angle(FingerName::Ring),
            pinky_angle: c.angle(FingerName::Pinky),
            thumb_up: c.thumb_up,
            hand_size: hand.hand_size,
        }
    }
}

pub struct DataExporter {
    output_dir: PathBuf,
    session_name: String,
    frames: Vec<FrameResult>,
}

impl DataExporter {
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Self {
        let session_name = session_name.unwrap_or_else(|| {
            format!("session_{}", Local::now().format("%Y%m%d_%H%M%S"))
        });

        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
            frames: Vec::new(),
        }
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn add_frame(&mut self, result: FrameResult) {
        self.frames.push(result);
    }

    fn session_dir(&self) -> Result<PathBuf> {
        let dir = self.output_dir.join(&self.session_name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Writes one row per classified hand.
    pub fn export_csv(&self) -> Result<PathBuf> {
        let csv_path = self.session_dir()?.join("gestures.csv");

        let file = File::create(&csv_path)?;
        let mut writer = Writer::from_writer(file);

        for frame in &self.frames {
            for hand in &frame.hands {
                writer.serialize(GestureRecord::new(frame, hand))?;
            }
        }

        writer.flush()?;
        Ok(csv_path)
    }

    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for hand in self.frames.iter().flat_map(|f| &f.hands) {
            *counts.entry(hand.classification.label.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn generate_report(&self) -> Result<PathBuf> {
        let report_path = self.session_dir()?.join("report.html");
        std::fs::write(&report_path, self.create_html_report())?;
        Ok(report_path)
    }

    fn create_html_report(&self) -> String {
        let total_frames = self.frames.len();
        let total_hands: usize = self.frames.iter().map(|f| f.hands.len()).sum();
        let skipped_hands: usize = self.frames.iter().map(|f| f.skipped_hands).sum();

        let label_rows: String = self
            .label_counts()
            .iter()
            .map(|(label, count)| {
                format!(
                    r#"
        <div class="stat-item">
            <span class="stat-label">{}:</span>
            <span class="stat-value">{} hands</span>
        </div>"#,
                    label, count
                )
            })
            .collect();

        format!(r#"
<!DOCTYPE html>
<html>
<head>
    <title>Gesture Report - {}</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 40px; background: #f5f5f5; }}
        h1 {{ color: #333; }}
        .stats {{ background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        .stat-item {{ margin: 10px 0; }}
        .stat-label {{ font-weight: bold; color: #666; }}
        .stat-value {{ color: #4682EA; font-size: 1.2em; }}
    </style>
</head>
<body>
    <h1>Gesture Session Report</h1>
    <div class="stats">
        <h2>Session: {}</h2>
        <div class="stat-item">
            <span class="stat-label">Total Frames:</span>
            <span class="stat-value">{}</span>
        </div>
        <div class="stat-item">
            <span class="stat-label">Classified Hands:</span>
            <span class="stat-value">{}</span>
        </div>
        <div class="stat-item">
            <span class="stat-label">Skipped Hands:</span>
            <span class="stat-value">{}</span>
        </div>
    </div>
    <div class="stats">
        <h2>Gestures</h2>{}
    </div>
</body>
</html>
        "#,
            self.session_name,
            self.session_name,
            total_frames,
            total_hands,
            skipped_hands,
            label_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::{Classification, FingerStates, Gesture, GestureLabel, Handedness};

    fn hand(index: usize, label: GestureLabel) -> HandResult {
        HandResult {
            hand_index: index,
            classification: Classification {
                label,
                states: FingerStates::from_fn(|f| f == FingerName::Thumb),
                angles: [175.0, 90.0, 90.0, 90.0, 90.0],
                thumb_up: true,
                handedness: Handedness::Left,
            },
            hand_size: 0.25,
        }
    }

    fn exporter(dir: &Path) -> DataExporter {
        let mut exporter = DataExporter::new(dir, Some("test_session".to_string()));
        exporter.add_frame(FrameResult {
            frame: 0,
            timestamp: 0.0,
            hands: vec![
                hand(0, GestureLabel::Known(Gesture::ThumbsUp)),
                hand(1, GestureLabel::unknown(vec![FingerName::Ring])),
            ],
            skipped_hands: 0,
        });
        exporter.add_frame(FrameResult {
            frame: 1,
            timestamp: 0.033,
            hands: vec![hand(0, GestureLabel::Known(Gesture::ThumbsUp))],
            skipped_hands: 2,
        });
        exporter
    }

    #[test]
    fn csv_has_one_row_per_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = exporter(dir.path()).export_csv().unwrap();
        assert_eq!(path, dir.path().join("test_session").join("gestures.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "frame");
        assert!(headers.iter().any(|h| h == "pinky_angle"));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][4], "Thumbs Up");
        assert_eq!(&rows[0][5], "Thumbs Up (Left)");
        assert_eq!(&rows[1][4], "Unknown: ring");
        assert_eq!(&rows[2][0], "1");
    }

    #[test]
    fn report_counts_labels() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());
        let counts = exporter.label_counts();
        assert_eq!(counts.get("Thumbs Up"), Some(&2));
        assert_eq!(counts.get("Unknown: ring"), Some(&1));

        let path = exporter.generate_report().unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Session: test_session"));
        assert!(html.contains("Unknown: ring:"));
    }

    #[test]
    fn default_session_name_is_timestamped() {
        let exporter = DataExporter::new("out", None);
        assert!(exporter.session_name().starts_with("session_"));
    }
}
