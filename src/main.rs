// src/main.rs
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use hand_gesture::data::DataExporter;
use hand_gesture::replay::{classify_frame, load_frames};
use hand_gesture::{ClassifierConfig, GestureClassifier};

const USAGE: &str = "usage: gesture_replay <frames.json> [output_dir] [config.json]";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(frames_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output"));
    let config = match args.next() {
        Some(path) => ClassifierConfig::from_json_file(&path)
            .with_context(|| format!("failed to load classifier config {}", path))?,
        None => ClassifierConfig::default(),
    };

    tracing::info!(
        extension_threshold_deg = config.extension_threshold_deg,
        thumb_up_min_rise = config.thumb_up_min_rise,
        "classifier config"
    );
    let classifier = GestureClassifier::new(config)?;

    let frames = load_frames(&frames_path)
        .with_context(|| format!("failed to read landmark frames from {}", frames_path.display()))?;
    tracing::info!("loaded {} frames from {}", frames.len(), frames_path.display());

    let mut exporter = DataExporter::new(&output_dir, None);
    let mut skipped = 0;
    for (i, frame) in frames.iter().enumerate() {
        let result = classify_frame(&classifier, i, frame);
        for hand in &result.hands {
            tracing::debug!(frame = i, hand = hand.hand_index, "{}", hand.classification.display_label());
        }
        skipped += result.skipped_hands;
        exporter.add_frame(result);
    }

    if skipped > 0 {
        tracing::warn!("{} hands skipped due to malformed landmarks", skipped);
    }

    let csv_path = exporter.export_csv().context("failed to export gesture CSV")?;
    let report_path = exporter.generate_report().context("failed to write session report")?;
    tracing::info!("wrote {}", csv_path.display());
    tracing::info!("wrote {}", report_path.display());

    for (label, count) in exporter.label_counts() {
        println!("{:>24}  {}", label, count);
    }

    Ok(())
}
