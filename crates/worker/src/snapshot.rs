//! Pre-submission snapshots.
//!
//! Every generated guide is written to disk before it is submitted, so a
//! crashed worker or a rejected submission never loses minutes of model
//! output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use golfplex_core::work::WorkDestination;

/// Written out as JSON; recovery tooling reads snapshots as plain JSON,
/// so nothing deserializes this shape.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub destination: &'a WorkDestination,
    pub guides: BTreeMap<String, SnapshotGuide>,
    pub generated_at: String,
    pub worker_version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SnapshotGuide {
    pub content: String,
}

/// Write a snapshot named `{id}_{city}_{timestamp}.json` under `output_dir`,
/// creating the directory if needed. Spaces in the city become underscores.
pub fn write_snapshot(
    output_dir: &Path,
    destination: &WorkDestination,
    language_code: &str,
    content: &str,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join(snapshot_filename(destination, Utc::now()));

    let mut guides = BTreeMap::new();
    guides.insert(
        language_code.to_string(),
        SnapshotGuide {
            content: content.to_string(),
        },
    );
    let snapshot = Snapshot {
        destination,
        guides,
        generated_at: Utc::now().to_rfc3339(),
        worker_version: env!("CARGO_PKG_VERSION"),
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

fn snapshot_filename(
    destination: &WorkDestination,
    at: chrono::DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_{}.json",
        destination.id,
        destination.city.replace(' ', "_"),
        at.format("%Y%m%d_%H%M%S"),
    )
}
