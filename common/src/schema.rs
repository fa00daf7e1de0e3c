//! Grid export/import wire format
//!
//! The on-disk shape is the original gallery schema:
//!
//! ```json
//! { "images": [
//!     { "fileName": "...", "absolutePath": "...", "checkpointName": "...",
//!       "criteria": {"beauty": 1, ...}, "totalScore": 2 }
//! ] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::Result;
use crate::score::CriteriaScores;

/// One exported card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageEntry {
    pub file_name: String,
    pub absolute_path: String,
    pub checkpoint_name: String,
    pub criteria: CriteriaScores,
    /// Informational on export; recomputed from `criteria` on import.
    pub total_score: i32,
}

impl ImageEntry {
    pub fn from_card(card: &Card) -> Self {
        Self {
            file_name: card.file_name().to_string(),
            absolute_path: card.path().to_string_lossy().into_owned(),
            checkpoint_name: card.checkpoint_name().to_string(),
            criteria: *card.criteria(),
            total_score: card.total(),
        }
    }
}

/// Top-level shape of a grid JSON file. A file without the `images` key is
/// a valid, empty grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridFile {
    pub images: Vec<ImageEntry>,
}

pub fn read_grid_file(path: &Path) -> Result<GridFile> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_grid_file(path: &Path, file: &GridFile) -> Result<()> {
    let content = serde_json::to_string_pretty(file)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Criterion, Score};

    #[test]
    fn test_entry_deserialize_camel_case() {
        let json = r#"{
            "fileName": "dreamshaper_v8_0001.png",
            "absolutePath": "/output/dreamshaper_v8_0001.png",
            "checkpointName": "dreamshaper_v8",
            "criteria": {"beauty": 1, "noErrors": -1},
            "totalScore": 0
        }"#;

        let entry: ImageEntry = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(entry.file_name, "dreamshaper_v8_0001.png");
        assert_eq!(entry.checkpoint_name, "dreamshaper_v8");
        assert_eq!(entry.criteria.get(Criterion::Beauty), Score::Positive);
        assert_eq!(entry.criteria.get(Criterion::NoErrors), Score::Negative);
        assert_eq!(entry.criteria.get(Criterion::Loras), Score::Neutral);
    }

    #[test]
    fn test_entry_deserialize_missing_fields_default() {
        let entry: ImageEntry =
            serde_json::from_str(r#"{"absolutePath": "/tmp/a.png"}"#).expect("deserialize failed");
        assert_eq!(entry.absolute_path, "/tmp/a.png");
        assert_eq!(entry.checkpoint_name, "");
        assert_eq!(entry.criteria.total(), 0);
    }

    #[test]
    fn test_grid_file_without_images_key_is_empty() {
        let file: GridFile = serde_json::from_str("{}").expect("deserialize failed");
        assert!(file.images.is_empty());
    }

    #[test]
    fn test_grid_file_serialize_shape() {
        let file = GridFile {
            images: vec![ImageEntry {
                file_name: "a.png".to_string(),
                absolute_path: "/tmp/a.png".to_string(),
                checkpoint_name: "unknown".to_string(),
                criteria: CriteriaScores::default(),
                total_score: 0,
            }],
        };

        let json = serde_json::to_string(&file).expect("serialize failed");
        assert!(json.contains("\"images\""));
        assert!(json.contains("\"fileName\":\"a.png\""));
        assert!(json.contains("\"absolutePath\":\"/tmp/a.png\""));
        assert!(json.contains("\"checkpointName\":\"unknown\""));
        assert!(json.contains("\"totalScore\":0"));
    }
}
