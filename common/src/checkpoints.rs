//! Checkpoint-name lists
//!
//! A checkpoint list is a plain text file, one model name per line. Names
//! are matched against image file names by substring to label cards.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Label used when no checkpoint name matches a file name.
pub const UNKNOWN: &str = "unknown";

/// File name the folder scan writes its result to.
pub const LIST_FILE_NAME: &str = "checkpoints.txt";

const CHECKPOINT_EXTENSION: &str = "safetensors";

// Model folders nest at most subfolder/variant/file below the root.
const MAX_SCAN_DEPTH: usize = 3;

/// First entry of `checkpoints` (in list order) occurring as a substring of
/// `file_name`, or [`UNKNOWN`] when the list is empty or nothing matches.
pub fn match_name<'a>(file_name: &str, checkpoints: &'a [String]) -> &'a str {
    checkpoints
        .iter()
        .find(|name| file_name.contains(name.as_str()))
        .map(String::as_str)
        .unwrap_or(UNKNOWN)
}

/// Loads a checkpoint list: one name per line, trimmed, blank lines skipped.
pub fn load_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Result of scanning a model folder.
#[derive(Debug)]
pub struct ScanOutcome {
    pub names: Vec<String>,
    /// Where the list was written, when any checkpoint was found.
    pub list_path: Option<PathBuf>,
}

/// Collects the stems of all `*.safetensors` files at most three path
/// components below `folder` and, when any were found, writes them to
/// `checkpoints.txt` inside that folder.
pub fn scan_folder(folder: &Path) -> Result<ScanOutcome> {
    let mut names = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(MAX_SCAN_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().map_or(false, |ext| ext == CHECKPOINT_EXTENSION) {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
    }

    if names.is_empty() {
        return Ok(ScanOutcome { names, list_path: None });
    }

    let list_path = folder.join(LIST_FILE_NAME);
    let mut content = names.join("\n");
    content.push('\n');
    fs::write(&list_path, content)?;

    Ok(ScanOutcome { names, list_path: Some(list_path) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_name_first_in_list_order_wins() {
        let checkpoints = list(&["dreamshaper", "dream", "juggernaut"]);
        assert_eq!(match_name("dreamshaper_v8_0001.png", &checkpoints), "dreamshaper");

        // A shorter prefix listed first shadows the longer name.
        let checkpoints = list(&["dream", "dreamshaper"]);
        assert_eq!(match_name("dreamshaper_v8_0001.png", &checkpoints), "dream");
    }

    #[test]
    fn test_match_name_no_match_is_unknown() {
        let checkpoints = list(&["juggernaut"]);
        assert_eq!(match_name("dreamshaper_v8_0001.png", &checkpoints), UNKNOWN);
    }

    #[test]
    fn test_match_name_empty_list_is_unknown() {
        assert_eq!(match_name("anything.png", &[]), UNKNOWN);
    }
}
