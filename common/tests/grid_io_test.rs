//! Import/export integration tests over real files

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use checkpoints_common::{checkpoints, Criterion, Grid, ImportMode, Marker};

fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not a real png").expect("Failed to write image file");
    path
}

fn grid_json(entries: &[(&Path, i8)]) -> String {
    let images: Vec<String> = entries
        .iter()
        .map(|(path, beauty)| {
            format!(
                r#"{{"fileName": "{name}", "absolutePath": "{path}", "checkpointName": "unknown", "criteria": {{"beauty": {beauty}}}, "totalScore": {beauty}}}"#,
                name = path.file_name().unwrap_or_default().to_string_lossy(),
                path = path.display(),
            )
        })
        .collect();
    format!(r#"{{"images": [{}]}}"#, images.join(", "))
}

#[test]
fn test_import_replace_skips_missing_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = write_image(dir.path(), "a.png");
    let b = write_image(dir.path(), "b.png");
    let gone = dir.path().join("gone.png");

    let json_path = dir.path().join("grid-A.json");
    fs::write(&json_path, grid_json(&[(&a, 1), (&gone, 0), (&b, -1)]))
        .expect("Failed to write grid file");

    let mut grid = Grid::new();
    let report = grid
        .import_file(&json_path, ImportMode::Replace)
        .expect("Import failed");

    assert_eq!(report.added, 2);
    assert_eq!(report.missing, 1);
    assert_eq!(report.duplicates, 0);
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.cards()[0].file_name(), "a.png");
    assert_eq!(grid.cards()[1].file_name(), "b.png");
    assert_eq!(grid.cards()[0].source_json(), Some("grid-A.json"));
}

#[test]
fn test_import_add_skips_existing_paths_and_appends() {
    let dir = tempdir().expect("Failed to create temp dir");
    let p = write_image(dir.path(), "p.png");
    let q = write_image(dir.path(), "q.png");

    let mut grid = Grid::new();
    grid.add_images(&[p.clone()]);

    let json_path = dir.path().join("more.json");
    fs::write(&json_path, grid_json(&[(&p, 1), (&q, 1)])).expect("Failed to write grid file");

    let report = grid
        .import_file(&json_path, ImportMode::Add)
        .expect("Import failed");

    assert_eq!(report.added, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.missing, 0);
    assert_eq!(grid.len(), 2);
    // New cards land after all pre-existing ones.
    assert_eq!(grid.cards()[0].file_name(), "p.png");
    assert_eq!(grid.cards()[1].file_name(), "q.png");
}

#[test]
fn test_import_replace_clears_previous_cards() {
    let dir = tempdir().expect("Failed to create temp dir");
    let old = write_image(dir.path(), "old.png");
    let new = write_image(dir.path(), "new.png");

    let mut grid = Grid::new();
    grid.add_images(&[old]);

    let json_path = dir.path().join("replace.json");
    fs::write(&json_path, grid_json(&[(&new, 0)])).expect("Failed to write grid file");

    grid.import_file(&json_path, ImportMode::Replace)
        .expect("Import failed");

    assert_eq!(grid.len(), 1);
    assert_eq!(grid.cards()[0].file_name(), "new.png");
}

#[test]
fn test_import_malformed_file_leaves_grid_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let keep = write_image(dir.path(), "keep.png");

    let mut grid = Grid::new();
    grid.add_images(&[keep]);

    let json_path = dir.path().join("broken.json");
    fs::write(&json_path, "{\"images\": [").expect("Failed to write grid file");

    let result = grid.import_file(&json_path, ImportMode::Replace);
    assert!(result.is_err());
    assert_eq!(grid.len(), 1, "A parse error must not clear the grid");
}

#[test]
fn test_import_file_without_images_key_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("empty.json");
    fs::write(&json_path, "{}").expect("Failed to write grid file");

    let mut grid = Grid::new();
    let report = grid
        .import_file(&json_path, ImportMode::Replace)
        .expect("Import failed");

    assert_eq!(report.added, 0);
    assert!(grid.is_empty());
}

#[test]
fn test_export_import_roundtrip_preserves_order_and_scores() {
    let dir = tempdir().expect("Failed to create temp dir");
    let paths: Vec<PathBuf> = ["c.png", "a.png", "b.png"]
        .iter()
        .map(|name| write_image(dir.path(), name))
        .collect();

    let mut grid = Grid::new();
    grid.relabel(vec!["a".to_string()]);
    grid.add_images(&paths);

    let first = grid.cards()[0].id();
    grid.toggle(first, Criterion::Beauty);
    grid.toggle(first, Criterion::Loras);
    let third = grid.cards()[2].id();
    grid.toggle(third, Criterion::NegPrompt);
    grid.toggle(third, Criterion::NegPrompt);

    let json_path = dir.path().join("roundtrip.json");
    grid.export_file(&json_path).expect("Export failed");

    let mut restored = Grid::new();
    restored
        .import_file(&json_path, ImportMode::Replace)
        .expect("Import failed");

    assert_eq!(restored.len(), grid.len());
    for (original, copy) in grid.cards().iter().zip(restored.cards()) {
        assert_eq!(original.path(), copy.path());
        assert_eq!(original.checkpoint_name(), copy.checkpoint_name());
        assert_eq!(original.criteria(), copy.criteria());
        assert_eq!(original.total(), copy.total());
    }
    assert_eq!(restored.classify(), grid.classify());
    assert_eq!(
        restored.classify(),
        vec![Marker::Best, Marker::None, Marker::Worst]
    );
}

#[test]
fn test_scan_folder_writes_checkpoint_list() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("sdxl").join("finetunes");
    fs::create_dir_all(&nested).expect("Failed to create folders");
    let deep = dir.path().join("one").join("two").join("three");
    fs::create_dir_all(&deep).expect("Failed to create folders");

    fs::write(dir.path().join("juggernaut_xl.safetensors"), b"weights")
        .expect("Failed to write model file");
    fs::write(nested.join("dreamshaper_v8.safetensors"), b"weights")
        .expect("Failed to write model file");
    fs::write(dir.path().join("notes.txt"), b"ignored").expect("Failed to write file");
    // Four components below the root: out of scan range.
    fs::write(deep.join("too_deep.safetensors"), b"weights")
        .expect("Failed to write model file");

    let outcome = checkpoints::scan_folder(dir.path()).expect("Scan failed");

    assert_eq!(outcome.names.len(), 2);
    assert!(outcome.names.contains(&"juggernaut_xl".to_string()));
    assert!(outcome.names.contains(&"dreamshaper_v8".to_string()));
    assert!(!outcome.names.contains(&"too_deep".to_string()));

    let list_path = outcome.list_path.expect("List file not written");
    assert_eq!(list_path, dir.path().join(checkpoints::LIST_FILE_NAME));
    let listed = checkpoints::load_list(&list_path).expect("Failed to read list back");
    assert_eq!(listed, outcome.names);
}

#[test]
fn test_scan_folder_without_models_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("readme.md"), b"no models here").expect("Failed to write file");

    let outcome = checkpoints::scan_folder(dir.path()).expect("Scan failed");

    assert!(outcome.names.is_empty());
    assert!(outcome.list_path.is_none());
    assert!(!dir.path().join(checkpoints::LIST_FILE_NAME).exists());
}

#[test]
fn test_load_list_skips_blank_lines() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("checkpoints.txt");
    fs::write(&path, "dreamshaper_v8\n\n  juggernaut_xl  \n\n").expect("Failed to write list");

    let names = checkpoints::load_list(&path).expect("Load failed");
    assert_eq!(names, vec!["dreamshaper_v8", "juggernaut_xl"]);
}
