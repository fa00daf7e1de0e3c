//! The grid: an ordered collection of cards
//!
//! One grid backs one UI tab. All structural invariants live here: path
//! uniqueness when adding, best/worst classification, stable reordering
//! under drag-and-drop, and the import merge rules.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::card::{Card, CardId};
use crate::checkpoints;
use crate::error::Result;
use crate::schema::{self, GridFile, ImageEntry};
use crate::score::{Criterion, Score};
use crate::settings::ImportMode;

/// Best/worst marker computed from the score spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Best,
    Worst,
}

/// Outcome of adding images directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddReport {
    pub added: usize,
    pub duplicates: usize,
}

/// Outcome of an import merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    pub missing: usize,
}

#[derive(Debug, Default)]
pub struct Grid {
    cards: Vec<Card>,
    checkpoints: Vec<String>,
    next_id: u64,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn checkpoints(&self) -> &[String] {
        &self.checkpoints
    }

    fn alloc_id(&mut self) -> CardId {
        self.next_id += 1;
        CardId(self.next_id)
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Appends one card per path, labeled via the current checkpoint list.
    /// Paths already present in the grid (or repeated in `paths`) are
    /// skipped and counted as duplicates.
    pub fn add_images<P: AsRef<Path>>(&mut self, paths: &[P]) -> AddReport {
        let mut seen: HashSet<PathBuf> =
            self.cards.iter().map(|c| c.path().to_path_buf()).collect();
        let mut report = AddReport::default();

        for path in paths {
            let path = path.as_ref();
            if seen.contains(path) {
                report.duplicates += 1;
                continue;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let label = checkpoints::match_name(&file_name, &self.checkpoints).to_string();

            let id = self.alloc_id();
            self.cards.push(Card::new(id, path.to_path_buf(), label));
            seen.insert(path.to_path_buf());
            report.added += 1;
        }

        report
    }

    /// Removes one card. Returns false when the id is unknown.
    pub fn remove(&mut self, id: CardId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Advances one criterion of one card through the click cycle.
    pub fn toggle(&mut self, id: CardId, criterion: Criterion) -> Option<Score> {
        let index = self.position(id)?;
        Some(self.cards[index].toggle(criterion))
    }

    /// Moves `source` into the slot `target` occupied before the move:
    /// both indices are captured first, the source is removed, then
    /// re-inserted at the target's pre-removal index. Cards between the two
    /// positions shift by one. No-op when the ids are equal or unknown.
    ///
    /// `[A,B,C,D]`: `reorder(A, C)` -> `[B,C,A,D]`; `reorder(D, B)` -> `[A,D,B,C]`.
    pub fn reorder(&mut self, source: CardId, target: CardId) -> bool {
        if source == target {
            return false;
        }
        let (Some(source_index), Some(target_index)) =
            (self.position(source), self.position(target))
        else {
            return false;
        };

        let card = self.cards.remove(source_index);
        self.cards.insert(target_index, card);
        true
    }

    /// One marker per card, in card order. All cards at the maximum total
    /// are Best and all at the minimum are Worst, unless every total is
    /// equal (then nothing is marked).
    pub fn classify(&self) -> Vec<Marker> {
        if self.cards.is_empty() {
            return Vec::new();
        }

        let totals: Vec<i32> = self.cards.iter().map(Card::total).collect();
        let max = totals.iter().copied().max().unwrap_or(0);
        let min = totals.iter().copied().min().unwrap_or(0);

        if max == min {
            return vec![Marker::None; totals.len()];
        }

        totals
            .iter()
            .map(|&total| {
                if total == max {
                    Marker::Best
                } else if total == min {
                    Marker::Worst
                } else {
                    Marker::None
                }
            })
            .collect()
    }

    /// Stores a new checkpoint list and re-derives every card's label.
    /// Idempotent; returns how many labels changed.
    pub fn relabel(&mut self, checkpoints: Vec<String>) -> usize {
        self.checkpoints = checkpoints;
        let mut updated = 0;
        for card in &mut self.cards {
            let label = checkpoints::match_name(card.file_name(), &self.checkpoints);
            if card.checkpoint_name() != label {
                card.set_checkpoint_name(label.to_string());
                updated += 1;
            }
        }
        updated
    }

    /// Merges parsed entries into the grid.
    ///
    /// Replace mode clears the grid first, then appends every entry whose
    /// file still exists, in file order. Add mode keeps existing cards and
    /// appends entries whose path is not already present; the
    /// duplicate-suppression set is updated as entries land, so no two
    /// cards share a path after an add-mode import. Per-entry problems are
    /// counted, never fatal.
    pub fn import_entries(
        &mut self,
        entries: Vec<ImageEntry>,
        mode: ImportMode,
        source: Option<&str>,
    ) -> ImportReport {
        if mode == ImportMode::Replace {
            self.cards.clear();
        }

        let mut seen: HashSet<PathBuf> = match mode {
            ImportMode::Add => self.cards.iter().map(|c| c.path().to_path_buf()).collect(),
            ImportMode::Replace => HashSet::new(),
        };

        let mut report = ImportReport::default();
        for entry in entries {
            let path = PathBuf::from(&entry.absolute_path);
            if !path.exists() {
                report.missing += 1;
                continue;
            }
            if mode == ImportMode::Add {
                if seen.contains(&path) {
                    report.duplicates += 1;
                    continue;
                }
                seen.insert(path.clone());
            }

            let label = if entry.checkpoint_name.is_empty() {
                checkpoints::UNKNOWN.to_string()
            } else {
                entry.checkpoint_name
            };

            let id = self.alloc_id();
            let mut card = Card::new(id, path, label);
            card.set_criteria(entry.criteria);
            card.set_source_json(source.map(str::to_string));
            self.cards.push(card);
            report.added += 1;
        }

        report
    }

    /// Reads and parses `path` completely before touching the grid; a
    /// malformed file leaves the current cards untouched even in replace
    /// mode.
    pub fn import_file(&mut self, path: &Path, mode: ImportMode) -> Result<ImportReport> {
        let file = schema::read_grid_file(path)?;
        let source = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(self.import_entries(file.images, mode, source.as_deref()))
    }

    /// The full grid in wire form, in display order.
    pub fn snapshot(&self) -> GridFile {
        GridFile {
            images: self.cards.iter().map(ImageEntry::from_card).collect(),
        }
    }

    pub fn export_file(&self, path: &Path) -> Result<()> {
        schema::write_grid_file(path, &self.snapshot())
    }
}
