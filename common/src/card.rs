//! One rated image record

use std::path::{Path, PathBuf};

use crate::score::{CriteriaScores, Criterion, Score};

/// Stable identity for one card, assigned by the owning grid. Carried in
/// drag-and-drop payloads instead of any transient widget identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub(crate) u64);

/// One rated image.
#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    path: PathBuf,
    file_name: String,
    checkpoint_name: String,
    criteria: CriteriaScores,
    /// Name of the JSON file this card was imported from, if any.
    source_json: Option<String>,
}

impl Card {
    pub(crate) fn new(id: CardId, path: PathBuf, checkpoint_name: String) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id,
            path,
            file_name,
            checkpoint_name,
            criteria: CriteriaScores::default(),
            source_json: None,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn checkpoint_name(&self) -> &str {
        &self.checkpoint_name
    }

    pub fn criteria(&self) -> &CriteriaScores {
        &self.criteria
    }

    pub fn source_json(&self) -> Option<&str> {
        self.source_json.as_deref()
    }

    /// Sum of all criterion values.
    pub fn total(&self) -> i32 {
        self.criteria.total()
    }

    /// Advances one criterion through the click cycle. The only mutation
    /// path for scores.
    pub fn toggle(&mut self, criterion: Criterion) -> Score {
        self.criteria.cycle(criterion)
    }

    pub(crate) fn set_checkpoint_name(&mut self, name: String) {
        self.checkpoint_name = name;
    }

    pub(crate) fn set_criteria(&mut self, criteria: CriteriaScores) {
        self.criteria = criteria;
    }

    pub(crate) fn set_source_json(&mut self, source: Option<String>) {
        self.source_json = source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(path: &str) -> Card {
        Card::new(CardId(1), PathBuf::from(path), "unknown".to_string())
    }

    #[test]
    fn test_file_name_is_basename() {
        let card = card("/output/2026-01-06/dreamshaper_v8_0001.png");
        assert_eq!(card.file_name(), "dreamshaper_v8_0001.png");
    }

    #[test]
    fn test_toggle_updates_total() {
        let mut card = card("/tmp/a.png");
        assert_eq!(card.total(), 0);

        assert_eq!(card.toggle(Criterion::Beauty), Score::Positive);
        assert_eq!(card.total(), 1);

        assert_eq!(card.toggle(Criterion::Beauty), Score::Negative);
        assert_eq!(card.total(), -1);

        assert_eq!(card.toggle(Criterion::Beauty), Score::Neutral);
        assert_eq!(card.total(), 0);
    }
}
