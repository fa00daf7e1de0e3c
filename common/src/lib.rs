//! Checkpoints Gallery common library
//!
//! Grid state, scoring and the import/export schema shared with the
//! desktop UI.

pub mod card;
pub mod checkpoints;
pub mod error;
pub mod grid;
pub mod i18n;
pub mod schema;
pub mod score;
pub mod settings;

pub use card::{Card, CardId};
pub use error::{Error, Result};
pub use grid::{AddReport, Grid, ImportReport, Marker};
pub use i18n::TextKey;
pub use schema::{GridFile, ImageEntry};
pub use score::{CriteriaScores, Criterion, Score};
pub use settings::{ImportMode, Language, Settings, Theme};
