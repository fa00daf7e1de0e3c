//! Tri-state rating values and the fixed criteria set
//!
//! Every card carries one `Score` per `Criterion`. Scores travel on the
//! wire as the bare integers -1 / 0 / +1, matching the exported JSON.

use serde::{Deserialize, Serialize};

/// One rating value for one criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Score {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Score {
    /// Numeric value used for totals: -1, 0 or +1.
    pub fn value(self) -> i32 {
        match self {
            Score::Negative => -1,
            Score::Neutral => 0,
            Score::Positive => 1,
        }
    }

    /// Next state in the click cycle: neutral -> positive -> negative -> neutral.
    pub fn cycled(self) -> Self {
        match self {
            Score::Neutral => Score::Positive,
            Score::Positive => Score::Negative,
            Score::Negative => Score::Neutral,
        }
    }
}

impl From<Score> for i8 {
    fn from(score: Score) -> Self {
        score.value() as i8
    }
}

impl TryFrom<i8> for Score {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Score::Negative),
            0 => Ok(Score::Neutral),
            1 => Ok(Score::Positive),
            other => Err(format!("score out of range: {}", other)),
        }
    }
}

/// One rating axis. The set is closed; the labels double as the JSON keys
/// inside the exported `criteria` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Beauty,
    NoErrors,
    Loras,
    PosPrompt,
    NegPrompt,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Beauty,
        Criterion::NoErrors,
        Criterion::Loras,
        Criterion::PosPrompt,
        Criterion::NegPrompt,
    ];

    /// Button label and JSON key.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Beauty => "beauty",
            Criterion::NoErrors => "noErrors",
            Criterion::Loras => "loras",
            Criterion::PosPrompt => "Pos prompt",
            Criterion::NegPrompt => "Neg prompt",
        }
    }
}

/// The full set of ratings for one card.
///
/// Serializes as the `criteria` JSON object. Keys missing from an imported
/// object default to neutral; unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaScores {
    pub beauty: Score,
    #[serde(rename = "noErrors")]
    pub no_errors: Score,
    pub loras: Score,
    #[serde(rename = "Pos prompt")]
    pub pos_prompt: Score,
    #[serde(rename = "Neg prompt")]
    pub neg_prompt: Score,
}

impl CriteriaScores {
    pub fn get(&self, criterion: Criterion) -> Score {
        match criterion {
            Criterion::Beauty => self.beauty,
            Criterion::NoErrors => self.no_errors,
            Criterion::Loras => self.loras,
            Criterion::PosPrompt => self.pos_prompt,
            Criterion::NegPrompt => self.neg_prompt,
        }
    }

    pub fn set(&mut self, criterion: Criterion, score: Score) {
        match criterion {
            Criterion::Beauty => self.beauty = score,
            Criterion::NoErrors => self.no_errors = score,
            Criterion::Loras => self.loras = score,
            Criterion::PosPrompt => self.pos_prompt = score,
            Criterion::NegPrompt => self.neg_prompt = score,
        }
    }

    /// Advances one criterion through the click cycle and returns the new value.
    pub fn cycle(&mut self, criterion: Criterion) -> Score {
        let next = self.get(criterion).cycled();
        self.set(criterion, next);
        next
    }

    /// Sum of all criterion values. Always recomputed, never cached.
    pub fn total(&self) -> i32 {
        Criterion::ALL.iter().map(|&c| self.get(c).value()).sum()
    }
}
