#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::sequence::TabSequence;

/// How hard a drill is, for library filtering.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Broad grouping used by drill libraries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Basics,
    Riffs,
    Chords,
    Scales,
}

/// A practice exercise: a named, immutable sequence plus its metadata.
///
/// The `id` is the identity the session watches: loading a drill with a
/// different id resets all progress.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Drill {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    /// Suggested practice tempo. Informational; the engine is not clocked.
    pub tempo_bpm: u16,
    pub sequence: TabSequence,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Vec<String>,
}

impl Drill {
    /// Minimal constructor for hosts that build drills in code.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sequence: TabSequence) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty: Difficulty::Easy,
            tempo_bpm: 80,
            sequence,
            description: None,
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_tempo(mut self, tempo_bpm: u16) -> Self {
        self.tempo_bpm = tempo_bpm;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
