pub mod drill;
pub mod sequence;

pub use drill::{Category, Difficulty, Drill};
pub use sequence::{FrettedNote, Step, StepState, TabError, TabSequence, TabSequenceBuilder};
