use crate::music::{cents_offset, Tuning};
use crate::tab::{FrettedNote, Step};
use crate::DEFAULT_PITCH_TOLERANCE_CENTS;

/// Decides whether a detected fundamental satisfies a step.
///
/// Candidates are tried in declaration order and the first one within
/// tolerance wins. For a double-stop this is the tie-break: a single
/// detected fundamental cannot tell two simultaneous strings apart, so
/// the step is satisfied by any one candidate and ambiguity resolves to
/// the first-declared note. Changing that order changes observable
/// scoring, so it is part of the contract.
#[derive(Debug, Clone, Copy)]
pub struct NoteMatcher {
    tuning: Tuning,
    tolerance_cents: f32,
}

/// A successful match: which candidate matched and how far off it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteMatch {
    pub note: FrettedNote,
    /// Signed offset from the matched note's center, in cents.
    pub cents_off: f32,
}

impl NoteMatcher {
    pub fn new(tuning: Tuning, tolerance_cents: f32) -> Self {
        Self {
            tuning,
            tolerance_cents,
        }
    }

    pub fn tolerance_cents(&self) -> f32 {
        self.tolerance_cents
    }

    /// Try a frequency against every candidate of a step.
    pub fn match_step(&self, frequency: f32, step: &Step) -> Option<NoteMatch> {
        if frequency <= 0.0 {
            return None;
        }

        for &note in step.notes() {
            let target = self.tuning.fret_frequency(note);
            if target <= 0.0 {
                continue;
            }
            let cents = cents_offset(frequency, target);
            if cents.abs() <= self.tolerance_cents {
                return Some(NoteMatch {
                    note,
                    cents_off: cents,
                });
            }
        }
        None
    }
}

impl Default for NoteMatcher {
    fn default() -> Self {
        Self::new(Tuning::STANDARD, DEFAULT_PITCH_TOLERANCE_CENTS)
    }
}
