use std::time::{Duration, Instant};

use crate::tab::{FrettedNote, Step};

/// Minimum interval between two accepted matches.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(80);

/*
Repeat Gate
===========

When a sequence asks for the exact same (string, fret) twice in a row, a
single sustained or slowly decaying pluck would satisfy both steps: the
detector keeps reporting the same in-tolerance frequency tick after tick.
The gate breaks that by demanding evidence of a NEW attack before the
second occurrence may validate.

State:

  last_matched       the position accepted on the previous success
  needs_fresh_onset  armed at success time when the NEXT step asks for
                     the same position again
  last_onset         the onset flag of the previous processed sample,
                     for rising-edge detection

While armed, a sample is admitted only on an onset rising edge: the
current sample says onset and the previous one did not. The edge clears
the armed flag whether or not the sample's pitch matches, and every
processed sample updates `last_onset`: the gate watches the sample
stream itself, not just the accepted matches.

If the current step does not repeat the previously matched position the
gate is inert and admits everything.
*/
#[derive(Debug, Default)]
pub struct RepeatGate {
    last_matched: Option<FrettedNote>,
    needs_fresh_onset: bool,
    last_onset: bool,
}

impl RepeatGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Examine one sample against the current step. Returns `false` when
    /// the sample must be held back (repeat pending, no fresh attack yet).
    ///
    /// Call once per processed sample, before any match is accepted.
    pub fn admit(&mut self, step: &Step, onset: bool) -> bool {
        let repeat_pending = self.needs_fresh_onset
            && self
                .last_matched
                .is_some_and(|last| step.contains(last));

        let rising_edge = onset && !self.last_onset;
        self.last_onset = onset;

        if repeat_pending {
            if !rising_edge {
                return false;
            }
            self.needs_fresh_onset = false;
        }
        true
    }

    /// Record an accepted match and arm the gate if the step that follows
    /// asks for the same position again.
    pub fn record_success(&mut self, matched: FrettedNote, next_step: Option<&Step>) {
        self.last_matched = Some(matched);
        self.needs_fresh_onset = next_step.is_some_and(|step| step.contains(matched));
    }

    /// Forget the matched-note history. Used on loop wrap: a restarted
    /// loop must not treat its first note as an already-primed repeat.
    /// Onset edge tracking survives, it belongs to the sample stream.
    pub fn clear_repeat(&mut self) {
        self.last_matched = None;
        self.needs_fresh_onset = false;
    }

    /// Full reset, including edge tracking.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn needs_fresh_onset(&self) -> bool {
        self.needs_fresh_onset
    }

    pub fn last_matched(&self) -> Option<FrettedNote> {
        self.last_matched
    }
}

/// Suppresses re-validation inside a fixed window after a success.
///
/// Bounds the scoring rate independently of the detector tick rate and
/// absorbs pitch jitter around a step transition. Samples inside the
/// window are ignored outright, regardless of match quality.
#[derive(Debug)]
pub struct DebounceGuard {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl DebounceGuard {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    pub fn cooling_down(&self, now: Instant) -> bool {
        self.last_accepted
            .is_some_and(|t| now.duration_since(t) < self.interval)
    }

    pub fn record(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for DebounceGuard {
    fn default() -> Self {
        Self::new(DEBOUNCE_INTERVAL)
    }
}
