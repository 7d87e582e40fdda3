use std::time::{Duration, Instant};

use crate::engine::cursor::{Advance, LoopRange, SequenceCursor};
use crate::engine::gate::{DebounceGuard, RepeatGate};
use crate::engine::matcher::NoteMatcher;
use crate::engine::sample::{PitchSample, SampleReceiver};
use crate::engine::scoring::ScoreKeeper;
use crate::music::Tuning;
use crate::stats::SessionRecord;
use crate::tab::{Drill, FrettedNote, StepState};
use crate::DEFAULT_PITCH_TOLERANCE_CENTS;

/// How long the "just validated" indicator stays lit after a success.
pub const JUST_VALIDATED_HOLD: Duration = Duration::from_millis(200);

/*
Drill Session
=============

The orchestrator. One session owns one drill and every piece of mutable
validation state, and is driven entirely by external calls:

    submit_sample(sample, now)   once per detector tick
    set_loop / reset / load      host controls

Per-sample flow, in order:

    1. discard:    no sample, no steps, already complete
    2. repeat gate: a pending repeat without a fresh attack blocks the
                    sample (but its onset flag is still recorded)
    3. debounce:   inside the 80 ms window after a success, ignore
    4. match:      first in-tolerance candidate of the current step
    5. accept:     mark the step, award points, advance (maybe wrapping
                    the loop), stamp the debounce clock, re-arm the
                    200 ms indicator

Steps 1-4 all fall out as "nothing happened this tick" (`None`); the
engine has no error path at all. The caller supplies `now`, so the
session never reads a clock and every timing rule is testable without
sleeping.

Both timers are deadlines compared against the caller's `now`, not
scheduled tasks. Re-arming overwrites the deadline, which is what makes
a stale expiry unable to clear a newer success.
*/

/// Tuning and tolerance knobs for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub tuning: Tuning,
    pub pitch_tolerance_cents: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::STANDARD,
            pitch_tolerance_cents: DEFAULT_PITCH_TOLERANCE_CENTS,
        }
    }
}

/// Everything one accepted match did, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAdvance {
    /// Index of the step that was just validated.
    pub step_index: usize,
    /// Which candidate matched (first-declared wins on double-stops).
    pub note: FrettedNote,
    pub cents_off: f32,
    pub points: u32,
    /// The loop wrapped back to its start.
    pub wrapped: bool,
    /// The sequence is now complete (terminal until reset/load).
    pub completed: bool,
}

pub struct DrillSession {
    drill: Drill,
    matcher: NoteMatcher,
    cursor: SequenceCursor,
    gate: RepeatGate,
    debounce: DebounceGuard,
    scoring: ScoreKeeper,
    step_states: Vec<StepState>,
    /// Deadline until which the "just validated" indicator is lit.
    validated_until: Option<Instant>,
    /// Accepted matches since the last reset, loop wraps included.
    notes_validated: u32,
}

impl DrillSession {
    pub fn new(drill: Drill) -> Self {
        Self::with_config(drill, SessionConfig::default())
    }

    pub fn with_config(drill: Drill, config: SessionConfig) -> Self {
        let len = drill.sequence.len();
        Self {
            matcher: NoteMatcher::new(config.tuning, config.pitch_tolerance_cents),
            cursor: SequenceCursor::new(len),
            gate: RepeatGate::new(),
            debounce: DebounceGuard::default(),
            scoring: ScoreKeeper::new(),
            step_states: vec![StepState::Waiting; len],
            validated_until: None,
            notes_validated: 0,
            drill,
        }
    }

    /// Feed one detector tick. Returns what happened on acceptance,
    /// `None` for every flavor of "no progress this tick".
    pub fn submit_sample(
        &mut self,
        sample: Option<PitchSample>,
        now: Instant,
    ) -> Option<StepAdvance> {
        let sample = sample?;
        if self.cursor.is_complete() {
            return None;
        }

        let index = self.cursor.index();
        let step = self.drill.sequence.step(index)?;
        if step.notes().is_empty() {
            return None;
        }

        // Gate first: even a sample that will be debounced or won't match
        // still feeds onset edge tracking.
        if !self.gate.admit(step, sample.onset) {
            return None;
        }
        if self.debounce.cooling_down(now) {
            return None;
        }

        let matched = self.matcher.match_step(sample.frequency, step)?;

        // Arm the repeat gate if the step after this one asks for the
        // same position again.
        self.gate
            .record_success(matched.note, self.drill.sequence.step(index + 1));

        self.step_states[index] = StepState::Success;
        let points = self.scoring.award(matched.cents_off);

        let wrapped = match self.cursor.advance() {
            Advance::Wrapped(range) => {
                for i in range.start()..=range.end() {
                    if let Some(state) = self.step_states.get_mut(i) {
                        *state = StepState::Waiting;
                    }
                }
                // A restarted loop must not treat its first note as an
                // already-primed repeat.
                self.gate.clear_repeat();
                true
            }
            Advance::Next(_) | Advance::Finished => false,
        };

        self.debounce.record(now);
        self.validated_until = Some(now + JUST_VALIDATED_HOLD);
        self.notes_validated += 1;

        Some(StepAdvance {
            step_index: index,
            note: matched.note,
            cents_off: matched.cents_off,
            points,
            wrapped,
            completed: self.cursor.is_complete(),
        })
    }

    /// Pull every queued sample from a receiver and submit each in turn.
    /// Returns how many were accepted. This is the single-consumer funnel
    /// that serializes all mutations of one session.
    pub fn drain<R: SampleReceiver>(&mut self, rx: &mut R, now: Instant) -> usize {
        let mut accepted = 0;
        while let Some(sample) = rx.pop() {
            if self.submit_sample(Some(sample), now).is_some() {
                accepted += 1;
            }
        }
        accepted
    }

    /// Replace the loop range. `None` disables looping. Affects future
    /// wraps only; the current position is untouched.
    pub fn set_loop(&mut self, range: Option<LoopRange>) {
        self.cursor.set_loop(range);
    }

    /// Back to a fresh state over the same drill. The loop range is kept.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.step_states.fill(StepState::Waiting);
        self.scoring.reset();
        self.gate.reset();
        self.debounce.reset();
        self.validated_until = None;
        self.notes_validated = 0;
    }

    /// Swap in a drill. Progress resets when the drill identity (id or
    /// sequence length) changes; reloading the identical drill keeps the
    /// session where it is.
    pub fn load(&mut self, drill: Drill) {
        let changed = drill.id != self.drill.id
            || drill.sequence.len() != self.drill.sequence.len();
        let len = drill.sequence.len();
        self.drill = drill;

        if changed {
            self.cursor.reload(len);
            self.step_states = vec![StepState::Waiting; len];
            self.scoring.reset();
            self.gate.reset();
            self.debounce.reset();
            self.validated_until = None;
            self.notes_validated = 0;
        }
    }

    pub fn drill(&self) -> &Drill {
        &self.drill
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn step_states(&self) -> &[StepState] {
        &self.step_states
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.is_complete()
    }

    /// True while the session is waiting for the player's next note,
    /// false during the 200 ms flash right after a success.
    pub fn awaiting_note(&self, now: Instant) -> bool {
        match self.validated_until {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn streak(&self) -> u32 {
        self.scoring.streak()
    }

    pub fn loop_count(&self) -> u32 {
        self.cursor.loop_count()
    }

    pub fn loop_range(&self) -> Option<LoopRange> {
        self.cursor.loop_range()
    }

    pub fn notes_validated(&self) -> u32 {
        self.notes_validated
    }

    /// The payload for the stats collaborator, available once complete.
    /// Timestamp and elapsed time are the caller's measurements; only
    /// successes advance the cursor, so played == correct.
    pub fn completion_record(&self, timestamp_ms: u64, duration_ms: u64) -> Option<SessionRecord> {
        if !self.is_complete() {
            return None;
        }
        Some(SessionRecord {
            drill_id: self.drill.id.clone(),
            timestamp_ms,
            score: self.score(),
            accuracy: 100.0,
            duration_ms,
            notes_played: self.notes_validated,
            notes_correct: self.notes_validated,
        })
    }
}
