//! Practice history aggregation.
//!
//! The engine hands a [`SessionRecord`] to its host on completion; a
//! [`PracticeLog`] rolls those up into totals and per-drill bests. The
//! log is a plain in-memory value; persisting it (and stamping the
//! timestamps) is the host's job.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Completed sessions kept verbatim before the oldest are dropped.
pub const MAX_RECORDED_SESSIONS: usize = 100;

/// One completed run of a drill.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub drill_id: String,
    /// Completion time, milliseconds since the Unix epoch (host-stamped).
    pub timestamp_ms: u64,
    pub score: u32,
    /// Percentage of notes played that were correct, 0-100.
    pub accuracy: f32,
    /// Wall-clock run duration, measured by the host.
    pub duration_ms: u64,
    pub notes_played: u32,
    pub notes_correct: u32,
}

/// Rolling aggregate for one drill.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DrillStats {
    pub drill_id: String,
    pub play_count: u32,
    pub best_score: u32,
    pub average_accuracy: f32,
    pub last_played_ms: u64,
}

/// Everything a player has done, aggregated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PracticeLog {
    pub total_play_ms: u64,
    pub total_sessions: u32,
    pub total_notes_played: u64,
    /// Most recent sessions, oldest first, capped at
    /// [`MAX_RECORDED_SESSIONS`].
    pub sessions: Vec<SessionRecord>,
    pub per_drill: HashMap<String, DrillStats>,
}

impl PracticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed session into the log.
    pub fn record(&mut self, session: SessionRecord) {
        self.total_sessions += 1;
        self.total_play_ms += session.duration_ms;
        self.total_notes_played += u64::from(session.notes_played);

        match self.per_drill.get_mut(&session.drill_id) {
            Some(stats) => {
                stats.play_count += 1;
                stats.best_score = stats.best_score.max(session.score);
                // Running average over play_count sessions
                stats.average_accuracy = (stats.average_accuracy
                    * (stats.play_count - 1) as f32
                    + session.accuracy)
                    / stats.play_count as f32;
                stats.last_played_ms = session.timestamp_ms;
            }
            None => {
                self.per_drill.insert(
                    session.drill_id.clone(),
                    DrillStats {
                        drill_id: session.drill_id.clone(),
                        play_count: 1,
                        best_score: session.score,
                        average_accuracy: session.accuracy,
                        last_played_ms: session.timestamp_ms,
                    },
                );
            }
        }

        self.sessions.push(session);
        if self.sessions.len() > MAX_RECORDED_SESSIONS {
            let excess = self.sessions.len() - MAX_RECORDED_SESSIONS;
            self.sessions.drain(0..excess);
        }
    }

    pub fn drill_stats(&self, drill_id: &str) -> Option<&DrillStats> {
        self.per_drill.get(drill_id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
