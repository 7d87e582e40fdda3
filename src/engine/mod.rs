//! The sequence validation engine.
//!
//! A [`session::DrillSession`] consumes a stream of pitch estimates and
//! turns it into forward progress through a tablature sequence. Everything
//! here is synchronous and single-threaded: the session mutates only in
//! response to a submitted sample or an explicit reset, and malformed or
//! premature input is silently ignored rather than surfaced as an error.

pub mod cursor;
pub mod gate;
pub mod matcher;
pub mod sample;
pub mod scoring;
pub mod session;

pub use cursor::{Advance, LoopRange, SequenceCursor};
pub use gate::{DebounceGuard, RepeatGate};
pub use matcher::{NoteMatch, NoteMatcher};
pub use sample::{PitchSample, SampleReceiver};
pub use scoring::ScoreKeeper;
pub use session::{DrillSession, SessionConfig, StepAdvance};
