pub mod engine; // Pitch-stream validation state machine
pub mod music;
pub mod stats;
pub mod tab; // Fretboard sequences and drills

/// Matching tolerance used when none is configured (strictly under a semitone).
pub const DEFAULT_PITCH_TOLERANCE_CENTS: f32 = 40.0;
