pub mod notes;
pub mod tuning;

pub use notes::{nearest_note, note_frequency, NearestNote, NoteName, A4_HZ};
pub use tuning::{cents_offset, Tuning};
