//! fretdrill - terminal tablature practice
//!
//! Run with: cargo run

mod app;
mod detector;
mod ui;

use app::Practice;
use fretdrill::music::Tuning;
use fretdrill::tab::{Category, Difficulty, Drill, TabSequence};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Box-1 E minor pentatonic ascent, with a double-stop at the turn
    // and a doubled note at the top to exercise the repeat gate
    let sequence = TabSequence::builder()
        .note(6, 0)
        .note(6, 3)
        .note(5, 0)
        .note(5, 2)
        .note(4, 0)
        .note(4, 2)
        .chord(&[(3, 0), (2, 0)])
        .note(3, 2)
        .note(3, 2)
        .build()?;

    let drill = Drill::new("em-pentatonic-box1", "E Minor Pentatonic (Box 1)", sequence)
        .with_difficulty(Difficulty::Easy)
        .with_tempo(80)
        .with_category(Category::Scales)
        .with_description("Ascent through box 1 with a doubled top note");

    Practice::new(drill)
        .tuning(Tuning::STANDARD)
        .tolerance_cents(40.0)
        .run()
}
