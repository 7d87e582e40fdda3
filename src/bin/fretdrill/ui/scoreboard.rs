//! Scoreboard widget - drill name, score, streak, loop counter, and the
//! live pitch readout

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fretdrill::engine::{DrillSession, PitchSample};
use fretdrill::music::nearest_note;

/// Render the scoreboard bar
pub fn render_scoreboard(
    frame: &mut Frame,
    area: Rect,
    session: &DrillSession,
    last_sample: Option<PitchSample>,
    now: Instant,
) {
    let block = Block::default().title(" fretdrill ").borders(Borders::ALL);

    let status = if session.is_complete() {
        Span::styled("COMPLETE", Style::default().fg(Color::Green))
    } else if !session.awaiting_note(now) {
        // 200 ms flash right after a validated note
        Span::styled("✓ nice", Style::default().fg(Color::Green))
    } else {
        Span::styled("listening", Style::default().fg(Color::Yellow))
    };

    let readout = match last_sample.and_then(|s| nearest_note(s.frequency).map(|n| (s, n))) {
        Some((sample, near)) => format!(
            "{} {:+.0}c ({:.0}%)",
            near,
            near.cents,
            sample.clarity * 100.0
        ),
        None => String::from("--"),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {}  ", session.drill().name),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Score: {}  ", session.score()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Streak: {}  ", session.streak()),
            Style::default().fg(Color::Green),
        ),
    ];
    if session.loop_range().is_some() {
        spans.push(Span::styled(
            format!("Loop x{}  ", session.loop_count()),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(
        format!("Note: {}  ", readout),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(status);

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
