//! Step progress widget - the drill sequence with per-step state and a
//! cursor marker under the step being waited on

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fretdrill::engine::DrillSession;
use fretdrill::tab::{Step, StepState};

/// `"3/2"` for a single note, `"3/0+2/0"` for a double-stop.
fn step_label(step: &Step) -> String {
    let mut label = String::new();
    for (i, note) in step.notes().iter().enumerate() {
        if i > 0 {
            label.push('+');
        }
        label.push_str(&note.to_string());
    }
    label
}

/// Render the step row
pub fn render_progress(frame: &mut Frame, area: Rect, session: &DrillSession) {
    let block = Block::default().title(" Steps ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 8 {
        return;
    }

    let steps = session.drill().sequence.steps();
    let states = session.step_states();
    let current = session.current_index();
    let complete = session.is_complete();

    let mut row = Vec::new();
    let mut marker = String::new();

    for (index, step) in steps.iter().enumerate() {
        let label = step_label(step);
        let width = label.chars().count();
        let is_current = index == current && !complete;

        let style = match states.get(index) {
            Some(StepState::Success) => Style::default().fg(Color::Green),
            Some(StepState::Error) => Style::default().fg(Color::Red),
            _ if is_current => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::DarkGray),
        };

        row.push(Span::styled(label, style));
        row.push(Span::raw("  "));

        if is_current {
            marker.push('▲');
            marker.push_str(&" ".repeat(width + 1));
        } else {
            marker.push_str(&" ".repeat(width + 2));
        }
    }

    let lines = vec![
        Line::from(row),
        Line::from(Span::styled(marker, Style::default().fg(Color::Yellow))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
