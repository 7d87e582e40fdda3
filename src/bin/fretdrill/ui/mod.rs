//! TUI module for fretdrill
//!
//! Feeds queued detections into the validation session and renders the
//! drill's progress, score, and live pitch readout.

mod progress;
mod scoreboard;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use fretdrill::engine::{DrillSession, LoopRange, PitchSample, SampleReceiver};

use progress::render_progress;
use scoreboard::render_scoreboard;

/// UI application state
pub struct UiApp {
    session: DrillSession,
    /// Ring buffer receiver for detector output
    sample_rx: Consumer<PitchSample>,
    /// Most recent detection, for the pitch readout
    last_sample: Option<PitchSample>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    /// Create a new UI application
    pub fn new(session: DrillSession, sample_rx: Consumer<PitchSample>) -> Self {
        Self {
            session,
            sample_rx,
            last_sample: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Feed pending detections into the session
            self.poll_samples();

            // Draw the UI
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the detector queue into the session. This is the single
    /// consumer: the session is never touched from the audio thread.
    fn poll_samples(&mut self) {
        let now = Instant::now();
        while let Some(sample) = SampleReceiver::pop(&mut self.sample_rx) {
            self.last_sample = Some(sample);
            self.session.submit_sample(Some(sample), now);
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                // Toggle looping over the whole sequence
                let len = self.session.drill().sequence.len();
                if self.session.loop_range().is_some() {
                    self.session.set_loop(None);
                } else if len > 0 {
                    self.session.set_loop(LoopRange::new(0, len - 1));
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: scoreboard, step progress, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Scoreboard
                Constraint::Min(4),    // Step progress
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_scoreboard(
            frame,
            chunks[0],
            &self.session,
            self.last_sample,
            Instant::now(),
        );
        render_progress(frame, chunks[1], &self.session);

        // Help bar
        let help = Paragraph::new(" [Q] Quit  [R] Reset  [L] Toggle loop")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
