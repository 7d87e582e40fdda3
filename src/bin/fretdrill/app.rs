//! Practice - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use fretdrill::engine::{DrillSession, PitchSample, SessionConfig};
use fretdrill::music::Tuning;
use fretdrill::tab::Drill;
use fretdrill::DEFAULT_PITCH_TOLERANCE_CENTS;

use super::detector::PitchTracker;
use super::ui::UiApp;

/// Capacity of the detector-to-UI sample queue. Detections arrive a few
/// dozen times per second; the UI drains at ~60 Hz.
const SAMPLE_QUEUE_CAPACITY: usize = 64;

/// Main application builder
pub struct Practice {
    drill: Drill,
    tuning: Tuning,
    tolerance_cents: f32,
}

impl Practice {
    /// Create a practice run over a drill
    pub fn new(drill: Drill) -> Self {
        Self {
            drill,
            tuning: Tuning::STANDARD,
            tolerance_cents: DEFAULT_PITCH_TOLERANCE_CENTS,
        }
    }

    /// Set the tuning the drill is played in
    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the pitch matching tolerance in cents
    pub fn tolerance_cents(mut self, cents: f32) -> Self {
        self.tolerance_cents = cents;
        self
    }

    /// Run the application (takes over the terminal, listens to the mic)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio capture
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| eyre!("no default input device available"))?;
        let config = device
            .default_input_config()
            .wrap_err("failed to fetch default input config")?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        // Detections flow audio thread -> UI thread through this queue;
        // the session is only ever touched on the UI side.
        let (mut sample_tx, sample_rx) = RingBuffer::<PitchSample>::new(SAMPLE_QUEUE_CAPACITY);
        let mut tracker = PitchTracker::new(sample_rate);

        let stream = device.build_input_stream(
            &config.into(),
            move |data: &[f32], _| {
                if let Some(sample) = tracker.process(data, channels) {
                    // A full queue means the UI is behind; dropping the
                    // tick is the same as a "no signal" tick.
                    let _ = sample_tx.push(sample);
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;
        stream.play()?;

        let session = DrillSession::with_config(
            self.drill,
            SessionConfig {
                tuning: self.tuning,
                pitch_tolerance_cents: self.tolerance_cents,
            },
        );

        let mut terminal = ratatui::init();
        let result = UiApp::new(session, sample_rx).run(&mut terminal);
        ratatui::restore();
        result
    }
}
