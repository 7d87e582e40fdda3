//! Pitch and onset estimation for the practice binary.
//!
//! This is the upstream collaborator the validation engine expects, not
//! part of the engine itself: McLeod pitch detection over a sliding
//! window, an RMS volume gate, and a spectral-flux rising edge as the
//! onset signal.

use std::sync::Arc;

use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use fretdrill::engine::PitchSample;

/// Analysis window in samples (~43 ms at 48 kHz).
const WINDOW_SIZE: usize = 2048;
/// McLeod detector padding.
const PADDING: usize = WINDOW_SIZE / 2;
/// Hop between analyses; half-window overlap.
const HOP: usize = WINDOW_SIZE / 2;

/// Below this RMS the input counts as silence.
const MIN_VOLUME: f32 = 0.005;
/// Detector confidence required to report a pitch at all.
const MIN_CLARITY: f64 = 0.8;
/// The volume gate does the real work, so the detector's own power
/// threshold stays open.
const POWER_THRESHOLD: f64 = 0.0;
/// Spectral-flux jump that counts as a fresh attack.
const ONSET_FLUX_THRESHOLD: f32 = 0.1;

/// Plausible guitar fundamentals.
const MIN_HZ: f32 = 50.0;
const MAX_HZ: f32 = 1000.0;

pub struct PitchTracker {
    sample_rate: usize,
    detector: McLeodDetector<f64>,
    fft: Arc<dyn Fft<f32>>,
    /// Accumulated mono samples awaiting analysis.
    buffer: Vec<f32>,
    /// The current window widened for the detector.
    pitch_window: Vec<f64>,
    spectrum: Vec<Complex<f32>>,
    prev_magnitudes: Vec<f32>,
    prev_flux: f32,
}

impl PitchTracker {
    pub fn new(sample_rate: u32) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            sample_rate: sample_rate as usize,
            detector: McLeodDetector::new(WINDOW_SIZE, PADDING),
            fft: planner.plan_fft_forward(WINDOW_SIZE),
            buffer: Vec::with_capacity(WINDOW_SIZE * 2),
            pitch_window: Vec::with_capacity(WINDOW_SIZE),
            spectrum: vec![Complex::default(); WINDOW_SIZE],
            prev_magnitudes: vec![0.0; WINDOW_SIZE / 2],
            prev_flux: 0.0,
        }
    }

    /// Feed one interleaved input block. Returns the newest detection,
    /// if a full analysis window was available and produced one.
    pub fn process(&mut self, input: &[f32], channels: usize) -> Option<PitchSample> {
        let channels = channels.max(1);
        for frame in input.chunks_exact(channels) {
            let sum: f32 = frame.iter().sum();
            self.buffer.push(sum / channels as f32);
        }

        let mut latest = None;
        while self.buffer.len() >= WINDOW_SIZE {
            if let Some(sample) = self.analyze() {
                latest = Some(sample);
            }
            self.buffer.drain(..HOP);
        }
        latest
    }

    fn analyze(&mut self) -> Option<PitchSample> {
        let window = &self.buffer[..WINDOW_SIZE];

        let rms =
            (window.iter().map(|&s| s * s).sum::<f32>() / WINDOW_SIZE as f32).sqrt();

        // Spectral flux runs on every window, even silent ones, so the
        // magnitude history stays continuous across pauses.
        self.spectrum.clear();
        self.spectrum
            .extend(window.iter().map(|&s| Complex { re: s, im: 0.0 }));
        self.fft.process(&mut self.spectrum);

        let mut flux = 0.0;
        for (bin, prev) in self.spectrum[..WINDOW_SIZE / 2]
            .iter()
            .zip(self.prev_magnitudes.iter_mut())
        {
            let magnitude = bin.norm() / WINDOW_SIZE as f32;
            flux += (magnitude - *prev).max(0.0);
            *prev = magnitude;
        }
        let onset = flux - self.prev_flux > ONSET_FLUX_THRESHOLD && rms > MIN_VOLUME;
        self.prev_flux = flux;

        if rms < MIN_VOLUME {
            return None;
        }

        self.pitch_window.clear();
        self.pitch_window
            .extend(self.buffer[..WINDOW_SIZE].iter().map(|&s| f64::from(s)));
        let pitch = self.detector.get_pitch(
            &self.pitch_window,
            self.sample_rate,
            POWER_THRESHOLD,
            MIN_CLARITY,
        )?;

        let frequency = pitch.frequency as f32;
        if !(MIN_HZ..=MAX_HZ).contains(&frequency) {
            return None;
        }

        Some(PitchSample {
            frequency,
            clarity: pitch.clarity as f32,
            onset,
        })
    }
}
