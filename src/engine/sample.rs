#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// One tick of output from an upstream pitch detector.
///
/// The engine reads `frequency` and `onset`; `clarity` rides along for
/// hosts that display it (filtering on clarity is the detector's job).
/// "No signal" ticks are simply not submitted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PitchSample {
    /// Estimated fundamental in Hz, > 0.
    pub frequency: f32,
    /// Detector confidence, 0..=1.
    pub clarity: f32,
    /// Whether this tick coincides with a fresh string attack.
    pub onset: bool,
}

pub trait SampleReceiver {
    fn pop(&mut self) -> Option<PitchSample>;
}

#[cfg(feature = "rtrb")]
impl SampleReceiver for Consumer<PitchSample> {
    fn pop(&mut self) -> Option<PitchSample> {
        Consumer::pop(self).ok()
    }
}
