#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest fret a sequence may ask for.
pub const MAX_FRET: u8 = 24;

/// One fretboard position: a string (1 = highest-pitched, 6 = lowest)
/// and a fret (0 = open string).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrettedNote {
    pub string: u8,
    pub fret: u8,
}

impl std::fmt::Display for FrettedNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.string, self.fret)
    }
}

/// One step of a sequence: one or more positions played together.
/// Two or more positions make a double-stop; matching any one of them
/// satisfies the step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    notes: Vec<FrettedNote>,
}

impl Step {
    /// Candidate positions in declaration order. Order matters: when more
    /// than one candidate is within tolerance of a detected fundamental,
    /// the first-declared one wins.
    pub fn notes(&self) -> &[FrettedNote] {
        &self.notes
    }

    pub fn is_double_stop(&self) -> bool {
        self.notes.len() >= 2
    }

    /// Whether this step asks for the given position again.
    pub fn contains(&self, note: FrettedNote) -> bool {
        self.notes.iter().any(|n| *n == note)
    }
}

/// Progress marker for one step of a loaded sequence.
///
/// `Error` is reserved for hosts that want to annotate a failed attempt;
/// the engine itself only ever writes `Waiting` and `Success`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Waiting,
    Success,
    Error,
}

/// An ordered, immutable run of steps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSequence {
    steps: Vec<Step>,
}

impl TabSequence {
    /// Start building a sequence with the fluent API.
    pub fn builder() -> TabSequenceBuilder {
        TabSequenceBuilder::new()
    }

    /// An empty sequence (valid, but a session over it never progresses).
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

/// Builder for constructing sequences with a fluent API
pub struct TabSequenceBuilder {
    steps: Vec<Step>,
    error: Option<TabError>,
}

impl TabSequenceBuilder {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            error: None,
        }
    }

    fn check(&mut self, string: u8, fret: u8) -> Option<FrettedNote> {
        if !(1..=6).contains(&string) {
            self.error.get_or_insert(TabError::StringOutOfRange { string });
            return None;
        }
        if fret > MAX_FRET {
            self.error.get_or_insert(TabError::FretOutOfRange { fret });
            return None;
        }
        Some(FrettedNote { string, fret })
    }

    /// Add a single-note step.
    pub fn note(mut self, string: u8, fret: u8) -> Self {
        if let Some(note) = self.check(string, fret) {
            self.steps.push(Step { notes: vec![note] });
        }
        self
    }

    /// Add a multi-note step (double-stop). Candidate order is preserved.
    pub fn chord(mut self, positions: &[(u8, u8)]) -> Self {
        if positions.is_empty() {
            self.error.get_or_insert(TabError::EmptyStep);
            return self;
        }
        let mut notes = Vec::with_capacity(positions.len());
        for &(string, fret) in positions {
            match self.check(string, fret) {
                Some(note) => notes.push(note),
                None => return self,
            }
        }
        self.steps.push(Step { notes });
        self
    }

    /// Build the final sequence
    /// Returns Result to surface validation errors
    pub fn build(self) -> Result<TabSequence, TabError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(TabSequence { steps: self.steps }),
        }
    }
}

/// Errors that can occur when building a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    /// String number outside 1..=6
    StringOutOfRange { string: u8 },
    /// Fret beyond the playable range
    FretOutOfRange { fret: u8 },
    /// A step with no positions in it
    EmptyStep,
}

impl std::fmt::Display for TabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabError::StringOutOfRange { string } => {
                write!(f, "string {} is out of range (expected 1-6)", string)
            }
            TabError::FretOutOfRange { fret } => {
                write!(f, "fret {} is out of range (expected 0-{})", fret, MAX_FRET)
            }
            TabError::EmptyStep => write!(f, "a step must contain at least one position"),
        }
    }
}

impl std::error::Error for TabError {}
