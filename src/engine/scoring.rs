/// Converts match accuracy and the running streak into point awards.
///
/// There is no penalty path: a wrong or missing note is simply "not yet
/// matched", so score and streak only ever grow until a reset. Loop wraps
/// do not touch either counter.
#[derive(Debug, Default)]
pub struct ScoreKeeper {
    score: u32,
    streak: u32,
}

/// Streak bonus cap: five consecutive hits max out the bonus.
const MAX_STREAK_BONUS: u32 = 50;
/// Bonus points per consecutive hit.
const STREAK_BONUS_STEP: u32 = 10;

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Award points for an accepted match `cents_off` away from the
    /// matched note's center. Returns the points granted.
    ///
    /// `accuracy = max(0, 100 - |cents|)`, plus `min(streak * 10, 50)`
    /// for the streak going into this note.
    pub fn award(&mut self, cents_off: f32) -> u32 {
        let accuracy = (100.0 - f64::from(cents_off).abs()).max(0.0);
        let bonus = (self.streak.saturating_mul(STREAK_BONUS_STEP)).min(MAX_STREAK_BONUS);
        let points = (accuracy + f64::from(bonus)).round() as u32;

        self.score += points;
        self.streak += 1;
        points
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.streak = 0;
    }
}
