use std::time::SystemTime;

/// Snapshot of a play session's accounting, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionScore {
    pub correct_answers: u32,
    pub total_attempts: u32,
    pub percentage: f64,
    pub elapsed_secs: f64,
}

impl SessionScore {
    pub fn display_score(&self) -> String {
        format!("{}/{}", self.correct_answers, self.total_attempts)
    }

    pub fn display_percentage(&self) -> String {
        format!("{:.0}%", self.percentage)
    }
}

/// Attempt/correct accounting shared by all three game engines. The attempt
/// granularity is the caller's: one per finished puzzle for wordle and
/// hangman, one per submitted answer for the number quiz.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    correct: u32,
    total: u32,
    started_at: Option<SystemTime>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the session clock. First call wins; the elapsed time spans the
    /// whole engine session, not the latest puzzle.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(SystemTime::now());
        }
    }

    pub fn record_attempt(&mut self) {
        self.total += 1;
    }

    pub fn record_correct(&mut self) {
        self.correct += 1;
    }

    pub fn score(&self) -> SessionScore {
        let percentage = if self.total > 0 {
            f64::from(self.correct) / f64::from(self.total) * 100.0
        } else {
            0.0
        };
        let elapsed_secs = self
            .started_at
            .and_then(|t| t.elapsed().ok())
            .map_or(0.0, |d| d.as_secs_f64());

        SessionScore {
            correct_answers: self.correct,
            total_attempts: self.total,
            percentage,
            elapsed_secs,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
