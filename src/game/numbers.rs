use crate::score::{ScoreTracker, SessionScore};
use crate::vocabulary::Vocabulary;
use rand::seq::SliceRandom;
use rand::Rng;

/// Which way the current round asks the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberPrompt {
    /// Show a numeral, expect the Bisaya word.
    NumberToWord(i64),
    /// Show the Bisaya word, expect the numeral.
    WordToNumber(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberQuizState {
    pub prompt: Option<NumberPrompt>,
    pub answer: String,
    pub answer_correct: Option<bool>,
}

impl NumberQuizState {
    pub fn is_started(&self) -> bool {
        self.prompt.is_some()
    }
}

/// Single-shot bidirectional number quiz. Score accumulates across questions
/// until the engine is reset.
#[derive(Debug, Default)]
pub struct NumberQuizGame {
    state: NumberQuizState,
    tracker: ScoreTracker,
}

impl NumberQuizGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NumberQuizState {
        &self.state
    }

    /// Draw the first prompt. With no number entries loaded the state stays
    /// unstarted (no prompt), which the host treats as "nothing to play".
    pub fn start_new_game(&mut self, vocab: &Vocabulary) -> &NumberQuizState {
        self.state = NumberQuizState::default();
        if self.draw_prompt(vocab) {
            self.tracker.start();
        }
        &self.state
    }

    /// Grade one answer. Unparseable numeric input is an ordinary miss.
    pub fn submit_answer(&mut self, vocab: &Vocabulary, answer: &str) -> &NumberQuizState {
        let Some(prompt) = self.state.prompt.clone() else {
            return &self.state;
        };

        self.state.answer = answer.to_string();
        let trimmed = answer.trim().to_lowercase();

        let correct = match prompt {
            NumberPrompt::NumberToWord(value) => vocab
                .number_by_value(value)
                .map(|entry| trimmed == entry.word.to_lowercase())
                .unwrap_or(false),
            NumberPrompt::WordToNumber(word) => match trimmed.parse::<i64>() {
                Ok(n) => vocab
                    .number_by_word(&word)
                    .map(|entry| entry.value == n)
                    .unwrap_or(false),
                Err(_) => false,
            },
        };

        self.state.answer_correct = Some(correct);
        self.tracker.record_attempt();
        if correct {
            self.tracker.record_correct();
        }

        &self.state
    }

    /// Move to a fresh prompt without touching the accumulated score.
    pub fn next_question(&mut self, vocab: &Vocabulary) -> &NumberQuizState {
        self.draw_prompt(vocab);
        self.state.answer = String::new();
        self.state.answer_correct = None;
        &self.state
    }

    pub fn score(&self) -> SessionScore {
        self.tracker.score()
    }

    pub fn reset(&mut self) {
        self.state = NumberQuizState::default();
        self.tracker.reset();
    }

    fn draw_prompt(&mut self, vocab: &Vocabulary) -> bool {
        let mut rng = rand::thread_rng();
        let Some(entry) = vocab.numbers.choose(&mut rng) else {
            self.state.prompt = None;
            return false;
        };

        self.state.prompt = Some(if rng.gen_bool(0.5) {
            NumberPrompt::NumberToWord(entry.value)
        } else {
            NumberPrompt::WordToNumber(entry.word.clone())
        });
        true
    }
}
