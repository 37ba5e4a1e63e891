use crate::score::{ScoreTracker, SessionScore};
use crate::vocabulary::{Difficulty, Vocabulary, WordEntry};
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Wrong guesses before the hangman drawing is complete and the game is lost.
pub const MAX_STAGE: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HangmanState {
    /// One char per solution letter, '_' while hidden.
    pub display_word: String,
    pub guessed_letters: BTreeSet<char>,
    pub wrong_letters: BTreeSet<char>,
    pub stage: usize,
    pub game_over: bool,
    pub game_won: bool,
    pub hint_used: bool,
}

impl HangmanState {
    pub fn is_started(&self) -> bool {
        !self.display_word.is_empty()
    }

    /// The mask with spaces between the cells, as shown on screen.
    pub fn spaced_mask(&self) -> String {
        self.display_word
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Classic hangman with a six-miss budget, played at one exact difficulty.
#[derive(Debug)]
pub struct HangmanGame {
    pub difficulty: Difficulty,
    solution: Option<WordEntry>,
    state: HangmanState,
    tracker: ScoreTracker,
}

impl Default for HangmanGame {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            solution: None,
            state: HangmanState::default(),
            tracker: ScoreTracker::default(),
        }
    }
}

impl HangmanGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &HangmanState {
        &self.state
    }

    /// Pick a word with an exact difficulty match. An empty pool is a no-op
    /// that returns the prior state.
    pub fn start_new_game(&mut self, vocab: &Vocabulary) -> &HangmanState {
        let pool: Vec<&WordEntry> = vocab
            .words
            .iter()
            .filter(|e| e.difficulty == self.difficulty)
            .collect();
        let Some(entry) = pool.choose(&mut rand::thread_rng()).copied().cloned() else {
            return &self.state;
        };

        // Hyphens and other punctuation are shown up front; only letters
        // need guessing
        let mask: String = entry
            .word
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphabetic() { '_' } else { c })
            .collect();
        self.state = HangmanState {
            display_word: mask,
            ..HangmanState::default()
        };
        self.solution = Some(entry);
        self.tracker.start();
        &self.state
    }

    /// Guess one letter, case-insensitively. Repeats and post-game guesses
    /// are absorbed as no-ops.
    pub fn guess_letter(&mut self, letter: char) -> &HangmanState {
        if self.state.game_over {
            return &self.state;
        }
        let Some(entry) = &self.solution else {
            return &self.state;
        };

        let letter = letter.to_ascii_lowercase();
        if self.state.guessed_letters.contains(&letter) {
            return &self.state;
        }
        self.state.guessed_letters.insert(letter);

        let solution: Vec<char> = entry.word.to_lowercase().chars().collect();
        if solution.contains(&letter) {
            self.state.display_word = solution
                .iter()
                .map(|c| {
                    if !c.is_alphabetic() || self.state.guessed_letters.contains(c) {
                        *c
                    } else {
                        '_'
                    }
                })
                .collect();

            if !self.state.display_word.contains('_') {
                self.state.game_won = true;
                self.state.game_over = true;
                self.tracker.record_attempt();
                self.tracker.record_correct();
            }
        } else {
            self.state.wrong_letters.insert(letter);
            self.state.stage += 1;

            if self.state.stage >= MAX_STAGE {
                self.state.game_over = true;
                self.tracker.record_attempt();
            }
        }

        &self.state
    }

    /// Translation only, once per puzzle.
    pub fn use_hint(&mut self) -> Option<String> {
        let entry = self.solution.as_ref()?;
        if self.state.hint_used {
            return None;
        }
        self.state.hint_used = true;
        Some(format!("Translation: {}", entry.translation))
    }

    pub fn reveal_solution(&self) -> Option<&str> {
        self.solution.as_ref().map(|e| e.word.as_str())
    }

    pub fn score(&self) -> SessionScore {
        self.tracker.score()
    }

    pub fn reset(&mut self) {
        self.solution = None;
        self.state = HangmanState::default();
        self.tracker.reset();
    }
}
