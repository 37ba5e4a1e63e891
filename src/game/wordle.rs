use crate::progress::{ProgressTracker, RECENT_WORDS_CAP};
use crate::score::{ScoreTracker, SessionScore};
use crate::vocabulary::{Vocabulary, WordEntry};
use rand::seq::SliceRandom;
use std::collections::HashMap;

pub const MAX_ATTEMPTS: usize = 6;
/// Words longer than this never fit the guess grid and are filtered out.
pub const MAX_WORD_LENGTH: usize = 6;
const MAX_HINTS: u32 = 2;

/// Per-letter classification of a guess. Declaration order is the aggregation
/// precedence: once a letter is Correct in any row it never downgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LetterResult {
    #[default]
    Unknown,
    Absent,
    Present,
    Correct,
}

/// Grid-shaped session state. Rows at or beyond `current_attempt` are
/// unsubmitted (empty-string cells) unless the game is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordleState {
    pub guesses: Vec<Vec<String>>,
    pub results: Vec<Vec<LetterResult>>,
    pub current_attempt: usize,
    pub word_length: usize,
    pub game_over: bool,
    pub game_won: bool,
    pub hints_used: u32,
}

impl WordleState {
    fn for_length(word_length: usize) -> Self {
        Self {
            guesses: vec![vec![String::new(); word_length]; MAX_ATTEMPTS],
            results: vec![vec![LetterResult::Unknown; word_length]; MAX_ATTEMPTS],
            word_length,
            ..Self::default()
        }
    }

    /// False when no playable word could be selected (empty pool).
    pub fn is_started(&self) -> bool {
        self.word_length > 0
    }

    fn submitted_rows(&self) -> usize {
        if self.game_over {
            (self.current_attempt + 1).min(MAX_ATTEMPTS)
        } else {
            self.current_attempt
        }
    }
}

/// Two-pass guess classification. Pass one consumes exact-position matches,
/// pass two consumes leftover occurrences for Present marks. A single pass
/// over-counts duplicated letters.
pub fn score_guess(guess: &[char], solution: &[char]) -> Vec<LetterResult> {
    let mut remaining: Vec<Option<char>> = solution.iter().copied().map(Some).collect();
    let mut result = vec![LetterResult::Absent; guess.len()];

    for (i, &g) in guess.iter().enumerate() {
        if solution.get(i) == Some(&g) {
            result[i] = LetterResult::Correct;
            remaining[i] = None;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if result[i] == LetterResult::Correct {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|s| **s == Some(g)) {
            *slot = None;
            result[i] = LetterResult::Present;
        } else {
            result[i] = LetterResult::Absent;
        }
    }

    result
}

/// Full-word, attempt-limited wordle over the vocabulary list.
#[derive(Debug, Default)]
pub struct WordleGame {
    solution: Option<WordEntry>,
    state: WordleState,
    tracker: ScoreTracker,
}

impl WordleGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WordleState {
        &self.state
    }

    /// Select a word within the player's difficulty range, avoiding recently
    /// played words, and initialize a fresh grid. An empty pool leaves an
    /// unstarted state rather than an error.
    pub fn start_new_game(
        &mut self,
        vocab: &Vocabulary,
        progress: &mut dyn ProgressTracker,
    ) -> &WordleState {
        let (min, max) = progress.difficulty_range();
        let pool: Vec<&WordEntry> = vocab
            .words
            .iter()
            .filter(|e| {
                e.difficulty >= min
                    && e.difficulty <= max
                    && e.word.chars().count() <= MAX_WORD_LENGTH
            })
            .collect();

        if pool.is_empty() {
            self.solution = None;
            self.state = WordleState::default();
            return &self.state;
        }

        let recent = progress.recent_words();
        let fresh: Vec<&WordEntry> = pool
            .iter()
            .copied()
            .filter(|e| !recent.iter().any(|r| r.eq_ignore_ascii_case(&e.word)))
            .collect();

        let mut rng = rand::thread_rng();
        let chosen = if fresh.is_empty() {
            // Every candidate was played recently; rotate rather than starve
            progress.set_recent_words(Vec::new());
            pool.choose(&mut rng).copied()
        } else {
            fresh.choose(&mut rng).copied()
        };
        let Some(entry) = chosen.cloned() else {
            return &self.state;
        };

        let mut recent = progress.recent_words().to_vec();
        recent.insert(0, entry.word.clone());
        recent.truncate(RECENT_WORDS_CAP);
        progress.set_recent_words(recent);

        self.state = WordleState::for_length(entry.word.chars().count());
        self.solution = Some(entry);
        self.tracker.start();
        &self.state
    }

    /// Grade a full-length guess. Wrong-length or post-game submissions are
    /// absorbed as no-ops.
    pub fn submit_guess(&mut self, guess: &str) -> &WordleState {
        if self.state.game_over {
            return &self.state;
        }
        let Some(entry) = &self.solution else {
            return &self.state;
        };

        let solution: Vec<char> = entry.word.to_lowercase().chars().collect();
        let cleaned: Vec<char> = guess.trim().to_lowercase().chars().collect();
        if cleaned.is_empty() || cleaned.len() != self.state.word_length {
            return &self.state;
        }

        let result = score_guess(&cleaned, &solution);
        let attempt = self.state.current_attempt;
        self.state.guesses[attempt] = cleaned.iter().map(|c| c.to_string()).collect();
        self.state.results[attempt] = result.clone();

        if result.iter().all(|r| *r == LetterResult::Correct) {
            self.state.game_won = true;
            self.state.game_over = true;
            self.tracker.record_attempt();
            self.tracker.record_correct();
        } else if attempt + 1 >= MAX_ATTEMPTS {
            self.state.game_over = true;
            self.tracker.record_attempt();
        } else {
            self.state.current_attempt += 1;
        }

        &self.state
    }

    /// Part of speech and translation, at most twice per puzzle.
    pub fn use_hint(&mut self) -> Option<String> {
        let entry = self.solution.as_ref()?;
        if self.state.hints_used >= MAX_HINTS {
            return None;
        }
        self.state.hints_used += 1;
        Some(format!(
            "This is a {}. Translation: {}",
            entry.part_of_speech, entry.translation
        ))
    }

    /// The solution word, for end-of-game display.
    pub fn reveal_solution(&self) -> Option<&str> {
        self.solution.as_ref().map(|e| e.word.as_str())
    }

    /// Best-known classification per letter across all submitted rows, for
    /// on-screen keyboard affordances. Pure projection, recomputed per call.
    pub fn letter_hints(&self) -> HashMap<char, LetterResult> {
        let mut hints = HashMap::new();
        for row in 0..self.state.submitted_rows() {
            for (cell, result) in self.state.guesses[row].iter().zip(&self.state.results[row]) {
                let Some(c) = cell.chars().next() else {
                    continue;
                };
                let entry = hints.entry(c).or_insert(LetterResult::Unknown);
                if *result > *entry {
                    *entry = *result;
                }
            }
        }
        hints
    }

    pub fn score(&self) -> SessionScore {
        self.tracker.score()
    }

    pub fn reset(&mut self) {
        self.solution = None;
        self.state = WordleState::default();
        self.tracker.reset();
    }
}
