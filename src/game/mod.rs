pub mod hangman;
pub mod numbers;
pub mod wordle;

pub use hangman::{HangmanGame, HangmanState};
pub use numbers::{NumberPrompt, NumberQuizGame, NumberQuizState};
pub use wordle::{LetterResult, WordleGame, WordleState};

use crate::score::SessionScore;
use serde::{Deserialize, Serialize};

/// The closed set of game modes. Call sites match exhaustively, so adding a
/// mode fails to compile until every surface handles it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum GameType {
    Wordle,
    Hangman,
    NumberQuiz,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::Wordle, GameType::Hangman, GameType::NumberQuiz];

    pub fn display_name(&self) -> &'static str {
        match self {
            GameType::Wordle => "Wordle",
            GameType::Hangman => "Hangman",
            GameType::NumberQuiz => "Number Quiz",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameType::Wordle => "Guess the letters to find the Bisaya word",
            GameType::Hangman => "Guess letters before the hangman is complete",
            GameType::NumberQuiz => "Match Bisaya numbers to their numeric values",
        }
    }
}

/// One in-progress session of any mode. The host keeps a single active
/// session and routes scoring, recording, and reset through it; mode-specific
/// moves are reached by matching on the variant.
#[derive(Debug)]
pub enum GameSession {
    Wordle(WordleGame),
    Hangman(HangmanGame),
    NumberQuiz(NumberQuizGame),
}

impl GameSession {
    pub fn game_type(&self) -> GameType {
        match self {
            GameSession::Wordle(_) => GameType::Wordle,
            GameSession::Hangman(_) => GameType::Hangman,
            GameSession::NumberQuiz(_) => GameType::NumberQuiz,
        }
    }

    pub fn score(&self) -> SessionScore {
        match self {
            GameSession::Wordle(g) => g.score(),
            GameSession::Hangman(g) => g.score(),
            GameSession::NumberQuiz(g) => g.score(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            GameSession::Wordle(g) => g.reset(),
            GameSession::Hangman(g) => g.reset(),
            GameSession::NumberQuiz(g) => g.reset(),
        }
    }
}
