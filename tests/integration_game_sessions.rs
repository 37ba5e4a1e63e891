use pulong::game::{GameType, HangmanGame, LetterResult, NumberPrompt, NumberQuizGame, WordleGame};
use pulong::progress::{PlayerProgress, ProgressTracker};
use pulong::vocabulary::{Difficulty, NumberEntry, Vocabulary, WordEntry};

/// End-to-end game session workflows: engines driven the way the TUI drives
/// them, with an in-memory progress record standing in for the store.

fn word(word: &str, translation: &str, difficulty: Difficulty) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        translation: translation.to_string(),
        part_of_speech: "noun".to_string(),
        difficulty,
    }
}

fn fixture_vocabulary() -> Vocabulary {
    Vocabulary::new(
        vec![
            word("balay", "house", Difficulty::Easy),
            word("tubig", "water", Difficulty::Easy),
            word("gugma", "love", Difficulty::Medium),
        ],
        vec![
            NumberEntry {
                value: 1,
                word: "usa".to_string(),
            },
            NumberEntry {
                value: 2,
                word: "duha".to_string(),
            },
        ],
    )
}

#[test]
fn wordle_session_win_records_one_attempt() {
    let vocab = Vocabulary::new(vec![word("balay", "house", Difficulty::Easy)], Vec::new());
    let mut progress = PlayerProgress::default();
    let mut game = WordleGame::new();

    game.start_new_game(&vocab, &mut progress);
    assert!(game.state().is_started());
    assert_eq!(game.reveal_solution(), Some("balay"));

    // a miss first, then the solution
    let state = game.submit_guess("tubig");
    assert!(!state.game_over);
    assert_eq!(state.current_attempt, 1);

    let state = game.submit_guess("balay");
    assert!(state.game_won, "solving the word should win the game");
    assert!(state.game_over);
    assert!(state.results[1]
        .iter()
        .all(|r| *r == LetterResult::Correct));

    // per-puzzle granularity: one attempt, one correct
    let score = game.score();
    assert_eq!(score.total_attempts, 1);
    assert_eq!(score.correct_answers, 1);
    assert_eq!(score.percentage, 100.0);
}

#[test]
fn wordle_session_loss_counts_attempt_without_correct() {
    let vocab = Vocabulary::new(vec![word("balay", "house", Difficulty::Easy)], Vec::new());
    let mut progress = PlayerProgress::default();
    let mut game = WordleGame::new();
    game.start_new_game(&vocab, &mut progress);

    for _ in 0..6 {
        game.submit_guess("tubig");
    }
    let state = game.state();
    assert!(state.game_over);
    assert!(!state.game_won);

    let score = game.score();
    assert_eq!(score.total_attempts, 1);
    assert_eq!(score.correct_answers, 0);
    assert_eq!(score.percentage, 0.0);
}

#[test]
fn wordle_selection_respects_recency_list() {
    let vocab = fixture_vocabulary();
    let mut progress = PlayerProgress::default();
    let mut game = WordleGame::new();

    // play enough games to cycle the pool; each start must record the pick
    for _ in 0..10 {
        game.start_new_game(&vocab, &mut progress);
        assert!(game.state().is_started(), "pool rotation must never starve");
        let solution = game.reveal_solution().unwrap().to_string();
        assert!(
            progress
                .recent_words()
                .first()
                .is_some_and(|w| w.eq_ignore_ascii_case(&solution)),
            "most recent pick should lead the recency list"
        );
    }
}

#[test]
fn wordle_empty_pool_leaves_unstarted_state() {
    // range excludes every word
    let vocab = Vocabulary::new(vec![word("balay", "house", Difficulty::Easy)], Vec::new());
    let mut progress = PlayerProgress::default();
    progress.min_difficulty = Difficulty::Hard;
    progress.max_difficulty = Difficulty::Hard;

    let mut game = WordleGame::new();
    let state = game.start_new_game(&vocab, &mut progress);
    assert!(!state.is_started());

    // guesses against an unstarted game are absorbed
    let state = game.submit_guess("balay");
    assert!(!state.game_over);
    assert_eq!(game.score().total_attempts, 0);
}

#[test]
fn hangman_session_win_and_loss() {
    let vocab = Vocabulary::new(vec![word("usa", "one", Difficulty::Medium)], Vec::new());
    let mut game = HangmanGame::new();

    game.start_new_game(&vocab);
    assert!(game.state().is_started());
    for c in ['u', 's', 'a'] {
        game.guess_letter(c);
    }
    assert!(game.state().game_won);
    assert_eq!(game.state().stage, 0);
    assert_eq!(game.score().percentage, 100.0);

    // fresh puzzle keeps the session score accumulating
    game.start_new_game(&vocab);
    for c in ['b', 'c', 'd', 'e', 'f', 'g'] {
        game.guess_letter(c);
    }
    let state = game.state();
    assert!(state.game_over);
    assert!(!state.game_won);
    assert_eq!(state.stage, 6);

    let score = game.score();
    assert_eq!(score.total_attempts, 2);
    assert_eq!(score.correct_answers, 1);
    assert_eq!(score.percentage, 50.0);
}

#[test]
fn number_quiz_full_round() {
    let vocab = fixture_vocabulary();
    let mut game = NumberQuizGame::new();

    game.start_new_game(&vocab);
    assert!(game.state().is_started());

    // answer correctly by reading the prompt
    let answer = match game.state().prompt.clone().unwrap() {
        NumberPrompt::NumberToWord(value) => vocab
            .number_by_value(value)
            .unwrap()
            .word
            .clone(),
        NumberPrompt::WordToNumber(word) => vocab
            .number_by_word(&word)
            .unwrap()
            .value
            .to_string(),
    };
    let state = game.submit_answer(&vocab, &answer);
    assert_eq!(state.answer_correct, Some(true));

    // next question clears the verdict but keeps the score
    game.next_question(&vocab);
    assert_eq!(game.state().answer_correct, None);
    assert_eq!(game.score().total_attempts, 1);

    // a wrong answer is an ordinary scored miss
    let state = game.submit_answer(&vocab, "definitely wrong");
    assert_eq!(state.answer_correct, Some(false));

    let score = game.score();
    assert_eq!(score.total_attempts, 2);
    assert_eq!(score.correct_answers, 1);
    assert_eq!(score.percentage, 50.0);
}

#[test]
fn finished_sessions_feed_progress_averages() {
    let mut progress = PlayerProgress::default();

    progress.record_session(GameType::Wordle, 100.0, 1);
    progress.record_session(GameType::Wordle, 0.0, 1);
    progress.record_session(GameType::NumberQuiz, 75.0, 4);

    assert_eq!(progress.average_score(GameType::Wordle), 50.0);
    assert_eq!(progress.average_score(GameType::NumberQuiz), 75.0);
    assert_eq!(progress.average_score(GameType::Hangman), 0.0);

    let averages = progress.averages_by_game();
    assert_eq!(averages.len(), 2);
    assert!(averages.contains(&(GameType::Wordle, 50.0, 2)));
    assert!(averages.contains(&(GameType::NumberQuiz, 75.0, 1)));
}

#[test]
fn bundled_vocabulary_is_playable() {
    let vocab = Vocabulary::bundled();
    assert!(!vocab.is_empty());
    assert!(vocab.words.iter().any(|w| w.difficulty == Difficulty::Easy));
    assert!(!vocab.numbers.is_empty());

    let mut progress = PlayerProgress::default();
    let mut game = WordleGame::new();
    let state = game.start_new_game(&vocab, &mut progress);
    assert!(state.is_started());
    assert!(state.word_length <= 6);
}
