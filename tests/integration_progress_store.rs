use pulong::game::GameType;
use pulong::progress::{
    export_history_csv, FileProgressStore, PlayerProgress, ProgressManager, ProgressStore,
    ProgressTracker,
};
use pulong::vocabulary::Difficulty;

/// Persistence workflows: the JSON progress file survives process restarts,
/// tolerates corruption, and exports history as CSV.

#[test]
fn progress_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    {
        let store = FileProgressStore::with_path(&path);
        let mut manager = ProgressManager::new(store);
        manager.set_student_name("Maria".to_string());
        manager.set_difficulty_range(Difficulty::Medium, Difficulty::Hard);
        manager.set_recent_words(vec!["balay".to_string(), "tubig".to_string()]);
        manager.record_session(GameType::Hangman, 80.0, 5);
    }

    // a second manager simulates the next launch
    let reloaded = ProgressManager::new(FileProgressStore::with_path(&path));
    let progress = reloaded.progress();
    assert_eq!(progress.student_name, "Maria");
    assert_eq!(progress.min_difficulty, Difficulty::Medium);
    assert_eq!(progress.max_difficulty, Difficulty::Hard);
    assert_eq!(progress.recent_words, vec!["balay", "tubig"]);
    assert_eq!(progress.games_played.len(), 1);
    assert_eq!(progress.games_played[0].game_type, GameType::Hangman);
    assert_eq!(progress.games_played[0].score, 80.0);
    assert_eq!(progress.games_played[0].total_attempts, 5);
}

#[test]
fn missing_file_yields_default_progress() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::with_path(dir.path().join("nope.json"));
    let progress = store.load();
    assert_eq!(progress.student_name, "Student");
    assert_eq!(progress.min_difficulty, Difficulty::Easy);
    assert_eq!(progress.max_difficulty, Difficulty::Hard);
    assert!(progress.games_played.is_empty());
}

#[test]
fn corrupt_file_yields_default_progress() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileProgressStore::with_path(&path);
    let progress = store.load();
    assert_eq!(progress.student_name, "Student");
    assert!(progress.games_played.is_empty());
    assert!(progress.recent_words.is_empty());
}

#[test]
fn store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deeply/nested/progress.json");
    let store = FileProgressStore::with_path(&path);

    store.save(&PlayerProgress::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn inverted_difficulty_range_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::with_path(dir.path().join("progress.json"));
    let mut manager = ProgressManager::new(store);

    manager.set_difficulty_range(Difficulty::Hard, Difficulty::Easy);
    assert_eq!(
        manager.difficulty_range(),
        (Difficulty::Easy, Difficulty::Hard)
    );
}

#[test]
fn history_exports_as_csv() {
    let mut progress = PlayerProgress::default();
    progress.record_session(GameType::Wordle, 100.0, 1);
    progress.record_session(GameType::NumberQuiz, 62.5, 8);

    let mut out = Vec::new();
    export_history_csv(&progress, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("game_type,score,total_attempts,played_at")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("wordle,100.00,1,"));
    let second = lines.next().unwrap();
    assert!(second.starts_with("numberQuiz,62.50,8,"));
    assert_eq!(lines.next(), None);
}
