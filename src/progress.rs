use crate::app_dirs::AppDirs;
use crate::game::GameType;
use crate::vocabulary::Difficulty;
use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Only this many recently played words are remembered for repeat avoidance.
pub const RECENT_WORDS_CAP: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_type: GameType,
    pub score: f64,
    pub total_attempts: u32,
    pub played_at: DateTime<Local>,
}

/// Long-lived player record, one per install. Serialized as a single JSON
/// document; field and list ordering round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    pub student_name: String,
    pub data_source: String,
    pub games_played: Vec<GameRecord>,
    pub last_updated: DateTime<Local>,
    pub min_difficulty: Difficulty,
    pub max_difficulty: Difficulty,
    pub recent_words: Vec<String>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            student_name: "Student".to_string(),
            data_source: String::new(),
            games_played: Vec::new(),
            last_updated: Local::now(),
            min_difficulty: Difficulty::Easy,
            max_difficulty: Difficulty::Hard,
            recent_words: Vec::new(),
        }
    }
}

impl PlayerProgress {
    pub fn records_for(&self, game_type: GameType) -> Vec<&GameRecord> {
        self.games_played
            .iter()
            .filter(|r| r.game_type == game_type)
            .collect()
    }

    pub fn average_score(&self, game_type: GameType) -> f64 {
        let records = self.records_for(game_type);
        if records.is_empty() {
            return 0.0;
        }
        records.iter().map(|r| r.score).sum::<f64>() / records.len() as f64
    }

    /// Per-game-type averages for the stats screen, in first-played order.
    pub fn averages_by_game(&self) -> Vec<(GameType, f64, usize)> {
        self.games_played
            .iter()
            .map(|r| r.game_type)
            .unique()
            .map(|g| {
                let records = self.records_for(g);
                let avg = records.iter().map(|r| r.score).sum::<f64>() / records.len() as f64;
                (g, avg, records.len())
            })
            .collect()
    }
}

/// What the engines are allowed to see of the progress record: the difficulty
/// bounds, the recency list, and a way to report a finished session. The
/// engine is the only mutator (single-threaded host).
pub trait ProgressTracker {
    fn difficulty_range(&self) -> (Difficulty, Difficulty);
    fn recent_words(&self) -> &[String];
    fn set_recent_words(&mut self, words: Vec<String>);
    fn record_session(&mut self, game_type: GameType, score: f64, total_attempts: u32);
}

impl ProgressTracker for PlayerProgress {
    fn difficulty_range(&self) -> (Difficulty, Difficulty) {
        (self.min_difficulty, self.max_difficulty)
    }

    fn recent_words(&self) -> &[String] {
        &self.recent_words
    }

    fn set_recent_words(&mut self, mut words: Vec<String>) {
        words.truncate(RECENT_WORDS_CAP);
        self.recent_words = words;
    }

    fn record_session(&mut self, game_type: GameType, score: f64, total_attempts: u32) {
        self.games_played.push(GameRecord {
            game_type,
            score,
            total_attempts,
            played_at: Local::now(),
        });
        self.last_updated = Local::now();
    }
}

pub trait ProgressStore {
    fn load(&self) -> PlayerProgress;
    fn save(&self, progress: &PlayerProgress) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::progress_path().unwrap_or_else(|| PathBuf::from("pulong_progress.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> PlayerProgress {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(progress) = serde_json::from_slice::<PlayerProgress>(&bytes) {
                return progress;
            }
        }
        PlayerProgress::default()
    }

    fn save(&self, progress: &PlayerProgress) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // a serialization failure must surface, not truncate the history file
        let data = serde_json::to_vec_pretty(progress).map_err(io::Error::other)?;
        fs::write(&self.path, data)
    }
}

/// Owns the in-memory progress record and writes it back through the store
/// after every mutation, so a crash never loses more than the current change.
#[derive(Debug)]
pub struct ProgressManager<S: ProgressStore> {
    progress: PlayerProgress,
    store: S,
}

impl<S: ProgressStore> ProgressManager<S> {
    pub fn new(store: S) -> Self {
        let progress = store.load();
        Self { progress, store }
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn set_student_name(&mut self, name: String) {
        self.progress.student_name = name;
        self.persist();
    }

    pub fn set_data_source(&mut self, source: String) {
        self.progress.data_source = source;
        self.persist();
    }

    pub fn set_difficulty_range(&mut self, min: Difficulty, max: Difficulty) {
        self.progress.min_difficulty = min.min(max);
        self.progress.max_difficulty = max.max(min);
        self.persist();
    }

    fn persist(&mut self) {
        self.progress.last_updated = Local::now();
        // Persistence is best effort; play continues on a full disk
        let _ = self.store.save(&self.progress);
    }
}

impl<S: ProgressStore> ProgressTracker for ProgressManager<S> {
    fn difficulty_range(&self) -> (Difficulty, Difficulty) {
        self.progress.difficulty_range()
    }

    fn recent_words(&self) -> &[String] {
        self.progress.recent_words()
    }

    fn set_recent_words(&mut self, words: Vec<String>) {
        self.progress.set_recent_words(words);
        self.persist();
    }

    fn record_session(&mut self, game_type: GameType, score: f64, total_attempts: u32) {
        self.progress.record_session(game_type, score, total_attempts);
        self.persist();
    }
}

/// Write the session history as CSV, oldest first.
pub fn export_history_csv<W: io::Write>(progress: &PlayerProgress, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["game_type", "score", "total_attempts", "played_at"])?;
    for record in &progress.games_played {
        wtr.write_record([
            record.game_type.to_string(),
            format!("{:.2}", record.score),
            record.total_attempts.to_string(),
            record.played_at.to_rfc3339(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_progress() -> PlayerProgress {
        let mut progress = PlayerProgress {
            student_name: "Maria".into(),
            data_source: "/tmp/bisaya-data".into(),
            min_difficulty: Difficulty::Easy,
            max_difficulty: Difficulty::Medium,
            ..Default::default()
        };
        progress.record_session(GameType::Wordle, 100.0, 1);
        progress.record_session(GameType::Hangman, 50.0, 2);
        progress.record_session(GameType::Wordle, 0.0, 1);
        progress
    }

    #[test]
    fn roundtrip_default_progress() {
        let dir = tempdir().unwrap();
        let store = FileProgressStore::with_path(dir.path().join("progress.json"));
        let progress = PlayerProgress::default();
        store.save(&progress).unwrap();

        assert_eq!(store.load(), progress);
    }

    #[test]
    fn roundtrip_preserves_history_order() {
        let dir = tempdir().unwrap();
        let store = FileProgressStore::with_path(dir.path().join("progress.json"));
        let progress = sample_progress();
        store.save(&progress).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, progress);
        let types: Vec<GameType> = loaded.games_played.iter().map(|r| r.game_type).collect();
        assert_eq!(
            types,
            vec![GameType::Wordle, GameType::Hangman, GameType::Wordle]
        );
    }

    // `last_updated` is stamped at construction, so default comparisons pin it
    fn assert_is_default(progress: &PlayerProgress) {
        let reference = PlayerProgress {
            last_updated: progress.last_updated,
            ..PlayerProgress::default()
        };
        assert_eq!(progress, &reference);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = FileProgressStore::with_path(dir.path().join("nope.json"));
        assert_is_default(&store.load());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileProgressStore::with_path(&path);
        assert_is_default(&store.load());
    }

    #[test]
    fn failed_save_errors_instead_of_truncating() {
        let dir = tempdir().unwrap();
        // the target path is a directory, so the write cannot succeed
        let store = FileProgressStore::with_path(dir.path());
        assert!(store.save(&sample_progress()).is_err());
    }

    #[test]
    fn save_writes_parseable_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        FileProgressStore::with_path(&path)
            .save(&sample_progress())
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        let parsed: PlayerProgress = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.games_played.len(), 3);
    }

    #[test]
    fn set_recent_words_truncates_to_cap() {
        let mut progress = PlayerProgress::default();
        let words: Vec<String> = (0..30).map(|i| format!("word{i}")).collect();
        progress.set_recent_words(words);

        assert_eq!(progress.recent_words().len(), RECENT_WORDS_CAP);
        assert_eq!(progress.recent_words()[0], "word0");
    }

    #[test]
    fn average_score_per_game_type() {
        let progress = sample_progress();

        assert_eq!(progress.average_score(GameType::Wordle), 50.0);
        assert_eq!(progress.average_score(GameType::Hangman), 50.0);
        assert_eq!(progress.average_score(GameType::NumberQuiz), 0.0);
    }

    #[test]
    fn averages_by_game_groups_all_records() {
        let progress = sample_progress();
        let averages = progress.averages_by_game();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0], (GameType::Wordle, 50.0, 2));
        assert_eq!(averages[1], (GameType::Hangman, 50.0, 1));
    }

    #[test]
    fn manager_persists_after_mutation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let mut manager = ProgressManager::new(FileProgressStore::with_path(&path));

        manager.record_session(GameType::NumberQuiz, 80.0, 5);
        manager.set_recent_words(vec!["balay".into()]);

        let reloaded = FileProgressStore::with_path(&path).load();
        assert_eq!(reloaded.games_played.len(), 1);
        assert_eq!(reloaded.games_played[0].game_type, GameType::NumberQuiz);
        assert_eq!(reloaded.recent_words, vec!["balay".to_string()]);
    }

    #[test]
    fn difficulty_range_is_normalized() {
        let dir = tempdir().unwrap();
        let mut manager =
            ProgressManager::new(FileProgressStore::with_path(dir.path().join("p.json")));
        manager.set_difficulty_range(Difficulty::Hard, Difficulty::Easy);

        assert_eq!(
            manager.difficulty_range(),
            (Difficulty::Easy, Difficulty::Hard)
        );
    }

    #[test]
    fn csv_export_contains_header_and_rows() {
        let progress = sample_progress();
        let mut buf = Vec::new();
        export_history_csv(&progress, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "game_type,score,total_attempts,played_at");
        assert!(lines[1].starts_with("wordle,100.00,1,"));
        assert!(lines[2].starts_with("hangman,50.00,2,"));
    }

    #[test]
    fn game_type_serializes_as_camel_case_string() {
        let json = serde_json::to_string(&GameType::NumberQuiz).unwrap();
        assert_eq!(json, r#""numberQuiz""#);
        let back: GameType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameType::NumberQuiz);
    }
}
