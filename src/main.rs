mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use pulong::game::{GameSession, GameType, HangmanGame, NumberQuizGame, WordleGame};
use pulong::progress::{export_history_csv, FileProgressStore, ProgressManager, ProgressTracker};
use pulong::runtime::{AppEvent, CrosstermEventSource, Runner};
use pulong::vocabulary::{Difficulty, Vocabulary, VocabularyLoader};

const TICK_RATE_MS: u64 = 250;

/// learn Bisaya vocabulary through word games in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Bisaya vocabulary trainer: a Wordle-style word game, Hangman, and a number quiz, with per-student progress tracking and adjustable difficulty."
)]
pub struct Cli {
    /// directory containing vocabulary.json / numbers.json
    #[clap(short = 'd', long)]
    data: Option<PathBuf>,

    /// student name recorded with session history
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// easiest words to include in word games
    #[clap(long, value_enum)]
    min_difficulty: Option<DifficultyArg>,

    /// hardest words to include in word games
    #[clap(long, value_enum)]
    max_difficulty: Option<DifficultyArg>,

    /// write session history to a CSV file and exit
    #[clap(long, value_name = "FILE")]
    export_history: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Wordle,
    Hangman,
    NumberQuiz,
    Stats,
}

impl Screen {
    fn game_type(&self) -> Option<GameType> {
        match self {
            Screen::Wordle => Some(GameType::Wordle),
            Screen::Hangman => Some(GameType::Hangman),
            Screen::NumberQuiz => Some(GameType::NumberQuiz),
            Screen::Menu | Screen::Stats => None,
        }
    }
}

/// The host owns at most one game session at a time; mode-generic flow
/// (scoring, recording, reset) goes through `GameSession`, and only the
/// per-key move handlers reach into the concrete engine.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub vocabulary: Vocabulary,
    pub progress: ProgressManager<FileProgressStore>,
    pub session: Option<GameSession>,
    pub input: String,
    pub message: Option<String>,
}

impl App {
    pub fn new(vocabulary: Vocabulary, progress: ProgressManager<FileProgressStore>) -> Self {
        Self {
            screen: Screen::Menu,
            vocabulary,
            progress,
            session: None,
            input: String::new(),
            message: None,
        }
    }

    pub fn student_name(&self) -> &str {
        &self.progress.progress().student_name
    }

    fn open(&mut self, screen: Screen) {
        self.input.clear();
        self.message = None;
        if let Some(game_type) = screen.game_type() {
            self.ensure_session(game_type);
            self.deal_new_puzzle();
        }
        self.screen = screen;
    }

    /// Keep the current session when it already runs the requested mode;
    /// switching modes starts a fresh one.
    fn ensure_session(&mut self, game_type: GameType) {
        if self.session.as_ref().map(GameSession::game_type) != Some(game_type) {
            // Hangman draws from a single band; use the lower bound of the
            // student's range so the mode stays approachable.
            let (min, _) = self.progress.difficulty_range();
            self.session = Some(match game_type {
                GameType::Wordle => GameSession::Wordle(WordleGame::new()),
                GameType::Hangman => GameSession::Hangman(HangmanGame::with_difficulty(min)),
                GameType::NumberQuiz => GameSession::NumberQuiz(NumberQuizGame::new()),
            });
        }
    }

    /// Start the next puzzle on the active session, keeping its score.
    fn deal_new_puzzle(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        let started = match session {
            GameSession::Wordle(game) => game
                .start_new_game(&self.vocabulary, &mut self.progress)
                .is_started(),
            GameSession::Hangman(game) => game.start_new_game(&self.vocabulary).is_started(),
            GameSession::NumberQuiz(game) => game.start_new_game(&self.vocabulary).is_started(),
        };
        if !started {
            self.message = Some("Nothing to play with the current word list".into());
        }
    }

    /// Leave the current game screen, recording the session if any puzzle or
    /// question was actually attempted.
    fn back_to_menu(&mut self) {
        self.message = self.finish_session();
        self.input.clear();
        self.screen = Screen::Menu;
    }

    /// Record the active session (when anything was attempted) and clear its
    /// score for the next visit.
    fn finish_session(&mut self) -> Option<String> {
        let session = self.session.as_mut()?;
        let game_type = session.game_type();
        let score = session.score();
        let recorded = if score.total_attempts > 0 {
            self.progress
                .record_session(game_type, score.percentage, score.total_attempts);
            Some(format!(
                "{}: {} recorded",
                game_type.display_name(),
                score.display_percentage()
            ))
        } else {
            None
        };
        session.reset();
        recorded
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.screen {
            Screen::Menu => match key.code {
                KeyCode::Char('1') => self.open(Screen::Wordle),
                KeyCode::Char('2') => self.open(Screen::Hangman),
                KeyCode::Char('3') => self.open(Screen::NumberQuiz),
                KeyCode::Char('s') => self.open(Screen::Stats),
                KeyCode::Char('q') | KeyCode::Esc => return true,
                _ => {}
            },
            Screen::Stats => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.screen = Screen::Menu;
                    self.message = None;
                }
            }
            Screen::Wordle => self.handle_wordle_key(key),
            Screen::Hangman => self.handle_hangman_key(key),
            Screen::NumberQuiz => self.handle_quiz_key(key),
        }
        false
    }

    fn handle_wordle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Right => self.deal_new_puzzle(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('?') => {
                let Some(GameSession::Wordle(game)) = &mut self.session else {
                    return;
                };
                self.message = game
                    .use_hint()
                    .or_else(|| Some("No more hints for this word".into()));
            }
            KeyCode::Enter => {
                let Some(GameSession::Wordle(game)) = &mut self.session else {
                    return;
                };
                let guess = self.input.clone();
                let accepted = guess.trim().chars().count() == game.state().word_length;
                let state = game.submit_guess(&guess);
                let (won, over) = (state.game_won, state.game_over);
                if accepted {
                    self.input.clear();
                }
                self.message = if won {
                    Some("Maayo! You found the word.".into())
                } else if over {
                    game.reveal_solution()
                        .map(|w| format!("Out of tries — the word was \"{w}\""))
                } else {
                    None
                };
            }
            KeyCode::Char(c) => {
                let Some(GameSession::Wordle(game)) = &self.session else {
                    return;
                };
                let state = game.state();
                if !state.game_over
                    && state.is_started()
                    && self.input.chars().count() < state.word_length
                    && (c.is_alphabetic() || c == '-')
                {
                    self.input.push(c.to_ascii_lowercase());
                }
            }
            _ => {}
        }
    }

    fn handle_hangman_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Right => self.deal_new_puzzle(),
            KeyCode::Char('?') => {
                let Some(GameSession::Hangman(game)) = &mut self.session else {
                    return;
                };
                self.message = game
                    .use_hint()
                    .or_else(|| Some("Hint already used".into()));
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                let Some(GameSession::Hangman(game)) = &mut self.session else {
                    return;
                };
                let state = game.guess_letter(c);
                let (won, over) = (state.game_won, state.game_over);
                self.message = if won {
                    Some("Maayo! You saved the hangman.".into())
                } else if over {
                    game.reveal_solution()
                        .map(|w| format!("The word was \"{w}\""))
                } else {
                    None
                };
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let Some(GameSession::NumberQuiz(game)) = &mut self.session else {
                    return;
                };
                if game.state().answer_correct.is_some() {
                    game.next_question(&self.vocabulary);
                    self.input.clear();
                } else if !self.input.trim().is_empty() {
                    let answer = self.input.clone();
                    game.submit_answer(&self.vocabulary, &answer);
                    self.input.clear();
                }
            }
            KeyCode::Char(c) => {
                let Some(GameSession::NumberQuiz(game)) = &self.session else {
                    return;
                };
                // answers are words, numerals, or hyphenated forms
                if game.state().answer_correct.is_none()
                    && (c.is_alphanumeric() || c == ' ' || c == '-')
                {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut progress = ProgressManager::new(FileProgressStore::new());
    if let Some(name) = &cli.name {
        progress.set_student_name(name.clone());
    }
    if cli.min_difficulty.is_some() || cli.max_difficulty.is_some() {
        let (cur_min, cur_max) = progress.difficulty_range();
        progress.set_difficulty_range(
            cli.min_difficulty.map(Into::into).unwrap_or(cur_min),
            cli.max_difficulty.map(Into::into).unwrap_or(cur_max),
        );
    }

    if let Some(path) = &cli.export_history {
        let file = File::create(path)?;
        export_history_csv(progress.progress(), file)?;
        println!(
            "wrote {} session record(s) to {}",
            progress.progress().games_played.len(),
            path.display()
        );
        return Ok(());
    }

    let loader = VocabularyLoader::new();
    let vocabulary = match &cli.data {
        Some(dir) => {
            let vocab = loader.load_from_dir(dir)?;
            progress.set_data_source(dir.display().to_string());
            vocab
        }
        None => {
            let cached = loader.load_cached();
            if cached.is_empty() {
                Vocabulary::bundled()
            } else {
                cached
            }
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(vocabulary, progress);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| ui::ui(app, f))?;

        match runner.step() {
            // ticks keep the elapsed-time display moving
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
