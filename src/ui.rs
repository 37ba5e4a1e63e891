use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{App, Screen};
use pulong::game::wordle::MAX_ATTEMPTS;
use pulong::game::{
    GameSession, GameType, HangmanGame, LetterResult, NumberPrompt, NumberQuizGame, WordleGame,
};

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

const HANGMAN_STAGES: [&str; 7] = [
    "
  +---+
  |   |
      |
      |
      |
      |
=========",
    "
  +---+
  |   |
  O   |
      |
      |
      |
=========",
    "
  +---+
  |   |
  O   |
  |   |
      |
      |
=========",
    "
  +---+
  |   |
  O   |
 /|   |
      |
      |
=========",
    "
  +---+
  |   |
  O   |
 /|\\  |
      |
      |
=========",
    "
  +---+
  |   |
  O   |
 /|\\  |
 /    |
      |
=========",
    "
  +---+
  |   |
  O   |
 /|\\  |
 / \\  |
      |
=========",
];

pub fn ui(app: &App, f: &mut Frame) {
    match app.screen {
        Screen::Menu => render_menu(app, f),
        Screen::Stats => render_stats(app, f),
        Screen::Wordle | Screen::Hangman | Screen::NumberQuiz => match &app.session {
            Some(GameSession::Wordle(game)) => render_wordle(app, game, f),
            Some(GameSession::Hangman(game)) => render_hangman(app, game, f),
            Some(GameSession::NumberQuiz(game)) => render_number_quiz(app, game, f),
            None => render_menu(app, f),
        },
    }
}

fn screen_chunks(f: &Frame) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // body
            Constraint::Length(2), // message
            Constraint::Length(2), // key help
        ])
        .split(f.area())
}

fn title_block(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}

fn render_help(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn render_message(app: &App, f: &mut Frame, area: Rect) {
    if let Some(message) = &app.message {
        let para = Paragraph::new(message.as_str())
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(para, area);
    }
}

fn render_menu(app: &App, f: &mut Frame) {
    let chunks = screen_chunks(f);
    f.render_widget(title_block("pulong — Bisaya word games"), chunks[0]);

    let mut lines = vec![Line::raw("")];
    for (i, game) in GameType::ALL.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{}] {:<12}", i + 1, game.display_name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                game.description(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("  [s] Stats        progress for {}", app.student_name()),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(body, chunks[1]);
    render_message(app, f, chunks[2]);
    render_help(f, chunks[3], "1-3: play   s: stats   q: quit");
}

fn letter_style(result: LetterResult) -> Style {
    match result {
        LetterResult::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LetterResult::Present => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LetterResult::Absent => Style::default().fg(Color::White).bg(Color::DarkGray),
        LetterResult::Unknown => Style::default().add_modifier(Modifier::DIM),
    }
}

fn render_wordle(app: &App, game: &WordleGame, f: &mut Frame) {
    let chunks = screen_chunks(f);
    f.render_widget(title_block("Wordle"), chunks[0]);

    let state = game.state();
    let mut lines: Vec<Line> = vec![Line::raw("")];

    if !state.is_started() {
        lines.push(Line::raw("No words match the current difficulty range."));
    } else {
        for row in 0..MAX_ATTEMPTS {
            let mut spans: Vec<Span> = Vec::new();
            for col in 0..state.word_length {
                let cell = &state.guesses[row][col];
                let (text, style) = if !cell.is_empty() {
                    (format!(" {} ", cell), letter_style(state.results[row][col]))
                } else if row == state.current_attempt && !state.game_over {
                    // live input row
                    match app.input.chars().nth(col) {
                        Some(c) => (format!(" {c} "), Style::default().add_modifier(Modifier::BOLD)),
                        None => (" · ".to_string(), Style::default().add_modifier(Modifier::DIM)),
                    }
                } else {
                    (" · ".to_string(), Style::default().add_modifier(Modifier::DIM))
                };
                spans.push(Span::styled(text, style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::raw(""));
        }

        // keyboard affordance line
        let hints = game.letter_hints();
        let mut key_spans: Vec<Span> = Vec::new();
        for c in 'a'..='z' {
            let result = hints.get(&c).copied().unwrap_or(LetterResult::Unknown);
            key_spans.push(Span::styled(c.to_string(), letter_style(result)));
            key_spans.push(Span::raw(" "));
        }
        lines.push(Line::from(key_spans));
    }

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(body, chunks[1]);
    render_message(app, f, chunks[2]);
    render_help(
        f,
        chunks[3],
        "type + enter: guess   ?: hint   →: new word   esc: back",
    );
}

fn render_hangman(app: &App, game: &HangmanGame, f: &mut Frame) {
    let chunks = screen_chunks(f);
    f.render_widget(title_block("Hangman"), chunks[0]);

    let state = game.state();
    let mut lines: Vec<Line> = Vec::new();

    if !state.is_started() {
        lines.push(Line::raw(""));
        lines.push(Line::raw("No words match the current difficulty."));
    } else {
        for stage_line in HANGMAN_STAGES[state.stage.min(6)].lines() {
            lines.push(Line::from(Span::styled(
                stage_line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            state.spaced_mask(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(""));
        if !state.wrong_letters.is_empty() {
            let wrong: String = state
                .wrong_letters
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                format!("wrong: {wrong}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(body, chunks[1]);
    render_message(app, f, chunks[2]);
    render_help(
        f,
        chunks[3],
        "a-z: guess a letter   ?: hint   →: new word   esc: back",
    );
}

fn render_number_quiz(app: &App, game: &NumberQuizGame, f: &mut Frame) {
    let chunks = screen_chunks(f);
    f.render_widget(title_block("Number Quiz"), chunks[0]);

    let state = game.state();
    let mut lines: Vec<Line> = vec![Line::raw("")];

    match &state.prompt {
        None => lines.push(Line::raw("No number list loaded.")),
        Some(NumberPrompt::NumberToWord(value)) => {
            lines.push(Line::from(Span::styled(
                format!("What is {value} in Bisaya?"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        Some(NumberPrompt::WordToNumber(word)) => {
            lines.push(Line::from(Span::styled(
                format!("What number is \"{word}\"?"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(
            app.input.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]));
    lines.push(Line::raw(""));

    match state.answer_correct {
        Some(true) => lines.push(Line::from(Span::styled(
            "Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            format!("Not quite — you answered \"{}\"", state.answer.trim()),
            Style::default().fg(Color::Red),
        ))),
        None => {}
    }

    let score = game.score();
    if score.total_attempts > 0 {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(
                "score: {} ({})  ·  {:.0}s",
                score.display_score(),
                score.display_percentage(),
                score.elapsed_secs
            ),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(body, chunks[1]);
    render_message(app, f, chunks[2]);
    render_help(f, chunks[3], "enter: answer / next question   esc: back");
}

fn render_stats(app: &App, f: &mut Frame) {
    let chunks = screen_chunks(f);
    let progress = app.progress.progress();

    let title = format!("Stats — {}", progress.student_name);
    f.render_widget(title_block(&title), chunks[0]);

    let mut lines: Vec<Line> = vec![Line::raw("")];

    let averages = progress.averages_by_game();
    if averages.is_empty() {
        lines.push(Line::raw("No games played yet."));
    } else {
        for (game, avg, count) in averages {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", game.display_name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("avg {avg:.0}%  over {count} session(s)")),
            ]));
        }

        lines.push(Line::raw(""));
        let last_played = humanize_since(progress.last_updated);
        lines.push(Line::from(Span::styled(
            format!("last played {last_played}"),
            Style::default().add_modifier(Modifier::DIM),
        )));

        lines.push(Line::raw(""));
        for record in progress.games_played.iter().rev().take(10) {
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<12} {:>4.0}%  {} attempt(s)  {}",
                    record.game_type.display_name(),
                    record.score,
                    record.total_attempts,
                    humanize_since(record.played_at),
                ),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
    }

    // left-aligned columns look ragged under Alignment::Center, so center
    // the whole block by hand using the widest line
    let block_width = lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.width()).sum::<usize>())
        .max()
        .unwrap_or(0) as u16;
    let area = chunks[1];
    let x_off = area.width.saturating_sub(block_width) / 2;
    let centered = Rect {
        x: area.x + x_off,
        width: block_width.min(area.width),
        ..area
    };
    let body = Paragraph::new(lines).alignment(Alignment::Left);
    f.render_widget(body, centered);
    render_message(app, f, chunks[2]);
    render_help(f, chunks[3], "esc: back");
}

fn humanize_since(when: chrono::DateTime<chrono::Local>) -> String {
    let elapsed = chrono::Local::now() - when;
    match elapsed.num_seconds() {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86_400),
    }
}
