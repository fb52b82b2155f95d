//! TUI application state and logic

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rustc_hash::FxHashMap;
use std::io;

use crate::commands::GameContext;
use crate::core::LetterResult;
use crate::game::model::AttemptStatus;
use crate::game::{ErrorKind, GameplayState};

/// Application state
pub struct App {
    pub ctx: GameContext,
    pub state: GameplayState,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub input_mode: InputMode,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    /// Solved, failed, or locked out; only quitting is possible
    Finished,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    /// Load today's state for the context's player
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle cannot be loaded.
    pub fn new(ctx: GameContext) -> Result<Self> {
        let state = ctx.gameplay.get_state(ctx.player_id)?;
        let mut app = Self {
            ctx,
            state,
            input_buffer: String::new(),
            messages: Vec::new(),
            input_mode: InputMode::Guessing,
            should_quit: false,
        };

        app.add_message(
            &format!("Welcome, {}! Type a word and press Enter.", app.ctx.player_name),
            MessageStyle::Info,
        );
        if app.state.is_hard_mode && app.state.can_guess() {
            app.add_message("Hard mode is on. Press TAB for easy mode.", MessageStyle::Info);
        }
        app.sync_mode();
        Ok(app)
    }

    pub fn push_letter(&mut self, c: char) {
        if self.input_mode == InputMode::Guessing
            && c.is_alphabetic()
            && self.input_buffer.chars().count() < self.state.word_length
        {
            self.input_buffer.extend(c.to_uppercase());
        }
    }

    pub fn pop_letter(&mut self) {
        self.input_buffer.pop();
    }

    pub fn submit(&mut self) {
        if self.input_mode != InputMode::Guessing {
            return;
        }
        let guess = self.input_buffer.clone();

        match self.ctx.gameplay.submit_guess(self.ctx.player_id, &guess) {
            Ok(state) => {
                self.state = state;
                self.input_buffer.clear();
                self.announce_result();
            }
            Err(err) if err.kind() == ErrorKind::Validation => {
                self.add_message(&err.to_string(), MessageStyle::Error);
            }
            Err(err) => {
                self.add_message(&err.to_string(), MessageStyle::Error);
                self.input_buffer.clear();
                self.refresh();
            }
        }
        self.sync_mode();
    }

    pub fn enable_easy_mode(&mut self) {
        if !self.state.is_hard_mode {
            self.add_message("Already in easy mode.", MessageStyle::Info);
            return;
        }
        match self.ctx.gameplay.enable_easy_mode(self.ctx.player_id) {
            Ok(state) => {
                self.state = state;
                self.add_message("Easy mode on. This cannot be undone.", MessageStyle::Success);
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    /// Reload state from the store
    pub fn refresh(&mut self) {
        match self.ctx.gameplay.get_state(self.ctx.player_id) {
            Ok(state) => self.state = state,
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
        self.sync_mode();
    }

    /// Best known result per letter, for the keyboard panel
    #[must_use]
    pub fn keyboard_status(&self) -> FxHashMap<char, LetterResult> {
        let mut status: FxHashMap<char, LetterResult> = FxHashMap::default();
        for scored in self.state.guesses() {
            for mark in scored.feedback.marks() {
                status
                    .entry(mark.letter)
                    .and_modify(|best| *best = rank_max(*best, mark.result))
                    .or_insert(mark.result);
            }
        }
        status
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    fn announce_result(&mut self) {
        let count = self.state.guesses().len();
        match self.state.status() {
            Some(AttemptStatus::Solved) => {
                let celebration = match count {
                    1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                    2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                    3 => "✨ SPLENDID! Three guesses! ✨",
                    4 => "👏 GREAT JOB! Four guesses! 👏",
                    5 => "🎉 NICE WORK! Five guesses! 🎉",
                    6 => "😅 PHEW! Got it in six! 😅",
                    _ => "🎊 SOLVED! 🎊",
                };
                self.add_message(celebration, MessageStyle::Success);
                self.add_message("Press 'q' to quit.", MessageStyle::Info);
            }
            Some(AttemptStatus::Failed) => {
                let solution = self.state.visible_solution().unwrap_or("?").to_string();
                self.add_message(
                    &format!("Out of guesses. The word was {solution}."),
                    MessageStyle::Error,
                );
            }
            _ => {
                let remaining = self.state.remaining_guesses();
                self.add_message(
                    &format!("{remaining} guesses remaining"),
                    MessageStyle::Info,
                );
            }
        }
    }

    fn sync_mode(&mut self) {
        self.input_mode = if self.state.can_guess() {
            InputMode::Guessing
        } else {
            InputMode::Finished
        };
    }
}

const fn rank(result: LetterResult) -> u8 {
    match result {
        LetterResult::Absent => 0,
        LetterResult::Present => 1,
        LetterResult::Correct => 2,
    }
}

const fn rank_max(a: LetterResult, b: LetterResult) -> LetterResult {
    if rank(b) > rank(a) { b } else { a }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('q') if app.input_mode == InputMode::Finished => {
                    app.should_quit = true;
                }
                KeyCode::Char('r') if app.input_mode == InputMode::Finished => app.refresh(),
                KeyCode::Char(c) => app.push_letter(c),
                KeyCode::Backspace => app.pop_letter(),
                KeyCode::Enter => app.submit(),
                KeyCode::Tab if app.input_mode == InputMode::Guessing => app.enable_easy_mode(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
