//! TUI rendering with ratatui
//!
//! The board, keyboard and info panels for the daily game.

use super::app::{App, InputMode, MessageStyle};
use crate::core::LetterResult;
use crate::output::formatters::format_countdown;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Board and keyboard
            Constraint::Percentage(45), // Info and messages
        ])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "🟩 WORDLE TRACKER - Daily Puzzle {}",
        app.state.puzzle.puzzle_date
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let board_height = app.state.max_guesses as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(board_height), // Board
            Constraint::Min(5),               // Keyboard
        ])
        .split(area);

    render_board(f, app, chunks[0]);
    render_keyboard(f, app, chunks[1]);
}

fn tile_style(result: LetterResult) -> Style {
    let bg = match result {
        LetterResult::Correct => Color::Green,
        LetterResult::Present => Color::Yellow,
        LetterResult::Absent => Color::DarkGray,
    };
    Style::new().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let width = app.state.word_length;
    let guesses = app.state.guesses();
    let mut lines: Vec<Line> = Vec::with_capacity(app.state.max_guesses as usize);

    for scored in guesses {
        let spans: Vec<Span> = scored
            .feedback
            .marks()
            .iter()
            .flat_map(|mark| {
                [
                    Span::styled(format!(" {} ", mark.letter), tile_style(mark.result)),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(spans));
    }

    if app.input_mode == InputMode::Guessing && lines.len() < app.state.max_guesses as usize {
        let typed: Vec<char> = app.input_buffer.chars().collect();
        let spans: Vec<Span> = (0..width)
            .flat_map(|i| {
                let cell = typed
                    .get(i)
                    .map_or_else(|| " _ ".to_string(), |c| format!(" {c} "));
                [
                    Span::styled(
                        cell,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(spans));
    }

    while lines.len() < app.state.max_guesses as usize {
        lines.push(Line::styled(
            " · ".repeat(width),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let status = app.keyboard_status();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|key| {
                    let style = status.get(&key).map_or_else(
                        || Style::default().fg(Color::White),
                        |result| tile_style(*result),
                    );
                    Span::styled(format!(" {key} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(keyboard, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Game info
            Constraint::Length(3), // Guesses used
            Constraint::Min(5),    // Messages
        ])
        .split(area);

    render_game_info(f, app, chunks[0]);
    render_guess_gauge(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_game_info(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let clock = app.ctx.gameplay.clock();

    let mode = if state.is_hard_mode {
        Span::styled("hard", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("easy")
    };
    let status = state
        .status()
        .map_or_else(|| "not started".to_string(), |s| s.to_string());
    let reveal = if state.cutoff_passed {
        "passed".to_string()
    } else {
        format!(
            "in {}",
            format_countdown(clock.now(), clock.reveal_instant(state.puzzle.puzzle_date))
        )
    };

    let mut content = vec![
        Line::from(vec![Span::raw("Player:   "), Span::raw(app.ctx.player_name.clone())]),
        Line::from(vec![Span::raw("Mode:     "), mode]),
        Line::from(format!("Status:   {status}")),
        Line::from(format!("Reveal:   {reveal}")),
    ];
    if let Some(solution) = state.visible_solution() {
        content.push(Line::from(vec![
            Span::raw("Solution: "),
            Span::styled(
                solution.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let info = Paragraph::new(content).block(
        Block::default()
            .title(" Today ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(info, area);
}

fn render_guess_gauge(f: &mut Frame, app: &App, area: Rect) {
    let used = app.state.guesses().len() as u32;
    let max = app.state.max_guesses.max(1);
    let percent = (used * 100 / max).min(100) as u16;

    let gauge = Gauge::default()
        .block(Block::default().title(" Guesses ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{used}/{max} used"));
    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(10)
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Guessing => (
            " Your Guess | Enter to submit ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::Finished => (" Done for today | 'q' to quit ", "", Color::Green),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.input_mode {
        InputMode::Guessing => "Enter: Submit | Backspace: Delete | TAB: Easy Mode | Esc: Quit",
        InputMode::Finished => "q: Quit | r: Refresh",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::fixtures::context;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn draws_typed_letters_and_date() {
        let mut app = App::new(context()).unwrap();
        for c in "cra".chars() {
            app.push_letter(c);
        }
        let text = screen(&app);

        assert!(text.contains("2025-01-10"));
        assert!(text.contains("CRA"));
        assert!(text.contains("hard"));
    }

    #[test]
    fn finished_board_shows_the_solution() {
        let mut app = App::new(context()).unwrap();
        for c in "roast".chars() {
            app.push_letter(c);
        }
        app.submit();

        let text = screen(&app);
        assert!(text.contains("Solution: ROAST"));
        assert!(text.contains("Done for today"));
    }
}
