//! Simple interactive CLI mode
//!
//! Text-based daily game without the TUI

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use super::GameContext;
use crate::game::{ErrorKind, GameplayState};
use crate::output::formatters::feedback_tiles;
use crate::output::{print_outcome, print_state};

/// Run the simple interactive CLI mode on stdin
///
/// # Errors
///
/// Returns an error on I/O failure or if the puzzle cannot be loaded.
pub fn run_simple(ctx: &GameContext) -> Result<()> {
    let stdin = io::stdin();
    run_simple_with(ctx, stdin.lock())
}

/// Run the game loop over any line source
///
/// # Errors
///
/// Returns an error on I/O failure or if the puzzle cannot be loaded.
pub fn run_simple_with<R: BufRead>(ctx: &GameContext, mut input: R) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Wordle Tracker - Daily Puzzle                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Type a {}-letter word and press Enter to guess.", ctx.options.word_length);
    println!("Commands: 'easy' to turn off hard mode, 'board' to redraw, 'quit' to exit\n");

    let mut state = ctx.gameplay.get_state(ctx.player_id)?;
    show(ctx, &state);

    loop {
        if !state.can_guess() {
            println!("\n👋 See you tomorrow!\n");
            return Ok(());
        }

        let turn = state.guesses().len() + 1;
        let Some(line) = prompt(&mut input, &format!("Guess {turn}/{}", state.max_guesses))? else {
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "" => {}
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "board" | "b" => {
                state = ctx.gameplay.get_state(ctx.player_id)?;
                show(ctx, &state);
            }
            "easy" => match ctx.gameplay.enable_easy_mode(ctx.player_id) {
                Ok(updated) => {
                    state = updated;
                    println!("✓ Hard mode is off for today's puzzle.\n");
                }
                Err(err) => println!("❌ {err}\n"),
            },
            _ => match ctx.gameplay.submit_guess(ctx.player_id, &line) {
                Ok(updated) => {
                    state = updated;
                    if let Some(last) = state.guesses().last() {
                        println!("   {}\n", feedback_tiles(&last.feedback));
                    }
                    if state.status().is_some_and(|s| s.is_terminal()) {
                        show(ctx, &state);
                        print_outcome(&state);
                    }
                }
                Err(err) if err.kind() == ErrorKind::Validation => {
                    println!("{} {err}\n", "❌".red());
                }
                Err(err) if err.is_retryable() => {
                    println!("⚠ {err}\n");
                    state = ctx.gameplay.get_state(ctx.player_id)?;
                }
                Err(err) => {
                    println!("❌ {err}\n");
                    state = ctx.gameplay.get_state(ctx.player_id)?;
                }
            },
        }
    }
}

fn show(ctx: &GameContext, state: &GameplayState) {
    let clock = ctx.gameplay.clock();
    print_state(state, clock.reveal_instant(state.puzzle.puzzle_date), clock.now());
    println!();
}

/// Read one trimmed line; `None` at end of input
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
