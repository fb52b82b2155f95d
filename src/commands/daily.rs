//! One-shot commands against today's puzzle

use anyhow::Result;

use super::GameContext;
use crate::game::GameplayState;
use crate::output::{print_outcome, print_solutions, print_state};

fn show(ctx: &GameContext, state: &GameplayState) {
    let clock = ctx.gameplay.clock();
    print_state(state, clock.reveal_instant(state.puzzle.puzzle_date), clock.now());
}

/// Print the player's board for today
///
/// # Errors
///
/// Returns an error if the puzzle or attempt cannot be loaded.
pub fn show_state(ctx: &GameContext) -> Result<GameplayState> {
    let state = ctx.gameplay.get_state(ctx.player_id)?;
    show(ctx, &state);
    Ok(state)
}

/// Submit one guess and print the updated board
///
/// # Errors
///
/// Returns the game's rejection (validation, conflict, concurrency) as an error.
pub fn submit_guess(ctx: &GameContext, word: &str) -> Result<GameplayState> {
    let state = ctx.gameplay.submit_guess(ctx.player_id, word)?;
    show(ctx, &state);
    print_outcome(&state);
    Ok(state)
}

/// Switch the current attempt to easy mode
///
/// # Errors
///
/// Fails if there is no attempt yet or it is already finished.
pub fn enable_easy_mode(ctx: &GameContext) -> Result<GameplayState> {
    let state = ctx.gameplay.enable_easy_mode(ctx.player_id)?;
    println!("Hard mode is off for today's puzzle.");
    show(ctx, &state);
    Ok(state)
}

/// Print everyone's attempts at today's puzzle
///
/// # Errors
///
/// Returns an error if the attempts cannot be loaded.
pub fn show_solutions(ctx: &GameContext) -> Result<()> {
    let snapshot = ctx.gameplay.get_solutions()?;
    print_solutions(&snapshot, ctx.player_id);
    Ok(())
}
