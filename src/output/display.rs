//! Display functions for command results

use chrono::{DateTime, Utc};
use colored::Colorize;

use super::formatters::{
    create_progress_bar, empty_row, feedback_tiles, format_countdown, status_label,
};
use crate::commands::{EvaluationResult, StatisticsReport};
use crate::game::model::PlayerId;
use crate::game::{GameplayState, SolutionsSnapshot};

/// Print today's board for one player
pub fn print_state(state: &GameplayState, reveal_at: DateTime<Utc>, now: DateTime<Utc>) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Daily puzzle {}  {}",
        state.puzzle.puzzle_date.to_string().bright_yellow().bold(),
        if state.is_hard_mode {
            "hard mode".magenta().bold()
        } else {
            "easy mode".normal()
        }
    );
    println!("{}", "─".repeat(60).cyan());

    let guesses = state.guesses();
    for scored in guesses {
        println!("  {}", feedback_tiles(&scored.feedback));
    }
    for _ in guesses.len()..state.max_guesses as usize {
        println!("  {}", empty_row(state.word_length));
    }
    println!();

    match state.status() {
        Some(status) => println!("Status:     {}", status_label(status)),
        None => println!("Status:     {}", "not started".bright_black()),
    }
    println!("Remaining:  {} of {}", state.remaining_guesses(), state.max_guesses);

    if state.cutoff_passed {
        println!("Reveal:     {}", "passed".bright_black());
    } else {
        println!("Reveal in:  {}", format_countdown(now, reveal_at));
    }

    if let Some(solution) = state.visible_solution() {
        println!("Solution:   {}", solution.bright_green().bold());
    }
    if !state.can_guess() && state.status().is_none() {
        println!("{}", "Late play is disabled for this puzzle.".yellow());
    }
}

/// Print a celebration or consolation line after a finishing guess
pub fn print_outcome(state: &GameplayState) {
    let Some(status) = state.status() else {
        return;
    };
    let count = state.guesses().len();
    if status == crate::game::model::AttemptStatus::Solved {
        let message = match count {
            1 => "🎯 HOLE IN ONE!",
            2 => "🔥 MAGNIFICENT!",
            3 => "✨ SPLENDID!",
            4 => "👏 GREAT JOB!",
            5 => "🎉 NICE WORK!",
            _ => "😅 PHEW!",
        };
        println!(
            "\n{} Solved in {} {}",
            message.bright_green().bold(),
            count.to_string().bright_cyan().bold(),
            if count == 1 { "guess" } else { "guesses" }
        );
    } else if status.is_terminal() {
        println!("\n{}", "❌ Out of guesses. Better luck tomorrow.".red().bold());
    }
}

/// Print every attempt at today's puzzle
pub fn print_solutions(snapshot: &SolutionsSnapshot, viewer: PlayerId) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ATTEMPTS FOR".bright_cyan().bold(),
        snapshot.puzzle.puzzle_date.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    match snapshot.disclosed_solution() {
        Some(solution) => println!("\nSolution: {}", solution.bright_green().bold()),
        None => println!(
            "\n{}",
            "Solution and other players' guesses unlock at the reveal.".bright_black()
        ),
    }

    if snapshot.attempts.is_empty() {
        println!("\nNo attempts yet.");
        return;
    }

    for record in &snapshot.attempts {
        let is_viewer = record.attempt.player_id == viewer;
        let who = if is_viewer {
            "you".bright_white().bold().to_string()
        } else {
            record.attempt.player_id.to_string()[..8].to_string()
        };
        println!(
            "\n  {who}  {}  {} guesses{}",
            status_label(record.attempt.status),
            record.guess_count(),
            if record.attempt.hard_mode { "  (hard)" } else { "" }
        );
        if snapshot.cutoff_passed || is_viewer {
            for scored in &record.guesses {
                println!("    {}", feedback_tiles(&scored.feedback));
            }
        } else {
            for scored in &record.guesses {
                println!("    {}", scored.feedback.to_emoji());
            }
        }
    }
}

/// Print a player's statistics
pub fn print_statistics(report: &StatisticsReport) {
    let stats = &report.statistics;
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "STATISTICS:".bright_cyan().bold(),
        report.player_name.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Results:".bright_cyan().bold());
    println!("   Played:           {}", stats.total_attempts);
    println!("   Wins:             {}", stats.wins.to_string().green());
    println!("   Failures:         {}", stats.failures.to_string().red());
    if let Some(rate) = stats.win_rate() {
        println!("   Win rate:         {:.0}%", rate * 100.0);
    }
    match stats.average_guess_count {
        Some(avg) => println!(
            "   Average guesses:  {}",
            format!("{avg:.2}").bright_yellow().bold()
        ),
        None => println!("   Average guesses:  -"),
    }
    println!(
        "   Current streak:   {}",
        stats.current_streak.to_string().bright_cyan().bold()
    );
    println!("   Longest streak:   {}", stats.longest_streak);
    println!("   Practice games:   {}", stats.practice_attempts);

    let total_wins: usize = stats.guess_distribution.values().sum();
    if total_wins == 0 {
        return;
    }
    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    for guess_count in 1..=report.max_guesses {
        let count = stats.guess_distribution.get(&guess_count).copied().unwrap_or(0);
        let pct = count as f64 / total_wins as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guess_count}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}

/// Print a standalone evaluation
pub fn print_evaluation(result: &EvaluationResult) {
    println!(
        "\n{}  {}",
        feedback_tiles(&result.feedback),
        result.feedback.to_emoji()
    );
    println!(
        "Guess {} against {}: {} correct, {} present",
        result.guess.bright_white().bold(),
        result.solution.bright_yellow().bold(),
        result.feedback.count_correct(),
        result.feedback.count_present()
    );
}
