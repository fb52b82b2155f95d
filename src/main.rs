//! Wordle Tracker - CLI
//!
//! Play the daily puzzle in a TUI or plain terminal, or run one-shot commands
//! against a JSON store.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordle_tracker::{
    commands::{
        GameContext, Settings, enable_easy_mode, evaluate, run_simple, show_solutions,
        show_state, show_statistics, submit_guess,
    },
    interactive::{App, run_tui},
    output::print_evaluation,
    stats::StatisticsFilter,
};

#[derive(Parser)]
#[command(
    name = "wordle_tracker",
    about = "Daily Wordle with hard mode, a noon reveal, and streak tracking",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Player name; the same name always maps to the same player
    #[arg(short, long, global = true, default_value = "player")]
    player: String,

    /// JSON file holding puzzles and attempts
    #[arg(short, long, global = true, default_value = "wordle_tracker.json")]
    store: PathBuf,

    /// TOML file with game options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretend it is this RFC 3339 time; its offset becomes the game's time zone
    #[arg(long, global = true)]
    now: Option<DateTime<FixedOffset>>,

    /// Accept guesses that are not in the dictionary
    #[arg(long, global = true)]
    no_dictionary: bool,

    /// More logging (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI board (default)
    Play,

    /// Plain text game loop without the TUI
    Simple,

    /// Show today's board
    State,

    /// Submit one guess
    Guess {
        /// The word to guess
        word: String,
    },

    /// Turn off hard mode for today's attempt (cannot be undone)
    EasyMode,

    /// Show every attempt at today's puzzle
    Solutions,

    /// Show win/loss totals and streaks
    Stats {
        /// Fold practice games (started after the reveal) into the totals
        #[arg(long)]
        practice: bool,

        /// Only hard mode attempts
        #[arg(long, conflicts_with = "easy_only")]
        hard_only: bool,

        /// Only easy mode attempts
        #[arg(long)]
        easy_only: bool,

        /// First puzzle date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last puzzle date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Score a guess against any solution, without touching the store
    Evaluate {
        solution: String,
        guess: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    init_tracing(cli.verbose, matches!(command, Commands::Play));

    if let Commands::Evaluate { solution, guess } = &command {
        let result = evaluate(solution, guess)?;
        print_evaluation(&result);
        return Ok(());
    }

    let settings = Settings {
        player: cli.player,
        store: cli.store,
        config: cli.config,
        now: cli.now,
        no_dictionary: cli.no_dictionary,
    };
    let ctx = GameContext::build(&settings)?;

    match command {
        Commands::Play => run_tui(App::new(ctx)?),
        Commands::Simple => run_simple(&ctx),
        Commands::State => show_state(&ctx).map(drop),
        Commands::Guess { word } => submit_guess(&ctx, &word).map(drop),
        Commands::EasyMode => enable_easy_mode(&ctx).map(drop),
        Commands::Solutions => show_solutions(&ctx),
        Commands::Stats {
            practice,
            hard_only,
            easy_only,
            from,
            to,
        } => {
            let filter = StatisticsFilter {
                count_practice_attempts: practice,
                include_easy_mode: !hard_only,
                include_hard_mode: !easy_only,
                from_date: from,
                to_date: to,
                ..StatisticsFilter::default()
            };
            show_statistics(&ctx, &filter).map(drop)
        }
        Commands::Evaluate { .. } => Ok(()),
    }
}

fn init_tracing(verbose: u8, tui: bool) {
    let level = match (tui, verbose) {
        (true, _) | (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
