//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_evaluation, print_outcome, print_solutions, print_state, print_statistics,
};
