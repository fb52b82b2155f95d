//! Score a guess against an arbitrary solution

use anyhow::{Context, Result};

use crate::core::{Feedback, Word};

/// Result of scoring one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub guess: String,
    pub solution: String,
    pub feedback: Feedback,
}

/// Score `guess` against `solution`
///
/// # Errors
///
/// Returns an error if either word is malformed or the lengths differ.
pub fn evaluate(solution: &str, guess: &str) -> Result<EvaluationResult> {
    let solution = Word::new(solution).context("invalid solution")?;
    let guess = Word::with_length(guess, solution.len()).context("invalid guess")?;
    let feedback = Feedback::calculate(&guess, &solution)?;

    Ok(EvaluationResult {
        guess: guess.text().to_string(),
        solution: solution.text().to_string(),
        feedback,
    })
}
