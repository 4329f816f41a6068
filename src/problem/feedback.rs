//! Player-facing feedback text

use rand::Rng;
use rand::seq::IndexedRandom;

use super::generator::{Answer, Problem};
use super::operation::ProblemKind;

/// Shown after a correct answer
pub const CORRECT_MESSAGES: &[&str] = &[
    "Great job!",
    "Awesome!",
    "You got it!",
    "Fantastic!",
    "Super star!",
    "Way to go!",
    "Brilliant!",
    "Keep it up!",
];

/// Prefix for the explanation after a wrong answer
pub const TRY_AGAIN_MESSAGES: &[&str] = &[
    "Not quite!",
    "Oops!",
    "So close!",
    "Nice try!",
];

/// Pick a motivational message
pub fn correct_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CORRECT_MESSAGES.choose(rng).copied().unwrap_or("Correct!")
}

/// Pick an encouraging prefix for a wrong answer
pub fn try_again_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TRY_AGAIN_MESSAGES.choose(rng).copied().unwrap_or("Not quite!")
}

/// Explain the correct answer, embedding the operands
pub fn explain(problem: &Problem) -> String {
    match (problem.kind, problem.operand1, problem.operand2, problem.answer) {
        (ProblemKind::Add, Some(a), Some(b), Answer::Single(ans)) => {
            format!("If you have {} and add {} more, you get {}.", a, b, ans)
        }
        (ProblemKind::Subtract, Some(a), Some(b), Answer::Single(ans)) => {
            format!("If you start with {} and take away {}, you have {} left.", a, b, ans)
        }
        (ProblemKind::Multiply, Some(a), Some(b), Answer::Single(ans)) => {
            format!("{} groups of {} make {} in total.", a, b, ans)
        }
        (ProblemKind::Divide, Some(a), Some(b), Answer::Single(ans)) => {
            format!("{} shared equally into {} groups gives {} in each group.", a, b, ans)
        }
        _ => format!("The correct answer was {}.", answer_text(problem)),
    }
}

/// Message when the challenge countdown runs out
pub fn time_up(problem: &Problem) -> String {
    format!("Time's up! The answer was {}.", answer_text(problem))
}

/// The correct answer as display text
pub fn answer_text(problem: &Problem) -> String {
    match problem.answer {
        Answer::Single(v) => v.to_string(),
        Answer::Factors(a, b) => format!("{} × {}", a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(kind: ProblemKind, a: i64, b: i64, ans: i64) -> Problem {
        Problem {
            question: String::new(),
            kind,
            answer: Answer::Single(ans),
            operand1: Some(a),
            operand2: Some(b),
        }
    }

    #[test]
    fn test_explanations_embed_operands() {
        let add = explain(&problem(ProblemKind::Add, 3, 4, 7));
        assert!(add.contains('3') && add.contains('4') && add.contains('7'));

        let sub = explain(&problem(ProblemKind::Subtract, 9, 4, 5));
        assert!(sub.contains("take away 4"));

        let mul = explain(&problem(ProblemKind::Multiply, 3, 5, 15));
        assert!(mul.contains("3 groups of 5"));

        let div = explain(&problem(ProblemKind::Divide, 12, 3, 4));
        assert!(div.contains("12") && div.contains("4 in each"));
    }

    #[test]
    fn test_factor_uses_generic_fallback() {
        let p = Problem {
            question: "Find two factors of 12".to_string(),
            kind: ProblemKind::Factor,
            answer: Answer::Factors(3, 4),
            operand1: Some(12),
            operand2: None,
        };
        assert_eq!(explain(&p), "The correct answer was 3 × 4.");
        assert_eq!(time_up(&p), "Time's up! The answer was 3 × 4.");
    }
}
