//! Level-scaled problem generation and answer checking
//!
//! Stateless: every draw goes through the caller's RNG, so a seeded
//! `Pcg32` reproduces the same sequence of problems.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::operation::ProblemKind;

/// Largest power of ten used for addition/subtraction operands.
/// Keeps `operand1 + operand2` inside `i64` at absurd levels.
const MAX_MAGNITUDE_EXPONENT: u32 = 18;

/// Smallest factor offered in factor problems (1 × n is too easy)
const MIN_FACTOR: i64 = 2;

/// The correct answer to a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Single(i64),
    /// The generated factor pair; any pair with the same product is accepted
    Factors(i64, i64),
}

impl Answer {
    /// Product of a factor pair, or the value itself
    pub fn value(&self) -> i64 {
        match *self {
            Answer::Single(v) => v,
            Answer::Factors(a, b) => a * b,
        }
    }
}

/// A generated problem (immutable once created)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub question: String,
    pub kind: ProblemKind,
    pub answer: Answer,
    /// Left operand, or the target product for factor problems
    pub operand1: Option<i64>,
    pub operand2: Option<i64>,
}

impl Problem {
    /// Product the player must factor (factor problems only)
    pub fn target(&self) -> Option<i64> {
        match self.answer {
            Answer::Factors(..) => Some(self.answer.value()),
            Answer::Single(_) => None,
        }
    }

    pub fn is_factor(&self) -> bool {
        self.kind == ProblemKind::Factor
    }
}

/// Raw answer text as typed by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<'a> {
    Single(&'a str),
    Pair(&'a str, &'a str),
}

impl Submission<'_> {
    /// Empty input is rejected before checking (no life lost)
    pub fn is_empty(&self) -> bool {
        match self {
            Submission::Single(s) => s.trim().is_empty(),
            Submission::Pair(a, b) => a.trim().is_empty() || b.trim().is_empty(),
        }
    }
}

/// Operand bound for addition and subtraction: 10, 100, 1000... every 3 levels
pub fn magnitude_bound(level: u32) -> i64 {
    let exp = ((level.max(1) - 1) / 3 + 1).min(MAX_MAGNITUDE_EXPONENT);
    10i64.pow(exp)
}

/// (operand1 bound, operand2 bound) for multiplication
pub fn multiply_bounds(level: u32) -> (i64, i64) {
    let level = level.max(1) as i64;
    (level / 2 + 5, level / 3 + 4)
}

/// (answer bound, divisor bound) for division
pub fn divide_bounds(level: u32) -> (i64, i64) {
    let level = level.max(1) as i64;
    (level / 3 + 5, level / 2 + 5)
}

/// (factor1 bound, factor2 bound) for factor problems
pub fn factor_bounds(level: u32) -> (i64, i64) {
    let level = level.max(1) as i64;
    (level / 2 + 6, level / 3 + 5)
}

/// Generate a problem of `kind` scaled to `level`.
///
/// Level 0 is treated as level 1.
pub fn generate<R: Rng + ?Sized>(level: u32, kind: ProblemKind, rng: &mut R) -> Problem {
    match kind {
        ProblemKind::Add => {
            let bound = magnitude_bound(level);
            let a = rng.random_range(1..=bound);
            let b = rng.random_range(1..=bound);
            binary(kind, a, b, a + b)
        }
        ProblemKind::Subtract => {
            let bound = magnitude_bound(level);
            let a = rng.random_range(1..=bound);
            // Second operand never exceeds the first, so no negative results
            let b = rng.random_range(1..=a);
            binary(kind, a, b, a - b)
        }
        ProblemKind::Multiply => {
            let (bound1, bound2) = multiply_bounds(level);
            let a = rng.random_range(1..=bound1);
            let b = rng.random_range(1..=bound2);
            binary(kind, a, b, a * b)
        }
        ProblemKind::Divide => {
            let (answer_bound, divisor_bound) = divide_bounds(level);
            let answer = rng.random_range(1..=answer_bound);
            let divisor = rng.random_range(1..=divisor_bound);
            binary(kind, answer * divisor, divisor, answer)
        }
        ProblemKind::Factor => {
            let (bound1, bound2) = factor_bounds(level);
            let f1 = rng.random_range(MIN_FACTOR..=bound1);
            let f2 = rng.random_range(MIN_FACTOR..=bound2);
            let target = f1 * f2;
            Problem {
                question: format!("Find two factors of {}", target),
                kind,
                answer: Answer::Factors(f1, f2),
                operand1: Some(target),
                operand2: None,
            }
        }
    }
}

fn binary(kind: ProblemKind, a: i64, b: i64, answer: i64) -> Problem {
    Problem {
        question: format!("{} {} {} = ?", a, kind.symbol(), b),
        kind,
        answer: Answer::Single(answer),
        operand1: Some(a),
        operand2: Some(b),
    }
}

/// Parse a typed number; anything unparsable is simply a wrong answer
fn parse_number(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Check a submission against a problem.
///
/// Factor problems accept any pair whose product equals the target, in either
/// order. A submission of the wrong shape never matches.
pub fn check_answer(problem: &Problem, submission: &Submission<'_>) -> bool {
    match (problem.answer, submission) {
        (Answer::Factors(..), Submission::Pair(a, b)) => {
            let (Some(a), Some(b)) = (parse_number(a), parse_number(b)) else {
                return false;
            };
            a.checked_mul(b) == Some(problem.answer.value())
        }
        (Answer::Single(expected), Submission::Single(s)) => parse_number(s) == Some(expected),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn factor_problem(f1: i64, f2: i64) -> Problem {
        Problem {
            question: format!("Find two factors of {}", f1 * f2),
            kind: ProblemKind::Factor,
            answer: Answer::Factors(f1, f2),
            operand1: Some(f1 * f2),
            operand2: None,
        }
    }

    #[test]
    fn test_magnitude_bound_steps_every_three_levels() {
        assert_eq!(magnitude_bound(1), 10);
        assert_eq!(magnitude_bound(3), 10);
        assert_eq!(magnitude_bound(4), 100);
        assert_eq!(magnitude_bound(7), 1000);
        assert_eq!(magnitude_bound(0), 10);
        assert_eq!(magnitude_bound(u32::MAX), 10i64.pow(MAX_MAGNITUDE_EXPONENT));
    }

    #[test]
    fn test_bounds_formulas() {
        assert_eq!(multiply_bounds(1), (5, 4));
        assert_eq!(multiply_bounds(6), (8, 6));
        assert_eq!(divide_bounds(1), (5, 5));
        assert_eq!(divide_bounds(6), (7, 8));
        assert_eq!(factor_bounds(1), (6, 5));
        assert_eq!(factor_bounds(6), (9, 7));
    }

    #[test]
    fn test_subtract_never_negative() {
        let mut rng = Pcg32::seed_from_u64(42);
        for level in 1..=12 {
            for _ in 0..50 {
                let p = generate(level, ProblemKind::Subtract, &mut rng);
                assert!(p.answer.value() >= 0, "negative result: {}", p.question);
                assert!(p.operand2 <= p.operand1);
            }
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = Pcg32::seed_from_u64(9);
        for level in 1..=20 {
            let p = generate(level, ProblemKind::Divide, &mut rng);
            let (dividend, divisor) = (p.operand1.unwrap(), p.operand2.unwrap());
            assert_eq!(dividend % divisor, 0);
            assert_eq!(dividend, p.answer.value() * divisor);
        }
    }

    #[test]
    fn test_question_text() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p = generate(1, ProblemKind::Multiply, &mut rng);
        let expected = format!("{} × {} = ?", p.operand1.unwrap(), p.operand2.unwrap());
        assert_eq!(p.question, expected);

        let p = generate(1, ProblemKind::Factor, &mut rng);
        assert_eq!(p.question, format!("Find two factors of {}", p.target().unwrap()));
    }

    #[test]
    fn test_check_single_answer() {
        let p = binary(ProblemKind::Add, 3, 4, 7);
        assert!(check_answer(&p, &Submission::Single("7")));
        assert!(check_answer(&p, &Submission::Single(" 7 ")));
        assert!(!check_answer(&p, &Submission::Single("8")));
        assert!(!check_answer(&p, &Submission::Single("seven")));
        assert!(!check_answer(&p, &Submission::Single("")));
        assert!(!check_answer(&p, &Submission::Pair("7", "1")));
    }

    #[test]
    fn test_check_factors_accepts_any_factorization() {
        let p = factor_problem(3, 4);
        assert!(check_answer(&p, &Submission::Pair("3", "4")));
        assert!(check_answer(&p, &Submission::Pair("4", "3")));
        assert!(check_answer(&p, &Submission::Pair("2", "6")));
        assert!(check_answer(&p, &Submission::Pair("6", "2")));
        assert!(!check_answer(&p, &Submission::Pair("5", "2")));
        assert!(!check_answer(&p, &Submission::Pair("3", "")));
        assert!(!check_answer(&p, &Submission::Pair("3", "four")));
        assert!(!check_answer(&p, &Submission::Single("12")));
    }

    #[test]
    fn test_check_factors_overflow_is_mismatch() {
        let p = factor_problem(3, 4);
        let big = i64::MAX.to_string();
        assert!(!check_answer(&p, &Submission::Pair(&big, &big)));
    }

    #[test]
    fn test_submission_is_empty() {
        assert!(Submission::Single("").is_empty());
        assert!(Submission::Single("   ").is_empty());
        assert!(!Submission::Single("0").is_empty());
        assert!(Submission::Pair("2", "").is_empty());
        assert!(Submission::Pair("", "2").is_empty());
        assert!(!Submission::Pair("2", "6").is_empty());
    }
}
