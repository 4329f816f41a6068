//! Operation choices offered on the menu

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Operation picked by the player
///
/// Also used as the high-score key, so `Random` gets its own leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Factor,
    Random,
}

impl Operation {
    /// Every menu entry, in display order
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Factor,
        Operation::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Factor => "factor",
            Operation::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "+" => Some(Operation::Add),
            "subtract" | "subtraction" | "-" => Some(Operation::Subtract),
            "multiply" | "multiplication" | "x" | "*" => Some(Operation::Multiply),
            "divide" | "division" | "/" => Some(Operation::Divide),
            "factor" | "factors" | "factorization" => Some(Operation::Factor),
            "random" | "mix" => Some(Operation::Random),
            _ => None,
        }
    }

    /// Human-readable label for menus and leaderboards
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Add => "Addition",
            Operation::Subtract => "Subtraction",
            Operation::Multiply => "Multiplication",
            Operation::Divide => "Division",
            Operation::Factor => "Factors",
            Operation::Random => "Random Mix",
        }
    }

    /// Pick the concrete kind for the next problem.
    ///
    /// `Random` draws uniformly from the four basic operations on every call.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> ProblemKind {
        match ProblemKind::try_from(self) {
            Ok(kind) => kind,
            Err(_) => *ProblemKind::BASIC
                .choose(rng)
                .unwrap_or(&ProblemKind::Add),
        }
    }
}

/// A concrete problem type the generator can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Factor,
}

impl ProblemKind {
    /// Kinds eligible for `Operation::Random`
    pub const BASIC: [ProblemKind; 4] = [
        ProblemKind::Add,
        ProblemKind::Subtract,
        ProblemKind::Multiply,
        ProblemKind::Divide,
    ];

    /// Operator symbol used in question text
    pub fn symbol(&self) -> &'static str {
        match self {
            ProblemKind::Add => "+",
            ProblemKind::Subtract => "-",
            ProblemKind::Multiply => "×",
            ProblemKind::Divide => "÷",
            ProblemKind::Factor => "=",
        }
    }
}

impl TryFrom<Operation> for ProblemKind {
    type Error = GameError;

    fn try_from(op: Operation) -> Result<Self, Self::Error> {
        match op {
            Operation::Add => Ok(ProblemKind::Add),
            Operation::Subtract => Ok(ProblemKind::Subtract),
            Operation::Multiply => Ok(ProblemKind::Multiply),
            Operation::Divide => Ok(ProblemKind::Divide),
            Operation::Factor => Ok(ProblemKind::Factor),
            Operation::Random => Err(GameError::UnresolvedRandom),
        }
    }
}

impl From<ProblemKind> for Operation {
    fn from(kind: ProblemKind) -> Self {
        match kind {
            ProblemKind::Add => Operation::Add,
            ProblemKind::Subtract => Operation::Subtract,
            ProblemKind::Multiply => Operation::Multiply,
            ProblemKind::Divide => Operation::Divide,
            ProblemKind::Factor => Operation::Factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_is_not_a_problem_kind() {
        assert!(matches!(
            ProblemKind::try_from(Operation::Random),
            Err(GameError::UnresolvedRandom)
        ));
        assert!(matches!(
            ProblemKind::try_from(Operation::Factor),
            Ok(ProblemKind::Factor)
        ));
    }

    #[test]
    fn test_resolve_random_picks_basic_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let kind = Operation::Random.resolve(&mut rng);
            assert!(ProblemKind::BASIC.contains(&kind));
            seen.insert(kind);
        }
        // All four basic kinds should show up over 200 draws
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_resolve_fixed_operation() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(Operation::Divide.resolve(&mut rng), ProblemKind::Divide);
        assert_eq!(Operation::Factor.resolve(&mut rng), ProblemKind::Factor);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Operation::from_str("Add"), Some(Operation::Add));
        assert_eq!(Operation::from_str(" random "), Some(Operation::Random));
        assert_eq!(Operation::from_str("modulo"), None);
    }
}
