//! Problem generation
//!
//! Pure and stateless: callers pass the level, a concrete kind and an RNG.
//! `Operation::Random` must be resolved by the caller before generating.

pub mod feedback;
pub mod generator;
pub mod operation;

pub use feedback::{correct_message, explain, time_up, try_again_message};
pub use generator::{
    Answer, Problem, Submission, check_answer, divide_bounds, factor_bounds, generate,
    magnitude_bound, multiply_bounds,
};
pub use operation::{Operation, ProblemKind};
