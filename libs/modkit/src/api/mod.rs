//! HTTP-facing helpers shared by module REST layers.

pub mod problem;

pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
