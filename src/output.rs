//! Terminal output for bump runs

pub mod reporter;

pub use reporter::{CapturedOutput, Reporter};
