//! Programmatic entry points behind the command line.

pub mod orchestration;

pub use orchestration::{run_build, run_build_with, BuildArgs, BuildReport};
