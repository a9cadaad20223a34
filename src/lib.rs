pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod package_data;
pub mod packages;
pub mod packaging;
pub mod revision;
pub mod stamper;
pub mod ui;

pub use error::{Result, SetupError};
