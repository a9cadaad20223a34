//! User interface module - terminal output for the build.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_build_summary, display_error, display_status, display_success, display_version_info,
    format_build_summary, format_version_info,
};
