//! Input/output, configuration and error handling
//!
//! This module contains:
//! - The command-line front end and its progress display
//! - Stimulus constants and error types shared by the whole crate
//! - PNG persistence and participant session records

/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG reading and writing
pub mod image;
/// Progress display for batch work
pub mod progress;
/// Participant sessions and result files
pub mod session;
