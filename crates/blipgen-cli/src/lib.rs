//! blipgen CLI library.
//!
//! Command implementations live here so they can be tested without going
//! through argument parsing.

pub mod commands;
