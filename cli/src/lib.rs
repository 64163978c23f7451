//! Command line tool for EzState expression bytecode.
//!
//! The binary is a thin wrapper; the behavior lives in [`cli`] so that it
//! can be tested without spawning a process.

pub mod cli;
pub mod logger;
pub mod metadata;
