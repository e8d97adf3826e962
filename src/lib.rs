//! Tapelink: two-track Turing machines compiled into symlink dispatch trees
//!
//! A machine's transition table is completed, its distinct actions are
//! hash-consed into mono-states, and the resulting graph is written as a
//! directory tree whose symlinks are keyed by terminal checksum replies.

pub mod cli;
pub mod compile;
pub mod config;
pub mod error;
pub mod logging;
pub mod machine;
pub mod programs;
pub mod terminal;
pub mod types;
