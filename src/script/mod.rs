//! Script execution module for Stockpile
//!
//! Handles loading and executing .stock script files.

pub mod runner;

pub use runner::{explain_script, ScriptResult, ScriptRunner, SCRIPT_EXTENSION};
