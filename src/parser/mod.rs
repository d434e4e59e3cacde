//! Parser module for the Stockpile command language

pub mod ast;
pub mod grammar;

pub use ast::*;
pub use grammar::{parse_command, parse_script};
