//! Core algorithm layer: scanner and recursive-descent parser

pub mod lexer;
pub mod parser;

pub use lexer::tokenize;
pub use parser::{parse, parse_source, parse_with};
