pub mod parser_algorithms;
pub mod parser_entry_points;
pub mod token_streams;
pub mod types;

pub struct Parser;
