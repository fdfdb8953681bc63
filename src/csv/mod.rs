//! Parsing for the passenger table (train.csv).

pub mod parse;
pub mod row;

pub use parse::{parse_csv_file, parse_records};
pub use row::Record;
