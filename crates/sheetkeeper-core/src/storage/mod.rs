//! Storage formats: native .grd text and CSV.

mod csv;
mod parser;
mod writer;

pub use csv::{parse_csv, write_csv};
pub use parser::{parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};
