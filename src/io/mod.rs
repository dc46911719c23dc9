//! File input and output: expression matrix CSV reading, result writing

mod csv;
mod results;

pub use csv::read_expression_matrix;
pub use results::{write_summary, write_summary_json};
