// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited-text decoding

mod csv_parser;

pub use csv_parser::CsvParser;
