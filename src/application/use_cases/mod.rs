pub mod bounded;
pub mod csv_tables;
pub mod table_builder;
