pub mod error;
pub mod forecast;
pub mod user;

// Tabular ingestion types
pub mod csv;
