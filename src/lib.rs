pub mod cleanup;
pub mod cli;
pub mod combine;
pub mod error;
pub mod ingest;
pub mod markers;
pub mod model;
pub mod paths;
pub mod report;
pub mod suite;
