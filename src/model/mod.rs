pub mod case;
pub mod manifest;
pub mod summary;
