pub mod rollup;
pub mod scan;
