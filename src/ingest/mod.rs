pub mod normalize;
pub mod raw;
