pub mod glob;
pub mod json;
