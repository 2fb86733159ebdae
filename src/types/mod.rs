pub mod config;
pub mod estimate;
