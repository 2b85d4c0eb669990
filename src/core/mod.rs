pub mod actions;
pub mod colour_mapping;
pub mod data;
pub mod executors;
pub mod util;
