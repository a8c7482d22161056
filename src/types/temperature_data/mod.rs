pub mod station;
pub mod weighted;
