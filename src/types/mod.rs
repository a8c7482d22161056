pub mod columns;
pub mod dataset_kind;
pub mod season;
pub mod selection;
pub mod temperature_data;
pub mod traits;
