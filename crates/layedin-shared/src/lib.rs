pub mod constants;
pub mod models;
pub mod profile;
pub mod types;
