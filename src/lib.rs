// Library exports for integration tests and the binary

pub mod api;
pub mod app_data;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod stores;
pub mod types;

#[cfg(test)]
pub mod test;
