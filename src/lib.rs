pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractors;
pub mod inspiration;
pub mod logging;
pub mod models;
pub mod providers;
pub mod routes;

#[cfg(test)]
mod test_utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
