pub mod api;
pub mod cli;
pub mod config;
pub mod format;
pub mod models;
pub mod report;
pub mod telemetry;

#[cfg(test)]
mod test;
