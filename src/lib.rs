pub mod analyzer;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use analyzer::analyze;
