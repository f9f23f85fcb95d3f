pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod network;
pub mod reporting;
pub mod source;
pub mod types;
