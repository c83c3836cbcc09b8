#![doc = include_str!("../README.md")]

pub mod config;
pub mod ensembl;
pub mod fasta;
pub mod models;
pub mod protein;
pub mod splice;
pub mod tests;
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
