pub mod config;
pub mod progress;
pub mod questions;
pub mod run;
pub mod stats;
