pub mod ai;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod review;
pub mod safety;
pub mod ui;
