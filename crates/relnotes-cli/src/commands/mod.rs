pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod remove;
pub mod show;
