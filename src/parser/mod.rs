pub mod config;
pub mod quoted;
pub mod tags;
