//! Command implementations

pub mod completions;
pub mod config;
pub mod player;
pub mod scores;
pub mod search;
pub mod standings;
pub mod stats;
pub mod team;
pub mod teams;
