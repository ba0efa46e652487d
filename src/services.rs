pub mod calculator;
pub mod config;
pub mod errors;
pub mod parsers;
pub mod shared;
pub mod state;
