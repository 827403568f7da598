//! Daily horoscope lookup with date fallback and windowed sign rankings.

pub mod cli;
pub mod services;
pub mod types;
