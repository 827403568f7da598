//! Type definitions for aistrolog

mod error;
mod horoscope;
mod rankings;
mod sign;

pub use error::*;
pub use horoscope::*;
pub use rankings::*;
pub use sign::*;

/// Outcome of asking one source in a lookup chain
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Source produced data; the chain stops here
    Found(T),
    /// Source was reachable and has nothing; the chain stops with no data
    Absent,
    /// Source could not answer; the next source is asked
    Unavailable,
}
