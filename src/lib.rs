//! Two small utilities: a timed command-line quiz and a path-to-URL redirector.

pub mod error;
pub mod quiz;
pub mod urlshort;

pub use error::{LoadError, ParseError};
