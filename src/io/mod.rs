//! Result serialization helpers.

pub mod export;
