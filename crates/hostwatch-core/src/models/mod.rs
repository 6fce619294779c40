//! Data models for Hostwatch responses.

mod responses;

pub use responses::*;
