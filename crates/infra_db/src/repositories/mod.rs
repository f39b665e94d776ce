//! Repository implementations

pub mod audit;
pub mod claims;
