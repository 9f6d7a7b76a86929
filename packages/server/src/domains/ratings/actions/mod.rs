//! Rating actions.

pub mod rate;

pub use rate::{rate, unrate};
