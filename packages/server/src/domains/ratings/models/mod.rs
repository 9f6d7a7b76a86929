pub mod rating;

pub use rating::*;
