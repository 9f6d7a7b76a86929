//! Ratings domain - per-member message ratings and their aggregates.

pub mod actions;
pub mod models;

pub use actions::rate::{rate, unrate};
pub use models::rating::{Rating, RatingAggregate};
