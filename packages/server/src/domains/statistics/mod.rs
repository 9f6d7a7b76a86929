//! Statistics domain - rating reports over messages and members.

pub mod models;

pub use models::report::{MemberRatingRow, MessageRatingRow, ReportScope};
