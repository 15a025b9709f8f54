//! SeaORM entity models for the reminder database.

pub mod calendar;
pub mod reminder;
