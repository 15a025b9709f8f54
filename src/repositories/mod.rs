//! Repository layer for database operations.
//!
//! Repositories keep entities as pure data models while providing reusable
//! database access methods, following the Data Mapper pattern recommended
//! by SeaORM.

pub mod calendar;
pub mod reminder;

pub use calendar::CalendarRepository;
pub use reminder::ReminderRepository;
