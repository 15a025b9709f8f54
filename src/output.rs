//! Plain-text rendering of reminders.

use std::io::{self, Write};

use crate::constants::UNKNOWN_TITLE;
use crate::store::Reminder;

/// The title to print for `reminder`.
pub fn display_title(reminder: &Reminder) -> &str {
    reminder.title.as_deref().unwrap_or(UNKNOWN_TITLE)
}

/// Write one title per line.
pub fn print_reminders<W: Write>(out: &mut W, reminders: &[Reminder]) -> io::Result<()> {
    for reminder in reminders {
        writeln!(out, "{}", display_title(reminder))?;
    }
    out.flush()
}
