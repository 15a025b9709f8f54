//! Reminder repository for database operations.

use anyhow::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::reminder;
use crate::store::{CompletionScope, Filter};

/// Repository for reminder-related database operations.
pub struct ReminderRepository;

impl ReminderRepository {
    /// Get reminders selected by `filter`, in store order.
    pub async fn find_matching<C>(conn: &C, filter: &Filter) -> Result<Vec<reminder::Model>>
    where
        C: ConnectionTrait,
    {
        let mut query = reminder::Entity::find()
            .filter(reminder::Column::CalendarId.is_in(filter.collection_ids().iter().cloned()));

        query = match filter.scope() {
            CompletionScope::Any => query,
            CompletionScope::Incomplete => query.filter(reminder::Column::IsCompleted.eq(false)),
            CompletionScope::Completed => query.filter(reminder::Column::IsCompleted.eq(true)),
        };

        let range = filter.range();
        if let Some(start) = range.start {
            query = query.filter(reminder::Column::CompletedAt.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(reminder::Column::CompletedAt.lt(end));
        }

        Ok(query
            .order_by_asc(reminder::Column::OrderIndex)
            .order_by_asc(reminder::Column::Id)
            .all(conn)
            .await?)
    }
}
