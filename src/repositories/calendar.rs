//! Calendar repository for database operations.

use anyhow::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::calendar;

/// Repository for calendar-related database operations.
pub struct CalendarRepository;

impl CalendarRepository {
    /// Get the calendar flagged as default. If several are flagged, the first
    /// by order index wins.
    pub async fn get_default<C>(conn: &C) -> Result<Option<calendar::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(calendar::Entity::find()
            .filter(calendar::Column::IsDefault.eq(true))
            .order_by_asc(calendar::Column::OrderIndex)
            .one(conn)
            .await?)
    }

    /// Get a calendar by its title.
    pub async fn get_by_title<C>(conn: &C, title: &str) -> Result<Option<calendar::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(calendar::Entity::find()
            .filter(calendar::Column::Title.eq(title))
            .order_by_asc(calendar::Column::OrderIndex)
            .one(conn)
            .await?)
    }
}
