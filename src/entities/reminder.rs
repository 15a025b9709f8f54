use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::store::{CompletionState, Reminder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub calendar_id: String,
    pub title: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTimeUtc>,
    pub order_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::calendar::Entity",
        from = "Column::CalendarId",
        to = "super::calendar::Column::Id",
        on_delete = "Cascade"
    )]
    Calendar,
}

impl Related<super::calendar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calendar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reminder {
    fn from(model: Model) -> Self {
        // A completed row without a date sorts before any date-scoped filter.
        let completion = match (model.is_completed, model.completed_at) {
            (false, _) => CompletionState::Incomplete,
            (true, Some(at)) => CompletionState::CompletedOn(at),
            (true, None) => CompletionState::CompletedOn(DateTimeUtc::MIN_UTC),
        };

        Self {
            id: model.id,
            title: model.title,
            completion,
        }
    }
}
