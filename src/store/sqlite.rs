//! SQLite reminder store.
//!
//! Reads calendars and reminders from a local SQLite database through
//! SeaORM. Fetches run on a spawned tokio task and report back through the
//! completion handler from that task.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tokio::sync::OnceCell;

use super::{AccessStatus, Collection, FetchCompletion, Filter, Reminder, ReminderStore, StoreError};
use crate::entities::{calendar, reminder};
use crate::repositories::{CalendarRepository, ReminderRepository};

/// Reminder store backed by a SQLite database.
pub struct SqliteStore {
    database_url: String,
    default_calendar: Option<String>,
    conn: OnceCell<DatabaseConnection>,
}

impl SqliteStore {
    /// Create a store for the database at `path`. Nothing is opened until
    /// [`ReminderStore::request_access`] is called.
    pub fn new<P: AsRef<Path>>(path: P, default_calendar: Option<String>) -> Self {
        Self {
            database_url: format!("sqlite://{}?mode=ro", path.as_ref().display()),
            default_calendar,
            conn: OnceCell::new(),
        }
    }

    /// Wrap an already open connection. Access is granted immediately.
    pub fn with_connection(conn: DatabaseConnection, default_calendar: Option<String>) -> Self {
        Self {
            database_url: String::new(),
            default_calendar,
            conn: OnceCell::new_with(Some(conn)),
        }
    }

    /// Create an empty in-memory database with the reminder schema.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        // Every pooled connection would otherwise see its own empty database.
        opts.min_connections(1).max_connections(1).sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        init_schema(&conn).await?;

        Ok(Self::with_connection(conn, None))
    }

    /// The open connection, once access has been granted.
    pub fn connection(&self) -> Option<&DatabaseConnection> {
        self.conn.get()
    }

    async fn connect(&self) -> Result<DatabaseConnection, StoreError> {
        let mut opts = ConnectOptions::new(self.database_url.clone());
        opts.max_connections(4)
            .connect_timeout(Duration::from_secs(5))
            .sqlx_logging(false);

        Database::connect(opts)
            .await
            .map_err(|e| StoreError::AccessDenied(e.to_string()))
    }
}

/// Create the calendar and reminder tables if they do not exist yet.
pub async fn init_schema<C>(conn: &C) -> Result<(), StoreError>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut calendars = schema.create_table_from_entity(calendar::Entity);
    calendars.if_not_exists();
    let mut reminders = schema.create_table_from_entity(reminder::Entity);
    reminders.if_not_exists();

    for stmt in [calendars, reminders] {
        conn.execute(backend.build(&stmt))
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
    }
    Ok(())
}

#[async_trait]
impl ReminderStore for SqliteStore {
    fn store_type(&self) -> &str {
        "sqlite"
    }

    async fn request_access(&self) -> Result<AccessStatus, StoreError> {
        match self.conn.get_or_try_init(|| self.connect()).await {
            Ok(_) => {
                info!("Reminder database opened");
                Ok(AccessStatus::Granted)
            }
            Err(e) => {
                warn!("Could not open reminder database: {}", e);
                Ok(AccessStatus::Denied)
            }
        }
    }

    async fn default_collection(&self) -> Option<Collection> {
        let conn = self.conn.get()?;

        if let Some(title) = &self.default_calendar {
            match CalendarRepository::get_by_title(conn, title).await {
                Ok(Some(model)) => return Some(model.into()),
                Ok(None) => warn!("Configured default calendar '{}' not found, using store default", title),
                Err(e) => {
                    error!("Failed to look up calendar '{}': {}", title, e);
                    return None;
                }
            }
        }

        match CalendarRepository::get_default(conn).await {
            Ok(model) => model.map(Collection::from),
            Err(e) => {
                error!("Failed to look up default calendar: {}", e);
                None
            }
        }
    }

    fn fetch(&self, filter: &Filter, completion: FetchCompletion) {
        let Some(conn) = self.conn.get().cloned() else {
            warn!("Fetch issued before access was granted");
            completion(None);
            return;
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Fetch issued outside a tokio runtime: {}", e);
                completion(None);
                return;
            }
        };

        let filter = filter.clone();
        handle.spawn(async move {
            match ReminderRepository::find_matching(&conn, &filter).await {
                Ok(rows) => {
                    debug!("Fetched {} reminders", rows.len());
                    completion(Some(rows.into_iter().map(Reminder::from).collect()));
                }
                Err(e) => {
                    error!("Reminder query failed: {}", e);
                    completion(None);
                }
            }
        });
    }
}
