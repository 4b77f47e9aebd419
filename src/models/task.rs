use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    New,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Completed,
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Identifier of the owning user; immutable after creation.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Applies only the fields present in a partial update; absent fields
    /// are left untouched. The owner is never changed.
    pub fn apply(&mut self, update: &UpdateTask) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Input for creating a task. Status defaults to `new` when unspecified.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial update for an existing task, addressed by id.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    pub id: i32,

    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

fn default_page() -> i64 {
    1
}

fn default_elements_per_page() -> i64 {
    10
}

/// Query parameters for the global task listing.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_elements_per_page")]
    pub elements_per_page: i64,
    pub status: Option<TaskStatus>,
}

impl TaskListQuery {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.elements_per_page)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.elements_per_page)
    }
}

/// Pagination parameters for user-scoped listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_elements_per_page")]
    pub elements_per_page: i64,
}

impl PageQuery {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.elements_per_page)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.elements_per_page)
    }
}

/// Pages are 1-based; anything below 1 is clamped to the first page.
/// The page size is clamped alongside so neither LIMIT nor OFFSET can go
/// negative on the wire.
fn page_offset(page: i64, elements_per_page: i64) -> i64 {
    (page.max(1) - 1) * page_limit(elements_per_page)
}

fn page_limit(elements_per_page: i64) -> i64 {
    elements_per_page.max(0)
}
