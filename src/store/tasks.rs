use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{CreateTask, Task, TaskStatus};

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at, updated_at";

/// Persistence for task records, scoped by owner and status with
/// limit/offset pagination. Listings order by id ascending so pages are
/// deterministic.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, task_id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = match status {
            Some(status) => {
                sqlx::query_as::<_, Task>(&format!(
                    "SELECT {} FROM tasks WHERE status = $1 ORDER BY id LIMIT $2 OFFSET $3",
                    TASK_COLUMNS
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Task>(&format!(
                    "SELECT {} FROM tasks ORDER BY id LIMIT $1 OFFSET $2",
                    TASK_COLUMNS
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(tasks)
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn insert(&self, input: CreateTask, user_id: i32) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, user_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(input.title)
        .bind(input.description)
        .bind(input.status)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Persists mutable fields of a loaded task and bumps `updated_at`.
    /// The owner column is immutable after creation.
    pub async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $1, description = $2, status = $3, updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, task_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
