use crate::error::AppError;
use crate::models::{CreateTask, PageQuery, Task, TaskListQuery, UpdateTask};
use crate::store::TaskStore;

/// Orchestrates task CRUD with ownership enforcement.
///
/// Reads by id and the global listing are unrestricted; user-scoped listing
/// and all mutations require the authenticated subject, and mutations
/// additionally require it to match the task's stored owner.
#[derive(Clone)]
pub struct TaskService {
    tasks: TaskStore,
}

/// The one piece of authorization logic in the system: the authenticated
/// subject id must equal the task's stored owner id.
fn ensure_owner(task: &Task, requester_id: i32) -> Result<(), AppError> {
    if task.user_id != requester_id {
        return Err(AppError::Unauthorized(
            "User not authorized to modify this task".into(),
        ));
    }
    Ok(())
}

impl TaskService {
    pub fn new(tasks: TaskStore) -> Self {
        Self { tasks }
    }

    pub async fn get_task(&self, task_id: i32) -> Result<Task, AppError> {
        self.tasks
            .get(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn list_tasks(&self, query: &TaskListQuery) -> Result<Vec<Task>, AppError> {
        self.tasks
            .list(query.offset(), query.limit(), query.status)
            .await
    }

    pub async fn list_user_tasks(
        &self,
        user_id: i32,
        page: &PageQuery,
    ) -> Result<Vec<Task>, AppError> {
        self.tasks
            .list_for_user(user_id, page.offset(), page.limit())
            .await
    }

    pub async fn create_task(&self, input: CreateTask, owner_id: i32) -> Result<Task, AppError> {
        self.tasks.insert(input, owner_id).await
    }

    /// Loads the task, checks existence before ownership, applies only the
    /// fields present in the partial update, and persists.
    pub async fn update_task(
        &self,
        update: UpdateTask,
        requester_id: i32,
    ) -> Result<Task, AppError> {
        let mut task = self
            .tasks
            .get(update.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        ensure_owner(&task, requester_id)?;

        task.apply(&update);
        self.tasks.update(&task).await
    }

    pub async fn delete_task(&self, task_id: i32, requester_id: i32) -> Result<(), AppError> {
        let task = self
            .tasks
            .get(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        ensure_owner(&task, requester_id)?;

        self.tasks.delete(task.id).await?;
        Ok(())
    }
}
