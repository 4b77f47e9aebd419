use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{CreateTask, PageQuery, TaskListQuery, UpdateTask};
use crate::services::TaskService;

/// Lists tasks with pagination and an optional status filter.
///
/// Unrestricted read access: the listing is global, not scoped to the
/// caller. Flagged for product review but preserved as specified.
///
/// ## Query Parameters:
/// - `page` (optional, default 1): 1-based page number.
/// - `elements_per_page` (optional, default 10): page size.
/// - `status` (optional): "new", "in_progress", or "completed".
#[get("/list")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = service.list_tasks(&query).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Lists tasks owned by the given user, with the same pagination scheme.
/// Requires authentication.
#[get("/user/{user_id}")]
pub async fn list_user_tasks(
    service: web::Data<TaskService>,
    user_id: web::Path<i32>,
    query: web::Query<PageQuery>,
    _requester: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = service
        .list_user_tasks(user_id.into_inner(), &query)
        .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1-200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `status` (optional): defaults to "new".
#[post("/create")]
pub async fn create_task(
    service: web::Data<TaskService>,
    task_data: web::Json<CreateTask>,
    requester: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = service
        .create_task(task_data.into_inner(), requester.0)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Applies a partial update to a task addressed by the `id` field in the
/// body. Fails 404 for a missing task and 401 when the authenticated user
/// is not the owner; the existence check runs first.
#[put("/update")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_data: web::Json<UpdateTask>,
    requester: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = service
        .update_task(task_data.into_inner(), requester.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves a task by id. Readable by any caller; no ownership check.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = service.get_task(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Same existence-then-ownership gate as update.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    requester: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    service
        .delete_task(task_id.into_inner(), requester.0)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted"
    })))
}
