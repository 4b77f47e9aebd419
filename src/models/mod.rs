pub mod task;
pub mod user;

pub use task::{CreateTask, PageQuery, Task, TaskListQuery, TaskStatus, UpdateTask};
pub use user::{NewUser, User};
