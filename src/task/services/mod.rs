//! Application services for task management.

mod requests;
mod task_service;

pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use task_service::{TaskService, TaskServiceError, TaskServiceResult, TaskUpdate};
