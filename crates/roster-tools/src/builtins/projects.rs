//! Project tracking tools (projects agent)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const TASKS: &str = "tasks";

/// States a task may be in.
pub const TASK_STATUSES: &[&str] = &["pending", "in_progress", "done", "cancelled"];

/// Create a task on a project.
pub struct CreateTask {
    store: Arc<dyn DataStore>,
}

impl CreateTask {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CreateTask {
    fn name(&self) -> &str {
        "create_task"
    }

    fn description(&self) -> &str {
        "Create a task, optionally attached to a project."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("title", JsonSchema::string().description("Task title"))
            .property(
                "project_id",
                JsonSchema::string().description("Project the task belongs to, optional"),
            )
            .property(
                "due_date",
                JsonSchema::string().description("Due date, optional"),
            )
            .required(&["title"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let title = required_str(&input, "title")?;

        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .put_record(
                &ctx.tenant_id,
                TASKS,
                &id,
                json!({
                    "id": id,
                    "title": title,
                    "project_id": optional_str(&input, "project_id"),
                    "due_date": optional_str(&input, "due_date"),
                    "status": "pending",
                    "created_by": ctx.agent_name,
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        Ok(ToolOutput::json(&json!({
            "task_id": id,
            "status": "pending",
        })))
    }
}

/// Move a task to another status.
pub struct UpdateTaskStatus {
    store: Arc<dyn DataStore>,
}

impl UpdateTaskStatus {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for UpdateTaskStatus {
    fn name(&self) -> &str {
        "update_task_status"
    }

    fn description(&self) -> &str {
        "Move a task to a new status."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("task_id", JsonSchema::string().description("Task id"))
            .property(
                "status",
                JsonSchema::string().description("pending, in_progress, done, cancelled"),
            )
            .required(&["task_id", "status"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let task_id = required_str(&input, "task_id")?;
        let status = required_str(&input, "status")?;

        if !TASK_STATUSES.contains(&status) {
            return Err(ToolError::invalid_input(format!(
                "unknown status: {status} (expected one of {})",
                TASK_STATUSES.join(", ")
            )));
        }

        let mut task = self
            .store
            .record(&ctx.tenant_id, TASKS, task_id)
            .await?
            .ok_or_else(|| ToolError::failed(format!("task not found: {task_id}")))?;

        let previous = task
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("pending")
            .to_string();
        if let Some(obj) = task.as_object_mut() {
            obj.insert("status".to_string(), json!(status));
        }
        self.store
            .put_record(&ctx.tenant_id, TASKS, task_id, task)
            .await?;

        Ok(ToolOutput::json(&json!({
            "task_id": task_id,
            "previous_status": previous,
            "status": status,
        })))
    }
}

/// List tasks, optionally scoped to one project or status.
pub struct ListProjectTasks {
    store: Arc<dyn DataStore>,
}

impl ListProjectTasks {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListProjectTasks {
    fn name(&self) -> &str {
        "list_project_tasks"
    }

    fn description(&self) -> &str {
        "List tasks, optionally filtered by project or status."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "project_id",
                JsonSchema::string().description("Filter by project, optional"),
            )
            .property(
                "status",
                JsonSchema::string().description("Filter by status, optional"),
            )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project_id = optional_str(&input, "project_id");
        let status = optional_str(&input, "status");

        let tasks: Vec<Value> = self
            .store
            .records(&ctx.tenant_id, TASKS)
            .await?
            .into_iter()
            .filter(|t| match project_id {
                Some(p) => t.get("project_id").and_then(Value::as_str) == Some(p),
                None => true,
            })
            .filter(|t| match status {
                Some(s) => t.get("status").and_then(Value::as_str) == Some(s),
                None => true,
            })
            .collect();

        Ok(ToolOutput::json(&json!({
            "count": tasks.len(),
            "tasks": tasks,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    fn ctx() -> ToolContext {
        ToolContext::new("projects", "t1")
    }

    #[tokio::test]
    async fn created_task_starts_pending() {
        let store = Arc::new(InMemoryStore::new());
        let tool = CreateTask::new(store.clone());

        let out = tool
            .execute(
                json!({"title": "Shoot new photos", "project_id": "p1"}),
                &ctx(),
            )
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();
        assert_eq!(payload["status"], "pending");

        let tasks = store.records("t1", TASKS).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["created_by"], "projects");
    }

    #[tokio::test]
    async fn status_update_validates_and_reports_previous() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record(
                "t1",
                TASKS,
                "task-1",
                json!({"id": "task-1", "title": "Call vendor", "status": "pending"}),
            )
            .await
            .unwrap();
        let tool = UpdateTaskStatus::new(store.clone());

        let err = tool
            .execute(json!({"task_id": "task-1", "status": "paused"}), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));

        let out = tool
            .execute(json!({"task_id": "task-1", "status": "in_progress"}), &ctx())
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();
        assert_eq!(payload["previous_status"], "pending");

        let stored = store.record("t1", TASKS, "task-1").await.unwrap().unwrap();
        assert_eq!(stored["status"], "in_progress");
    }

    #[tokio::test]
    async fn list_filters_by_project_and_status() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record(
                "t1",
                TASKS,
                "a",
                json!({"id": "a", "project_id": "p1", "status": "pending"}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                TASKS,
                "b",
                json!({"id": "b", "project_id": "p1", "status": "done"}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                TASKS,
                "c",
                json!({"id": "c", "project_id": "p2", "status": "pending"}),
            )
            .await
            .unwrap();

        let tool = ListProjectTasks::new(store);
        let out = tool
            .execute(json!({"project_id": "p1", "status": "pending"}), &ctx())
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();

        assert_eq!(payload["count"], 1);
        assert_eq!(payload["tasks"][0]["id"], "a");
    }
}
