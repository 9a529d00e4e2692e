use chrono::SecondsFormat;
use serde_json::Map;
use std::path::PathBuf;
use std::sync::Arc;

use super::types::{Priority, Task, TaskUpdate};
use crate::clock::Clock;
use crate::error::{DashboardError, DashboardResult};
use crate::store::{RecordStore, StoreError};

pub struct TaskTracker {
    store: RecordStore<Task>,
    clock: Arc<dyn Clock>,
}

impl TaskTracker {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(path),
            clock,
        }
    }

    pub fn init(&self) -> Result<(), StoreError> {
        self.store.ensure_initialized(Vec::new).map(|_| ())
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        self.store.load_or_init(Vec::new)
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    pub fn list(&self) -> DashboardResult<Vec<Task>> {
        Ok(self.load()?)
    }

    /// Create a task. Unknown priorities fall back to medium.
    pub fn add(
        &self,
        title: &str,
        priority: Option<&str>,
        due: Option<String>,
    ) -> DashboardResult<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DashboardError::validation("Title is required"));
        }

        let mut tasks = self.load()?;
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            priority: priority.and_then(Priority::parse).unwrap_or_default(),
            due,
            created_at: self.timestamp(),
            updated_at: None,
            extra: Map::new(),
        };
        tasks.push(task.clone());
        self.store.save(&tasks)?;

        log::info!("[TASKS] Added task {}", task.id);
        Ok(task)
    }

    /// Apply the recognized fields of `update`. Invalid priorities and empty
    /// titles are ignored rather than rejected.
    pub fn update(&self, id: &str, update: TaskUpdate) -> DashboardResult<Option<Task>> {
        let mut tasks = self.load()?;
        let now = self.timestamp();

        let updated = match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                if let Some(title) = update.title.as_deref().map(str::trim) {
                    if !title.is_empty() {
                        task.title = title.to_string();
                    }
                }
                if let Some(completed) = update.completed {
                    task.completed = completed;
                }
                if let Some(priority) = update.priority.as_deref().and_then(Priority::parse) {
                    task.priority = priority;
                }
                if let Some(due) = update.due {
                    task.due = due;
                }
                task.updated_at = Some(now);
                task.clone()
            }
            None => return Ok(None),
        };

        self.store.save(&tasks)?;
        log::info!("[TASKS] Updated task {}", id);
        Ok(Some(updated))
    }

    pub fn remove(&self, id: &str) -> DashboardResult<bool> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        self.store.save(&tasks)?;
        log::info!("[TASKS] Removed task {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedClock;
    use tempfile::tempdir;

    fn tracker(dir: &std::path::Path) -> TaskTracker {
        TaskTracker::new(dir.join("tasks.json"), Arc::new(FixedClock::ymd(2025, 3, 10)))
    }

    #[test]
    fn test_add_then_list() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());

        let task = tracker
            .add("Write report", Some("high"), Some("2025-03-14".to_string()))
            .unwrap();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due.as_deref(), Some("2025-03-14"));
        assert!(!task.completed);
        assert_eq!(task.created_at, "2025-03-10T12:00:00.000000+00:00");
        assert!(task.updated_at.is_none());

        assert_eq!(tracker.list().unwrap(), vec![task]);
    }

    #[test]
    fn test_add_coerces_priority() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());

        assert_eq!(tracker.add("a", None, None).unwrap().priority, Priority::Medium);
        assert_eq!(tracker.add("b", Some("asap"), None).unwrap().priority, Priority::Medium);
        assert_eq!(tracker.add("c", Some("low"), None).unwrap().priority, Priority::Low);
    }

    #[test]
    fn test_add_requires_title() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        assert!(matches!(tracker.add(" ", None, None), Err(DashboardError::Validation(_))));
    }

    #[test]
    fn test_update_ignores_invalid_priority() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        let task = tracker.add("Study", Some("high"), None).unwrap();

        let updated = tracker
            .update(
                &task.id,
                TaskUpdate {
                    priority: Some("extreme".to_string()),
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.priority, Priority::High);
        assert!(updated.completed);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_update_fields() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        let task = tracker.add("Study", None, Some("2025-03-20".to_string())).unwrap();

        let updated = tracker
            .update(
                &task.id,
                TaskUpdate {
                    title: Some("Study chapter 4".to_string()),
                    priority: Some("low".to_string()),
                    due: Some(None),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Study chapter 4");
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.due, None);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(tracker.list().unwrap(), vec![updated]);
    }

    #[test]
    fn test_update_keeps_title_when_blank() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        let task = tracker.add("Study", None, None).unwrap();

        let updated = tracker
            .update(
                &task.id,
                TaskUpdate {
                    title: Some("".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Study");
    }

    #[test]
    fn test_update_missing_task() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        assert!(tracker.update("nope", TaskUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn test_toggle_completed_twice() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        let task = tracker.add("Laundry", None, None).unwrap();

        for expected in [true, false] {
            let current = tracker.list().unwrap()[0].completed;
            let updated = tracker
                .update(
                    &task.id,
                    TaskUpdate {
                        completed: Some(!current),
                        ..Default::default()
                    },
                )
                .unwrap()
                .unwrap();
            assert_eq!(updated.completed, expected);
        }
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let tracker = tracker(dir.path());
        let task = tracker.add("Laundry", None, None).unwrap();

        assert!(tracker.remove(&task.id).unwrap());
        assert!(!tracker.remove(&task.id).unwrap());
        assert!(tracker.list().unwrap().is_empty());
    }
}
