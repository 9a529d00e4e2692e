//! File-backed reminder collection.

use serde_json::Map;
use std::path::PathBuf;
use std::sync::Arc;

use super::types::{Reminder, ReminderType};
use super::urgency::{refresh_and_sort, urgency_for};
use crate::clock::Clock;
use crate::error::{DashboardError, DashboardResult};
use crate::store::{RecordStore, StoreError};

pub struct ReminderEngine {
    store: RecordStore<Reminder>,
    clock: Arc<dyn Clock>,
}

impl ReminderEngine {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(path),
            clock,
        }
    }

    /// Create the backing file if it does not exist yet
    pub fn init(&self) -> Result<(), StoreError> {
        self.store.ensure_initialized(Vec::new).map(|_| ())
    }

    fn load(&self) -> Result<Vec<Reminder>, StoreError> {
        self.store.load_or_init(Vec::new)
    }

    /// All reminders with fresh urgency, most pressing first
    pub fn list(&self) -> DashboardResult<Vec<Reminder>> {
        let mut reminders = self.load()?;
        refresh_and_sort(&mut reminders, self.clock.today());
        Ok(reminders)
    }

    pub fn add(
        &self,
        title: &str,
        due_date: &str,
        reminder_type: Option<&str>,
    ) -> DashboardResult<Reminder> {
        let title = title.trim();
        let due_date = due_date.trim();
        if title.is_empty() || due_date.is_empty() {
            return Err(DashboardError::validation("Title and due date are required"));
        }

        let mut reminders = self.load()?;
        let reminder = Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            due_date: due_date.to_string(),
            reminder_type: reminder_type
                .map(ReminderType::from_str_or_default)
                .unwrap_or_default(),
            urgency: urgency_for(due_date, self.clock.today()),
            completed: false,
            extra: Map::new(),
        };
        reminders.push(reminder.clone());
        self.store.save(&reminders)?;

        log::info!(
            "[REMINDERS] Added reminder {} due {} ({})",
            reminder.id,
            reminder.due_date,
            reminder.urgency.as_str()
        );
        Ok(reminder)
    }

    /// Returns true when a reminder with `id` existed and was removed
    pub fn remove(&self, id: &str) -> DashboardResult<bool> {
        let mut reminders = self.load()?;
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            return Ok(false);
        }

        self.store.save(&reminders)?;
        log::info!("[REMINDERS] Removed reminder {}", id);
        Ok(true)
    }

    /// Flip `completed`, returning the updated reminder with fresh urgency
    pub fn toggle(&self, id: &str) -> DashboardResult<Option<Reminder>> {
        let mut reminders = self.load()?;
        let today = self.clock.today();

        let updated = match reminders.iter_mut().find(|r| r.id == id) {
            Some(reminder) => {
                reminder.completed = !reminder.completed;
                reminder.urgency = urgency_for(&reminder.due_date, today);
                reminder.clone()
            }
            None => return Ok(None),
        };

        self.store.save(&reminders)?;
        log::info!(
            "[REMINDERS] Reminder {} marked {}",
            id,
            if updated.completed { "completed" } else { "pending" }
        );
        Ok(Some(updated))
    }
}
