use std::path::PathBuf;
use std::sync::Arc;

use super::day::{reconcile, Goal, GoalStats, GoalsDay, MAX_DAILY_GOALS};
use crate::clock::Clock;
use crate::error::{DashboardError, DashboardResult};
use crate::store::{JsonFileStore, StoreError};

pub struct GoalsTracker {
    store: JsonFileStore<GoalsDay>,
    clock: Arc<dyn Clock>,
}

impl GoalsTracker {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: JsonFileStore::new(path),
            clock,
        }
    }

    pub fn init(&self) -> Result<(), StoreError> {
        let today = self.clock.today();
        self.store
            .ensure_initialized(|| GoalsDay::empty(today))
            .map(|_| ())
    }

    /// Load today's goals, persisting a reset first if the stored day is stale
    fn current_day(&self) -> Result<GoalsDay, StoreError> {
        let today = self.clock.today();
        let stored = self.store.load_or_init(|| GoalsDay::empty(today))?;
        let (day, did_reset) = reconcile(stored, today);
        if did_reset {
            log::info!("[GOALS] New day {}, clearing previous goals", today);
            self.store.save(&day)?;
        }
        Ok(day)
    }

    pub fn get(&self) -> DashboardResult<GoalsDay> {
        Ok(self.current_day()?)
    }

    pub fn add(&self, text: &str) -> DashboardResult<Goal> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DashboardError::validation("Goal text is required"));
        }

        let mut day = self.current_day()?;
        let goal = day.push_goal(text).ok_or_else(|| {
            DashboardError::validation(format!("Maximum {} goals per day", MAX_DAILY_GOALS))
        })?;
        self.store.save(&day)?;

        log::info!("[GOALS] Added goal #{} for {}", goal.id, day.date);
        Ok(goal)
    }

    /// Returns false when today's goals have no goal with `id`
    pub fn toggle(&self, id: u32) -> DashboardResult<bool> {
        let mut day = self.current_day()?;
        if !day.toggle_goal(id) {
            return Ok(false);
        }
        self.store.save(&day)?;
        Ok(true)
    }

    pub fn stats(&self) -> DashboardResult<GoalStats> {
        Ok(self.current_day()?.stats())
    }
}
