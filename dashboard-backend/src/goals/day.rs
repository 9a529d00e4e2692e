use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MAX_DAILY_GOALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalsDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalStats {
    pub total: usize,
    pub completed: usize,
    pub percentage: f64,
}

impl GoalsDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            goals: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.goals.len() >= MAX_DAILY_GOALS
    }

    /// Append a goal numbered after the existing ones. Returns None at capacity.
    pub fn push_goal(&mut self, text: &str) -> Option<Goal> {
        if self.is_full() {
            return None;
        }
        let goal = Goal {
            id: self.goals.len() as u32 + 1,
            text: text.to_string(),
            completed: false,
            extra: Map::new(),
        };
        self.goals.push(goal.clone());
        Some(goal)
    }

    /// Flip `completed` on the goal with `id`. Returns false if there is none.
    pub fn toggle_goal(&mut self, id: u32) -> bool {
        match self.goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => {
                goal.completed = !goal.completed;
                true
            }
            None => false,
        }
    }

    pub fn stats(&self) -> GoalStats {
        let total = self.goals.len();
        let completed = self.goals.iter().filter(|g| g.completed).count();
        let percentage = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64 * 1000.0).round() / 10.0
        };
        GoalStats {
            total,
            completed,
            percentage,
        }
    }
}

/// Day rollover: a stored day other than `today` is replaced by an empty one,
/// keeping only document-level extra keys.
/// The flag tells the caller whether the result must be written back.
pub fn reconcile(stored: GoalsDay, today: NaiveDate) -> (GoalsDay, bool) {
    if stored.date == today {
        (stored, false)
    } else {
        let fresh = GoalsDay {
            extra: stored.extra,
            ..GoalsDay::empty(today)
        };
        (fresh, true)
    }
}
