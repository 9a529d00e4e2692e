use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of reminder. Unknown values read from storage or requests become `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ReminderType {
    Exam,
    Assignment,
    Meeting,
    #[default]
    General,
}

impl ReminderType {
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "exam" => ReminderType::Exam,
            "assignment" => ReminderType::Assignment,
            "meeting" => ReminderType::Meeting,
            _ => ReminderType::General,
        }
    }
}

impl From<Option<String>> for ReminderType {
    fn from(s: Option<String>) -> Self {
        s.as_deref().map(Self::from_str_or_default).unwrap_or_default()
    }
}

/// Urgency tier, declared in sort order (most pressing first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Urgency {
    Overdue,
    Today,
    Urgent,
    Soon,
    #[default]
    Normal,
}

impl Urgency {
    pub fn rank(self) -> u8 {
        match self {
            Urgency::Overdue => 0,
            Urgency::Today => 1,
            Urgency::Urgent => 2,
            Urgency::Soon => 3,
            Urgency::Normal => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Today => "today",
            Urgency::Urgent => "urgent",
            Urgency::Soon => "soon",
            Urgency::Normal => "normal",
        }
    }
}

impl From<Option<String>> for Urgency {
    fn from(s: Option<String>) -> Self {
        match s.as_deref() {
            Some("overdue") => Urgency::Overdue,
            Some("today") => Urgency::Today,
            Some("urgent") => Urgency::Urgent,
            Some("soon") => Urgency::Soon,
            _ => Urgency::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub due_date: String,
    #[serde(rename = "type", default)]
    pub reminder_type: ReminderType,
    /// Last computed tier. Only meaningful right after it has been recomputed.
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub completed: bool,
    /// Fields written by other tools, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
