//! Task model shared by the classifier, sorter and the notification helpers.
//!
//! Tasks are owned by the document store; the engine only reads snapshots of
//! them and hands back derived views or updated copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quadrant::{Quadrant, quadrant};

/// Default reminder interval for new tasks (minutes).
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Where a task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    #[default]
    Manual,
    Chatbot,
    Calendar,
    Whatsapp,
    AiChallenge,
    Default,
}

impl TaskSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "chatbot" => Some(Self::Chatbot),
            "calendar" => Some(Self::Calendar),
            "whatsapp" => Some(Self::Whatsapp),
            "ai_challenge" => Some(Self::AiChallenge),
            "default" => Some(Self::Default),
            _ => None,
        }
    }
}

/// Core task type.
///
/// `age_in_days` is a cache of the value derived from `original_date`; the
/// classification pass recomputes it against an explicit "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,

    pub status: TaskStatus,

    /// Anchor for age calculation. Never moves.
    pub original_date: DateTime<Utc>,
    /// Current scheduled date; advances on carry-forward.
    pub task_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    pub important: bool,
    pub urgent: bool,

    #[serde(default)]
    pub age_in_days: u32,
    #[serde(default)]
    pub carry_forward_count: u32,

    #[serde(default = "default_true")]
    pub reminder_enabled: bool,
    #[serde(default = "default_interval")]
    pub reminder_interval_minutes: u32,

    #[serde(default)]
    pub source: TaskSource,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u32 {
    DEFAULT_REMINDER_INTERVAL_MINUTES
}

impl Task {
    /// A fresh pending task due at `now`, as the store creates it.
    pub fn new(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            original_date: now,
            task_date: now,
            created_at: now,
            completed_at: None,
            important: false,
            urgent: false,
            age_in_days: 0,
            carry_forward_count: 0,
            reminder_enabled: true,
            reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
            source: TaskSource::Manual,
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_flags(mut self, important: bool, urgent: bool) -> Self {
        self.important = important;
        self.urgent = urgent;
        self
    }

    pub fn with_age(mut self, age_in_days: u32) -> Self {
        self.age_in_days = age_in_days;
        self
    }

    pub fn with_original_date(mut self, original_date: DateTime<Utc>) -> Self {
        self.original_date = original_date;
        self.task_date = original_date;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn quadrant(&self) -> Quadrant {
        quadrant(self.important, self.urgent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_task_matches_store_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let t = Task::new("t1", "DSA Practice", now);
        assert_eq!(t.status, TaskStatus::Pending);
        assert_eq!(t.original_date, now);
        assert_eq!(t.task_date, now);
        assert_eq!(t.age_in_days, 0);
        assert_eq!(t.carry_forward_count, 0);
        assert!(t.reminder_enabled);
        assert_eq!(t.reminder_interval_minutes, 60);
        assert_eq!(t.quadrant(), Quadrant::Q4);
    }

    #[test]
    fn completing_sets_status_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let t = Task::new("t1", "x", now).completed_at(now);
        assert!(!t.is_pending());
        assert_eq!(t.completed_at, Some(now));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let t = Task::new("t1", "x", now).with_flags(true, true);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["originalDate"], "2026-02-05T09:00:00Z");
        assert_eq!(v["status"], "pending");
        assert_eq!(v["important"], true);
    }
}
