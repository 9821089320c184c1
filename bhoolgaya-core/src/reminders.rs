//! Reminder policy + projection primitives.
//!
//! Projection is deterministic: the same task, calendar and settings always
//! give the same intents. Message text is chosen later by the notifier.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::age::{AgeCategory, age_category};
use crate::notify::{NotificationKind, NotificationPriority, kind_for_age};
use crate::quadrant::Quadrant;
use crate::settings::UserSettings;
use crate::task::Task;
use crate::time::Calendar;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderIntent {
    pub intent_id: String,
    pub task_id: String,
    pub kind: NotificationKind,
    pub age_category: AgeCategory,
    pub priority: NotificationPriority,
    pub title: String,
    pub send_at_utc: DateTime<Utc>,
    pub dedupe_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderPolicy {
    pub max_per_task: usize,
    /// How far ahead of now slots are projected.
    pub horizon_hours: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            max_per_task: 3,
            horizon_hours: 24,
        }
    }
}

pub fn priority_for(category: AgeCategory, quadrant: Quadrant) -> NotificationPriority {
    match (category, quadrant) {
        (AgeCategory::Critical, _) | (_, Quadrant::Q1) => NotificationPriority::High,
        (_, Quadrant::Q4) => NotificationPriority::Low,
        _ => NotificationPriority::Normal,
    }
}

/// Project a task into reminder intents, one per interval tick after now.
pub fn project_task_reminders(
    task: &Task,
    calendar: &Calendar,
    settings: &UserSettings,
) -> Vec<ReminderIntent> {
    if !task.is_pending() || !task.reminder_enabled || !settings.notifications_enabled {
        return vec![];
    }
    if task.reminder_interval_minutes == 0 {
        return vec![];
    }

    let policy = settings.reminders;
    let now = calendar.now();
    let Some(horizon) = Duration::try_hours(policy.horizon_hours)
        .and_then(|h| now.checked_add_signed(h))
    else {
        return vec![];
    };
    let step = Duration::minutes(i64::from(task.reminder_interval_minutes));

    let category = age_category(calendar.age_of(task.original_date));
    let kind = kind_for_age(category);
    let priority = priority_for(category, task.quadrant());

    let mut out = Vec::new();
    let mut next = now.checked_add_signed(step);
    let mut i = 0usize;

    while let Some(send_at) = next.filter(|at| *at <= horizon) {
        if out.len() >= policy.max_per_task {
            break;
        }
        let local = calendar.local(send_at).time();
        if !settings.quiet_hours.contains(local) {
            // Dedupe should be unique per concrete send slot, not per-day.
            let dedupe_key = format!("{}:{}:{}", task.id, send_at.timestamp(), i);
            out.push(ReminderIntent {
                intent_id: format!("ri-{}-{}", task.id, i),
                task_id: task.id.clone(),
                kind,
                age_category: category,
                priority,
                title: task.title.clone(),
                send_at_utc: send_at,
                dedupe_key,
            });
            i += 1;
        }
        next = send_at.checked_add_signed(step);
    }

    out
}

/// Reminders for a whole snapshot, ordered by send time then task id.
pub fn project_all(tasks: &[Task], calendar: &Calendar, settings: &UserSettings) -> Vec<ReminderIntent> {
    let mut out: Vec<ReminderIntent> = tasks
        .iter()
        .flat_map(|t| project_task_reminders(t, calendar, settings))
        .collect();
    out.sort_by(|a, b| {
        a.send_at_utc
            .cmp(&b.send_at_utc)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });
    out
}
