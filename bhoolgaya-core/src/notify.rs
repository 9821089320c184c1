//! Notification kinds, message pools and template selection.
//!
//! Selection takes the RNG as a parameter; a seeded RNG gives a reproducible pick.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::age::{AgeCategory, age_category};
use crate::reminders::priority_for;
use crate::settings::UserSettings;
use crate::task::Task;
use crate::time::Calendar;

pub const APP_NAME: &str = "BhoolGaya?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskReminder,
    UrgentTask,
    CarryForward,
    FreeMode,
    AiChallenge,
    DailyDigest,
    Motivation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

const TASK_REMINDER: &[&str] = &[
    "BhoolGaya? You wanted to finish this today.",
    "BhoolGaya? This task is waiting for you.",
    "BhoolGaya? Just a gentle reminder.",
    "BhoolGaya? One small step is all you need.",
];

const URGENT_TASK: &[&str] = &[
    "BhoolGaya? Yesterday's task is still waiting.",
    "BhoolGaya? This task has been pending for 2 days.",
    "BhoolGaya? Critical task needs your attention.",
];

const CARRY_FORWARD: &[&str] = &[
    "BhoolGaya? {count} tasks moved to tomorrow. Fresh start!",
    "BhoolGaya? Some tasks carried forward. No pressure.",
];

const FREE_MODE: &[&str] = &[
    "BhoolGaya? Nope! You completed everything. You're free now.",
    "BhoolGaya? All done! Want to learn something new?",
    "BhoolGaya? Great job! Time for yourself now.",
    "BhoolGaya? Try learning something new today.",
    "BhoolGaya? Practice communication skills for 5 minutes.",
    "BhoolGaya? Read one concept about business or finance.",
];

const AI_CHALLENGE: &[&str] = &[
    "BhoolGaya? Today's learning challenge is ready!",
    "BhoolGaya? New concept to explore today.",
];

const MOTIVATION: &[&str] = &[
    "BhoolGaya? One small step is all you need.",
    "BhoolGaya? You've got this. Start with one task.",
    "BhoolGaya? Progress over perfection.",
    "BhoolGaya? Clear one task to free your mind.",
];

/// Message pool for a kind. Never empty.
pub fn templates(kind: NotificationKind) -> &'static [&'static str] {
    match kind {
        NotificationKind::TaskReminder => TASK_REMINDER,
        NotificationKind::UrgentTask => URGENT_TASK,
        NotificationKind::CarryForward => CARRY_FORWARD,
        NotificationKind::FreeMode => FREE_MODE,
        NotificationKind::AiChallenge => AI_CHALLENGE,
        NotificationKind::DailyDigest | NotificationKind::Motivation => MOTIVATION,
    }
}

/// Fresh tasks get a gentle reminder; anything older escalates.
pub fn kind_for_age(category: AgeCategory) -> NotificationKind {
    match category {
        AgeCategory::Today => NotificationKind::TaskReminder,
        AgeCategory::Yesterday | AgeCategory::TwoDays | AgeCategory::Critical => {
            NotificationKind::UrgentTask
        }
    }
}

pub fn pick_template<R: Rng + ?Sized>(kind: NotificationKind, rng: &mut R) -> &'static str {
    let pool = templates(kind);
    pool.choose(rng).copied().unwrap_or(APP_NAME)
}

pub fn render_carry_forward(template: &str, count: usize) -> String {
    template.replace("{count}", &count.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub task_id: Option<String>,
    pub vibration_ms: u32,
    pub priority: NotificationPriority,
}

/// Reminder for one pending task; `None` for completed tasks or when disabled.
pub fn notification_for_task<R: Rng + ?Sized>(
    task: &Task,
    calendar: &Calendar,
    settings: &UserSettings,
    rng: &mut R,
) -> Option<Notification> {
    if !task.is_pending() || !task.reminder_enabled || !settings.notifications_enabled {
        return None;
    }
    let category = age_category(calendar.age_of(task.original_date));
    let kind = kind_for_age(category);
    Some(Notification {
        kind,
        title: task.title.clone(),
        body: pick_template(kind, rng).to_string(),
        task_id: Some(task.id.clone()),
        vibration_ms: settings.vibration_ms(),
        priority: priority_for(category, task.quadrant()),
    })
}

/// "You're free" message once nothing is pending.
pub fn free_mode_notification<R: Rng + ?Sized>(
    tasks: &[Task],
    settings: &UserSettings,
    rng: &mut R,
) -> Option<Notification> {
    if !settings.notifications_enabled || !settings.free_mode_notification {
        return None;
    }
    if tasks.is_empty() || tasks.iter().any(Task::is_pending) {
        return None;
    }
    Some(Notification {
        kind: NotificationKind::FreeMode,
        title: APP_NAME.to_string(),
        body: pick_template(NotificationKind::FreeMode, rng).to_string(),
        task_id: None,
        vibration_ms: settings.vibration_ms(),
        priority: NotificationPriority::Low,
    })
}

pub fn carry_forward_notification<R: Rng + ?Sized>(
    moved: usize,
    settings: &UserSettings,
    rng: &mut R,
) -> Option<Notification> {
    if moved == 0 || !settings.notifications_enabled {
        return None;
    }
    let template = pick_template(NotificationKind::CarryForward, rng);
    Some(Notification {
        kind: NotificationKind::CarryForward,
        title: APP_NAME.to_string(),
        body: render_carry_forward(template, moved),
        task_id: None,
        vibration_ms: settings.vibration_ms(),
        priority: NotificationPriority::Normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL_KINDS: [NotificationKind; 7] = [
        NotificationKind::TaskReminder,
        NotificationKind::UrgentTask,
        NotificationKind::CarryForward,
        NotificationKind::FreeMode,
        NotificationKind::AiChallenge,
        NotificationKind::DailyDigest,
        NotificationKind::Motivation,
    ];

    #[test]
    fn every_pool_is_non_empty() {
        for k in ALL_KINDS {
            assert!(!templates(k).is_empty(), "{k:?}");
        }
    }

    #[test]
    fn seeded_selection_is_reproducible_and_in_pool() {
        for k in ALL_KINDS {
            let a: Vec<&str> = {
                let mut rng = StdRng::seed_from_u64(7);
                (0..10).map(|_| pick_template(k, &mut rng)).collect()
            };
            let b: Vec<&str> = {
                let mut rng = StdRng::seed_from_u64(7);
                (0..10).map(|_| pick_template(k, &mut rng)).collect()
            };
            assert_eq!(a, b);
            assert!(a.iter().all(|m| templates(k).contains(m)));
        }
    }

    #[test]
    fn age_maps_to_kind() {
        assert_eq!(kind_for_age(AgeCategory::Today), NotificationKind::TaskReminder);
        assert_eq!(kind_for_age(AgeCategory::Yesterday), NotificationKind::UrgentTask);
        assert_eq!(kind_for_age(AgeCategory::Critical), NotificationKind::UrgentTask);
    }

    #[test]
    fn carry_forward_count_is_substituted() {
        assert_eq!(
            render_carry_forward(CARRY_FORWARD[0], 3),
            "BhoolGaya? 3 tasks moved to tomorrow. Fresh start!"
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert!(carry_forward_notification(0, &UserSettings::default(), &mut rng).is_none());
        let n = carry_forward_notification(2, &UserSettings::default(), &mut rng).unwrap();
        assert!(!n.body.contains("{count}"));
    }

    #[test]
    fn free_mode_only_when_everything_is_done() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let settings = UserSettings::default();
        let mut rng = StdRng::seed_from_u64(3);

        let done = vec![Task::new("a", "x", now).completed_at(now)];
        let n = free_mode_notification(&done, &settings, &mut rng).unwrap();
        assert_eq!(n.kind, NotificationKind::FreeMode);
        assert_eq!(n.vibration_ms, 5_000);

        let mixed = vec![done[0].clone(), Task::new("b", "y", now)];
        assert!(free_mode_notification(&mixed, &settings, &mut rng).is_none());
        assert!(free_mode_notification(&[], &settings, &mut rng).is_none());
    }

    #[test]
    fn task_notification_escalates_with_age() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let cal = Calendar::utc(now);
        let settings = UserSettings {
            vibration_enabled: false,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);

        let t = Task::new("a", "Essay", now - Duration::days(1)).with_flags(true, false);
        let n = notification_for_task(&t, &cal, &settings, &mut rng).unwrap();
        assert_eq!(n.kind, NotificationKind::UrgentTask);
        assert_eq!(n.priority, NotificationPriority::Normal);
        assert_eq!(n.vibration_ms, 1_000);
        assert!(URGENT_TASK.contains(&n.body.as_str()));

        let done = t.clone().completed_at(now);
        assert!(notification_for_task(&done, &cal, &settings, &mut rng).is_none());
    }
}
