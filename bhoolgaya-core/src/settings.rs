//! Per-user settings, passed explicitly to whatever needs them.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::reminders::ReminderPolicy;
use crate::task::{DEFAULT_REMINDER_INTERVAL_MINUTES, Task, TaskSource};
use crate::time::{Calendar, parse_timezone};

pub const VIBRATION_MS_ENABLED: u32 = 5_000;
pub const VIBRATION_MS_DISABLED: u32 = 1_000;

/// Longest reminder look-ahead accepted from config: one leap year.
pub const MAX_HORIZON_HOURS: i64 = 24 * 366;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// IANA timezone used for calendar-day boundaries.
    pub timezone: String,
    pub default_reminder_interval_minutes: u32,
    pub vibration_enabled: bool,
    pub notifications_enabled: bool,
    pub free_mode_notification: bool,
    pub show_completed_tasks: bool,
    pub quiet_hours: QuietHours,
    pub reminders: ReminderPolicy,
    pub daily_default_tasks: Vec<DailyDefaultTask>,
}

/// Local-time window in which reminders are held back. May wrap midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl QuietHours {
    /// Start inclusive, end exclusive.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if !self.enabled || self.start == self.end {
            return false;
        }
        if self.start < self.end {
            t >= self.start && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDefaultTask {
    pub id: String,
    pub title: String,
    pub important: bool,
    pub urgent: bool,
    pub enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        let daily = |id: &str, title: &str| DailyDefaultTask {
            id: id.to_string(),
            title: title.to_string(),
            important: true,
            urgent: false,
            enabled: true,
        };
        Self {
            timezone: "Asia/Kolkata".to_string(),
            default_reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
            vibration_enabled: true,
            notifications_enabled: true,
            free_mode_notification: true,
            show_completed_tasks: false,
            quiet_hours: QuietHours::default(),
            reminders: ReminderPolicy::default(),
            daily_default_tasks: vec![
                daily("default-1", "DSA Practice"),
                daily("default-2", "Self-Learning"),
                daily("default-3", "Health/Exercise"),
            ],
        }
    }
}

impl UserSettings {
    pub fn tz(&self) -> Result<Tz, EngineError> {
        parse_timezone(&self.timezone)
    }

    pub fn vibration_ms(&self) -> u32 {
        if self.vibration_enabled {
            VIBRATION_MS_ENABLED
        } else {
            VIBRATION_MS_DISABLED
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.tz()?;
        if self.default_reminder_interval_minutes == 0 {
            return Err(EngineError::InvalidSettings(
                "default_reminder_interval_minutes must be > 0".to_string(),
            ));
        }
        if !(1..=MAX_HORIZON_HOURS).contains(&self.reminders.horizon_hours) {
            return Err(EngineError::InvalidSettings(format!(
                "reminders.horizon_hours must be within 1..={MAX_HORIZON_HOURS} (got {})",
                self.reminders.horizon_hours
            )));
        }
        if self.reminders.max_per_task == 0 {
            return Err(EngineError::InvalidSettings(
                "reminders.max_per_task must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Today's copies of the enabled daily default tasks.
    ///
    /// Ids are stable per day (`<default id>-<YYYYMMDD>`) so re-running is idempotent
    /// for a store that upserts by id.
    pub fn daily_tasks_for(&self, user_id: &str, calendar: &Calendar) -> Vec<Task> {
        let day = calendar.today().format("%Y%m%d").to_string();
        let start = calendar.start_of_today();
        self.daily_default_tasks
            .iter()
            .filter(|d| d.enabled)
            .map(|d| {
                let mut t = Task::new(format!("{}-{}", d.id, day), d.title.clone(), start)
                    .with_flags(d.important, d.urgent)
                    .with_created_at(calendar.now());
                t.user_id = user_id.to_string();
                t.source = TaskSource::Default;
                t.reminder_interval_minutes = self.default_reminder_interval_minutes;
                t
            })
            .collect()
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let s = UserSettings::default();
        s.validate().unwrap();
        assert_eq!(s.vibration_ms(), 5_000);
        assert_eq!(s.daily_default_tasks.len(), 3);
    }

    #[test]
    fn invalid_timezone_fails_validation() {
        let s = UserSettings {
            timezone: "Nowhere/Special".to_string(),
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(EngineError::InvalidTimezone(_))));
    }

    #[test]
    fn horizon_out_of_range_fails_validation() {
        let s: UserSettings = serde_json::from_str(
            r#"{"timezone": "UTC", "reminders": {"max_per_task": 3, "horizon_hours": 9223372036854775807}}"#,
        )
        .unwrap();
        assert!(matches!(s.validate(), Err(EngineError::InvalidSettings(_))));

        let zero = UserSettings {
            reminders: ReminderPolicy {
                horizon_hours: 0,
                ..ReminderPolicy::default()
            },
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(EngineError::InvalidSettings(_))));

        let year = UserSettings {
            reminders: ReminderPolicy {
                horizon_hours: MAX_HORIZON_HOURS,
                ..ReminderPolicy::default()
            },
            ..Default::default()
        };
        year.validate().unwrap();
    }

    #[test]
    fn quiet_hours_wrap_midnight() {
        let q = QuietHours {
            enabled: true,
            start: t(22, 0),
            end: t(7, 0),
        };
        assert!(q.contains(t(23, 30)));
        assert!(q.contains(t(3, 0)));
        assert!(!q.contains(t(7, 0)));
        assert!(!q.contains(t(12, 0)));
        assert!(!QuietHours { enabled: false, ..q }.contains(t(23, 30)));
    }

    #[test]
    fn quiet_hours_round_trip_as_hh_mm() {
        let q = QuietHours {
            enabled: true,
            start: t(21, 30),
            end: t(6, 45),
        };
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["start"], "21:30");
        let back: QuietHours = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let s: UserSettings = serde_json::from_str(r#"{"timezone": "UTC", "vibration_enabled": false}"#).unwrap();
        assert_eq!(s.timezone, "UTC");
        assert_eq!(s.vibration_ms(), 1_000);
        assert_eq!(s.default_reminder_interval_minutes, 60);
    }

    #[test]
    fn daily_defaults_for_today() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 3, 0, 0).unwrap();
        let s = UserSettings::default();
        let cal = Calendar::new(now, s.tz().unwrap());
        let tasks = s.daily_tasks_for("u1", &cal);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "default-1-20260205");
        assert_eq!(tasks[0].source, TaskSource::Default);
        assert_eq!(tasks[0].original_date, cal.start_of_today());
        assert!(tasks.iter().all(|t| t.important && !t.urgent && t.user_id == "u1"));
    }
}
