//! Age classification: elapsed days -> category -> badge.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Severity bucket for a pending task's age. Variants are ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    Today,
    Yesterday,
    TwoDays,
    Critical,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 4] = [
        AgeCategory::Today,
        AgeCategory::Yesterday,
        AgeCategory::TwoDays,
        AgeCategory::Critical,
    ];

    /// 0 (fresh) ..= 3 (critical).
    pub fn severity(self) -> u8 {
        match self {
            AgeCategory::Today => 0,
            AgeCategory::Yesterday => 1,
            AgeCategory::TwoDays => 2,
            AgeCategory::Critical => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Today => "Today",
            AgeCategory::Yesterday => "Yesterday",
            AgeCategory::TwoDays => "2 days old",
            AgeCategory::Critical => "Critical",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            AgeCategory::Today => "⚪",
            AgeCategory::Yesterday => "🟡",
            AgeCategory::TwoDays => "🔵",
            AgeCategory::Critical => "🔴",
        }
    }
}

pub fn age_category(age_in_days: u32) -> AgeCategory {
    match age_in_days {
        0 => AgeCategory::Today,
        1 => AgeCategory::Yesterday,
        2 => AgeCategory::TwoDays,
        _ => AgeCategory::Critical,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBadge {
    pub label: &'static str,
    pub emoji: &'static str,
    pub severity: AgeCategory,
}

/// Badge for a task's age, if it should show one.
///
/// Completed tasks and same-day tasks get none.
pub fn age_badge(task: &Task) -> Option<AgeBadge> {
    if !task.is_pending() || task.age_in_days == 0 {
        return None;
    }
    let category = age_category(task.age_in_days);
    Some(AgeBadge {
        label: category.label(),
        emoji: category.emoji(),
        severity: category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn pending(age: u32) -> Task {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        Task::new("t", "task", now).with_age(age)
    }

    #[test]
    fn buckets() {
        assert_eq!(age_category(0), AgeCategory::Today);
        assert_eq!(age_category(1), AgeCategory::Yesterday);
        assert_eq!(age_category(2), AgeCategory::TwoDays);
        assert_eq!(age_category(3), AgeCategory::Critical);
        assert_eq!(age_category(u32::MAX), AgeCategory::Critical);
    }

    #[test]
    fn category_is_monotonic_in_age() {
        let mut prev = age_category(0);
        for age in 1..60 {
            let cur = age_category(age);
            assert!(cur >= prev, "age {age} dropped severity");
            assert!(cur.severity() >= prev.severity());
            prev = cur;
        }
    }

    #[test]
    fn badge_labels() {
        assert_eq!(age_badge(&pending(0)), None);
        assert_eq!(age_badge(&pending(1)).unwrap().label, "Yesterday");
        assert_eq!(age_badge(&pending(2)).unwrap().label, "2 days old");
        let b = age_badge(&pending(5)).unwrap();
        assert_eq!(b.label, "Critical");
        assert_eq!(b.severity, AgeCategory::Critical);
    }

    #[test]
    fn completed_task_has_no_badge_regardless_of_age() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 9, 0, 0).unwrap();
        let t = pending(10).completed_at(now);
        assert_eq!(age_badge(&t), None);
    }
}
