//! bhoolgaya-core: task aging, prioritization and carry-forward classification.

pub mod age;
pub mod carry_forward;
pub mod classify;
pub mod error;
pub mod notify;
pub mod priority;
pub mod quadrant;
pub mod record;
pub mod reminders;
pub mod settings;
pub mod stats;
pub mod task;
pub mod time;
pub mod view;

pub use age::{AgeBadge, AgeCategory, age_badge, age_category};
pub use carry_forward::{CarryForwardPlan, needs_carry_forward, plan_carry_forward};
pub use classify::{ClassifiedTask, classify, refresh_ages};
pub use error::EngineError;
pub use notify::{
    Notification, NotificationKind, NotificationPriority, carry_forward_notification,
    free_mode_notification, kind_for_age, notification_for_task, pick_template,
    render_carry_forward, templates,
};
pub use priority::{compare_priority, sort_by_priority, sort_in_place};
pub use quadrant::{Quadrant, QuadrantInfo, quadrant, quadrant_priority_rank};
pub use record::{parse_task_document, parse_task_documents};
pub use reminders::{ReminderIntent, ReminderPolicy, project_all, project_task_reminders};
pub use settings::{DailyDefaultTask, QuietHours, UserSettings};
pub use stats::{TaskSummary, summarize};
pub use task::{Task, TaskSource, TaskStatus};
pub use time::{Calendar, age_in_days, relative_date_label};
pub use view::{QuadrantGroups, StatusFilter, TaskFilter, filter_by_status, group_by_quadrant};
