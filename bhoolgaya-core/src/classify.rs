//! One classification pass over a task snapshot.

use serde::Serialize;
use tracing::debug;

use crate::age::{AgeBadge, AgeCategory, age_badge, age_category};
use crate::quadrant::Quadrant;
use crate::task::Task;
use crate::time::Calendar;

/// A task with everything the presentation and notification layers derive from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTask {
    pub task: Task,
    pub quadrant: Quadrant,
    /// `None` for completed tasks.
    pub age_category: Option<AgeCategory>,
    pub badge: Option<AgeBadge>,
}

impl ClassifiedTask {
    pub fn from_task(task: Task) -> Self {
        let quadrant = task.quadrant();
        let age_category = task.is_pending().then(|| age_category(task.age_in_days));
        let badge = age_badge(&task);
        Self {
            task,
            quadrant,
            age_category,
            badge,
        }
    }
}

/// Recompute `age_in_days` for every task against one calendar.
pub fn refresh_ages(tasks: &[Task], calendar: &Calendar) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t.age_in_days = calendar.age_of(t.original_date);
            t
        })
        .collect()
}

pub fn classify(tasks: &[Task], calendar: &Calendar) -> Vec<ClassifiedTask> {
    let out: Vec<ClassifiedTask> = refresh_ages(tasks, calendar)
        .into_iter()
        .map(ClassifiedTask::from_task)
        .collect();

    debug!(
        tasks = out.len(),
        critical = out
            .iter()
            .filter(|c| c.age_category == Some(AgeCategory::Critical))
            .count(),
        today = %calendar.today(),
        "classified snapshot"
    );
    out
}
