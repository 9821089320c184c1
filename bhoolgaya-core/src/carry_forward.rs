//! Carry-forward planning: move unfinished past-day tasks onto today.
//!
//! Produces updated copies; persisting them is the caller's job.

use serde::Serialize;
use tracing::{debug, info};

use crate::task::Task;
use crate::time::{Calendar, local_date};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarryForwardPlan {
    /// Updated copies of the tasks that moved, in input order.
    pub moved: Vec<Task>,
    /// Pending tasks already scheduled today or later.
    pub unchanged: usize,
}

impl CarryForwardPlan {
    pub fn count(&self) -> usize {
        self.moved.len()
    }
}

/// Whether a task is due for carry-forward on `calendar`'s today.
pub fn needs_carry_forward(task: &Task, calendar: &Calendar) -> bool {
    task.is_pending() && local_date(task.task_date, calendar.tz()) < calendar.today()
}

pub fn plan_carry_forward(tasks: &[Task], calendar: &Calendar) -> CarryForwardPlan {
    let start = calendar.start_of_today();
    let mut plan = CarryForwardPlan::default();

    for t in tasks.iter().filter(|t| t.is_pending()) {
        if !needs_carry_forward(t, calendar) {
            plan.unchanged += 1;
            continue;
        }
        let mut moved = t.clone();
        moved.task_date = start;
        moved.carry_forward_count += 1;
        moved.age_in_days = calendar.age_of(moved.original_date);
        debug!(task = %moved.id, age = moved.age_in_days, count = moved.carry_forward_count, "carry forward");
        plan.moved.push(moved);
    }

    if !plan.moved.is_empty() {
        info!(moved = plan.count(), today = %calendar.today(), "planned carry-forward");
    }
    plan
}
