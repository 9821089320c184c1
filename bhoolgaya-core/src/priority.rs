//! Display ordering for task lists.
//!
//! Lexicographic over:
//! 1. status (pending first)
//! 2. age, oldest first (only when both tasks are pending)
//! 3. quadrant rank (Q1 first)
//! 4. created_at, newest first
//!
//! Remaining ties keep input order (the sort is stable).

use std::cmp::Ordering;

use crate::quadrant::quadrant_priority_rank;
use crate::task::{Task, TaskStatus};

fn status_rank(s: TaskStatus) -> u8 {
    match s {
        TaskStatus::Pending => 0,
        TaskStatus::Completed => 1,
    }
}

pub fn compare_priority(a: &Task, b: &Task) -> Ordering {
    status_rank(a.status)
        .cmp(&status_rank(b.status))
        .then_with(|| {
            // Age is meaningless for completed tasks.
            if a.is_pending() && b.is_pending() {
                b.age_in_days.cmp(&a.age_in_days)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| quadrant_priority_rank(a.quadrant()).cmp(&quadrant_priority_rank(b.quadrant())))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sorted copy of `tasks`.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    sort_in_place(&mut out);
    out
}

pub fn sort_in_place(tasks: &mut [Task]) {
    tasks.sort_by(compare_priority);
}
