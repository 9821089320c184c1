//! Snapshot counts for dashboards and digests.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::age::{AgeCategory, age_category};
use crate::quadrant::Quadrant;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub pending_by_quadrant: BTreeMap<Quadrant, usize>,
    pub pending_by_age: BTreeMap<AgeCategory, usize>,
    pub completed_by_quadrant: BTreeMap<Quadrant, usize>,
    pub carried_forward: usize,
}

impl TaskSummary {
    pub fn critical(&self) -> usize {
        self.pending_by_age.get(&AgeCategory::Critical).copied().unwrap_or(0)
    }
}

/// Counts over `tasks` using their cached `age_in_days`.
pub fn summarize(tasks: &[Task]) -> TaskSummary {
    let mut s = TaskSummary {
        total: tasks.len(),
        ..Default::default()
    };
    for q in Quadrant::ALL {
        s.pending_by_quadrant.insert(q, 0);
        s.completed_by_quadrant.insert(q, 0);
    }
    for c in AgeCategory::ALL {
        s.pending_by_age.insert(c, 0);
    }

    for t in tasks {
        if t.carry_forward_count > 0 {
            s.carried_forward += 1;
        }
        if t.is_pending() {
            s.pending += 1;
            *s.pending_by_quadrant.entry(t.quadrant()).or_default() += 1;
            *s.pending_by_age.entry(age_category(t.age_in_days)).or_default() += 1;
        } else {
            s.completed += 1;
            *s.completed_by_quadrant.entry(t.quadrant()).or_default() += 1;
        }
    }
    s
}
