//! Status filtering, quadrant grouping and compound list filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::quadrant::Quadrant;
use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TaskStatus::Pending,
            StatusFilter::Completed => status == TaskStatus::Completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(EngineError::UnknownStatusFilter(other.to_string())),
        }
    }
}

pub fn filter_by_status(tasks: &[Task], status: StatusFilter) -> Vec<Task> {
    if status == StatusFilter::All {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|t| status.matches(t.status))
        .cloned()
        .collect()
}

/// Tasks partitioned into the four quadrants, input order kept per bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuadrantGroups {
    pub q1: Vec<Task>,
    pub q2: Vec<Task>,
    pub q3: Vec<Task>,
    pub q4: Vec<Task>,
}

impl QuadrantGroups {
    pub fn get(&self, q: Quadrant) -> &[Task] {
        match q {
            Quadrant::Q1 => &self.q1,
            Quadrant::Q2 => &self.q2,
            Quadrant::Q3 => &self.q3,
            Quadrant::Q4 => &self.q4,
        }
    }

    fn bucket_mut(&mut self, q: Quadrant) -> &mut Vec<Task> {
        match q {
            Quadrant::Q1 => &mut self.q1,
            Quadrant::Q2 => &mut self.q2,
            Quadrant::Q3 => &mut self.q3,
            Quadrant::Q4 => &mut self.q4,
        }
    }

    /// Buckets in Q1..Q4 order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[Task])> {
        Quadrant::ALL.into_iter().map(move |q| (q, self.get(q)))
    }

    pub fn total(&self) -> usize {
        self.q1.len() + self.q2.len() + self.q3.len() + self.q4.len()
    }
}

pub fn group_by_quadrant(tasks: &[Task]) -> QuadrantGroups {
    let mut groups = QuadrantGroups::default();
    for t in tasks {
        groups.bucket_mut(t.quadrant()).push(t.clone());
    }
    groups
}

/// Compound list filter; every set criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub quadrant: Option<Quadrant>,
    pub category: Option<String>,
    /// Inclusive bounds on `task_date`.
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task.status) {
            return false;
        }
        if self.quadrant.is_some_and(|q| task.quadrant() != q) {
            return false;
        }
        if let Some(cat) = &self.category {
            if task.category.as_deref() != Some(cat.as_str()) {
                return false;
            }
        }
        if self.date_from.is_some_and(|from| task.task_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| task.task_date > to) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_desc = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_desc {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
