//! Eisenhower matrix quadrants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Important and urgent.
    Q1,
    /// Important, not urgent.
    Q2,
    /// Urgent, not important.
    Q3,
    /// Neither.
    Q4,
}

/// Display metadata for a quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1",
            Quadrant::Q2 => "q2",
            Quadrant::Q3 => "q3",
            Quadrant::Q4 => "q4",
        }
    }

    pub fn info(self) -> QuadrantInfo {
        match self {
            Quadrant::Q1 => QuadrantInfo {
                name: "Do Now",
                label: "Important & Urgent",
                description: "Critical tasks that need immediate attention",
            },
            Quadrant::Q2 => QuadrantInfo {
                name: "Schedule",
                label: "Important & Not Urgent",
                description: "Tasks that build your future",
            },
            Quadrant::Q3 => QuadrantInfo {
                name: "Delegate",
                label: "Not Important & Urgent",
                description: "Interruptions and quick tasks",
            },
            Quadrant::Q4 => QuadrantInfo {
                name: "Eliminate",
                label: "Not Important & Not Urgent",
                description: "Tasks to minimize or avoid",
            },
        }
    }

    /// The (important, urgent) flags this quadrant stands for.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Quadrant::Q1 => (true, true),
            Quadrant::Q2 => (true, false),
            Quadrant::Q3 => (false, true),
            Quadrant::Q4 => (false, false),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q1" => Ok(Quadrant::Q1),
            "q2" => Ok(Quadrant::Q2),
            "q3" => Ok(Quadrant::Q3),
            "q4" => Ok(Quadrant::Q4),
            _ => Err(EngineError::UnknownQuadrant(s.to_string())),
        }
    }
}

pub fn quadrant(important: bool, urgent: bool) -> Quadrant {
    match (important, urgent) {
        (true, true) => Quadrant::Q1,
        (true, false) => Quadrant::Q2,
        (false, true) => Quadrant::Q3,
        (false, false) => Quadrant::Q4,
    }
}

/// Lower rank sorts first.
pub fn quadrant_priority_rank(q: Quadrant) -> u8 {
    match q {
        Quadrant::Q1 => 0,
        Quadrant::Q2 => 1,
        Quadrant::Q3 => 2,
        Quadrant::Q4 => 3,
    }
}
