//! Document-store records -> typed tasks.
//!
//! Records arrive as loosely typed JSON (camelCase keys, timestamps either as
//! RFC 3339 strings or `{seconds, nanoseconds}` objects). Anything malformed is
//! rejected with [`EngineError::InvalidTaskData`]; nothing is coerced.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::EngineError;
use crate::task::{DEFAULT_REMINDER_INTERVAL_MINUTES, Task, TaskSource, TaskStatus};

/// Fixed reminder intervals offered by the app, in minutes.
pub const REMINDER_INTERVALS: [u32; 4] = [15, 30, 60, 120];

struct Fields<'a> {
    id: Option<&'a str>,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn err(&self, field: &'static str, reason: impl Into<String>) -> EngineError {
        EngineError::invalid(self.id, field, reason)
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, EngineError> {
        self.get(field).ok_or_else(|| self.err(field, "is missing"))
    }

    fn string(&self, field: &'static str) -> Result<String, EngineError> {
        self.required(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.err(field, "is not a string"))
    }

    fn opt_string(&self, field: &'static str) -> Result<Option<String>, EngineError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.err(field, "is not a string")),
        }
    }

    fn boolean(&self, field: &'static str) -> Result<bool, EngineError> {
        self.required(field)?
            .as_bool()
            .ok_or_else(|| self.err(field, "is not a boolean"))
    }

    fn opt_bool(&self, field: &'static str, default: bool) -> Result<bool, EngineError> {
        match self.get(field) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| self.err(field, "is not a boolean")),
        }
    }

    fn opt_count(&self, field: &'static str) -> Result<Option<u32>, EngineError> {
        let Some(v) = self.get(field) else {
            return Ok(None);
        };
        if let Some(n) = v.as_i64() {
            if n < 0 {
                return Err(self.err(field, format!("is negative ({n})")));
            }
            return u32::try_from(n)
                .map(Some)
                .map_err(|_| self.err(field, format!("is out of range ({n})")));
        }
        Err(self.err(field, "is not an integer"))
    }

    fn timestamp(&self, field: &'static str) -> Result<DateTime<Utc>, EngineError> {
        let v = self.required(field)?;
        parse_timestamp(v).ok_or_else(|| self.err(field, format!("is not a timestamp ({v})")))
    }

    fn opt_timestamp(&self, field: &'static str) -> Result<Option<DateTime<Utc>>, EngineError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => parse_timestamp(v)
                .map(Some)
                .ok_or_else(|| self.err(field, format!("is not a timestamp ({v})"))),
        }
    }
}

/// RFC 3339 string, or a `{seconds, nanoseconds}` / `{_seconds, _nanoseconds}` object.
pub fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(m) => {
            let secs = m.get("seconds").or_else(|| m.get("_seconds"))?.as_i64()?;
            let nanos = match m.get("nanoseconds").or_else(|| m.get("_nanoseconds")) {
                Some(n) => u32::try_from(n.as_u64()?).ok()?,
                None => 0,
            };
            DateTime::from_timestamp(secs, nanos)
        }
        _ => None,
    }
}

pub fn parse_task_document(value: &Value) -> Result<Task, EngineError> {
    let map = value
        .as_object()
        .ok_or_else(|| EngineError::invalid(None, "record", "is not an object"))?;

    let mut f = Fields { id: None, map };
    let id = f.string("id")?;
    if id.trim().is_empty() {
        return Err(f.err("id", "is empty"));
    }
    f.id = Some(id.as_str());

    let status = match f.string("status")?.as_str() {
        "pending" => TaskStatus::Pending,
        "completed" => TaskStatus::Completed,
        other => return Err(f.err("status", format!("has unknown value '{other}'"))),
    };

    // Snapshots written back by this crate carry the resolved minutes directly.
    let resolved = match f.opt_count("reminderIntervalMinutes")? {
        Some(0) => return Err(f.err("reminderIntervalMinutes", "must be positive")),
        other => other,
    };
    let reminder_interval_minutes = match (resolved, f.get("reminderInterval")) {
        (Some(m), _) => m,
        (None, None) => DEFAULT_REMINDER_INTERVAL_MINUTES,
        (None, Some(v)) => match v {
            Value::String(s) if s == "custom" => match f.opt_count("customReminderMinutes")? {
                Some(m) if m > 0 => m,
                _ => return Err(f.err("customReminderMinutes", "must be a positive integer for a custom interval")),
            },
            _ => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(n) if REMINDER_INTERVALS.contains(&n) => n,
                _ => return Err(f.err("reminderInterval", format!("is not one of 15, 30, 60, 120 or \"custom\" ({v})"))),
            },
        },
    };

    let source = match f.opt_string("source")? {
        None => TaskSource::Manual,
        Some(s) => TaskSource::parse(&s).ok_or_else(|| f.err("source", format!("has unknown value '{s}'")))?,
    };

    let tags = match f.get("tags") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|t| t.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| f.err("tags", "contains a non-string entry"))?,
        Some(_) => return Err(f.err("tags", "is not an array")),
    };

    Ok(Task {
        user_id: f.opt_string("userId")?.unwrap_or_default(),
        title: f.string("title")?,
        description: f.opt_string("description")?,
        status,
        original_date: f.timestamp("originalDate")?,
        task_date: f.timestamp("taskDate")?,
        created_at: f.timestamp("createdAt")?,
        completed_at: f.opt_timestamp("completedAt")?,
        important: f.boolean("important")?,
        urgent: f.boolean("urgent")?,
        age_in_days: f.opt_count("ageInDays")?.unwrap_or(0),
        carry_forward_count: f.opt_count("carryForwardCount")?.unwrap_or(0),
        reminder_enabled: f.opt_bool("reminderEnabled", true)?,
        reminder_interval_minutes,
        source,
        category: f.opt_string("category")?,
        tags,
        id,
    })
}

/// Parse an array of records, failing on the first malformed one.
pub fn parse_task_documents(value: &Value) -> Result<Vec<Task>, EngineError> {
    let items = value
        .as_array()
        .ok_or_else(|| EngineError::invalid(None, "records", "is not an array"))?;
    items.iter().map(parse_task_document).collect()
}
