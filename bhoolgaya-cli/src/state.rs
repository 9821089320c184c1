use anyhow::{Context, Result};
use bhoolgaya_core::{Task, parse_task_documents};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `$BHOOLGAYA_HOME`, else `~/.bhoolgaya`.
pub fn bhoolgaya_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BHOOLGAYA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bhoolgaya"))
}

pub fn ensure_bhoolgaya_home() -> Result<PathBuf> {
    let dir = bhoolgaya_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_path() -> Result<PathBuf> {
    Ok(ensure_bhoolgaya_home()?.join("tasks.json"))
}

/// Read a JSON array of task documents exported from the store.
pub fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    let tasks = parse_task_documents(&value).with_context(|| format!("validate {}", path.display()))?;
    tracing::debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
    Ok(tasks)
}

/// Fields a carry-forward rewrites; everything else in a document is left as read.
const CARRY_FORWARD_FIELDS: [&str; 3] = ["taskDate", "carryForwardCount", "ageInDays"];

/// Write carry-forward results back into the snapshot, touching only the moved documents.
pub fn write_updated_tasks(path: &Path, updated: &[Task]) -> Result<()> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut docs: Value =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    let items = docs
        .as_array_mut()
        .with_context(|| format!("{} is not a JSON array", path.display()))?;

    let by_id: HashMap<&str, &Task> = updated.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut touched = 0usize;

    for doc in items.iter_mut() {
        let Some(obj) = doc.as_object_mut() else { continue };
        let Some(task) = obj.get("id").and_then(Value::as_str).and_then(|id| by_id.get(id)) else {
            continue;
        };
        let task_date = timestamp_like(obj.get("taskDate"), task.task_date);
        let [date_key, count_key, age_key] = CARRY_FORWARD_FIELDS;
        obj.insert(date_key.to_string(), task_date);
        obj.insert(count_key.to_string(), json!(task.carry_forward_count));
        obj.insert(age_key.to_string(), json!(task.age_in_days));
        touched += 1;
    }

    let out = serde_json::to_string_pretty(&docs)?;
    fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(touched, path = %path.display(), "wrote snapshot");
    Ok(())
}

/// Encode `at` in the same shape as the timestamp it replaces.
fn timestamp_like(existing: Option<&Value>, at: DateTime<Utc>) -> Value {
    let (secs, nanos) = (at.timestamp(), at.timestamp_subsec_nanos());
    match existing.and_then(Value::as_object) {
        Some(m) if m.contains_key("_seconds") => json!({"_seconds": secs, "_nanoseconds": nanos}),
        Some(m) if m.contains_key("seconds") => json!({"seconds": secs, "nanoseconds": nanos}),
        _ => Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_file(name: &str, contents: &Value) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bhoolgaya-state-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tasks.json");
        fs::write(&path, serde_json::to_string_pretty(contents).unwrap()).unwrap();
        path
    }

    fn store_docs() -> Value {
        json!([
            {
                "id": "a", "title": "Reply on WhatsApp", "status": "pending",
                "originalDate": "2026-02-06T09:00:00Z", "taskDate": {"seconds": 1770368400, "nanoseconds": 0},
                "createdAt": "2026-02-06T09:00:00Z", "important": false, "urgent": true,
                "remoteAllowed": false, "sourceReference": "wa-123", "confidenceScore": 0.9,
                "preferredLocation": "library", "reminderInterval": "custom", "customReminderMinutes": 45
            },
            {
                "id": "b", "title": "Untouched", "status": "pending",
                "originalDate": "2026-02-08T09:00:00Z", "taskDate": "2026-02-08T09:00:00Z",
                "createdAt": "2026-02-08T09:00:00Z", "important": true, "urgent": true,
                "sourceReference": "manual-7", "reminderInterval": "custom", "customReminderMinutes": 20
            }
        ])
    }

    #[test]
    fn foreign_store_fields_survive_a_write_with_nothing_moved() {
        let docs = store_docs();
        let path = scratch_file("noop", &docs);

        write_updated_tasks(&path, &[]).unwrap();
        let back: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, docs);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn moved_tasks_only_change_carry_forward_fields() {
        let docs = store_docs();
        let path = scratch_file("moved", &docs);

        let tasks = read_tasks(&path).unwrap();
        let mut moved = tasks[0].clone();
        moved.task_date = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
        moved.carry_forward_count = 1;
        moved.age_in_days = 2;

        write_updated_tasks(&path, &[moved]).unwrap();
        let back: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        let a = &back[0];
        assert_eq!(a["taskDate"], json!({"seconds": 1770508800, "nanoseconds": 0}));
        assert_eq!(a["carryForwardCount"], 1);
        assert_eq!(a["ageInDays"], 2);
        let foreign = [
            "remoteAllowed",
            "sourceReference",
            "confidenceScore",
            "preferredLocation",
            "reminderInterval",
            "customReminderMinutes",
        ];
        for key in foreign {
            assert_eq!(a[key], docs[0][key], "{key} changed");
        }
        assert_eq!(back[1], docs[1]);

        let reread = read_tasks(&path).unwrap();
        assert_eq!(reread[0].reminder_interval_minutes, 45);
        assert_eq!(reread[0].carry_forward_count, 1);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
