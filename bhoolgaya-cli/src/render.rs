//! Plain-text rendering for terminal output.

use bhoolgaya_core::time::relative_date_label;
use bhoolgaya_core::{
    AgeCategory, Calendar, ClassifiedTask, QuadrantGroups, ReminderIntent, TaskSummary,
};

pub fn task_line(c: &ClassifiedTask, calendar: &Calendar) -> String {
    let t = &c.task;
    let check = if t.is_pending() { "[ ]" } else { "[x]" };
    let badge = c
        .badge
        .map(|b| format!(" {} {}", b.emoji, b.label))
        .unwrap_or_default();
    let carried = if t.carry_forward_count > 0 {
        format!(" | carried {}x", t.carry_forward_count)
    } else {
        String::new()
    };
    format!(
        "{check} [{}] {}{badge} | {}{carried}",
        c.quadrant,
        t.title,
        relative_date_label(t.task_date, calendar),
    )
}

pub fn print_list(rows: &[ClassifiedTask], calendar: &Calendar) {
    if rows.is_empty() {
        println!("(no tasks)");
        return;
    }
    for c in rows {
        println!("{}", task_line(c, calendar));
    }
}

pub fn print_matrix(groups: &QuadrantGroups, rows: &[ClassifiedTask], calendar: &Calendar) {
    for (q, bucket) in groups.iter() {
        let info = q.info();
        println!("## {} {} ({})", q.as_str().to_uppercase(), info.name, info.label);
        if bucket.is_empty() {
            println!("(empty)\n");
            continue;
        }
        for t in bucket {
            if let Some(c) = rows.iter().find(|c| c.task.id == t.id) {
                println!("- {}", task_line(c, calendar));
            }
        }
        println!();
    }
}

pub fn print_summary(s: &TaskSummary) {
    println!("Tasks: {} total | {} pending | {} completed", s.total, s.pending, s.completed);
    println!("Carried forward at least once: {}", s.carried_forward);
    println!("\nPending by quadrant:");
    for (q, n) in &s.pending_by_quadrant {
        println!("- {} {}: {}", q.as_str().to_uppercase(), q.info().name, n);
    }
    println!("\nPending by age:");
    for (cat, n) in &s.pending_by_age {
        println!("- {} {}: {}", cat.emoji(), cat.label(), n);
    }
    if s.critical() > 0 {
        println!("\n{} critical task(s) need attention.", s.critical());
    }
}

pub fn print_reminders(intents: &[ReminderIntent], calendar: &Calendar) {
    if intents.is_empty() {
        println!("No reminders to schedule.");
        return;
    }
    for ri in intents {
        let tag = match ri.age_category {
            AgeCategory::Today => String::new(),
            other => format!(" ({})", other.label()),
        };
        println!(
            "{} | {:?} | {}{} | {}",
            calendar.local(ri.send_at_utc).format("%Y-%m-%d %H:%M"),
            ri.priority,
            ri.title,
            tag,
            ri.dedupe_key
        );
    }
}
