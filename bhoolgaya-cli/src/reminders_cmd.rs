use anyhow::Result;
use bhoolgaya_core::{
    Calendar, Task, UserSettings, free_mode_notification, notification_for_task, project_all,
    refresh_ages, sort_by_priority,
};
use clap::Subcommand;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::render::print_reminders;

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// Project upcoming reminder slots for pending tasks
    Plan {
        /// Max reminders to print
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Print intents as JSON lines instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the notification each pending task would get right now
    Preview {
        /// Seed for message selection (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(cmd: &RemindersCommand, tasks: &[Task], calendar: &Calendar, settings: &UserSettings) -> Result<()> {
    match cmd {
        RemindersCommand::Plan { limit, json } => plan(tasks, calendar, settings, *limit, *json),
        RemindersCommand::Preview { seed } => preview(tasks, calendar, settings, *seed),
    }
}

fn plan(tasks: &[Task], calendar: &Calendar, settings: &UserSettings, limit: usize, json: bool) -> Result<()> {
    let intents = project_all(tasks, calendar, settings);
    tracing::info!(total = intents.len(), "projected reminders");
    let shown: Vec<_> = intents.into_iter().take(limit).collect();

    if json {
        for ri in &shown {
            println!("{}", serde_json::to_string(ri)?);
        }
    } else {
        print_reminders(&shown, calendar);
    }
    Ok(())
}

fn preview(tasks: &[Task], calendar: &Calendar, settings: &UserSettings, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let ordered = sort_by_priority(&refresh_ages(tasks, calendar));

    if let Some(n) = free_mode_notification(&ordered, settings, &mut rng) {
        println!("{}\n{}", n.title, n.body);
        return Ok(());
    }

    let mut any = false;
    for t in &ordered {
        if let Some(n) = notification_for_task(t, calendar, settings, &mut rng) {
            any = true;
            println!("[{:?}] {} | {} (vibrate {}ms)", n.priority, n.title, n.body, n.vibration_ms);
        }
    }
    if !any {
        println!("Nothing to notify.");
    }
    Ok(())
}
