use anyhow::{Context, Result, bail};
use bhoolgaya_core::time::{parse_local_datetime_to_utc, parse_timezone};
use bhoolgaya_core::{
    Calendar, ClassifiedTask, Quadrant, StatusFilter, Task, TaskFilter, UserSettings,
    carry_forward_notification, classify, group_by_quadrant, plan_carry_forward, refresh_ages,
    sort_by_priority, summarize,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

mod config;
mod reminders_cmd;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "bhoolgaya", version, about = "BhoolGaya? task engine CLI")]
struct Cli {
    /// Tasks snapshot (JSON array of task documents). Defaults to ~/.bhoolgaya/tasks.json
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// IANA timezone for day boundaries (overrides config)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Pretend it is this local time ("YYYY-MM-DD HH:MM")
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print tasks in priority order
    List {
        /// all | pending | completed
        #[arg(long, default_value = "all")]
        status: String,

        /// q1 | q2 | q3 | q4
        #[arg(long)]
        quadrant: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive title/description search
        #[arg(long)]
        search: Option<String>,

        /// Print classified tasks as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the Eisenhower matrix
    Matrix {
        /// Include completed tasks (default from config)
        #[arg(long)]
        all: bool,
    },

    /// Counts by status, quadrant and age
    Summary,

    /// Reminder planning and previews
    Remind {
        #[command(subcommand)]
        command: reminders_cmd::RemindersCommand,
    },

    /// Move unfinished tasks from past days onto today
    CarryForward {
        /// Write the moved tasks back into the snapshot file
        #[arg(long, default_value_t = false)]
        apply: bool,
    },

    /// Print today's daily default tasks as JSON
    Defaults {
        #[arg(long, default_value = "")]
        user: String,
    },

    /// Settings file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write default settings to ~/.bhoolgaya/config.toml
    Init,
    /// Print effective settings
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.command {
        Command::Config { .. } => UserSettings::default(),
        _ => config::load_config()?,
    };

    match &cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },

        Command::Defaults { user } => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let tasks = settings.daily_tasks_for(user, &calendar);
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }

        Command::List {
            status,
            quadrant,
            category,
            search,
            json,
        } => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let (_, tasks) = load_tasks(&cli)?;
            let filter = TaskFilter {
                status: status.parse::<StatusFilter>()?,
                quadrant: quadrant.as_deref().map(str::parse::<Quadrant>).transpose()?,
                category: category.clone(),
                search: search.clone(),
                ..Default::default()
            };
            let rows = ordered_view(&tasks, &calendar, |t| filter.matches(t));
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                render::print_list(&rows, &calendar);
            }
        }

        Command::Matrix { all } => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let (_, tasks) = load_tasks(&cli)?;
            let show_completed = *all || settings.show_completed_tasks;
            let rows = ordered_view(&tasks, &calendar, |t| show_completed || t.is_pending());
            let ordered: Vec<Task> = rows.iter().map(|c| c.task.clone()).collect();
            render::print_matrix(&group_by_quadrant(&ordered), &rows, &calendar);
        }

        Command::Summary => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let (_, tasks) = load_tasks(&cli)?;
            let fresh = refresh_ages(&tasks, &calendar);
            render::print_summary(&summarize(&fresh));
        }

        Command::Remind { command } => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let (_, tasks) = load_tasks(&cli)?;
            reminders_cmd::run(command, &tasks, &calendar, &settings)?;
        }

        Command::CarryForward { apply } => {
            let calendar = resolve_calendar(&cli, &settings)?;
            let (path, tasks) = load_tasks(&cli)?;
            let plan = plan_carry_forward(&tasks, &calendar);
            println!("{} task(s) to carry forward to {}", plan.count(), calendar.today());
            for t in &plan.moved {
                println!("- {} (age {}d, carried {}x)", t.title, t.age_in_days, t.carry_forward_count);
            }
            if let Some(n) = carry_forward_notification(plan.count(), &settings, &mut StdRng::from_entropy()) {
                println!("\n{}", n.body);
            }
            if *apply && plan.count() > 0 {
                state::write_updated_tasks(&path, &plan.moved)
                    .with_context(|| format!("updating {}", path.display()))?;
                println!("\nUpdated {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_tasks(cli: &Cli) -> Result<(PathBuf, Vec<Task>)> {
    let path = match &cli.file {
        Some(p) => p.clone(),
        None => state::tasks_path()?,
    };
    if !path.exists() {
        bail!("Tasks file not found: {} (pass --file <path>)", path.display());
    }
    let tasks = state::read_tasks(&path)?;
    Ok((path, tasks))
}

fn resolve_calendar(cli: &Cli, settings: &UserSettings) -> Result<Calendar> {
    let tz = match &cli.tz {
        Some(tz) => parse_timezone(tz)?,
        None => settings.tz()?,
    };
    let now = match &cli.now {
        Some(local) => parse_local_datetime_to_utc(local, tz)?,
        None => Utc::now(),
    };
    Ok(Calendar::new(now, tz))
}

/// Classify against one calendar, keep matching tasks, sort by priority.
fn ordered_view(
    tasks: &[Task],
    calendar: &Calendar,
    keep: impl Fn(&Task) -> bool,
) -> Vec<ClassifiedTask> {
    let fresh: Vec<Task> = classify(tasks, calendar)
        .into_iter()
        .map(|c| c.task)
        .filter(|t| keep(t))
        .collect();
    sort_by_priority(&fresh)
        .into_iter()
        .map(ClassifiedTask::from_task)
        .collect()
}
