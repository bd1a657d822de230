pub mod date;
pub mod output;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use date::{resolve_entry_date, DateStyle};
use tracing::level_filters::LevelFilter;

use crate::{
    storage::{
        entities::NewTimeEntry,
        entry_storage::{EntryStorage, JsonLinesEntryStorage},
    },
    tracker::Tracker,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::enable_logging,
        runtime::single_thread_runtime,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Daytally", version, long_about = None)]
#[command(about = "Record where your time goes and see how it changes week to week", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(long = "log-filter", global = true, help = "Log level. Falls back to RUST_LOG, then info")]
    log_filter: Option<LevelFilter>,
    #[arg(long, global = true, help = "Print results as json")]
    json: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Record a time entry")]
    Add {
        #[arg(short, long, help = "Start time, for example \"9:00 AM\"")]
        start: String,
        #[arg(short, long, help = "End time, for example \"10:30 AM\". Earlier than start means the next day")]
        end: String,
        #[arg(short, long, help = "Category of the entry, for example \"Productive\"")]
        tag: String,
        #[arg(short = 'm', long, default_value = "", help = "What was done")]
        description: String,
        #[arg(short, long, help = "Day the entry counts towards. Examples are \"2025-03-15\", \"yesterday\". Defaults to today")]
        date: Option<String>,
    },
    #[command(about = "List recorded entries")]
    List {
        #[arg(short, long, help = "Only show entries of this day. Shows everything by default")]
        date: Option<String>,
    },
    #[command(about = "Show time spent per tag on a single day")]
    Daily {
        #[arg(help = "Day to summarize. Defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Compare this week's daily averages per tag with last week's")]
    Weekly {},
    #[command(about = "List tags to choose from")]
    Tags {},
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .clone()
        .map_or_else(create_application_default_path, ensure_dir)?;
    enable_logging(&app_dir, args.log_filter, args.log)?;

    let storage = JsonLinesEntryStorage::new(app_dir.join("entries"))?;
    let tracker = Tracker::new(storage, Box::new(DefaultClock));

    single_thread_runtime()?.block_on(run_command(args, &tracker))
}

async fn run_command<S: EntryStorage>(
    Args {
        commands,
        json,
        date_style,
        ..
    }: Args,
    tracker: &Tracker<S>,
) -> Result<()> {
    let mut stdout = io::stdout();
    let clock = tracker.clock();
    let resolve = |input: Option<String>| {
        resolve_entry_date(
            input.as_deref(),
            clock.today(),
            clock.time().with_timezone(&Local),
            date_style,
        )
    };

    match commands {
        Commands::Add {
            start,
            end,
            tag,
            description,
            date,
        } => {
            let entry = tracker
                .create_entry(NewTimeEntry {
                    start_time: start,
                    end_time: end,
                    date: resolve(date)?,
                    description,
                    tag,
                })
                .await?;
            if json {
                output::print_json(&mut stdout, &entry)
            } else {
                output::print_entries(&mut stdout, &[entry])
            }
        }
        Commands::List { date } => {
            let date = date.map(|v| resolve(Some(v))).transpose()?;
            let entries = tracker.list_entries(date.as_deref()).await?;
            if json {
                output::print_json(&mut stdout, &entries)
            } else {
                output::print_entries(&mut stdout, &entries)
            }
        }
        Commands::Daily { date } => {
            let daily = tracker.daily_analytics(&resolve(date)?).await?;
            if json {
                output::print_json(&mut stdout, &daily)
            } else {
                output::print_daily(&mut stdout, &daily)
            }
        }
        Commands::Weekly {} => {
            let stats = tracker.weekly_analytics().await?;
            if json {
                output::print_json(&mut stdout, &stats)
            } else {
                // Escape codes only when a person is reading
                let colored = stdout.is_terminal();
                output::print_weekly(&mut stdout, &stats, colored)
            }
        }
        Commands::Tags {} => {
            let tags = tracker.available_tags().await?;
            if json {
                output::print_json(&mut stdout, &tags)
            } else {
                output::print_tags(&mut stdout, &tags)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Args, Commands};

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = Args::parse_from([
            "daytally", "add", "-s", "11:00 PM", "-e", "1:00 AM", "-t", "Sleep", "--json",
        ]);

        assert!(args.json);
        match args.commands {
            Commands::Add {
                start,
                end,
                tag,
                description,
                date,
            } => {
                assert_eq!(start, "11:00 PM");
                assert_eq!(end, "1:00 AM");
                assert_eq!(tag, "Sleep");
                assert_eq!(description, "");
                assert_eq!(date, None);
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }
}
