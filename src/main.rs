mod app;
mod config;
mod domain;
mod error;
mod input;
mod notifications;
mod pomodoro;
mod queries;
mod seed;
mod session;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::TimeRange;
use queries::ProjectFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use store::{Store, Strict};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter
const LOG_ENV: &str = "PROJECTPRO_LOG";

#[derive(Parser)]
#[command(name = "projectpro")]
#[command(about = "A terminal project dashboard with Kanban, calendar, timeline and a Pomodoro timer", long_about = None)]
struct Cli {
    /// Config file to use instead of <data dir>/config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .projectpro directory in the current directory
    Init,
    /// Print dashboard statistics, the day's deadlines and the week around it
    Summary {
        /// Date to summarize (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let data_dir = config::init_data_dir_in(&cwd)?;
            println!("Initialized projectpro directory: {}", data_dir.display());
            println!();
            println!("Settings and logs will now live in this local directory.");
            println!("Run 'projectpro' to open the dashboard.");
            Ok(())
        }
        Some(Commands::Summary { date, json }) => {
            let config = load_config(cli.config.as_ref(), init_stderr_logging)?;

            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => chrono::Local::now().date_naive(),
            };
            print_summary(&build_store(&config), date, json)
        }
        None => run_tui(cli.config),
    }
}

fn parse_date(input: &str) -> error::Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| error::Error::InvalidDate(input.to_string()))
}

fn config_path(custom: Option<&PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => Ok(path.clone()),
        None => Ok(config::config_file()?),
    }
}

/// Load the config and start logging with it. A bad config file falls
/// back to the defaults with a warning once the subscriber is up.
fn load_config<F>(custom: Option<&PathBuf>, init_logging: F) -> Result<Config>
where
    F: FnOnce(&Config) -> Result<()>,
{
    let path = config_path(custom)?;
    let (config, fallback) = Config::load_or_default(&path);
    init_logging(&config)?;
    if let Some(err) = fallback {
        warn!(error = %err, path = %path.display(), "using default config");
    }
    Ok(config)
}

/// The seeded store, with the reference policy the config asks for
fn build_store(config: &Config) -> Store {
    let store = seed::mock_store();
    if config.strict_references {
        store.with_policy(Strict)
    } else {
        store
    }
}

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// CLI subcommands log to stderr
fn init_stderr_logging(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// The TUI owns the terminal, so logs go to a file in the data directory
fn init_file_logging(config: &Config) -> Result<()> {
    let log_path = config::log_file()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    info!(log = %log_path.display(), "logging to file");
    Ok(())
}

fn print_summary(store: &Store, date: NaiveDate, json: bool) -> Result<()> {
    let stats = queries::dashboard_stats(store);
    let events = queries::events_on(store, date);
    let week = queries::filter_by_range(
        queries::timeline_events(store, ProjectFilter::All),
        TimeRange::Week,
        date,
    );

    if json {
        let summary = serde_json::json!({
            "date": date,
            "stats": stats,
            "events": events,
            "week": week,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Summary for {}", date.format("%A %d %B %Y"));
    println!();
    println!("Projects:        {}", stats.total_projects);
    println!("  completed:     {}", stats.completed_projects);
    println!("  in progress:   {}", stats.in_progress_projects);
    println!("  avg progress:  {}%", stats.average_progress);
    println!();

    println!("Due on {}:", date);
    if events.is_empty() {
        println!("  nothing");
    }
    for event in &events {
        let kind = match event.kind {
            queries::EventKind::Project => "project",
            queries::EventKind::Task => "task",
        };
        println!("  [{}] {}", kind, event.title);
    }
    println!();

    println!("Week of {} (±7 days):", date);
    for event in &week {
        let when = event
            .date
            .map_or_else(|| "no date".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let marker = match event.date {
            Some(d) if queries::is_overdue(d, date) && event.progress < 100 => " (overdue)",
            Some(d) if queries::is_today(d, date) => " (today)",
            _ => "",
        };
        println!(
            "  {}  {:<28} {:<12} {:>3}%{}",
            when,
            event.title,
            event.status.label(),
            event.progress,
            marker
        );
    }
    Ok(())
}

fn run_tui(custom_config: Option<PathBuf>) -> Result<()> {
    // Ensure the data directory exists
    let data_dir = config::ensure_data_dir()?;
    let config_path = config_path(custom_config.as_ref())?;
    let config = load_config(Some(&config_path), init_file_logging)?;

    eprintln!("Using projectpro directory: {}", data_dir.display());
    info!(
        config = %config_path.display(),
        strict = config.strict_references,
        "starting"
    );

    let store = build_store(&config);
    let mut app = AppState::new(store, config, Some(config_path));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop the timer so nothing fires after the views are gone
    app.shutdown();

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration(app.config.tick_ms);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Tick timers
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(matches!(
            parse_date("15/03/2024"),
            Err(error::Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_cli_parses_summary() {
        let cli = Cli::parse_from(["projectpro", "summary", "--date", "2024-02-20", "--json"]);
        match cli.command {
            Some(Commands::Summary { date, json }) => {
                assert_eq!(date.as_deref(), Some("2024-02-20"));
                assert!(json);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::parse_from(["projectpro", "--config", "/tmp/pp.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pp.json")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_build_store_honours_strict_references() {
        let orphan = || domain::NewTask::new("Orphan").project(77);

        let mut store = build_store(&Config::default());
        assert!(store.submit_task(orphan()).is_ok());

        let config = Config {
            strict_references: true,
            ..Config::default()
        };
        let mut store = build_store(&config);
        assert!(matches!(
            store.submit_task(orphan()),
            Err(error::Error::UnknownProject(77))
        ));
    }

    #[test]
    fn test_print_summary_text_and_json() {
        let store = seed::mock_store();
        let date = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        print_summary(&store, date, false).unwrap();
        print_summary(&store, date, true).unwrap();
    }
}
