//! Command-line front end for medremind.
//!
//! # Responsibility
//! - Drive the medicine store and reminder watcher without the Flutter shell.
//! - Resolve configuration from `MEDREMIND_*` environment variables.

mod cli;

use chrono::{DateTime, Local, NaiveTime, Utc};
use clap::Parser;
use cli::{AddArguments, Cli, Command, ListArguments};
use log::{info, warn};
use medremind_core::logging::init_logging_from_config;
use medremind_core::{
    load_preferences, AddOutcome, ConfigError, CoreConfig, LogNotificationBackend, MedicineForm,
    MedicineRecord, MedicineService, MedicineStore, NotificationBackend, NotificationRequest,
    Notifier, NotifyError, Reminder, ReminderCollection, ReminderFeed, ReminderMatcher,
    ReminderWatcher, RepoError, ScheduleOutcome, SqliteKeyValueRepository, StoreError,
    SystemClock,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

type Store = MedicineStore<SqliteKeyValueRepository>;

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Repo(RepoError),
    Store(StoreError),
    Invalid(String),
    Signal(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Repo(err) => write!(f, "database error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Invalid(message) => write!(f, "{message}"),
            Self::Signal(err) => write!(f, "failed to wait for Ctrl-C: {err}"),
        }
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Prints reminders to stdout, then logs them.
struct ConsoleBackend;

impl NotificationBackend for ConsoleBackend {
    fn request_permission(&self) -> bool {
        true
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        println!(
            "[{:02}:{:02}] {} {}",
            request.trigger.hour, request.trigger.minute, request.title, request.body
        );
        LogNotificationBackend.post(request)
    }
}

/// Reloads the store before each tick so records added from another
/// process are picked up.
struct ReloadingFeed {
    store: Arc<Mutex<Store>>,
}

impl ReminderFeed for ReloadingFeed {
    fn current_reminders(&self) -> Vec<Reminder> {
        let mut store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = store.load() {
            warn!("event=reminder_feed module=cli status=error error_code=reload_failed error={err}");
        }
        store.reminders()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Version = cli.command {
        println!("medremind_core version={}", medremind_core::core_version());
        return Ok(());
    }

    let config = CoreConfig::from_env()?;
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }
    let mut store = open_store(&config)?;

    match cli.command {
        Command::Add(args) => add(&mut store, args),
        Command::List(args) => {
            list(&store, &args);
            Ok(())
        }
        Command::Remove { index } => {
            let removed = store.remove_at(index)?;
            println!("removed {} ({})", removed.name, removed.dosage);
            Ok(())
        }
        Command::Watch => watch_reminders(store, &config).await,
        Command::Version => Ok(()),
    }
}

fn open_store(config: &CoreConfig) -> Result<Store, CliError> {
    let repo = SqliteKeyValueRepository::open(&config.db_path)?;
    let mut store = MedicineStore::new(repo);
    store.load()?;
    Ok(store)
}

fn add(store: &mut Store, args: AddArguments) -> Result<(), CliError> {
    let schedule_time = today_at(args.at)
        .ok_or_else(|| CliError::Invalid(format!("{} does not exist today", args.at)))?;
    let service = MedicineService::new(SystemClock, Notifier::new(ConsoleBackend));
    let form = MedicineForm {
        name: args.name,
        dosage: args.dosage,
        schedule_time: Some(schedule_time),
    };

    match service.add_medicine(store, form)? {
        AddOutcome::Invalid(report) => {
            let details: Vec<String> = report
                .field_errors()
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect();
            Err(CliError::Invalid(details.join("; ")))
        }
        AddOutcome::Added {
            index,
            confirmation,
            ..
        } => {
            if confirmation != Some(ScheduleOutcome::Scheduled) {
                warn!("event=medicine_add module=cli status=partial reason=confirmation_not_scheduled");
            }
            println!("added at index {index}");
            Ok(())
        }
    }
}

fn list(store: &Store, args: &ListArguments) {
    let entries: Vec<(usize, &MedicineRecord)> = if args.today {
        store.medicines_on(Local::now().date_naive())
    } else {
        store.medicines().iter().enumerate().collect()
    };
    if entries.is_empty() {
        println!("no medicines");
        return;
    }
    for (index, record) in entries {
        let local = record.schedule_time.with_timezone(&Local);
        println!(
            "{index:>3}  {}  {}  {}",
            local.format("%H:%M"),
            record.name,
            record.dosage
        );
    }
}

async fn watch_reminders(store: Store, config: &CoreConfig) -> Result<(), CliError> {
    let preferences = load_preferences(store.repository())?;
    let (_prefs_tx, prefs_rx) = watch::channel(preferences);
    let feed = ReloadingFeed {
        store: Arc::new(Mutex::new(store)),
    };

    let watcher = ReminderWatcher::spawn(
        feed,
        ReminderMatcher::new(SystemClock),
        Notifier::new(ConsoleBackend),
        prefs_rx,
        config.reminder_interval,
    );
    println!(
        "watching for reminders every {}s; press Ctrl-C to stop",
        config.reminder_interval.as_secs()
    );

    let waited = tokio::signal::ctrl_c().await;
    let ticks = watcher.shutdown().await;
    info!("event=cli_watch module=cli status=stopped ticks={ticks}");
    waited.map_err(CliError::Signal)
}

fn today_at(time: NaiveTime) -> Option<DateTime<Utc>> {
    Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}
