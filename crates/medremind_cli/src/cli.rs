use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "medremind")]
#[command(version = medremind_core::core_version())]
#[command(about = "Daily medicine reminders from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a medicine with a daily reminder time
    Add(AddArguments),
    /// List stored medicines
    List(ListArguments),
    /// Remove the medicine at a store index
    Remove {
        /// Index as printed by `list`
        index: usize,
    },
    /// Watch for due reminders until Ctrl-C
    Watch,
    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct AddArguments {
    /// Medicine name
    #[arg(long)]
    pub name: String,

    /// Dosage, e.g. "1 tablet"
    #[arg(long)]
    pub dosage: String,

    /// Local time of day as HH:MM
    #[arg(long, value_parser = parse_time_of_day)]
    pub at: NaiveTime,
}

#[derive(Args, Debug, Clone)]
pub struct ListArguments {
    /// Only medicines scheduled today
    #[arg(long, default_value_t = false)]
    pub today: bool,
}

fn parse_time_of_day(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| format!("expected HH:MM, got `{raw}`"))
}
