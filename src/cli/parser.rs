use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rDashLog
/// Track delivery work sessions, earnings and waiting time with SQLite
#[derive(Parser)]
#[command(
    name = "rdashlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A delivery-driver CLI: track sessions, breaks, earnings, hourly rate and waiting time using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration fields with default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a work session
    Start {
        #[arg(long = "at", help = "Start time (YYYY-MM-DD HH:MM[:SS] or HH:MM), default now")]
        at: Option<String>,
    },

    /// Start or end a break in the active session
    Break {
        #[arg(long = "at", help = "Toggle time (YYYY-MM-DD HH:MM[:SS] or HH:MM), default now")]
        at: Option<String>,
    },

    /// End the active work session
    End {
        #[arg(long = "at", help = "End time (YYYY-MM-DD HH:MM[:SS] or HH:MM), default now")]
        at: Option<String>,
    },

    /// Show the live summary of the active session
    Status {
        #[arg(long = "last", help = "Show the most recent session even if it is closed")]
        last: bool,
    },

    /// Log a delivery in the active (or given) session
    Add {
        #[arg(long = "earnings", help = "Reward for the delivery", allow_negative_numbers = true)]
        earnings: f64,

        #[arg(
            long = "duration",
            help = "Time spent on the delivery, in minutes",
            allow_negative_numbers = true
        )]
        duration: i64,

        #[arg(long = "service", help = "Delivery platform (default from config)")]
        service: Option<String>,

        #[arg(
            long = "tip",
            default_value_t = 0.0,
            help = "Tip received",
            allow_negative_numbers = true
        )]
        tip: f64,

        #[arg(long = "at", help = "Delivery start (YYYY-MM-DD HH:MM[:SS] or HH:MM), default now")]
        at: Option<String>,

        #[arg(long = "memo", help = "Free-text note (max 500 chars)")]
        memo: Option<String>,

        #[arg(long = "session", help = "Target session id instead of the active one")]
        session: Option<i64>,
    },

    /// List sessions with their totals
    List {
        #[arg(long, short, help = "today | week | month | all | YYYY | YYYY-MM | YYYY-MM-DD | A:B")]
        period: Option<String>,

        #[arg(long = "details", help = "Show deliveries under each session")]
        details: bool,
    },

    /// Show one session: breaks, deliveries and waiting phases
    Show {
        /// Session id
        id: i64,
    },

    /// Delete a delivery (or a whole session with --session)
    Del {
        #[arg(long = "session", help = "Treat ID as a session id and delete the whole session")]
        session: bool,

        /// Delivery id (or session id with --session)
        id: i64,
    },

    /// Earnings, working time and hourly rate for a period
    Stats {
        #[arg(long, short, help = "today | week | month | all | YYYY | YYYY-MM | YYYY-MM-DD | A:B")]
        period: Option<String>,

        #[arg(long = "by-service", help = "Break totals down by delivery service")]
        by_service: bool,
    },

    /// Import a GPS route (CSV) or list stored drive logs
    Route {
        #[arg(
            long,
            value_name = "CSV",
            required_unless_present = "list",
            help = "CSV with columns timestamp,latitude,longitude[,speed]"
        )]
        file: Option<String>,

        #[arg(long = "session", help = "Attach the drive log to this session")]
        session: Option<i64>,

        #[arg(long = "list", conflicts_with = "file", help = "List stored drive logs")]
        list: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export deliveries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by period (same grammar as --period)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
