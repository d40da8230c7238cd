use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::utils::time::parse_instant_arg;
use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for punchclock
/// Employee punch clock: record clock-in/out and breaks, review worked hours
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee punch clock: record clock-in/out and breaks, compute worked hours and reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend the current instant is this RFC 3339 timestamp
    #[arg(global = true, long = "now", hide = true, value_name = "RFC3339")]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The "as of" instant for this run: `--now` or the local clock.
    pub fn as_of(&self) -> AppResult<DateTime<FixedOffset>> {
        match &self.now {
            Some(s) => parse_instant_arg(s),
            None => Ok(Local::now().fixed_offset()),
        }
    }
}

/// Employee metadata options shared by `employee add` and `employee edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeArgs {
    #[arg(long, help = "Full name")]
    pub name: Option<String>,

    #[arg(long, help = "E-mail address (unique)")]
    pub email: Option<String>,

    #[arg(long, help = "Role: employee, manager or admin")]
    pub role: Option<String>,

    #[arg(long, help = "Department")]
    pub department: Option<String>,

    #[arg(long, help = "Work card number")]
    pub ctps: Option<String>,

    #[arg(long = "admission", value_name = "YYYY-MM-DD", help = "Admission date")]
    pub admission_date: Option<String>,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register a new employee
    Add {
        /// Employee id (unique, e.g. badge number)
        id: String,

        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// Change an employee's metadata (an empty value clears optional fields)
    Edit {
        id: String,

        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// List employees
    List {
        #[arg(long, help = "Only employees with this role")]
        role: Option<String>,
    },

    /// Delete an employee and all of their punches
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit or upgrade)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Add missing fields to the configuration file")]
        check: bool,

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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Record a punch: clock-in, clock-out, break-start or break-end
    Punch {
        /// Employee id
        employee: String,

        /// Punch kind (aliases: in, out, break, resume)
        kind: String,

        #[arg(
            long = "at",
            value_name = "TIME",
            help = "When the punch happened: HH:MM, 'YYYY-MM-DD HH:MM' or RFC 3339 (default: now)"
        )]
        at: Option<String>,

        #[arg(long, short = 'f', help = "Record the punch even if it does not follow the current state")]
        force: bool,
    },

    /// Show where an employee stands right now
    Status {
        /// Employee id
        employee: String,
    },

    /// Show one day of an employee: intervals, breaks, hours and status
    Day {
        /// Employee id
        employee: String,

        /// Day to show (YYYY-MM-DD, default: today)
        date: Option<String>,

        #[arg(long = "details", help = "Also list the raw punches")]
        details: bool,
    },

    /// List the days of a period for one employee
    List {
        /// Employee id
        employee: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "events", help = "List raw punches instead of days")]
        events: bool,
    },

    /// Hours report across employees
    Report {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, short = 'e', help = "Only this employee")]
        employee: Option<String>,

        #[arg(long = "min-hours", help = "Only employees with at least this many hours")]
        min_hours: Option<f64>,

        #[arg(long = "max-hours", help = "Only employees with at most this many hours")]
        max_hours: Option<f64>,

        #[arg(long = "all-roles", help = "Include managers and admins")]
        all_roles: bool,
    },

    /// Delete punches: one by id, or all punches of an employee on a date
    Del {
        #[arg(long = "punch", value_name = "ID", conflicts_with_all = ["employee", "date"])]
        punch: Option<i64>,

        /// Employee id
        #[arg(requires = "date")]
        employee: Option<String>,

        /// Date (YYYY-MM-DD)
        date: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export report summaries or a timesheet
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day, a custom range, or 'all'"
        )]
        range: Option<String>,

        #[arg(long, short = 'e', help = "Only this employee (required with --timesheet)")]
        employee: Option<String>,

        #[arg(long, short = 't', help = "Export the per-day timesheet of --employee")]
        timesheet: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
