use crate::config::Backend;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rcheckin
/// Event check-in / check-out kiosk backed by a spreadsheet workbook or SQLite
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event check-in kiosk: look up attendees, guard devices and record check-in/out times",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of ~/.rcheckin/rcheckin.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the store location (workbook directory or SQLite file)
    #[arg(global = true, long = "store", value_name = "PATH")]
    pub store: Option<String>,

    /// Override the store backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<Backend>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration file and create the store
    Init {
        #[arg(long = "admin-password", help = "Admin password stored in the configuration")]
        admin_password: Option<String>,
    },

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
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

    /// Test the store connection and list worksheets/tables
    Check,

    /// Provision attendees from a roster CSV (EmployeeID,Name,TableNo)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Run one check-in / check-out request in the current mode
    Process {
        /// Employee ID or name
        identifier: String,

        #[arg(long = "device", help = "Device fingerprint to bind (default: a fresh operator id)")]
        device: Option<String>,

        /// Pretend the clock shows HH:MM[:SS] (window checks only)
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// List attendees
    List {
        #[arg(long, conflicts_with_all = ["checked_in", "checked_out"], help = "Only attendees not checked in")]
        pending: bool,

        #[arg(long = "checked-in", conflicts_with = "checked_out", help = "Only attendees checked in and not yet out")]
        checked_in: bool,

        #[arg(long = "checked-out", help = "Only attendees checked out")]
        checked_out: bool,
    },

    /// Show mode, window and attendance counters
    Status,

    /// Print or update the event settings
    Settings {
        #[arg(long, help = "Check-in or Check-out")]
        mode: Option<String>,

        #[arg(long, help = "Window start (HH:MM)")]
        start: Option<String>,

        #[arg(long, help = "Window end (HH:MM)")]
        end: Option<String>,

        #[arg(long, help = "Admin password (required to update)")]
        password: Option<String>,
    },

    /// Print the operation journal
    Log {
        #[arg(long = "print", help = "Print rows from the operation journal")]
        print: bool,
    },

    /// Export the attendance report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Run the HTTP kiosk
    Serve {
        #[arg(long, value_name = "ADDR", help = "Listen address (default: from config)")]
        bind: Option<String>,
    },
}
