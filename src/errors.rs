//! Unified application error type.
//! All modules (store, core, cli, web) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::feedback::{Feedback, Severity};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Worksheet error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Worksheet '{0}' not found")]
    WorksheetNotFound(String),

    #[error("Worksheet '{sheet}' is missing the '{column}' column")]
    MissingColumn { sheet: String, column: String },

    #[error("Invalid cell address: {0}")]
    InvalidCell(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    // ---------------------------
    // Request errors
    // ---------------------------
    #[error("{0}")]
    Rejected(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Request-level failures of the kiosk. None of them is fatal: each one is
/// turned into [`Feedback`] at the request boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KioskError {
    #[error("Please enter your employee ID or name.")]
    EmptyInput,

    #[error("No attendee found for '{0}'. Please check your input.")]
    NotFound(String),

    #[error("Several attendees are named '{0}'. Please use your employee ID.")]
    AmbiguousMatch(String),

    #[error("{0}, you have already checked in.")]
    AlreadyCheckedIn(String),

    #[error("{0}, you have already checked out.")]
    AlreadyCheckedOut(String),

    #[error("This device has already been used to check in. Please do not check in for others.")]
    DeviceAlreadyUsed,

    #[error("Attendee store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Device ID not available yet. Please refresh the page and try again.")]
    FingerprintUnavailable,

    #[error("Check-in has not started yet or has already ended.")]
    WindowClosed,

    #[error("Wrong password.")]
    InvalidPassword,

    #[error("Admin access is disabled: no admin password configured.")]
    AdminDisabled,

    #[error("Admin login required.")]
    NotAuthenticated,
}

impl KioskError {
    pub fn severity(&self) -> Severity {
        match self {
            KioskError::AlreadyCheckedIn(_)
            | KioskError::AlreadyCheckedOut(_)
            | KioskError::AmbiguousMatch(_)
            | KioskError::WindowClosed => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<AppError> for KioskError {
    fn from(e: AppError) -> Self {
        KioskError::StoreUnavailable(e.to_string())
    }
}

impl From<KioskError> for Feedback {
    fn from(e: KioskError) -> Self {
        Feedback::new(e.severity(), e.to_string())
    }
}

impl From<KioskError> for AppError {
    fn from(e: KioskError) -> Self {
        AppError::Rejected(e.to_string())
    }
}
