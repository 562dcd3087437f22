//! Lookup and state transitions.
//!
//! [`decide`] is pure: it finds the attendee and checks the guard conditions
//! against a table snapshot. [`process`] applies the decision through a
//! [`Repository`] and maps store-level outcomes back to request errors.

use crate::core::guard::device_in_use;
use crate::errors::KioskError;
use crate::models::attendee::{Attendee, AttendeeTable};
use crate::models::feedback::Feedback;
use crate::models::mode::Mode;
use crate::store::{Repository, WriteOutcome};
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    CheckedIn {
        employee_id: String,
        name: String,
        table_no: String,
        at: String,
    },
    CheckedOut {
        employee_id: String,
        name: String,
        at: String,
    },
}

impl Outcome {
    pub fn employee_id(&self) -> &str {
        match self {
            Outcome::CheckedIn { employee_id, .. } | Outcome::CheckedOut { employee_id, .. } => {
                employee_id
            }
        }
    }

    pub fn feedback(&self) -> Feedback {
        match self {
            Outcome::CheckedIn { name, table_no, .. } => {
                let table = if table_no.is_empty() { "-" } else { table_no };
                Feedback::success(format!(
                    "Check-in successful! Welcome {name}, your table number is {table}."
                ))
            }
            Outcome::CheckedOut { name, .. } => Feedback::success(format!(
                "Check-out successful, {name}. Have a nice day!"
            )),
        }
    }
}

/// Case-insensitive exact match on the employee id (first wins), then on the
/// name (must be unique).
pub fn find_attendee<'a>(
    table: &'a AttendeeTable,
    identifier: &str,
) -> Result<&'a Attendee, KioskError> {
    let needle = identifier.trim().to_lowercase();
    if needle.is_empty() {
        return Err(KioskError::EmptyInput);
    }

    if let Some(a) = table
        .rows
        .iter()
        .find(|a| a.employee_id.to_lowercase() == needle)
    {
        return Ok(a);
    }

    let mut by_name = table
        .rows
        .iter()
        .filter(|a| a.name.trim().to_lowercase() == needle);

    match (by_name.next(), by_name.next()) {
        (Some(a), None) => Ok(a),
        (Some(_), Some(_)) => Err(KioskError::AmbiguousMatch(identifier.trim().to_string())),
        (None, _) => Err(KioskError::NotFound(identifier.trim().to_string())),
    }
}

/// Resolve the attendee and verify the transition is allowed in `mode`.
pub fn decide<'a>(
    identifier: &str,
    mode: Mode,
    fingerprint: &str,
    table: &'a AttendeeTable,
) -> Result<&'a Attendee, KioskError> {
    let attendee = find_attendee(table, identifier)?;

    match mode {
        Mode::CheckIn => {
            if attendee.is_checked_in() {
                return Err(KioskError::AlreadyCheckedIn(attendee.name.clone()));
            }
            // a check-in without a bound device would escape the guard
            if table.device_binding && fingerprint.trim().is_empty() {
                return Err(KioskError::FingerprintUnavailable);
            }
            if device_in_use(table, fingerprint, Some(attendee.row)) {
                return Err(KioskError::DeviceAlreadyUsed);
            }
        }
        Mode::CheckOut => {
            if attendee.is_checked_out() {
                return Err(KioskError::AlreadyCheckedOut(attendee.name.clone()));
            }
        }
    }

    Ok(attendee)
}

/// Decide and write. `table` must be a fresh read of `store`.
pub fn process(
    store: &mut dyn Repository,
    identifier: &str,
    mode: Mode,
    fingerprint: &str,
    table: &AttendeeTable,
    now: NaiveDateTime,
) -> Result<Outcome, KioskError> {
    let attendee = decide(identifier, mode, fingerprint, table)?;
    let at = format_timestamp(now);

    match mode {
        Mode::CheckIn => match store.record_check_in(attendee, &at, fingerprint.trim())? {
            WriteOutcome::Applied => Ok(Outcome::CheckedIn {
                employee_id: attendee.employee_id.clone(),
                name: attendee.name.clone(),
                table_no: attendee.table_no.clone(),
                at,
            }),
            WriteOutcome::AlreadyRecorded => {
                Err(KioskError::AlreadyCheckedIn(attendee.name.clone()))
            }
            WriteOutcome::DeviceTaken => Err(KioskError::DeviceAlreadyUsed),
        },
        Mode::CheckOut => match store.record_check_out(attendee, &at)? {
            WriteOutcome::AlreadyRecorded => {
                Err(KioskError::AlreadyCheckedOut(attendee.name.clone()))
            }
            WriteOutcome::Applied => Ok(Outcome::CheckedOut {
                employee_id: attendee.employee_id.clone(),
                name: attendee.name.clone(),
                at,
            }),
            WriteOutcome::DeviceTaken => Err(KioskError::StoreUnavailable(format!(
                "unexpected device conflict while checking out {}",
                attendee.employee_id
            ))),
        },
    }
}
