use crate::models::attendee::Attendee;
use crate::models::roster::RosterEntry;
use crate::models::settings::EventSettings;
use crate::store::WriteOutcome;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

fn map_attendee(row: &Row) -> Result<Attendee> {
    let id: i64 = row.get("id")?;
    Ok(Attendee {
        row: id as usize,
        employee_id: row.get::<_, String>("employee_id")?.trim().to_string(),
        name: row.get("name")?,
        table_no: row.get("table_no")?,
        check_in_time: row.get("check_in_time")?,
        check_out_time: row.get("check_out_time")?,
        device_fingerprint: row.get::<_, String>("device_fingerprint")?.trim().to_string(),
    })
}

pub fn load_attendees(conn: &Connection) -> Result<Vec<Attendee>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, employee_id, name, table_no, check_in_time, check_out_time, device_fingerprint
         FROM attendees
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_attendee)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

/// Conditional check-in: only lands if the row is still not checked in.
pub fn check_in(
    conn: &Connection,
    id: usize,
    timestamp: &str,
    fingerprint: &str,
) -> Result<WriteOutcome> {
    let res = conn.execute(
        "UPDATE attendees
         SET check_in_time = ?1, device_fingerprint = ?2
         WHERE id = ?3 AND check_in_time = ''",
        params![timestamp, fingerprint, id as i64],
    );

    match res {
        Ok(0) => Ok(WriteOutcome::AlreadyRecorded),
        Ok(_) => Ok(WriteOutcome::Applied),
        Err(e) if is_constraint_violation(&e) => Ok(WriteOutcome::DeviceTaken),
        Err(e) => Err(e),
    }
}

/// Conditional check-out: only lands if the row is still not checked out.
pub fn check_out(conn: &Connection, id: usize, timestamp: &str) -> Result<WriteOutcome> {
    let changed = conn.execute(
        "UPDATE attendees SET check_out_time = ?1 WHERE id = ?2 AND check_out_time = ''",
        params![timestamp, id as i64],
    )?;

    Ok(if changed == 0 {
        WriteOutcome::AlreadyRecorded
    } else {
        WriteOutcome::Applied
    })
}

pub fn load_settings(conn: &Connection) -> Result<EventSettings> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT mode, start_time, end_time FROM settings WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    Ok(match row {
        Some((mode, start, end)) => EventSettings::from_strings_or_default(&mode, &start, &end),
        None => EventSettings::default(),
    })
}

pub fn save_settings(conn: &Connection, settings: &EventSettings) -> Result<()> {
    let row = settings.to_row();
    conn.execute(
        "INSERT INTO settings (id, mode, start_time, end_time) VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            mode = excluded.mode,
            start_time = excluded.start_time,
            end_time = excluded.end_time",
        params![row[0], row[1], row[2]],
    )?;
    Ok(())
}

/// Insert roster rows, skipping ids already present. Returns rows added.
pub fn provision(conn: &mut Connection, roster: &[RosterEntry]) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut added = 0;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT OR IGNORE INTO attendees (employee_id, name, table_no) VALUES (?1, ?2, ?3)",
        )?;
        for entry in roster {
            let id = entry.employee_id.trim();
            if id.is_empty() {
                continue;
            }
            added += stmt.execute(params![id, entry.name.trim(), entry.table_no.trim()])?;
        }
    }
    tx.commit()?;
    Ok(added)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n as usize)
}
