use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_attendees",
        description: "Created attendees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendees (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id        TEXT NOT NULL UNIQUE COLLATE NOCASE,
            name               TEXT NOT NULL,
            table_no           TEXT NOT NULL DEFAULT '',
            check_in_time      TEXT NOT NULL DEFAULT '',
            check_out_time     TEXT NOT NULL DEFAULT '',
            device_fingerprint TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_attendees_name ON attendees(name COLLATE NOCASE);
        "#,
    },
    Migration {
        version: "20250301_0002_unique_device",
        description: "One bound fingerprint per device",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendees_device
            ON attendees(device_fingerprint)
            WHERE device_fingerprint <> '';
        "#,
    },
    Migration {
        version: "20250301_0003_create_settings",
        description: "Created settings table with defaults",
        sql: r#"
        CREATE TABLE IF NOT EXISTS settings (
            id          INTEGER PRIMARY KEY CHECK(id = 1),
            mode        TEXT NOT NULL DEFAULT 'Check-in',
            start_time  TEXT NOT NULL DEFAULT '09:00',
            end_time    TEXT NOT NULL DEFAULT '17:00'
        );

        INSERT OR IGNORE INTO settings (id) VALUES (1);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch(m.sql)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;

        success(format!("Migration applied: {}", m.version));
        applied += 1;
    }

    Ok(applied)
}
