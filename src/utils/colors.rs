/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Attendee status color:
/// pending → grey, checked-in → green, checked-out → yellow
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "checked-in" => GREEN,
        "checked-out" => YELLOW,
        _ => GREY,
    }
}

/// Returns a grey "--" placeholder for empty fields.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

/// Journal operation color.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "check-in" => GREEN,
        "check-out" => YELLOW,
        "settings" => CYAN,
        "import" | "init" | "migration_applied" => MAGENTA,
        _ => RESET,
    }
}
