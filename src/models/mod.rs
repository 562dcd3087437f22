pub mod attendee;
pub mod feedback;
pub mod log_entry;
pub mod mode;
pub mod roster;
pub mod settings;
