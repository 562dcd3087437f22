pub mod cache;
pub mod engine;
pub mod gate;
pub mod guard;
pub mod kiosk;
pub mod log;

pub use kiosk::Kiosk;
