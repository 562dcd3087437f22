pub mod check;
pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod process;
pub mod serve;
pub mod settings;
pub mod status;
