// PEFix - batch corrective patching of PE executables
//
// This is the library crate containing the session core and its services.
// The binary crate (main.rs) provides the command-line entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{FilePath, PefixSettings, UserConfig, WorkList};
pub use services::{ExternalPatcher, FilePicker, PatchError, Patcher, Selection};
pub use state::{LogSink, Session, SessionEvent, SessionState};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
