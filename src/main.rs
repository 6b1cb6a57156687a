//! PEFix - batch corrective patching of PE executables
//!
//! Main entry point for the command-line application.
//!
//! # Execution Flow
//!
//! 1. Parse the command line
//! 2. Load `PEFix Config.yaml` from the config directory (defaults if absent)
//! 3. Initialize logging → logs/pefix.<date>
//! 4. Build the external patcher and a [`Session`] around it
//! 5. Either select the given files (or open the file dialog) and process
//!    them once, or run the interactive console
//! 6. Write the metrics summary and exit
//!
//! Per-file failures are reported in the transcript only; the exit code
//! stays zero when a batch completes with failed files.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueHint};
use pefix::services::{DialogPicker, ExternalPatcher, PathListPicker};
use pefix::ui::ConsoleController;
use pefix::{APP_NAME, ConfigManager, Session, VERSION};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pefix", version, about = "Apply a corrective patch to PE executables in batch")]
struct Cli {
    /// Files to patch; relative paths resolve against the current directory
    #[arg(value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    /// Also open the file dialog to pick more files
    #[arg(long, action = ArgAction::SetTrue)]
    pick: bool,

    /// Start the interactive console instead of a single run
    #[arg(short, long, action = ArgAction::SetTrue)]
    interactive: bool,

    /// Patch tool to run, overriding the configured one
    #[arg(long, value_name = "PATH", value_hint = ValueHint::CommandName)]
    tool: Option<String>,

    /// Directory holding PEFix Config.yaml
    #[arg(long, value_name = "DIR", default_value = "PEFix Data")]
    config_dir: Utf8PathBuf,

    /// Directory for diagnostic log files
    #[arg(long, value_name = "DIR", default_value = "logs")]
    log_dir: String,

    /// Enable debug-level diagnostics on stderr and in the log file
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut user_config = config_manager.load_user_config()?;
    let settings = &mut user_config.settings;

    if let Some(tool) = cli.tool.clone() {
        settings.patch_tool = tool;
    }
    let debug_mode = cli.debug || settings.debug_mode;

    let _guard = pefix::logging::setup_logging_with_console(&cli.log_dir, "pefix", debug_mode, debug_mode)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Using configuration from {}", config_manager.config_dir());

    let patcher = ExternalPatcher::from_settings(settings).with_context(|| {
        format!(
            "Set 'Patch Tool' in {} or pass --tool",
            config_manager.user_config_path()
        )
    })?;
    tracing::info!("Patch tool: {}", patcher.tool());

    let session = Session::new(patcher);
    let dialog = Box::new(DialogPicker::from_settings(settings));
    let base_dir = std::env::current_dir().ok();

    let mut controller =
        ConsoleController::new(session, dialog, io::stdout()).with_base_dir(base_dir.clone());

    if !cli.files.is_empty() {
        let mut picker = PathListPicker::new(base_dir, cli.files.clone());
        controller.select_with(&mut picker)?;
    }

    if cli.interactive {
        if cli.pick {
            controller.select_from_dialog()?;
        }
        controller.run(io::stdin().lock())?;
    } else {
        if cli.pick || cli.files.is_empty() {
            controller.select_from_dialog()?;
        }

        if controller.is_process_enabled() {
            controller.process()?;
        } else {
            tracing::info!("No files selected, nothing to do");
        }
    }

    controller.session().metrics().log_summary();
    tracing::info!("Application shutdown complete");

    Ok(())
}
