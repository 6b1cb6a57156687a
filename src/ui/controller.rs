// Console Controller - hosts a Session on a text terminal
//
// The controller stands in for the selection dialog window:
// - "select" and "process" triggers drive the Session
// - new log lines are printed as they appear
// - the "process" trigger follows ProcessingAvailability events

use crate::services::patcher::Patcher;
use crate::services::picker::{FilePicker, PathListPicker};
use crate::state::{Session, SessionEvent};
use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tokio::sync::broadcast::{self, error::TryRecvError};

const HELP_TEXT: &str = "\
Commands:
  select [PATH]...  add files (no paths opens the file dialog)
  process           patch every pending file
  clear             clear the log
  status            show pending files
  help              show this help
  quit              exit";

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Vec<PathBuf>),
    Process,
    Clear,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = split_words(line)?.into_iter();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "select" | "s" => Command::Select(words.map(PathBuf::from).collect()),
            "process" | "p" => Command::Process,
            "clear" => Command::Clear,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}', type 'help' for a list", other),
        };

        Ok(Some(command))
    }
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quote");
    }
    if has_word {
        words.push(current);
    }

    Ok(words)
}

/// Terminal host for a [`Session`]
///
/// Output goes to `out`: log lines as they are appended, plus command
/// feedback. The "process" trigger is enabled or disabled only from
/// [`SessionEvent::ProcessingAvailability`] events.
pub struct ConsoleController<P, W> {
    session: Session<P>,
    events: broadcast::Receiver<SessionEvent>,
    dialog: Box<dyn FilePicker>,
    base_dir: Option<PathBuf>,
    out: W,
    cursor: usize,
    process_enabled: bool,
}

impl<P: Patcher, W: Write> ConsoleController<P, W> {
    /// # Arguments
    /// * `session` - The session to drive
    /// * `dialog` - Picker used by `select` without paths
    /// * `out` - Transcript output (stdout in the binary)
    pub fn new(session: Session<P>, dialog: Box<dyn FilePicker>, out: W) -> Self {
        let events = session.subscribe();
        let process_enabled = session.is_processing_enabled();
        let cursor = session.log().len();

        tracing::debug!("Console controller initialized");

        Self {
            session,
            events,
            dialog,
            base_dir: None,
            out,
            cursor,
            process_enabled,
        }
    }

    /// Directory that relative paths typed at the prompt resolve against
    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn is_process_enabled(&self) -> bool {
        self.process_enabled
    }

    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    pub fn into_session(self) -> Session<P> {
        self.session
    }

    /// "select" trigger with an explicit picker
    pub fn select_with(&mut self, picker: &mut dyn FilePicker) -> Result<usize> {
        let count = self.session.select(picker);
        if count == 0 {
            tracing::debug!("Nothing selected");
        }
        self.refresh()?;
        Ok(count)
    }

    /// "select" trigger using the file dialog
    pub fn select_from_dialog(&mut self) -> Result<usize> {
        tracing::debug!("Opening file dialog");
        let count = self.session.select(self.dialog.as_mut());
        self.refresh()?;
        Ok(count)
    }

    /// "process" trigger. Does nothing while the trigger is disabled.
    pub fn process(&mut self) -> Result<usize> {
        if !self.process_enabled {
            writeln!(self.out, "Nothing to process. Select files first.")?;
            return Ok(0);
        }

        let attempted = self.session.process();
        self.refresh()?;
        Ok(attempted)
    }

    pub fn clear_log(&mut self) -> Result<()> {
        self.session.clear_log();
        self.refresh()
    }

    /// Run one command. Returns `false` when the loop should stop.
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        tracing::debug!("Console command: {:?}", command);

        match command {
            Command::Select(paths) if paths.is_empty() => {
                self.select_from_dialog()?;
            }
            Command::Select(paths) => {
                let mut picker = PathListPicker::new(self.base_dir.clone(), paths);
                self.select_with(&mut picker)?;
            }
            Command::Process => {
                self.process()?;
            }
            Command::Clear => self.clear_log()?,
            Command::Status => self.print_status()?,
            Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        tracing::info!("Starting interactive console");
        self.prompt()?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(self.out, "{}", e)?,
            }
            self.prompt()?;
        }

        tracing::info!("Interactive console finished");
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        let marker = if self.process_enabled { "ready" } else { "idle" };
        write!(self.out, "pefix [{}]> ", marker)?;
        self.out.flush()?;
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let pending = self.session.work_list();
        writeln!(self.out, "{} file(s) pending", pending.len())?;
        for path in pending {
            writeln!(self.out, "   {}", path)?;
        }
        Ok(())
    }

    /// Apply pending session events, then print log lines not yet shown.
    fn refresh(&mut self) -> Result<()> {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::ProcessingAvailability { enabled }) => {
                    self.process_enabled = enabled;
                }
                Ok(SessionEvent::LogCleared) => self.cursor = 0,
                Ok(event) => tracing::trace!("Session event: {:?}", event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} session events, resyncing", skipped);
                    self.process_enabled = self.session.is_processing_enabled();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        let log = self.session.log();
        if self.cursor > log.len() {
            self.cursor = 0;
        }
        for line in log.since(self.cursor) {
            writeln!(self.out, "{}", line)?;
        }
        self.cursor = log.len();
        self.out.flush()?;
        Ok(())
    }
}
