use crate::models::{FILE_PLACEHOLDER, FilePath, PefixSettings};
use crate::services::text::{NativeText, single_line};
use std::process::{Command, Output, Stdio};
use std::time::Instant;
use thiserror::Error;

/// Failure of a single patch attempt.
///
/// The `Display` output is the diagnostic written to the log after the
/// `error: ` prefix.
#[derive(Error, Debug)]
pub enum PatchError {
    /// The patcher ran and refused or failed to fix the file
    #[error("{0}")]
    Rejected(String),

    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("patch tool terminated without an exit code")]
    Terminated,
}

/// Errors building a patcher from configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatcherConfigError {
    #[error("patch tool not configured")]
    ToolNotConfigured,

    #[error("unknown message encoding '{0}'")]
    UnknownEncoding(String),
}

/// Repairs one file at a time.
///
/// Implementations run synchronously and report failure through the
/// returned error; they must not panic.
#[cfg_attr(test, mockall::automock)]
pub trait Patcher {
    fn patch(&mut self, path: &FilePath) -> Result<(), PatchError>;
}

impl<P: Patcher + ?Sized> Patcher for Box<P> {
    fn patch(&mut self, path: &FilePath) -> Result<(), PatchError> {
        (**self).patch(path)
    }
}

/// Patcher that runs an external patch tool once per file.
///
/// Exit code 0 means the file was fixed. Any other exit code is a failure
/// whose message is the tool's stderr (or stdout when stderr is empty),
/// decoded with the configured encoding and folded into a single line.
#[derive(Debug, Clone)]
pub struct ExternalPatcher {
    tool: String,
    args: Vec<String>,
    text: NativeText,
}

impl ExternalPatcher {
    pub fn new(
        tool: impl Into<String>,
        args: Vec<String>,
        text: NativeText,
    ) -> Result<Self, PatcherConfigError> {
        let tool = tool.into();
        if tool.trim().is_empty() {
            return Err(PatcherConfigError::ToolNotConfigured);
        }

        Ok(Self { tool, args, text })
    }

    pub fn from_settings(settings: &PefixSettings) -> Result<Self, PatcherConfigError> {
        let text = NativeText::for_label(&settings.message_encoding).ok_or_else(|| {
            PatcherConfigError::UnknownEncoding(settings.message_encoding.clone())
        })?;

        Self::new(
            settings.patch_tool.trim(),
            settings.patch_tool_args.clone(),
            text,
        )
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Build the argument list for one file.
    ///
    /// Every `{file}` occurrence is replaced by the path; when no argument
    /// mentions `{file}` the path is appended as the last argument.
    pub fn build_args(&self, path: &FilePath) -> Vec<String> {
        let mut has_placeholder = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(FILE_PLACEHOLDER) {
                    has_placeholder = true;
                    arg.replace(FILE_PLACEHOLDER, path.as_str())
                } else {
                    arg.clone()
                }
            })
            .collect();

        if !has_placeholder {
            args.push(path.as_str().to_string());
        }

        args
    }

    fn failure_message(&self, output: &Output, code: i32) -> String {
        let stderr = single_line(&self.text.decode(&output.stderr));
        if !stderr.is_empty() {
            return stderr;
        }

        let stdout = single_line(&self.text.decode(&output.stdout));
        if !stdout.is_empty() {
            return stdout;
        }

        format!("patch tool exited with code {}", code)
    }
}

impl Patcher for ExternalPatcher {
    fn patch(&mut self, path: &FilePath) -> Result<(), PatchError> {
        let args = self.build_args(path);
        tracing::debug!("Executing: {} {:?}", self.tool, args);

        let start = Instant::now();

        let output = Command::new(&self.tool)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| PatchError::Launch {
                tool: self.tool.clone(),
                source,
            })?;

        let Some(code) = output.status.code() else {
            tracing::warn!("Patch tool terminated by signal while fixing {}", path);
            return Err(PatchError::Terminated);
        };

        tracing::info!(
            "Patch tool finished {} in {:.2}s with exit code {}",
            path,
            start.elapsed().as_secs_f32(),
            code
        );

        if code == 0 {
            Ok(())
        } else {
            Err(PatchError::Rejected(self.failure_message(&output, code)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patcher(args: &[&str]) -> ExternalPatcher {
        ExternalPatcher::new(
            "pelinkfix",
            args.iter().map(|a| a.to_string()).collect(),
            NativeText::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_build_args_placeholder() {
        let patcher = patcher(&["--fix-imports", "{file}"]);
        let args = patcher.build_args(&FilePath::from("/tmp/a.exe"));
        assert_eq!(args, vec!["--fix-imports", "/tmp/a.exe"]);
    }

    #[test]
    fn test_build_args_placeholder_inside_argument() {
        let patcher = patcher(&["--input={file}", "--backup={file}.bak"]);
        let args = patcher.build_args(&FilePath::from("/tmp/a.exe"));
        assert_eq!(args, vec!["--input=/tmp/a.exe", "--backup=/tmp/a.exe.bak"]);
    }

    #[test]
    fn test_build_args_appends_path() {
        let patcher = patcher(&["--quiet"]);
        let args = patcher.build_args(&FilePath::from("/tmp/My App.exe"));
        assert_eq!(args, vec!["--quiet", "/tmp/My App.exe"]);
    }

    #[test]
    fn test_empty_tool_rejected() {
        let err = ExternalPatcher::new("  ", Vec::new(), NativeText::default()).unwrap_err();
        assert_eq!(err, PatcherConfigError::ToolNotConfigured);
    }

    #[test]
    fn test_from_settings_unknown_encoding() {
        let settings = PefixSettings {
            patch_tool: "pelinkfix".to_string(),
            message_encoding: "klingon".to_string(),
            ..PefixSettings::default()
        };

        let err = ExternalPatcher::from_settings(&settings).unwrap_err();
        assert_eq!(err, PatcherConfigError::UnknownEncoding("klingon".to_string()));
    }

    #[test]
    fn test_from_settings_trims_tool() {
        let settings = PefixSettings {
            patch_tool: " pelinkfix ".to_string(),
            ..PefixSettings::default()
        };

        let patcher = ExternalPatcher::from_settings(&settings).unwrap();
        assert_eq!(patcher.tool(), "pelinkfix");
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let mut patcher = ExternalPatcher::new(
            "/nonexistent/pefix-test-tool",
            Vec::new(),
            NativeText::default(),
        )
        .unwrap();

        let err = patcher.patch(&FilePath::from("/tmp/a.exe")).unwrap_err();
        assert!(matches!(err, PatchError::Launch { .. }));
        assert!(err.to_string().contains("/nonexistent/pefix-test-tool"));
    }

    #[test]
    fn test_rejected_display_is_message() {
        let err = PatchError::Rejected("bad header".to_string());
        assert_eq!(err.to_string(), "bad header");
    }
}
