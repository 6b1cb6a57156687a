use crate::models::PefixSettings;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Raw result of a file picker invocation.
///
/// `files` holds native paths as the picker produced them. Relative entries
/// are meant to be resolved against `directory`. An empty `files` list means
/// the user cancelled or chose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub directory: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl Selection {
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Source of user-chosen files. Blocks until the user is done.
#[cfg_attr(test, mockall::automock)]
pub trait FilePicker {
    fn pick(&mut self) -> Selection;
}

/// Native multi-select file dialog.
#[derive(Debug, Clone)]
pub struct DialogPicker {
    title: String,
    filters: IndexMap<String, Vec<String>>,
    start_directory: Option<PathBuf>,
}

impl DialogPicker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filters: IndexMap::new(),
            start_directory: None,
        }
    }

    pub fn from_settings(settings: &PefixSettings) -> Self {
        let start_directory = if settings.start_directory.is_empty() {
            None
        } else {
            Some(PathBuf::from(&settings.start_directory))
        };

        Self {
            title: settings.dialog_title.clone(),
            filters: settings.dialog_filters.clone(),
            start_directory,
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, extensions: &[&str]) -> Self {
        self.filters.insert(
            name.into(),
            extensions.iter().map(|ext| ext.to_string()).collect(),
        );
        self
    }
}

impl FilePicker for DialogPicker {
    fn pick(&mut self) -> Selection {
        use rfd::FileDialog;

        let mut dialog = FileDialog::new().set_title(&self.title);

        for (name, extensions) in &self.filters {
            dialog = dialog.add_filter(name, extensions.as_slice());
        }

        if let Some(ref dir) = self.start_directory {
            dialog = dialog.set_directory(dir);
        }

        match dialog.pick_files() {
            Some(files) => {
                tracing::debug!("Dialog returned {} files", files.len());
                Selection {
                    directory: None,
                    files,
                }
            }
            None => {
                tracing::debug!("File dialog cancelled");
                Selection::cancelled()
            }
        }
    }
}

/// Picker over a fixed list of paths, e.g. from the command line.
///
/// Relative paths are resolved against `directory`. Paths that do not exist
/// are dropped with a warning. The list is handed out once; later calls
/// return an empty selection.
#[derive(Debug, Clone, Default)]
pub struct PathListPicker {
    directory: Option<PathBuf>,
    files: Vec<PathBuf>,
}

impl PathListPicker {
    pub fn new(directory: Option<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self { directory, files }
    }

    /// Resolve relative paths against the process working directory.
    pub fn from_current_dir(files: Vec<PathBuf>) -> Self {
        let directory = std::env::current_dir()
            .map_err(|e| tracing::warn!("Cannot read current directory: {}", e))
            .ok();
        Self::new(directory, files)
    }
}

impl FilePicker for PathListPicker {
    fn pick(&mut self) -> Selection {
        let directory = self.directory.clone();
        let files = std::mem::take(&mut self.files)
            .into_iter()
            .filter(|file| {
                let resolved = match directory {
                    Some(ref dir) if file.is_relative() => dir.join(file),
                    _ => file.clone(),
                };
                let exists = resolved.is_file();
                if !exists {
                    tracing::warn!("Ignoring missing file: {}", resolved.display());
                }
                exists
            })
            .collect();

        Selection { directory, files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_path_list_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.exe"), b"MZ").unwrap();

        let mut picker = PathListPicker::new(
            Some(temp_dir.path().to_path_buf()),
            vec![PathBuf::from("a.exe"), PathBuf::from("missing.exe")],
        );

        let selection = picker.pick();
        assert_eq!(selection.files, vec![PathBuf::from("a.exe")]);
        assert_eq!(selection.directory.as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_path_list_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("b.dll");
        fs::write(&file, b"MZ").unwrap();

        let mut picker = PathListPicker::new(Some(PathBuf::from("/elsewhere")), vec![file.clone()]);
        assert_eq!(picker.pick().files, vec![file]);
    }

    #[test]
    fn test_path_list_rejects_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut picker = PathListPicker::new(None, vec![temp_dir.path().to_path_buf()]);
        assert!(picker.pick().is_empty());
    }

    #[test]
    fn test_path_list_is_handed_out_once() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.exe");
        fs::write(&file, b"MZ").unwrap();

        let mut picker = PathListPicker::new(None, vec![file]);
        assert_eq!(picker.pick().files.len(), 1);
        assert!(picker.pick().is_empty());
    }

    #[test]
    fn test_dialog_picker_from_settings() {
        let mut settings = PefixSettings::default();
        settings.start_directory = "/games".to_string();

        let picker = DialogPicker::from_settings(&settings);
        assert_eq!(picker.title, "Select executables");
        assert_eq!(picker.start_directory, Some(PathBuf::from("/games")));
        assert!(picker.filters.contains_key("Executables"));
    }

    #[test]
    fn test_dialog_picker_builder() {
        let picker = DialogPicker::new("Pick").with_filter("Libraries", &["dll"]);
        assert_eq!(picker.filters.get("Libraries"), Some(&vec!["dll".to_string()]));
        assert!(picker.start_directory.is_none());
    }
}
